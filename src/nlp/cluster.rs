//! Agglomerative clustering of embedding rows via `kodama`.

use clap::ValueEnum;
use indexmap::IndexMap;
use kodama::Method;
use ndarray::{ArrayView1, ArrayView2};
use serde::Serialize;

use crate::config::DEFAULT_CLUSTER_THRESHOLD;

/// Distance between clusters used when deciding the next merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Minimise the increase in within-cluster variance.
    #[default]
    Ward,
    /// Mean pairwise distance.
    Average,
    /// Largest pairwise distance.
    Complete,
    /// Smallest pairwise distance.
    Single,
}

impl From<Linkage> for Method {
    fn from(linkage: Linkage) -> Self {
        match linkage {
            Linkage::Ward => Method::Ward,
            Linkage::Average => Method::Average,
            Linkage::Complete => Method::Complete,
            Linkage::Single => Method::Single,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterParams {
    /// Clusters at or above this linkage distance are never merged.
    pub threshold: f64,
    pub linkage: Linkage,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CLUSTER_THRESHOLD,
            linkage: Linkage::default(),
        }
    }
}

/// Assign a cluster id to every row of `vectors`.
///
/// There is no target cluster count: merging continues while the linkage
/// distance stays below `params.threshold`. Ids are dense and numbered in the
/// order their first member appears.
pub fn agglomerative(vectors: ArrayView2<'_, f32>, params: &ClusterParams) -> Vec<usize> {
    let observations = vectors.nrows();
    if observations < 2 {
        return vec![0; observations];
    }

    let mut condensed = Vec::with_capacity(observations * (observations - 1) / 2);
    for i in 0..observations {
        for j in (i + 1)..observations {
            condensed.push(euclidean(vectors.row(i), vectors.row(j)));
        }
    }

    let dendrogram = kodama::linkage(&mut condensed, observations, params.linkage.into());

    // Step `k` of the dendrogram creates node `observations + k`.
    let mut forest = DisjointSet::new(observations * 2 - 1);
    for (step_index, step) in dendrogram.steps().iter().enumerate() {
        if step.dissimilarity < params.threshold {
            let node = observations + step_index;
            forest.union(step.cluster1, node);
            forest.union(step.cluster2, node);
        }
    }

    let mut ids = IndexMap::new();
    (0..observations)
        .map(|observation| {
            let root = forest.find(observation);
            let next = ids.len();
            *ids.entry(root).or_insert(next)
        })
        .collect()
}

/// Group `items` by `assignment`, keeping first-seen cluster order and item order.
pub fn group_by_cluster<T: Clone>(assignment: &[usize], items: &[T]) -> Vec<Vec<T>> {
    let mut groups: IndexMap<usize, Vec<T>> = IndexMap::new();
    for (&cluster, item) in assignment.iter().zip(items) {
        groups.entry(cluster).or_default().push(item.clone());
    }
    groups.into_values().collect()
}

fn euclidean(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = f64::from(*x) - f64::from(*y);
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a != root_b {
            self.parent[root_b] = root_a;
        }
    }
}
