use assert_cmd::Command;
use corpus_embed::data::store::EmbeddingMatrix;
use ndarray::array;
use predicates::prelude::*;

fn corpus_embed() -> Command {
    let mut cmd = Command::cargo_bin("corpus-embed").expect("binary exists");
    cmd.env("RUST_LOG", "error");
    cmd
}

fn fixture(dir: &std::path::Path, lines: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let input = dir.join("pets.txt");
    std::fs::write(&input, lines).unwrap();
    let embeddings = dir.join("pets.parquet");
    EmbeddingMatrix::new(
        "stub",
        array![[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [2.0, 0.1, 0.0]],
    )
    .save(&embeddings)
    .unwrap();
    (input, embeddings)
}

#[test]
fn cli_help_runs() {
    corpus_embed().arg("--help").assert().success();
}

#[test]
fn missing_input_is_rejected_up_front() {
    corpus_embed()
        .args(["generate", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn clusters_prints_groups_in_first_seen_order() {
    let dir = tempfile::tempdir().unwrap();
    let (input, embeddings) = fixture(dir.path(), "cat\ndog\nkitten\n");

    corpus_embed()
        .arg("clusters")
        .arg(&input)
        .arg(&embeddings)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Clusters:"))
        .stdout(predicate::str::contains(
            "Cluster 1:\n - cat\n - kitten\n",
        ))
        .stdout(predicate::str::contains("Cluster 2:\n - dog\n"));
}

#[test]
fn clusters_renders_json() {
    let dir = tempfile::tempdir().unwrap();
    let (input, embeddings) = fixture(dir.path(), "cat\ndog\nkitten\n");

    let output = corpus_embed()
        .arg("clusters")
        .arg(&input)
        .arg(&embeddings)
        .args(["--format", "json", "--linkage", "single"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["linkage"], "single");
    assert_eq!(value["clusters"][0][1], "kitten");
    assert_eq!(value["clusters"].as_array().map(Vec::len), Some(2));
}

#[test]
fn misaligned_corpus_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let (input, embeddings) = fixture(dir.path(), "cat\ndog\n");

    corpus_embed()
        .arg("clusters")
        .arg(&input)
        .arg(&embeddings)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("corpus has 2 lines"));
}

#[test]
fn unknown_model_fails_smoke_test() {
    corpus_embed()
        .args(["test", "definitely-not-a-model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown embedding model"));
}
