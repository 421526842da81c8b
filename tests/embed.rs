use corpus_embed::{
    config::{Settings, DEFAULT_MODEL},
    data::{corpus::Corpus, store::EmbeddingMatrix},
    error::EmbedError,
    nlp::{
        self,
        embeddings::{resolve_model, FastEmbedder},
        search::SearchParams,
    },
};

#[test]
fn default_model_is_in_catalogue() {
    let resolved = resolve_model(DEFAULT_MODEL).unwrap();
    assert_eq!(resolved.dimension, 768);
    assert!(resolved.code.ends_with("all-mpnet-base-v2"));
}

#[test]
fn model_resolves_by_code_or_variant_name() {
    let by_name = resolve_model("ALL-MPNET-BASE-V2").unwrap();
    let by_code = resolve_model(&by_name.code).unwrap();
    let by_variant = resolve_model("AllMpnetBaseV2").unwrap();
    assert_eq!(by_code.code, by_name.code);
    assert_eq!(by_variant.code, by_name.code);
}

#[test]
fn unknown_model_is_rejected() {
    assert!(matches!(
        resolve_model("no-such-model"),
        Err(EmbedError::UnknownModel(name)) if name == "no-such-model"
    ));
}

#[test]
#[ignore = "downloads all-mpnet-base-v2 weights"]
fn feline_query_finds_cat() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pets.txt");
    std::fs::write(&input, "cat\ndog\ncar\n").unwrap();

    let settings = Settings::default();
    let mut embedder = FastEmbedder::from_settings(&settings).unwrap();
    let report = nlp::generate_embeddings(&mut embedder, &input).unwrap();
    assert!(report.output.exists());

    let corpus = Corpus::load(&input).unwrap();
    let matrix = EmbeddingMatrix::load(&report.output).unwrap();
    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix.dimension(), 768);

    let outcome = nlp::query_corpus(
        &mut embedder,
        &corpus,
        &matrix,
        "feline",
        &SearchParams::default(),
    )
    .unwrap();
    let top: Vec<&str> = outcome
        .matches
        .iter()
        .take(2)
        .map(|hit| hit.sentence.as_str())
        .collect();
    assert!(top.contains(&"cat"), "top matches were {top:?}");
}
