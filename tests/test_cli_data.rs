//! Integration test: loading country data and configuration from disk

use culture_map::cli::{build_pipeline, cmd_distances, cmd_embed, cmd_report};
use culture_map::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const COUNTRIES_JSON: &str = r#"[
    {"title": "Japan", "pdi": 54, "idv": 46, "mas": 95, "uai": 92, "lto": 88, "ind": 42, "ivr": 42, "adjective": "Japanese"},
    {"title": "Brazil", "pdi": 69, "idv": 38, "mas": 49, "uai": 76, "lto": 44, "ind": 59, "ivr": 59},
    {"title": "Denmark", "pdi": 18, "idv": 74, "mas": 16, "uai": 23, "lto": 35, "ind": 70, "ivr": 70},
    {"title": "India", "pdi": 77, "idv": 48, "mas": 56, "uai": 40, "lto": 51, "ind": 26, "ivr": 26}
]"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_countries_from_file() {
    let file = write_temp(COUNTRIES_JSON);
    let countries = load_countries(file.path()).unwrap();
    assert_eq!(countries.len(), 4);
    assert_eq!(countries[0].title, "Japan");
    assert_eq!(countries[0].score(Dimension::Mas), 95.0);
    assert_eq!(countries[3].score(Dimension::Ivr), 26.0);
}

#[test]
fn test_missing_dimension_is_rejected() {
    let file = write_temp(r#"[{"title": "Nowhere", "pdi": 1, "idv": 2, "mas": 3, "uai": 4, "lto": 5, "ind": 6}]"#);
    let err = load_countries(file.path()).unwrap_err();
    assert!(matches!(err, CultureMapError::InvalidInput(_)), "got {:?}", err);
}

#[test]
fn test_non_numeric_score_is_rejected() {
    let err = parse_countries(
        r#"[{"title": "X", "pdi": "high", "idv": 2, "mas": 3, "uai": 4, "lto": 5, "ind": 6, "ivr": 7}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, CultureMapError::InvalidInput(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_countries(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CultureMapError::IoError(_)));
}

#[test]
fn test_pipeline_config_from_file() {
    let file = write_temp(
        r#"{"cache_capacity": 8, "default_metric": "Manhattan", "default_algorithm": "Mds", "embedding": {"random_state": 7}}"#,
    );
    let config = PipelineConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.cache_capacity, 8);
    assert_eq!(config.default_metric, DistanceMetric::Manhattan);
    assert_eq!(config.default_algorithm, EmbeddingAlgorithm::Mds);
    assert_eq!(config.embedding.random_state, 7);
    assert_eq!(config.cache_ttl_secs, None);
}

#[test]
fn test_invalid_config_file() {
    let file = write_temp(r#"{"cache_capacity": 0}"#);
    let err = PipelineConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, CultureMapError::ConfigError(_)));

    let file = write_temp(r#"{"default_metric": "Chebyshev"}"#);
    let err = PipelineConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, CultureMapError::ConfigError(_)));
}

#[test]
fn test_build_pipeline_applies_seed_override() {
    let file = write_temp(r#"{"embedding": {"random_state": 7}}"#);
    let map = build_pipeline(Some(file.path()), None).unwrap();
    assert_eq!(map.config().embedding.random_state, 7);

    let map = build_pipeline(Some(file.path()), Some(99)).unwrap();
    assert_eq!(map.config().embedding.random_state, 99);

    let map = build_pipeline(None, None).unwrap();
    assert_eq!(map.config(), &PipelineConfig::default());
}

#[test]
fn test_commands_run_on_file() {
    let file = write_temp(COUNTRIES_JSON);
    let map = build_pipeline(None, None).unwrap();

    cmd_distances(&map, file.path(), Some("correlation"), true, true).unwrap();
    cmd_embed(&map, file.path(), Some("umap"), true).unwrap();
    cmd_report(&map, file.path(), None, None).unwrap();

    // One memoized entry per metric
    assert_eq!(map.cache_stats().distances.entries, 2);
}

#[test]
fn test_commands_reject_unknown_names() {
    let file = write_temp(COUNTRIES_JSON);
    let map = build_pipeline(None, None).unwrap();
    assert!(cmd_distances(&map, file.path(), Some("hamming"), false, false).is_err());
    assert!(cmd_embed(&map, file.path(), Some("isomap"), false).is_err());
}
