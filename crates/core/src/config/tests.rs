use super::*;
use pretty_assertions::assert_eq;

#[test]
fn defaults_are_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.matching.similarity_threshold, 80);
    assert_eq!(config.matching.low_match_floor, 50);
    assert_eq!(config.matching.min_confidence_for_action, 60);
    assert!((config.matching.price_tolerance - 0.01).abs() < 1e-12);
    assert_eq!(config.catalog.page_size, 100);
    assert_eq!(config.server.port, 3000);
}

#[test]
fn partial_toml_fills_defaults() {
    let config = Config::from_toml_str(
        r#"
        [matching]
        similarity_threshold = 75

        [catalog]
        base_url = "https://shop.example/api"
        "#,
    )
    .expect("parse");

    assert_eq!(config.matching.similarity_threshold, 75);
    // Untouched fields keep their defaults
    assert_eq!(config.matching.low_match_floor, 50);
    assert_eq!(config.catalog.base_url, "https://shop.example/api");
    assert_eq!(config.catalog.page_size, 100);
    assert_eq!(config.ingest.default_status, 1);
}

#[test]
fn save_and_reload_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.matching.similarity_threshold = 85;
    config.catalog.page_size = 250;
    config.save(&path).expect("save");

    let content = std::fs::read_to_string(&path).expect("read");
    let reloaded = Config::from_toml_str(&content).expect("reload");
    assert_eq!(reloaded.matching.similarity_threshold, 85);
    assert_eq!(reloaded.catalog.page_size, 250);
}

#[test]
fn floor_above_threshold_is_rejected() {
    let mut config = Config::default();
    config.matching.low_match_floor = 90;
    config.matching.similarity_threshold = 80;
    assert!(config.validate().is_err());
}

#[test]
fn unknown_catalog_provider_is_rejected() {
    let mut config = Config::default();
    config.catalog.provider = "soap".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn zero_page_size_is_rejected() {
    let mut config = Config::default();
    config.catalog.page_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn negative_price_tolerance_is_rejected() {
    let mut config = Config::default();
    config.matching.price_tolerance = -0.5;
    assert!(config.validate().is_err());
}

#[test]
fn auth_token_is_redacted_in_debug() {
    let mut config = Config::default();
    config.catalog.auth_token = Some("c2VjcmV0".to_string());
    let rendered = format!("{:?}", config.catalog);
    assert!(rendered.contains("REDACTED"));
    assert!(!rendered.contains("c2VjcmV0"));
}
