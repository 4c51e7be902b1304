use std::path::Path;

use codepad::config::{Config, Language};

use super::fixture_config;

#[test]
fn test_load_valid_full_config() {
    let config = Config::from_file(fixture_config("valid_full.toml")).expect("Failed to load config");

    assert_eq!(config.service.url, "http://127.0.0.1:8080/execute");
    assert_eq!(config.service.timeout_secs, 15);
    assert_eq!(config.editor.default_language, Language::Javascript);
    assert_eq!(config.save.base_name, "snippet");

    let registry = config.registry();
    assert_eq!(registry.token_of(Language::Python), "python3");
    assert_eq!(registry.extension_of(Language::CCpp).as_str(), "cc");
    assert_eq!(registry.token_of(Language::Java), "java");
}

#[test]
fn test_load_minimal_config() {
    let config =
        Config::from_file(fixture_config("valid_minimal.toml")).expect("Failed to load config");

    assert_eq!(config.service.url, "http://127.0.0.1:8080/execute");
    assert_eq!(config.service.timeout_secs, 60);
    assert_eq!(config.editor.theme, "monokai");
}

#[test]
fn test_layered_load_keeps_defaults_for_missing_sections() {
    let path = fixture_config("valid_minimal.toml");
    let config = Config::load_with_env(Some(Path::new(&path)), Some(Default::default()))
        .expect("Failed to load config");

    assert_eq!(config.service.url, "http://127.0.0.1:8080/execute");
    assert_eq!(config.save.base_name, "saved-code");
}

#[test]
fn test_load_invalid_extension() {
    assert!(Config::from_file(fixture_config("invalid_extension.toml")).is_err());
}

#[test]
fn test_load_invalid_language() {
    assert!(Config::from_file(fixture_config("invalid_language.toml")).is_err());
}

#[test]
fn test_load_invalid_empty_url() {
    assert!(Config::from_file(fixture_config("invalid_empty_url.toml")).is_err());
}
