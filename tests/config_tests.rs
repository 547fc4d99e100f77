//! Configuration loading from disk

use std::io::Write;
use tempfile::NamedTempFile;
use treaty_links::cli::Cli;
use treaty_links::config::AppConfig;
use treaty_links::core::error::{ConfigError, TreatyError};
use treaty_links::core::link::LinkIntegrity;

use clap::Parser;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
server:
  host: 0.0.0.0
  port: 8088
  api_prefix: /treaty
store:
  link_integrity: strict
  seed_sample_data: false
logging:
  filter: debug
"#,
    );

    let config = AppConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.bind_address().unwrap().to_string(), "0.0.0.0:8088");
    assert_eq!(config.server.api_prefix, "/treaty");
    assert_eq!(config.store.link_integrity, LinkIntegrity::Strict);
    assert!(!config.store.seed_sample_data);
    assert_eq!(config.logging.filter, "debug");
}

#[test]
fn test_shipped_config_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/treaty-links.yaml");
    let config = AppConfig::from_yaml_file(path).unwrap();
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.store.link_integrity, LinkIntegrity::Permissive);
}

#[test]
fn test_missing_file() {
    let err = AppConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(
        err,
        TreatyError::Config(ConfigError::FileNotFound { .. })
    ));
}

#[test]
fn test_malformed_yaml_names_the_file() {
    let file = write_config("server: [unclosed");
    let err = AppConfig::from_yaml_file(file.path()).unwrap_err();

    match err {
        TreatyError::Config(ConfigError::ParseError { file: Some(name), .. }) => {
            assert_eq!(name, file.path().display().to_string());
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unknown_integrity_mode_rejected() {
    let file = write_config("store:\n  link_integrity: lenient\n");
    assert!(AppConfig::from_yaml_file(file.path()).is_err());
}

#[test]
fn test_invalid_host_rejected() {
    let file = write_config("server:\n  host: not-an-ip\n");
    let err = AppConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        TreatyError::Config(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_cli_flags_override_file() {
    let file = write_config("server:\n  port: 7000\nstore:\n  seed_sample_data: true\n");
    let path = file.path().to_str().unwrap();

    let cli = Cli::parse_from([
        "treaty-links",
        "--config",
        path,
        "--strict",
        "--bind",
        "127.0.0.1:7100",
    ]);
    let config = cli.resolve_config().unwrap();

    assert_eq!(config.server.port, 7100);
    assert_eq!(config.store.link_integrity, LinkIntegrity::Strict);
    assert!(config.store.seed_sample_data);
}
