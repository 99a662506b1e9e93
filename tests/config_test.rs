// tests/config_test.rs
use reflex::config::{load_config, Config, IdentityConfig};
use reflex::ReflexError;
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.production_branch, "main");
    assert_eq!(config.development_branches, vec!["develop".to_string()]);
    assert!(config.identity.is_none());
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
production_branch = "master"
development_branches = ["develop", "develop-2"]

[identity]
name = "Release Bot"
email = "release@example.com"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.production_branch, "master");
    assert_eq!(config.development_branches, vec!["develop", "develop-2"]);
    assert_eq!(
        config.identity,
        Some(IdentityConfig {
            name: "Release Bot".to_string(),
            email: "release@example.com".to_string(),
        })
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_empty_file_uses_defaults() {
    let temp_file = NamedTempFile::new().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_missing_custom_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    let result = load_config(Some(missing.to_str().unwrap()));
    assert!(matches!(result, Err(ReflexError::Config(_))));
}

#[test]
fn test_load_malformed_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"production_branch = [\"main\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path().to_str().unwrap()));
    match result {
        Err(err) => assert!(err.to_string().starts_with("Configuration error")),
        Ok(config) => panic!("expected parse error, got {:?}", config),
    }
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("reflex.toml"),
        "development_branches = [\"next\"]\n",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    std::env::set_current_dir(original).unwrap();

    let config = result.unwrap();
    assert_eq!(config.production_branch, "main");
    assert_eq!(config.development_branches, vec!["next"]);
}

#[test]
#[serial]
fn test_custom_path_wins_over_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("reflex.toml"), "production_branch = \"cwd\"\n").unwrap();
    let custom = dir.path().join("custom.toml");
    std::fs::write(&custom, "production_branch = \"custom\"\n").unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(Some(custom.to_str().unwrap()));
    std::env::set_current_dir(original).unwrap();

    assert_eq!(result.unwrap().production_branch, "custom");
}

#[test]
fn test_overrides_apply_on_top_of_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"production_branch = \"master\"\ndevelopment_branches = [\"develop\"]\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap()))
        .unwrap()
        .with_overrides(None, vec!["develop-2".to_string()]);

    assert_eq!(config.production_branch, "master");
    assert_eq!(config.primary_development_branch().unwrap(), "develop-2");
}

#[test]
fn test_validate_rejects_production_as_development() {
    let config = Config::default().with_overrides(
        Some("develop".to_string()),
        Vec::new(),
    );

    match config.validate() {
        Err(ReflexError::Config(message)) => assert!(message.contains("develop")),
        other => panic!("unexpected result: {:?}", other),
    }
}
