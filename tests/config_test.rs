// 設定読み込みとマージのテスト

use migverify::core::config::{Config, RunSettings, SettingsOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_returns_defaults_when_config_absent() {
    let temp_dir = TempDir::new().unwrap();

    let config = Config::load(temp_dir.path()).unwrap();

    assert!(config.dsn.is_none());
    assert!(config.runner.is_none());
}

#[test]
fn test_load_reads_yaml_config() {
    let temp_dir = TempDir::new().unwrap();
    let yaml = "dsn: prod_dsn\ndatabase: prod.db\nmigrations_dir: db/migrations\nrunner:\n  - cargo\n  - run\n  - --quiet\n  - --\n";
    fs::write(temp_dir.path().join(Config::DEFAULT_CONFIG_PATH), yaml).unwrap();

    let config = Config::load(temp_dir.path()).unwrap();

    assert_eq!(config.dsn.as_deref(), Some("prod_dsn"));
    assert_eq!(config.database, Some(PathBuf::from("prod.db")));
    assert_eq!(config.migrations_dir, Some(PathBuf::from("db/migrations")));
    assert_eq!(
        config.runner,
        Some(vec![
            "cargo".to_string(),
            "run".to_string(),
            "--quiet".to_string(),
            "--".to_string(),
        ])
    );
}

#[test]
fn test_load_rejects_malformed_yaml() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(Config::DEFAULT_CONFIG_PATH),
        "dsn: [unclosed",
    )
    .unwrap();

    assert!(Config::load(temp_dir.path()).is_err());
}

#[test]
fn test_resolve_precedence_cli_config_default() {
    let config = Config {
        dsn: Some("config_dsn".to_string()),
        dump_file: Some(PathBuf::from("config_dump.sql")),
        ..Config::default()
    };
    let overrides = SettingsOverrides {
        dump_file: Some(PathBuf::from("cli_dump.sql")),
        ..SettingsOverrides::default()
    };

    let settings = RunSettings::resolve(&config, overrides).unwrap();

    // CLIフラグ > 設定ファイル > デフォルト
    assert_eq!(settings.dump_file, PathBuf::from("cli_dump.sql"));
    assert_eq!(settings.dsn, "config_dsn");
    assert_eq!(settings.database, PathBuf::from("test.db"));
}
