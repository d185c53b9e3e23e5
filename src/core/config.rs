// 設定ファイル管理
//
// 検証ランの設定（YAML形式、省略可能）の読み込みと、
// 組み込みデフォルト・設定ファイル・CLIフラグのマージを行います。
// 優先順位: CLIフラグ > migverify.yaml > 組み込みデフォルト

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// プロジェクト設定（migverify.yaml）
///
/// 全フィールド省略可能。省略されたフィールドは組み込みデフォルトにフォールバックする。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 外部マイグレーションツールが接続に使用するDSN名
    pub dsn: Option<String>,

    /// 対象SQLiteデータベースファイル
    pub database: Option<PathBuf>,

    /// マイグレーションディレクトリ
    pub migrations_dir: Option<PathBuf>,

    /// スキーマダンプアーティファクトの出力先
    pub dump_file: Option<PathBuf>,

    /// 外部マイグレーションツールの起動コマンド（先頭が実行ファイル、残りが前置引数）
    pub runner: Option<Vec<String>>,

    /// 名前付き接続レジストリ（odbc.ini形式）のパス
    pub odbc_ini: Option<PathBuf>,
}

impl Config {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = "migverify.yaml";

    /// プロジェクトルートから設定を読み込む
    ///
    /// 設定ファイルが存在しない場合はデフォルト設定を返す（設定ファイルは任意）。
    pub fn load(project_path: &Path) -> Result<Self> {
        let config_path = project_path.join(Self::DEFAULT_CONFIG_PATH);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        let config: Config = serde_saphyr::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        Ok(config)
    }
}

/// CLIフラグによる上書き
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub dsn: Option<String>,
    pub database: Option<PathBuf>,
    pub migrations_dir: Option<PathBuf>,
    pub dump_file: Option<PathBuf>,
    pub runner: Option<Vec<String>>,
    pub odbc_ini: Option<PathBuf>,
}

/// 確定したラン設定
///
/// デフォルト・設定ファイル・CLIフラグをマージした結果。ラン中は不変。
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// DSN名
    pub dsn: String,
    /// 対象データベースファイル
    pub database: PathBuf,
    /// マイグレーションディレクトリ
    pub migrations_dir: PathBuf,
    /// スキーマダンプの出力先
    pub dump_file: PathBuf,
    /// 外部ツールの起動コマンド
    pub runner: Vec<String>,
    /// 名前付き接続レジストリのパス
    pub odbc_ini: PathBuf,
}

impl RunSettings {
    pub const DEFAULT_DSN: &'static str = "test_sqlite_test";
    pub const DEFAULT_DATABASE: &'static str = "test.db";
    pub const DEFAULT_MIGRATIONS_DIR: &'static str = "migrations";
    pub const DEFAULT_DUMP_FILE: &'static str = "schema_dump.sql";
    pub const DEFAULT_RUNNER: &'static str = "deriddl";

    /// 設定をマージしてラン設定を確定する
    ///
    /// # Arguments
    ///
    /// * `config` - 設定ファイルの内容（存在しない場合はデフォルト）
    /// * `overrides` - CLIフラグによる上書き
    pub fn resolve(config: &Config, overrides: SettingsOverrides) -> Result<Self> {
        let runner = overrides
            .runner
            .or_else(|| config.runner.clone())
            .unwrap_or_else(|| vec![Self::DEFAULT_RUNNER.to_string()]);
        if runner.is_empty() || runner[0].trim().is_empty() {
            return Err(anyhow!("Migration runner command must not be empty"));
        }

        Ok(Self {
            dsn: overrides
                .dsn
                .or_else(|| config.dsn.clone())
                .unwrap_or_else(|| Self::DEFAULT_DSN.to_string()),
            database: overrides
                .database
                .or_else(|| config.database.clone())
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DATABASE)),
            migrations_dir: overrides
                .migrations_dir
                .or_else(|| config.migrations_dir.clone())
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_MIGRATIONS_DIR)),
            dump_file: overrides
                .dump_file
                .or_else(|| config.dump_file.clone())
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DUMP_FILE)),
            runner,
            odbc_ini: overrides
                .odbc_ini
                .or_else(|| config.odbc_ini.clone())
                .unwrap_or_else(default_odbc_ini),
        })
    }

    /// 外部ツールへ渡す接続記述子
    pub fn connection_descriptor(&self) -> String {
        format!("DSN={};", self.dsn)
    }
}

/// 名前付き接続レジストリのデフォルトパス（~/.odbc.ini）
fn default_odbc_ini() -> PathBuf {
    env::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".odbc.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let settings = RunSettings::resolve(&Config::default(), SettingsOverrides::default())
            .expect("defaults resolve");

        assert_eq!(settings.dsn, "test_sqlite_test");
        assert_eq!(settings.database, PathBuf::from("test.db"));
        assert_eq!(settings.migrations_dir, PathBuf::from("migrations"));
        assert_eq!(settings.dump_file, PathBuf::from("schema_dump.sql"));
        assert_eq!(settings.runner, vec!["deriddl".to_string()]);
        assert_eq!(settings.connection_descriptor(), "DSN=test_sqlite_test;");
    }

    #[test]
    fn test_resolve_override_beats_config() {
        let config = Config {
            dsn: Some("from_config".to_string()),
            database: Some(PathBuf::from("config.db")),
            ..Config::default()
        };
        let overrides = SettingsOverrides {
            dsn: Some("from_cli".to_string()),
            ..SettingsOverrides::default()
        };

        let settings = RunSettings::resolve(&config, overrides).expect("resolve");

        // CLIフラグが設定ファイルより優先される
        assert_eq!(settings.dsn, "from_cli");
        // CLIフラグが無いフィールドは設定ファイルの値を使う
        assert_eq!(settings.database, PathBuf::from("config.db"));
    }

    #[test]
    fn test_resolve_rejects_empty_runner() {
        let config = Config {
            runner: Some(vec![]),
            ..Config::default()
        };
        let result = RunSettings::resolve(&config, SettingsOverrides::default());
        assert!(result.is_err());
    }
}
