// verifyコマンドハンドラー
//
// 検証パイプライン全体を実行します。
// - 設定の解決（組み込みデフォルト + migverify.yaml + CLIフラグ）
// - 外部マイグレーションツールの起動
// - 照合結果の表示（テキストまたはJSON）

use crate::adapters::migration_tool::ProcessMigrationRunner;
use crate::core::config::{Config, RunSettings, SettingsOverrides};
use crate::services::verify_pipeline::VerifyPipeline;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// verifyコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct VerifyCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// DSN名の上書き
    pub dsn: Option<String>,
    /// データベースファイルの上書き
    pub database: Option<PathBuf>,
    /// マイグレーションディレクトリの上書き
    pub migrations_dir: Option<PathBuf>,
    /// ダンプ出力先の上書き
    pub dump_file: Option<PathBuf>,
    /// 外部ツールコマンドの上書き（空白区切り）
    pub runner: Option<String>,
    /// 接続レジストリパスの上書き
    pub odbc_ini: Option<PathBuf>,
    /// JSONレポート出力
    pub json: bool,
}

/// verifyコマンドハンドラー
#[derive(Debug, Clone)]
pub struct VerifyCommandHandler {}

impl VerifyCommandHandler {
    /// 新しいVerifyCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// verifyコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - verifyコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時は確認メッセージ（またはJSONレポート）、失敗時はエラー
    pub async fn execute(&self, command: &VerifyCommand) -> Result<String> {
        // 設定ファイルを読み込む（存在しない場合はデフォルト）
        let config = Config::load(&command.project_path)?;

        let overrides = SettingsOverrides {
            dsn: command.dsn.clone(),
            database: command.database.clone(),
            migrations_dir: command.migrations_dir.clone(),
            dump_file: command.dump_file.clone(),
            runner: command
                .runner
                .as_ref()
                .map(|raw| raw.split_whitespace().map(str::to_string).collect()),
            odbc_ini: command.odbc_ini.clone(),
        };
        let settings = RunSettings::resolve(&config, overrides)?;

        // 外部ツールを起動する実ランナーでパイプラインを実行
        let runner = ProcessMigrationRunner::new(settings.runner.clone());
        let pipeline = VerifyPipeline::new(&settings, &runner);
        let report = pipeline.run().await?;

        if command.json {
            serde_json::to_string_pretty(&report)
                .with_context(|| "Failed to serialize reconciliation report")
        } else {
            Ok(format!("{} All assertions passed", "[OK]".green()))
        }
    }
}

impl Default for VerifyCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
