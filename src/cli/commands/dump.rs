// dumpコマンドハンドラー
//
// 既存のデータベースからスキーマダンプアーティファクトだけを取得します。
// リセットもapplyも行わない、手動調査向けの読み取り専用ラン。

use crate::adapters::database::DatabaseConnectionService;
use crate::adapters::schema_snapshot::SchemaSnapshotService;
use crate::core::config::{Config, RunSettings, SettingsOverrides};
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// dumpコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct DumpCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// データベースファイルの上書き
    pub database: Option<PathBuf>,
    /// ダンプ出力先の上書き
    pub dump_file: Option<PathBuf>,
}

/// dumpコマンドハンドラー
#[derive(Debug, Clone)]
pub struct DumpCommandHandler {}

impl DumpCommandHandler {
    /// 新しいDumpCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// dumpコマンドを実行
    ///
    /// # Returns
    ///
    /// 成功時はダンプ先と定義数のサマリー、失敗時はエラー
    pub async fn execute(&self, command: &DumpCommand) -> Result<String> {
        let config = Config::load(&command.project_path)?;
        let overrides = SettingsOverrides {
            database: command.database.clone(),
            dump_file: command.dump_file.clone(),
            ..SettingsOverrides::default()
        };
        let settings = RunSettings::resolve(&config, overrides)?;

        // 検証ランと違いデータベースを作らない。無ければエラー。
        if !settings.database.exists() {
            return Err(anyhow!(
                "Database file not found: {:?}",
                settings.database
            ));
        }

        let db = DatabaseConnectionService::new();
        let snapshot_service = SchemaSnapshotService::new();

        let pool = db.create_pool(&settings.database).await?;
        let lines = snapshot_service.capture(&pool).await?;
        db.close_pool(pool).await;

        snapshot_service.write_dump(&lines, &settings.dump_file)?;

        Ok(format!(
            "Schema dumped to {:?} ({} definitions)",
            settings.dump_file,
            lines.len()
        ))
    }
}

impl Default for DumpCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
