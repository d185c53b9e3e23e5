// データベース接続アダプター
//
// SQLxを使用したSQLite接続の管理を行います。
// ハーネス自身が直接触る方言はSQLiteのみ（外部ツールはODBC経由で接続する）。

use crate::core::error::VerifyError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::Path;

/// データベース接続サービス
///
/// 接続プールの作成と、検証ラン前のデータベースリセットを行います。
#[derive(Debug, Clone)]
pub struct DatabaseConnectionService {}

impl DatabaseConnectionService {
    /// 新しいDatabaseConnectionServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// SQLiteファイルへの接続文字列を構築
    pub fn build_connection_string(&self, database: &Path) -> String {
        format!("sqlite://{}", database.display())
    }

    /// 接続プールを作成
    ///
    /// # Arguments
    ///
    /// * `database` - SQLiteデータベースファイルのパス
    ///
    /// # Returns
    ///
    /// 接続プールまたはエラー
    pub async fn create_pool(&self, database: &Path) -> Result<SqlitePool, VerifyError> {
        let options = SqliteConnectOptions::new()
            .filename(database)
            .create_if_missing(true);

        SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| VerifyError::SnapshotUnavailable {
                message: format!("Failed to connect to database {:?}", database),
                cause: e.to_string(),
            })
    }

    /// データベースファイルを削除して作り直し、VACUUMで初期化する
    ///
    /// 破壊的操作。以降のステップが失敗してもロールバックは行わない。
    pub async fn reset(&self, database: &Path) -> Result<(), VerifyError> {
        if database.exists() {
            fs::remove_file(database).map_err(|e| VerifyError::SnapshotUnavailable {
                message: format!("Failed to remove database file {:?}", database),
                cause: e.to_string(),
            })?;
        }

        let pool = self.create_pool(database).await?;
        sqlx::query("VACUUM")
            .execute(&pool)
            .await
            .map_err(|e| VerifyError::SnapshotUnavailable {
                message: format!("Failed to vacuum database {:?}", database),
                cause: e.to_string(),
            })?;
        self.close_pool(pool).await;
        Ok(())
    }

    /// 接続プールを閉じる
    pub async fn close_pool(&self, pool: SqlitePool) {
        pool.close().await;
    }
}

impl Default for DatabaseConnectionService {
    fn default() -> Self {
        Self::new()
    }
}
