// スキーマスナップショットアダプター
//
// sqlite_masterカタログからテーブル・インデックスの定義SQLを取得し、
// 1定義1行のダンプアーティファクトとして書き出します。
// 取得した行は照合のための不透明なテキストとして扱い、構造化はしません。

use crate::core::error::VerifyError;
use sqlx::{Row, SqlitePool};
use std::fs;
use std::path::Path;

/// テーブル定義の取得クエリ（システム内部オブジェクトを除外）
const TABLE_SQL_QUERY: &str =
    "SELECT sql FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'";

/// インデックス定義の取得クエリ（自動生成インデックスはsqlがNULL）
const INDEX_SQL_QUERY: &str = "SELECT sql FROM sqlite_master WHERE type='index' AND sql IS NOT NULL";

/// スキーマスナップショットサービス
#[derive(Debug, Clone)]
pub struct SchemaSnapshotService {}

impl SchemaSnapshotService {
    /// 新しいSchemaSnapshotServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// 現在のカタログから定義行を取得する
    ///
    /// テーブル定義、インデックス定義の順で返す。
    pub async fn capture(&self, pool: &SqlitePool) -> Result<Vec<String>, VerifyError> {
        let mut lines = Vec::new();

        for query in [TABLE_SQL_QUERY, INDEX_SQL_QUERY] {
            let rows = sqlx::query(query).fetch_all(pool).await.map_err(|e| {
                VerifyError::SnapshotUnavailable {
                    message: "Catalog query failed".to_string(),
                    cause: e.to_string(),
                }
            })?;

            for row in rows {
                let sql: Option<String> =
                    row.try_get("sql")
                        .map_err(|e| VerifyError::SnapshotUnavailable {
                            message: "Catalog row missing sql column".to_string(),
                            cause: e.to_string(),
                        })?;
                if let Some(sql) = sql {
                    lines.push(sql);
                }
            }
        }

        Ok(lines)
    }

    /// ダンプアーティファクトを書き出す（1定義1行）
    pub fn write_dump(&self, lines: &[String], path: &Path) -> Result<(), VerifyError> {
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        fs::write(path, content).map_err(|e| VerifyError::SnapshotUnavailable {
            message: format!("Failed to write schema dump {:?}", path),
            cause: e.to_string(),
        })
    }
}

impl Default for SchemaSnapshotService {
    fn default() -> Self {
        Self::new()
    }
}
