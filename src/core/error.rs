// エラー型定義
//
// 検証ラン全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して VerifyError を定義します。
// いずれのエラーもランに対して致命的で、リトライやロールバックは行いません。

use crate::core::reconcile::MissingObject;
use std::path::PathBuf;
use thiserror::Error;

/// 検証ランのエラー
#[derive(Debug, Clone, Error)]
pub enum VerifyError {
    /// Migration corpus missing or unreadable
    #[error("Migration corpus unavailable: {path:?}: {reason}")]
    CorpusUnavailable {
        /// マイグレーションディレクトリのパス
        path: PathBuf,
        /// 失敗理由
        reason: String,
    },

    /// Named connection absent from the registry file
    #[error("DSN '{dsn}' not found in {path:?}")]
    ConfigurationMissing {
        /// 期待するDSN名
        dsn: String,
        /// レジストリファイルのパス
        path: PathBuf,
    },

    /// External migration tool exited nonzero on apply
    #[error("Migration apply failed (exit status {status}){}", format_detail(.stderr))]
    ApplyFailed {
        /// 終了ステータス（起動自体の失敗は-1）
        status: i32,
        /// 標準エラー出力
        stderr: String,
    },

    /// Applied count could not be located in the status report
    #[error("Could not parse applied migration count from status output:\n{output}")]
    StatusUnparsable {
        /// ステータスレポートの全文
        output: String,
    },

    /// Applied count differs from the discovered corpus size
    #[error("Expected {expected} applied migrations, got {actual}")]
    CountMismatch {
        /// コーパスから検出したファイル数
        expected: usize,
        /// ツールが報告した適用済み件数
        actual: usize,
    },

    /// Connection or catalog query failure
    #[error("Schema snapshot unavailable: {message}: {cause}")]
    SnapshotUnavailable {
        /// 失敗した操作の説明
        message: String,
        /// 原因
        cause: String,
    },

    /// One or more expected objects absent from the live schema
    #[error("{} schema object(s) missing from live schema: {}", .missing.len(), format_missing(.missing))]
    SchemaMismatch {
        /// 欠落オブジェクト（全件集約済み）
        missing: Vec<MissingObject>,
    },
}

impl VerifyError {
    /// 設定不備（DSN未登録）かどうか
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, VerifyError::ConfigurationMissing { .. })
    }

    /// 照合失敗かどうか
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, VerifyError::SchemaMismatch { .. })
    }

    /// 件数不一致かどうか
    pub fn is_count_mismatch(&self) -> bool {
        matches!(self, VerifyError::CountMismatch { .. })
    }
}

/// 標準エラー出力が空でない場合のみ付記する
fn format_detail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// 欠落オブジェクトの一覧を整形する
fn format_missing(missing: &[MissingObject]) -> String {
    missing
        .iter()
        .map(|m| format!("{} '{}'", m.kind, m.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::migration::ObjectKind;

    #[test]
    fn test_apply_failed_message_without_stderr() {
        let error = VerifyError::ApplyFailed {
            status: 2,
            stderr: String::new(),
        };
        assert_eq!(
            error.to_string(),
            "Migration apply failed (exit status 2)"
        );
    }

    #[test]
    fn test_apply_failed_message_with_stderr() {
        let error = VerifyError::ApplyFailed {
            status: 1,
            stderr: "no such driver\n".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Migration apply failed (exit status 1): no such driver"
        );
    }

    #[test]
    fn test_count_mismatch_message() {
        let error = VerifyError::CountMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(error.to_string(), "Expected 4 applied migrations, got 3");
        assert!(error.is_count_mismatch());
    }

    #[test]
    fn test_schema_mismatch_lists_all_objects() {
        let error = VerifyError::SchemaMismatch {
            missing: vec![
                MissingObject {
                    kind: ObjectKind::Table,
                    name: "users".to_string(),
                },
                MissingObject {
                    kind: ObjectKind::Index,
                    name: "idx_users_email".to_string(),
                },
            ],
        };
        let message = error.to_string();
        assert!(message.contains("2 schema object(s) missing"));
        assert!(message.contains("table 'users'"));
        assert!(message.contains("index 'idx_users_email'"));
        assert!(error.is_schema_mismatch());
    }
}
