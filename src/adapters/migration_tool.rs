// 外部マイグレーションツールアダプター
//
// apply/statusサブコマンドを持つ外部CLIをサブプロセスとして起動し、
// 完了を待って結果を回収します。呼び出しは全てブロッキング（完了待ち）。
// テストではMigrationRunnerトレイトの偽実装に差し替えられます。

use crate::core::error::VerifyError;
use async_trait::async_trait;
use std::io;
use std::process::Output;
use tokio::process::Command;

/// 外部マイグレーションツールのapply/status契約
///
/// - `apply(conn)` は終了ステータスで成否を返す
/// - `status(conn)` は "Applied: <integer>" フィールドを含むテキストレポートを返す
#[async_trait]
pub trait MigrationRunner: Send + Sync {
    /// マイグレーションを適用する
    async fn apply(&self, conn: &str) -> Result<(), VerifyError>;

    /// ステータスレポートのテキストを返す
    async fn status(&self, conn: &str) -> Result<String, VerifyError>;
}

/// 設定されたコマンドをサブプロセスとして起動する実装
#[derive(Debug, Clone)]
pub struct ProcessMigrationRunner {
    /// 起動コマンド（先頭が実行ファイル、残りが前置引数）
    command: Vec<String>,
}

impl ProcessMigrationRunner {
    /// 新しいProcessMigrationRunnerを作成
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    /// サブコマンドを起動して完了を待つ
    async fn spawn(&self, subcommand: &str, conn: &str) -> io::Result<Output> {
        let (program, leading_args) = self
            .command
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "runner command is empty"))?;

        Command::new(program)
            .args(leading_args)
            .arg(subcommand)
            .arg("--conn")
            .arg(conn)
            .output()
            .await
    }
}

#[async_trait]
impl MigrationRunner for ProcessMigrationRunner {
    async fn apply(&self, conn: &str) -> Result<(), VerifyError> {
        let output = self
            .spawn("apply", conn)
            .await
            .map_err(|e| VerifyError::ApplyFailed {
                status: -1,
                stderr: format!("Failed to launch migration tool: {}", e),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(VerifyError::ApplyFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    async fn status(&self, conn: &str) -> Result<String, VerifyError> {
        let output = self
            .spawn("status", conn)
            .await
            .map_err(|e| VerifyError::StatusUnparsable {
                output: format!("Failed to launch migration tool: {}", e),
            })?;

        // statusが異常終了した場合もレポート契約違反として扱う
        if !output.status.success() {
            return Err(VerifyError::StatusUnparsable {
                output: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
