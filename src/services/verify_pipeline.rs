// 検証パイプライン
//
// Reset → VerifyConnection → Apply → VerifyCount → Snapshot → Reconcile → Done
// の逐次ステートマシン。各エッジは1つの遷移メソッドで、Resultを返す。
// 最初の失敗で即座に停止し、リトライも既に実行された破壊的ステップの
// ロールバックも行いません（ワンショットの検証ラン）。

use crate::adapters::database::DatabaseConnectionService;
use crate::adapters::dsn_registry::DsnRegistryService;
use crate::adapters::migration_tool::MigrationRunner;
use crate::adapters::schema_snapshot::SchemaSnapshotService;
use crate::core::config::RunSettings;
use crate::core::error::VerifyError;
use crate::core::migration::{MigrationFile, SchemaOperation};
use crate::core::reconcile::ReconciliationResult;
use crate::services::corpus_loader::CorpusLoaderService;
use crate::services::expected_resolver::ExpectedResolverService;
use crate::services::intent_extractor::IntentExtractorService;
use crate::services::reconciler::ReconcilerService;
use colored::Colorize;
use regex::Regex;
use std::sync::OnceLock;

/// パイプラインのステージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStage {
    /// データベースファイルを削除して作り直す
    Reset,
    /// DSNがレジストリに登録されていることを確認する
    VerifyConnection,
    /// 外部ツールのapplyを実行する
    Apply,
    /// 外部ツールのstatusから適用済み件数を検証する
    VerifyCount,
    /// カタログのスナップショットを取得してダンプを書き出す
    Snapshot,
    /// 期待スキーマとスナップショットを照合する
    Reconcile,
    /// 全チェック通過
    Done,
}

/// 検証パイプライン
///
/// コーパスはラン開始時（リセット前）に読み込まれ、VerifyCountの期待値になる。
pub struct VerifyPipeline<'a> {
    settings: &'a RunSettings,
    runner: &'a dyn MigrationRunner,
    db: DatabaseConnectionService,
    snapshot_service: SchemaSnapshotService,
    dsn_registry: DsnRegistryService,
    corpus_loader: CorpusLoaderService,
    extractor: IntentExtractorService,
    resolver: ExpectedResolverService,
    reconciler: ReconcilerService,
    stage: VerifyStage,
    corpus: Vec<MigrationFile>,
    snapshot_lines: Vec<String>,
    report: ReconciliationResult,
}

impl<'a> VerifyPipeline<'a> {
    /// 新しいパイプラインを作成
    ///
    /// # Arguments
    ///
    /// * `settings` - 確定済みラン設定
    /// * `runner` - 外部マイグレーションツール（テストでは偽実装を渡す）
    pub fn new(settings: &'a RunSettings, runner: &'a dyn MigrationRunner) -> Self {
        Self {
            settings,
            runner,
            db: DatabaseConnectionService::new(),
            snapshot_service: SchemaSnapshotService::new(),
            dsn_registry: DsnRegistryService::new(),
            corpus_loader: CorpusLoaderService::new(),
            extractor: IntentExtractorService::new(),
            resolver: ExpectedResolverService::new(),
            reconciler: ReconcilerService::new(),
            stage: VerifyStage::Reset,
            corpus: Vec::new(),
            snapshot_lines: Vec::new(),
            report: ReconciliationResult::default(),
        }
    }

    /// パイプラインを最後まで実行する
    ///
    /// # Returns
    ///
    /// 成功時は照合結果（skippedを含む）、失敗時は最初のエラー
    pub async fn run(mut self) -> Result<ReconciliationResult, VerifyError> {
        // コーパスはリセット前に確定させる（VerifyCountの期待値になる）
        self.corpus = self.corpus_loader.load_corpus(&self.settings.migrations_dir)?;
        self.step(&format!("Found {} migration files", self.corpus.len()));

        while self.stage != VerifyStage::Done {
            self.advance().await?;
        }
        Ok(self.report)
    }

    /// 1ステージ分だけ進める
    async fn advance(&mut self) -> Result<(), VerifyError> {
        self.stage = match self.stage {
            VerifyStage::Reset => {
                self.reset().await?;
                VerifyStage::VerifyConnection
            }
            VerifyStage::VerifyConnection => {
                self.verify_connection()?;
                VerifyStage::Apply
            }
            VerifyStage::Apply => {
                self.apply().await?;
                VerifyStage::VerifyCount
            }
            VerifyStage::VerifyCount => {
                self.verify_count().await?;
                VerifyStage::Snapshot
            }
            VerifyStage::Snapshot => {
                self.snapshot().await?;
                VerifyStage::Reconcile
            }
            VerifyStage::Reconcile => {
                self.reconcile()?;
                VerifyStage::Done
            }
            VerifyStage::Done => VerifyStage::Done,
        };
        Ok(())
    }

    /// Reset: データベースファイルを削除して作り直す
    async fn reset(&self) -> Result<(), VerifyError> {
        self.step(&format!(
            "Resetting database: {}",
            self.settings.database.display()
        ));
        self.db.reset(&self.settings.database).await
    }

    /// VerifyConnection: DSNの登録を確認する
    fn verify_connection(&self) -> Result<(), VerifyError> {
        self.step(&format!("Verifying DSN exists: {}", self.settings.dsn));
        self.dsn_registry
            .verify_dsn(&self.settings.odbc_ini, &self.settings.dsn)
    }

    /// Apply: 外部ツールにマイグレーションを適用させる
    async fn apply(&self) -> Result<(), VerifyError> {
        self.step("Applying migrations");
        self.runner
            .apply(&self.settings.connection_descriptor())
            .await
    }

    /// VerifyCount: statusレポートの適用済み件数をコーパスの件数と突き合わせる
    async fn verify_count(&self) -> Result<(), VerifyError> {
        self.step("Verifying migration status");
        let report = self
            .runner
            .status(&self.settings.connection_descriptor())
            .await?;
        println!("{}", report);

        let actual = parse_applied_count(&report)?;
        let expected = self.corpus.len();
        if actual != expected {
            return Err(VerifyError::CountMismatch { expected, actual });
        }
        Ok(())
    }

    /// Snapshot: カタログの定義行を取得してダンプを書き出す
    async fn snapshot(&mut self) -> Result<(), VerifyError> {
        self.step(&format!(
            "Dumping schema to: {}",
            self.settings.dump_file.display()
        ));
        let pool = self.db.create_pool(&self.settings.database).await?;
        let lines = self.snapshot_service.capture(&pool).await?;
        self.db.close_pool(pool).await;
        self.snapshot_service
            .write_dump(&lines, &self.settings.dump_file)?;
        self.snapshot_lines = lines;
        Ok(())
    }

    /// Reconcile: コーパスから期待スキーマを再導出してスナップショットと照合する
    fn reconcile(&mut self) -> Result<(), VerifyError> {
        self.step("Checking table and index definitions");

        let operations: Vec<SchemaOperation> = self
            .corpus
            .iter()
            .flat_map(|file| self.extractor.extract_operations(&file.sql))
            .collect();
        let expected = self.resolver.resolve(operations);
        let result = self.reconciler.reconcile(&expected, &self.snapshot_lines);

        for object in &result.skipped {
            self.step(&format!("Skipped dropped {}: {}", object.kind, object.name));
        }

        if !result.is_pass() {
            return Err(VerifyError::SchemaMismatch {
                missing: result.missing,
            });
        }

        self.report = result;
        Ok(())
    }

    /// ステップラベル付きの進捗トレースを出力する
    fn step(&self, message: &str) {
        println!("{} {}", "[*]".cyan(), message);
    }
}

/// ステータスレポートから "Applied: <integer>" フィールドを取り出す
pub fn parse_applied_count(report: &str) -> Result<usize, VerifyError> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"Applied:\s+(\d+)").expect("applied pattern is valid"));

    let caps = pattern
        .captures(report)
        .ok_or_else(|| VerifyError::StatusUnparsable {
            output: report.to_string(),
        })?;
    caps[1]
        .parse::<usize>()
        .map_err(|_| VerifyError::StatusUnparsable {
            output: report.to_string(),
        })
}
