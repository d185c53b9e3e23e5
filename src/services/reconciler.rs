// 照合器
//
// 期待スキーマとライブスキーマのスナップショット行を突き合わせます。
// テーブルは定義行のパターン一致、インデックスは緩い部分文字列一致。
// インデックス定義の構文は方言間のばらつきが大きいため、緩い一致は
// 意図的な非対称であり、厳密化してはならない。
//
// 欠落は全件集約してから返す（最初の1件で打ち切らない）。
// 入力が同じなら結果も同じ純粋な関数。

use crate::core::migration::ObjectKind;
use crate::core::reconcile::{MissingObject, ReconciliationResult, SkippedObject};
use crate::services::expected_resolver::ExpectedSchema;
use regex::Regex;

/// 照合サービス
#[derive(Debug, Clone)]
pub struct ReconcilerService {}

impl ReconcilerService {
    /// 新しいReconcilerServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// 照合を実行する
    ///
    /// # Arguments
    ///
    /// * `expected` - 期待スキーマ（present/skipped解決済み）
    /// * `snapshot_lines` - ライブスキーマの定義行
    pub fn reconcile(
        &self,
        expected: &ExpectedSchema,
        snapshot_lines: &[String],
    ) -> ReconciliationResult {
        let mut missing = Vec::new();

        for name in &expected.tables.present {
            if !self.table_exists(name, snapshot_lines) {
                missing.push(MissingObject {
                    kind: ObjectKind::Table,
                    name: name.clone(),
                });
            }
        }

        for name in &expected.indexes.present {
            if !self.index_exists(name, snapshot_lines) {
                missing.push(MissingObject {
                    kind: ObjectKind::Index,
                    name: name.clone(),
                });
            }
        }

        let mut skipped = Vec::new();
        for name in &expected.tables.skipped {
            skipped.push(SkippedObject {
                kind: ObjectKind::Table,
                name: name.clone(),
            });
        }
        for name in &expected.indexes.skipped {
            skipped.push(SkippedObject {
                kind: ObjectKind::Index,
                name: name.clone(),
            });
        }

        ReconciliationResult {
            checked_tables: expected.tables.present.len(),
            checked_indexes: expected.indexes.present.len(),
            missing,
            skipped,
        }
    }

    /// テーブル定義行の存在チェック
    ///
    /// 定義キーワードに続いて（任意の引用文字を挟み）名前が現れる行を探す。
    fn table_exists(&self, name: &str, lines: &[String]) -> bool {
        let pattern = Regex::new(&format!(
            r#"(?i)create\s+table\b.*[`"\[]?{}[`"\]]?"#,
            regex::escape(name)
        ))
        .expect("table definition pattern is valid");
        lines.iter().any(|line| pattern.is_match(line))
    }

    /// インデックス存在チェック（緩い部分文字列一致）
    fn index_exists(&self, name: &str, lines: &[String]) -> bool {
        let needle = name.to_lowercase();
        lines.iter().any(|line| line.to_lowercase().contains(&needle))
    }
}

impl Default for ReconcilerService {
    fn default() -> Self {
        Self::new()
    }
}
