// 照合結果ドメインモデル
//
// 期待スキーマとライブスキーマの突き合わせ結果を表現します。

use crate::core::migration::ObjectKind;
use serde::Serialize;
use std::fmt;

/// ライブスキーマに存在しなかった期待オブジェクト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingObject {
    /// オブジェクト種別
    pub kind: ObjectKind,
    /// 正規化済みオブジェクト名
    pub name: String,
}

impl fmt::Display for MissingObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing {}: {}", self.kind, self.name)
    }
}

/// コーパス内で作成後に削除されたため検証対象外となったオブジェクト
///
/// 情報表示のみで、失敗としては扱わない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedObject {
    /// オブジェクト種別
    pub kind: ObjectKind,
    /// 正規化済みオブジェクト名
    pub name: String,
}

/// 照合結果
///
/// 見つかった欠落を全て集約してから報告する（最初の1件で打ち切らない）。
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconciliationResult {
    /// 検証したテーブル数
    pub checked_tables: usize,
    /// 検証したインデックス数
    pub checked_indexes: usize,
    /// 欠落オブジェクト
    pub missing: Vec<MissingObject>,
    /// 検証対象外（作成後に削除）
    pub skipped: Vec<SkippedObject>,
}

impl ReconciliationResult {
    /// 欠落がないかどうか
    pub fn is_pass(&self) -> bool {
        self.missing.is_empty()
    }
}
