// 期待スキーマリゾルバー
//
// 抽出されたスキーマ操作列を (ファイル順, ファイル内出現順) に畳み込み、
// 全マイグレーション適用後に存在すべきオブジェクト集合を計算します。
// 同名への後の操作が常に先の操作を上書きする（last-write-wins）。
//
// 作成後に最終的に削除されたオブジェクトは「スキップ」として別枠で報告し、
// ライブスキーマとの照合対象から外します（情報表示のみで失敗ではない）。

use crate::core::migration::{ObjectKind, SchemaAction, SchemaOperation};
use std::collections::BTreeMap;

/// 畳み込み途中の1オブジェクトの状態
#[derive(Debug, Clone, Copy, Default)]
struct FoldState {
    /// 最終的に存在するか
    present: bool,
    /// 一度でも作成されたか
    ever_created: bool,
}

/// オブジェクト種別ごとの解決結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedObjects {
    /// 最終的に存在すべき名前（辞書順）
    pub present: Vec<String>,
    /// 作成後に削除されたため検証対象外の名前（辞書順）
    pub skipped: Vec<String>,
}

/// 期待スキーマ（種別ごとの解決結果）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedSchema {
    pub tables: ExpectedObjects,
    pub indexes: ExpectedObjects,
}

/// 期待スキーマ解決サービス
#[derive(Debug, Clone)]
pub struct ExpectedResolverService {}

impl ExpectedResolverService {
    /// 新しいExpectedResolverServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// 操作列を順に畳み込んで期待スキーマを計算する
    ///
    /// # Arguments
    ///
    /// * `operations` - 全マイグレーションファイルを連結した順序付き操作列
    pub fn resolve<I>(&self, operations: I) -> ExpectedSchema
    where
        I: IntoIterator<Item = SchemaOperation>,
    {
        let mut tables: BTreeMap<String, FoldState> = BTreeMap::new();
        let mut indexes: BTreeMap<String, FoldState> = BTreeMap::new();

        for operation in operations {
            let map = match operation.kind {
                ObjectKind::Table => &mut tables,
                ObjectKind::Index => &mut indexes,
            };
            let state = map.entry(operation.name).or_default();
            match operation.action {
                SchemaAction::Create => {
                    state.present = true;
                    state.ever_created = true;
                }
                SchemaAction::Drop => {
                    state.present = false;
                }
            }
        }

        ExpectedSchema {
            tables: collect(tables),
            indexes: collect(indexes),
        }
    }
}

/// 畳み込み結果をpresent/skippedに振り分ける
///
/// 一度も作成されず削除だけされた名前はどちらにも含めない。
fn collect(map: BTreeMap<String, FoldState>) -> ExpectedObjects {
    let mut present = Vec::new();
    let mut skipped = Vec::new();
    for (name, state) in map {
        if state.present {
            present.push(name);
        } else if state.ever_created {
            skipped.push(name);
        }
    }
    ExpectedObjects { present, skipped }
}

impl Default for ExpectedResolverService {
    fn default() -> Self {
        Self::new()
    }
}
