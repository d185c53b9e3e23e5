// マイグレーションドメインモデル
//
// マイグレーションファイルと、そのテキストから抽出されるスキーマ操作を表現します。
// ファイル名の辞書順が適用順序を表すという前提（ゼロ埋め連番やタイムスタンプ）は
// 呼び出し側の規約であり、ここでは検証しない。

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// マイグレーションファイル
///
/// 読み込み後は不変。ランの開始時に一括で読み込まれ、ランの終了とともに破棄される。
#[derive(Debug, Clone)]
pub struct MigrationFile {
    /// ファイルパス（アイデンティティ）
    pub path: PathBuf,
    /// ファイル名（ソートキー）
    pub file_name: String,
    /// SQLテキスト
    pub sql: String,
}

/// スキーマオブジェクトの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Table,
    Index,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Table => write!(f, "table"),
            ObjectKind::Index => write!(f, "index"),
        }
    }
}

/// スキーマ操作の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaAction {
    Create,
    Drop,
}

/// マイグレーションテキストから抽出された1つのスキーマ操作
///
/// nameは小文字に正規化済みで、引用符・ブラケットは除去済み。
/// (ファイル順, ファイル内出現順) で並ぶ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaOperation {
    pub kind: ObjectKind,
    pub action: SchemaAction,
    pub name: String,
}
