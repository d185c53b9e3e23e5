// スキーマ意図抽出器
//
// マイグレーションテキストをスキャンして、オブジェクト定義ステートメント
// （CREATE TABLE / DROP TABLE / CREATE [UNIQUE] INDEX / DROP INDEX）から
// 宣言されたオブジェクト名と操作種別を出現順に抽出します。
//
// これは完全なSQLパーサーではなく、意図的に軽量なパターンマッチです。
// 認識できないステートメントは黙ってスキップし、決して失敗しません。
// 凝ったSQL構文を取りこぼし得ることは設計上の制約であり、欠陥ではありません。

use crate::core::migration::{ObjectKind, SchemaAction, SchemaOperation};
use regex::Regex;
use std::sync::OnceLock;

/// オブジェクト定義ステートメントのパターン
///
/// `IF [NOT] EXISTS` と、バッククォート・ダブルクォート・ブラケットによる
/// 識別子の引用を許容する。大文字小文字は区別しない。
fn operation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?i)\b(create\s+table|drop\s+table|create\s+(?:unique\s+)?index|drop\s+index)\s+(?:if\s+(?:not\s+)?exists\s+)?[`"\[]?(\w+)"#,
        )
        .expect("operation pattern is valid")
    })
}

/// 意図抽出サービス
#[derive(Debug, Clone)]
pub struct IntentExtractorService {}

impl IntentExtractorService {
    /// 新しいIntentExtractorServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// テキストから出現順にスキーマ操作を抽出する
    ///
    /// 名前は小文字に正規化し、引用文字は除去して返す。
    pub fn extract_operations<'a>(
        &self,
        sql: &'a str,
    ) -> impl Iterator<Item = SchemaOperation> + 'a {
        operation_pattern().captures_iter(sql).map(|caps| {
            let keyword = caps[1].to_lowercase();
            let action = if keyword.starts_with("drop") {
                SchemaAction::Drop
            } else {
                SchemaAction::Create
            };
            let kind = if keyword.contains("table") {
                ObjectKind::Table
            } else {
                ObjectKind::Index
            };
            SchemaOperation {
                kind,
                action,
                name: caps[2].to_lowercase(),
            }
        })
    }
}

impl Default for IntentExtractorService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(sql: &str) -> Vec<SchemaOperation> {
        IntentExtractorService::new().extract_operations(sql).collect()
    }

    fn op(kind: ObjectKind, action: SchemaAction, name: &str) -> SchemaOperation {
        SchemaOperation {
            kind,
            action,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_extract_create_table() {
        let ops = extract("CREATE TABLE users (id INTEGER PRIMARY KEY);");
        assert_eq!(ops, vec![op(ObjectKind::Table, SchemaAction::Create, "users")]);
    }

    #[test]
    fn test_extract_is_case_insensitive_and_normalizes() {
        let ops = extract("create Table USERS (id integer);");
        assert_eq!(ops, vec![op(ObjectKind::Table, SchemaAction::Create, "users")]);
    }

    #[test]
    fn test_extract_tolerates_if_exists_qualifiers() {
        let ops = extract(
            "CREATE TABLE IF NOT EXISTS users (id INTEGER);\nDROP TABLE IF EXISTS users;",
        );
        assert_eq!(
            ops,
            vec![
                op(ObjectKind::Table, SchemaAction::Create, "users"),
                op(ObjectKind::Table, SchemaAction::Drop, "users"),
            ]
        );
    }

    #[test]
    fn test_extract_strips_quoting() {
        let ops = extract(
            "CREATE TABLE `backticked` (a TEXT);\nCREATE TABLE \"quoted\" (a TEXT);\nCREATE TABLE [bracketed] (a TEXT);",
        );
        let names: Vec<&str> = ops.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["backticked", "quoted", "bracketed"]);
    }

    #[test]
    fn test_extract_index_operations() {
        let ops = extract(
            "CREATE INDEX idx_users_email ON users(email);\nCREATE UNIQUE INDEX idx_users_name ON users(name);\nDROP INDEX idx_users_email;",
        );
        assert_eq!(
            ops,
            vec![
                op(ObjectKind::Index, SchemaAction::Create, "idx_users_email"),
                op(ObjectKind::Index, SchemaAction::Create, "idx_users_name"),
                op(ObjectKind::Index, SchemaAction::Drop, "idx_users_email"),
            ]
        );
    }

    #[test]
    fn test_extract_preserves_occurrence_order() {
        let ops = extract(
            "CREATE TABLE a (x TEXT);\nCREATE INDEX i_a ON a(x);\nDROP TABLE a;",
        );
        assert_eq!(
            ops,
            vec![
                op(ObjectKind::Table, SchemaAction::Create, "a"),
                op(ObjectKind::Index, SchemaAction::Create, "i_a"),
                op(ObjectKind::Table, SchemaAction::Drop, "a"),
            ]
        );
    }

    #[test]
    fn test_unrecognized_statements_are_skipped() {
        // ALTER文やDML、壊れたSQLでも失敗せず、単に何も返さない
        let ops = extract(
            "ALTER TABLE users ADD COLUMN age INTEGER;\nINSERT INTO users VALUES (1);\nSELECT * FROM ???;",
        );
        assert!(ops.is_empty());
    }

    #[test]
    fn test_extract_from_empty_text() {
        assert!(extract("").is_empty());
    }
}
