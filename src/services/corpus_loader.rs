// マイグレーションコーパスローダー
//
// マイグレーションディレクトリから *.sql ファイルを辞書昇順で列挙して読み込みます。
// ファイル名の辞書順 = 実行順という規約は呼び出し側が守る前提（ゼロ埋め連番など）。
// 読み取り専用で、副作用はありません。

use crate::core::error::VerifyError;
use crate::core::migration::MigrationFile;
use std::fs;
use std::path::Path;

/// コーパスローダーサービス
#[derive(Debug, Clone)]
pub struct CorpusLoaderService {}

impl CorpusLoaderService {
    /// 新しいCorpusLoaderServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// ディレクトリから順序付きのマイグレーションファイル列を読み込む
    ///
    /// # Arguments
    ///
    /// * `dir` - マイグレーションディレクトリ
    ///
    /// # Returns
    ///
    /// ファイル名の辞書昇順に並んだマイグレーションファイル列。
    /// ディレクトリが存在しない・読めない場合は `CorpusUnavailable`。
    pub fn load_corpus(&self, dir: &Path) -> Result<Vec<MigrationFile>, VerifyError> {
        let unavailable = |reason: String| VerifyError::CorpusUnavailable {
            path: dir.to_path_buf(),
            reason,
        };

        let entries = fs::read_dir(dir).map_err(|e| unavailable(e.to_string()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| unavailable(e.to_string()))?;
            let path = entry.path();
            // .sql以外のエントリは無視する
            if path.extension().and_then(|ext| ext.to_str()) != Some("sql") {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            paths.push((file_name, path));
        }

        paths.sort_by(|a, b| a.0.cmp(&b.0));

        let mut files = Vec::with_capacity(paths.len());
        for (file_name, path) in paths {
            let sql = fs::read_to_string(&path).map_err(|e| unavailable(e.to_string()))?;
            files.push(MigrationFile {
                path,
                file_name,
                sql,
            });
        }

        Ok(files)
    }
}

impl Default for CorpusLoaderService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_corpus_sorted_lexically() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        // 作成順とは逆順で書き込む
        fs::write(dir.join("002_add_index.sql"), "CREATE INDEX i ON t(c);").unwrap();
        fs::write(dir.join("001_init.sql"), "CREATE TABLE t (c TEXT);").unwrap();
        fs::write(dir.join("010_later.sql"), "DROP TABLE t;").unwrap();

        let corpus = CorpusLoaderService::new().load_corpus(dir).unwrap();

        let names: Vec<&str> = corpus.iter().map(|m| m.file_name.as_str()).collect();
        assert_eq!(names, vec!["001_init.sql", "002_add_index.sql", "010_later.sql"]);
        assert!(corpus[0].sql.contains("CREATE TABLE t"));
    }

    #[test]
    fn test_load_corpus_ignores_non_sql_entries() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        fs::write(dir.join("001_init.sql"), "CREATE TABLE t (c TEXT);").unwrap();
        fs::write(dir.join("README.md"), "not a migration").unwrap();
        fs::create_dir(dir.join("archive")).unwrap();

        let corpus = CorpusLoaderService::new().load_corpus(dir).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_load_corpus_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no_such_dir");

        let error = CorpusLoaderService::new().load_corpus(&missing).unwrap_err();
        assert!(matches!(error, VerifyError::CorpusUnavailable { .. }));
    }

    #[test]
    fn test_load_corpus_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let corpus = CorpusLoaderService::new().load_corpus(temp_dir.path()).unwrap();
        assert!(corpus.is_empty());
    }
}
