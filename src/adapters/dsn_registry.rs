// 名前付き接続レジストリアダプター
//
// odbc.ini形式のファイルから、期待するDSN名のセクションヘッダー [name] を探します。
// ランが破壊的なapplyへ進む前の前提条件チェックとして使われます。

use crate::core::error::VerifyError;
use regex::Regex;
use std::fs;
use std::path::Path;

/// DSNレジストリ検証サービス
#[derive(Debug, Clone)]
pub struct DsnRegistryService {}

impl DsnRegistryService {
    /// 新しいDsnRegistryServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// DSN名がレジストリに登録されていることを検証する
    ///
    /// レジストリファイルが読めない場合もエントリを確認できないため
    /// `ConfigurationMissing` として扱う。
    pub fn verify_dsn(&self, registry_path: &Path, dsn: &str) -> Result<(), VerifyError> {
        let missing = || VerifyError::ConfigurationMissing {
            dsn: dsn.to_string(),
            path: registry_path.to_path_buf(),
        };

        let content = fs::read_to_string(registry_path).map_err(|_| missing())?;
        let pattern = Regex::new(&format!(r"(?m)^\[{}\]", regex::escape(dsn)))
            .expect("dsn section pattern is valid");

        if pattern.is_match(&content) {
            Ok(())
        } else {
            Err(missing())
        }
    }
}

impl Default for DsnRegistryService {
    fn default() -> Self {
        Self::new()
    }
}
