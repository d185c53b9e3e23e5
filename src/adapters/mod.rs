// アダプター層
// データベース、DSNレジストリ、外部マイグレーションツール、カタログスナップショット

pub mod database;
pub mod dsn_registry;
pub mod migration_tool;
pub mod schema_snapshot;
