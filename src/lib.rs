// Migverifyライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメイン（設定、エラー型、マイグレーションと照合のモデル）
// - adapters: データベース・DSNレジストリ・外部マイグレーションツールへのアクセスを抽象化
// - services: コーパス読み込み、意図抽出、期待スキーマ解決、照合、検証パイプライン

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;
