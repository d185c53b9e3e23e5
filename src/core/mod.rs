// コアドメイン層
// 設定、エラー型、マイグレーションと照合のドメインモデル

pub mod config;
pub mod error;
pub mod migration;
pub mod reconcile;
