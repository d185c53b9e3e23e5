// サービス層
// コーパス読み込み、意図抽出、期待スキーマ解決、照合、検証パイプライン

pub mod corpus_loader;
pub mod expected_resolver;
pub mod intent_extractor;
pub mod reconciler;
pub mod verify_pipeline;
