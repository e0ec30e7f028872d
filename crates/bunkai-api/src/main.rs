//! bunkai-api サーバーエントリーポイント

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bunkai_api::ApiError;
use bunkai_api::api::{AppState, run_server};
use bunkai_api::config::Config;
use bunkai_api::service::BunkaiApiServiceFull;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // 設定の読み込み（ログレベルは bunkai 設定から決まる）
  let config = Config::from_env()?;
  let bunkai_config = config.load_bunkai_config()?;

  // ロギングの初期化（RUST_LOG が優先）
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(bunkai_config.log_level().as_filter_str()));
  tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();
  tracing::info!(dataset = ?config.dataset_path, "設定を読み込みました");

  // データセットの読み込み
  let service = Arc::new(BunkaiApiServiceFull::new(&config, bunkai_config)?);

  // アプリケーション状態の作成
  let state = AppState::new(config, service);

  // サーバー起動
  run_server(state).await
}
