//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::BunkaiApiService;

/// Application State
///
/// State shared across the entire server.
/// Contains configuration and service.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Morphology query service
  ///
  /// - Production: `Arc::new(BunkaiApiServiceFull::new(&config, bunkai_config)?)`
  /// - Test: `Arc::new(StubBunkaiApiService)`
  pub service: Arc<dyn BunkaiApiService>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, service: Arc<dyn BunkaiApiService>) -> Self {
    Self { config, service }
  }
}
