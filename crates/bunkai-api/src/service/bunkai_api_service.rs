//! Morphology Query Service

use std::time::Instant;

use bunkai::{BunkaiConfig, BunkaiService, MorphologyQuery};

use crate::adapter::JsonLinesAdapter;
use crate::config::Config;
use crate::errors::Result;
use crate::models::{
  DecompositionResponse, DiagnosticsResponse, LemmaResponse, SegmentationResponse, WordDto,
};

/// Common interface for the query service
///
/// This trait allows swapping the production implementation (`BunkaiApiServiceFull`) with
/// test stubs.
pub trait BunkaiApiService: Send + Sync {
  /// Decomposition of a surface word
  ///
  /// # Errors
  /// Internal error
  fn decomposition(&self, word: &str) -> Result<DecompositionResponse>;

  /// Segmentation of a surface word
  ///
  /// # Errors
  /// Internal error
  fn segmentation(&self, word: &str) -> Result<SegmentationResponse>;

  /// All words of a lemma group
  ///
  /// # Errors
  /// Internal error
  fn lemma(&self, lemma: &str) -> Result<LemmaResponse>;

  /// Load report of the served dataset
  ///
  /// # Errors
  /// Internal error
  fn diagnostics(&self) -> Result<DiagnosticsResponse>;
}

/// Query service over a dataset loaded once at startup
#[derive(Debug, Clone)]
pub struct BunkaiApiServiceFull {
  inner: BunkaiService,
}

impl BunkaiApiServiceFull {
  /// Loads the dataset named by `config`
  ///
  /// # Errors
  /// - dataset file cannot be read
  /// - dataset contains no entries
  /// - invalid bunkai configuration
  pub fn new(config: &Config, bunkai_config: BunkaiConfig) -> Result<Self> {
    let start = Instant::now();
    let adapter = JsonLinesAdapter::new(&config.dataset_path);
    let inner = BunkaiService::load_from_adapter(bunkai_config, &adapter)?;

    let report = inner.diagnostics();
    tracing::info!(
      path = ?config.dataset_path,
      total = report.total,
      failures = report.failure_count(),
      elapsed_ms = start.elapsed().as_millis() as u64,
      "データセットを読み込みました"
    );

    Ok(Self { inner })
  }

  /// Wraps an already loaded service
  #[must_use]
  pub fn from_service(inner: BunkaiService) -> Self {
    Self { inner }
  }
}

impl BunkaiApiService for BunkaiApiServiceFull {
  fn decomposition(&self, word: &str) -> Result<DecompositionResponse> {
    Ok(DecompositionResponse::new(word, self.inner.decomposition_of(word)))
  }

  fn segmentation(&self, word: &str) -> Result<SegmentationResponse> {
    Ok(SegmentationResponse::new(word, self.inner.segmentation_of(word)))
  }

  fn lemma(&self, lemma: &str) -> Result<LemmaResponse> {
    let words = self.inner.words_for_lemma(lemma).into_iter().map(WordDto::from).collect();
    Ok(LemmaResponse {
      lemma: lemma.to_string(),
      words,
    })
  }

  fn diagnostics(&self) -> Result<DiagnosticsResponse> {
    Ok(DiagnosticsResponse {
      sibling_strategy: self.inner.config().sibling_strategy().code().to_string(),
      report: self.inner.diagnostics().clone(),
    })
  }
}
