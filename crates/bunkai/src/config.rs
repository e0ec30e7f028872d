// crates/bunkai/src/config.rs

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::errors::ConfigError;

/// Upper bound for `alignment.span_slack`.
///
/// Larger values make every DP cell scan spans far longer than any morpheme.
pub const MAX_SPAN_SLACK: usize = 32;

/// Top-level configuration for bunkai.
///
/// Every section is optional in TOML; omitted sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BunkaiConfig {
  /// [alignment] section
  pub alignment: AlignmentConfig,
  /// [resolver] section
  pub resolver: ResolverConfig,
  /// [loading] section
  pub loading: LoadingConfig,
  /// [logging] section
  pub logging: LoggingConfig,
}

/// [alignment] section configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
  /// Extra characters a span may have beyond its canonical form length
  pub span_slack: usize,
  /// Average edits tolerated per morpheme before alignment is rejected
  pub max_edits_per_morpheme: u32,
  /// Strip diacritics and case before scoring
  pub fold_diacritics: bool,
}

impl Default for AlignmentConfig {
  fn default() -> Self {
    Self {
      span_slack: 2,
      max_edits_per_morpheme: 1,
      fold_diacritics: true,
    }
  }
}

/// Sibling selection strategy for placeholder entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiblingStrategyKind {
  /// Sibling whose trimmed stem is closest to the placeholder surface
  #[default]
  ClosestStem,
  /// Sibling whose final morph ranks earliest in `suffix_table`
  SuffixTable,
}

impl SiblingStrategyKind {
  /// Returns the name used in TOML and logs.
  pub fn code(&self) -> &'static str {
    match self {
      SiblingStrategyKind::ClosestStem => "closest-stem",
      SiblingStrategyKind::SuffixTable => "suffix-table",
    }
  }
}

impl std::fmt::Display for SiblingStrategyKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.code())
  }
}

/// [resolver] section configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// "closest-stem" | "suffix-table"
  pub strategy: SiblingStrategyKind,
  /// Ordered morphs, most preferred first (e.g. ["ando", "iendo", "ado"])
  pub suffix_table: Vec<String>,
}

/// [loading] section configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
  /// Run both load phases on the rayon thread pool
  pub parallel: bool,
  /// Maximum number of `EntryFailure` records kept in the load report
  pub max_reported_failures: usize,
}

impl Default for LoadingConfig {
  fn default() -> Self {
    Self {
      parallel: true,
      max_reported_failures: 10_000,
    }
  }
}

/// [logging] section configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  #[default]
  Info,

  /// warn
  Warn,

  ///error
  Error,
}

impl LogLevel {
  /// Returns the directive understood by `tracing_subscriber::EnvFilter`.
  pub fn as_filter_str(&self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

// ===== Loading =====

impl BunkaiConfig {
  /// Parses and validates a TOML document.
  ///
  /// # Errors
  /// - `ConfigError::Parse` if the document is not valid TOML for this schema
  /// - any error returned by [`BunkaiConfig::validate`]
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: BunkaiConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
      reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Reads, parses and validates a TOML file.
  ///
  /// # Errors
  /// - `ConfigError::Read` if the file cannot be read
  /// - same as [`BunkaiConfig::from_toml_str`]
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: Arc::new(e),
    })?;
    Self::from_toml_str(&source)
  }
}

// ===== Accessor Methods =====

impl BunkaiConfig {
  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `alignment.span_slack` <= [`MAX_SPAN_SLACK`]
  /// - `resolver.suffix_table` has no empty strings
  /// - `resolver.suffix_table` is non-empty when the strategy is `suffix-table`
  /// - `loading.max_reported_failures` >= 1
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` for the first failed check.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.alignment.span_slack > MAX_SPAN_SLACK {
      return Err(ConfigError::InvalidSpanSlack {
        max: MAX_SPAN_SLACK,
        actual: self.alignment.span_slack,
      });
    }

    if let Some(index) = self.resolver.suffix_table.iter().position(String::is_empty) {
      return Err(ConfigError::EmptySuffixTableEntry { index });
    }

    if self.resolver.strategy == SiblingStrategyKind::SuffixTable
      && self.resolver.suffix_table.is_empty()
    {
      return Err(ConfigError::EmptySuffixTable);
    }

    if self.loading.max_reported_failures < 1 {
      return Err(ConfigError::InvalidMaxReportedFailures {
        actual: self.loading.max_reported_failures,
      });
    }

    Ok(())
  }

  /// Returns the span slack used by the aligner.
  pub fn span_slack(&self) -> usize {
    self.alignment.span_slack
  }

  /// Returns the per-morpheme edit budget.
  pub fn max_edits_per_morpheme(&self) -> u32 {
    self.alignment.max_edits_per_morpheme
  }

  /// Whether diacritics are folded before scoring.
  pub fn fold_diacritics(&self) -> bool {
    self.alignment.fold_diacritics
  }

  /// Returns the sibling selection strategy.
  pub fn sibling_strategy(&self) -> SiblingStrategyKind {
    self.resolver.strategy
  }

  /// Returns the ordered suffix table.
  pub fn suffix_table(&self) -> &[String] {
    &self.resolver.suffix_table
  }

  /// Whether loading runs in parallel.
  pub fn parallel_loading(&self) -> bool {
    self.loading.parallel
  }

  /// Returns the bound on enumerated load failures.
  pub fn max_reported_failures(&self) -> usize {
    self.loading.max_reported_failures
  }

  /// Returns the log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
