//! resolver module
pub mod placeholder_resolver;
pub mod strategy;

/// 再エクスポート
pub use placeholder_resolver::PlaceholderResolver;
pub use strategy::{Candidate, ClosestStem, SiblingSelector, SuffixTable, selector_from_config};
