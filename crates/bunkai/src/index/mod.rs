//! index module
pub mod lemma_index;
pub mod report;

/// 再エクスポート
pub use lemma_index::LemmaIndex;
pub use report::{EntryFailure, FailureKind, LoadReport};
