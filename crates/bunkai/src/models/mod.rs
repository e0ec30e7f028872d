//! models module
pub mod model_definition;
pub mod raw_entry;

/// 再エクスポート
pub use model_definition::{
  Analysis, Decomposition, Morph, Morpheme, MorphemeKind, Segmentation, SplitSide,
  UnresolvedReason, Word,
};
pub use raw_entry::{AffixPosition, RawEntry, RawMorphemes, SAME_AS_LEMMA_MARKER};
