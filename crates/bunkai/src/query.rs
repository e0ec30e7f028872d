//! Query Interface
//!
//! Read-only access to a loaded dataset. Absence is a normal outcome and is
//! reported as `None` or an empty list, never as an error.

use crate::index::{LemmaIndex, LoadReport};
use crate::models::{Decomposition, Segmentation, Word};

/// Read-only morphology lookups.
///
/// When several words share a surface, the first one in ingestion order that
/// carries the requested information answers.
pub trait MorphologyQuery: Send + Sync {
  /// Morphemes of `surface`, `None` when unknown or unresolved
  fn decomposition_of(&self, surface: &str) -> Option<&Decomposition>;

  /// Morphs of `surface`, `None` when unknown or not aligned
  fn segmentation_of(&self, surface: &str) -> Option<&Segmentation>;

  /// Words sharing `lemma`, in ingestion order
  fn words_for_lemma(&self, lemma: &str) -> Vec<&Word>;

  /// Words with exactly this surface, in ingestion order
  fn words_for_surface(&self, surface: &str) -> Vec<&Word>;

  /// Load counts and enumerated failures
  fn diagnostics(&self) -> &LoadReport;
}

impl MorphologyQuery for LemmaIndex {
  fn decomposition_of(&self, surface: &str) -> Option<&Decomposition> {
    self.words_for_surface(surface).into_iter().find_map(Word::decomposition)
  }

  fn segmentation_of(&self, surface: &str) -> Option<&Segmentation> {
    self.words_for_surface(surface).into_iter().find_map(Word::segmentation)
  }

  fn words_for_lemma(&self, lemma: &str) -> Vec<&Word> {
    self.lookup(lemma)
  }

  fn words_for_surface(&self, surface: &str) -> Vec<&Word> {
    LemmaIndex::words_for_surface(self, surface)
  }

  fn diagnostics(&self) -> &LoadReport {
    self.report()
  }
}
