//! Reference sibling selection strategies.

use crate::config::{ResolverConfig, SiblingStrategyKind};
use crate::models::{Segmentation, Word};

/// Eligible sibling of a placeholder entry.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
  /// Sibling word (resolved, with a segmentation of at least two morphs)
  pub word: &'a Word,
  /// The sibling's segmentation
  pub segmentation: &'a Segmentation,
  /// Sibling surface with its final morph cut out
  pub stem: &'a str,
}

/// Picks the reference sibling for a placeholder entry.
///
/// Implementations must be a total order over candidates so repeated loads
/// pick the same sibling; candidates arrive in ingestion order and equal
/// scores fall back to the lower ordinal.
pub trait SiblingSelector: Send + Sync + std::fmt::Debug {
  /// Strategy name for logs
  fn name(&self) -> &'static str;

  /// Returns the index into `candidates` of the chosen sibling.
  fn select(&self, surface: &str, candidates: &[Candidate<'_>]) -> Option<usize>;
}

/// Sibling whose trimmed stem has the smallest edit distance to the
/// placeholder surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosestStem;

impl SiblingSelector for ClosestStem {
  fn name(&self) -> &'static str {
    SiblingStrategyKind::ClosestStem.code()
  }

  fn select(&self, surface: &str, candidates: &[Candidate<'_>]) -> Option<usize> {
    candidates
      .iter()
      .enumerate()
      .min_by_key(|(_, c)| (strsim::levenshtein(c.stem, surface), c.word.ordinal()))
      .map(|(i, _)| i)
  }
}

/// Sibling whose final morph appears earliest in a fixed table.
///
/// Siblings ending in a morph outside the table are never chosen.
#[derive(Debug, Clone, Default)]
pub struct SuffixTable {
  table: Vec<String>,
}

impl SuffixTable {
  /// Constructor for SuffixTable, most preferred morph first
  pub fn new(table: Vec<String>) -> Self {
    Self { table }
  }

  fn rank(&self, morph: &str) -> Option<usize> {
    self.table.iter().position(|entry| entry == morph)
  }
}

impl SiblingSelector for SuffixTable {
  fn name(&self) -> &'static str {
    SiblingStrategyKind::SuffixTable.code()
  }

  fn select(&self, _surface: &str, candidates: &[Candidate<'_>]) -> Option<usize> {
    candidates
      .iter()
      .enumerate()
      .filter_map(|(i, c)| {
        let rank = self.rank(&c.segmentation.last()?.text)?;
        Some((i, rank, c.word.ordinal()))
      })
      .min_by_key(|&(_, rank, ordinal)| (rank, ordinal))
      .map(|(i, _, _)| i)
  }
}

/// Builds the selector named by the `[resolver]` section.
pub fn selector_from_config(config: &ResolverConfig) -> Box<dyn SiblingSelector> {
  match config.strategy {
    SiblingStrategyKind::ClosestStem => Box::new(ClosestStem),
    SiblingStrategyKind::SuffixTable => Box::new(SuffixTable::new(config.suffix_table.clone())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Decomposition;

  fn word(ordinal: usize, surface: &str, spans: &[(usize, usize)]) -> Word {
    Word::analyzed(
      ordinal,
      "cargar",
      surface,
      "",
      Decomposition::default(),
      Some(Segmentation::from_spans(surface, spans).unwrap()),
    )
  }

  fn candidates<'a>(words: &'a [Word], stems: &'a [String]) -> Vec<Candidate<'a>> {
    words
      .iter()
      .zip(stems)
      .map(|(w, stem)| Candidate {
        word: w,
        segmentation: w.segmentation().unwrap(),
        stem: stem.as_str(),
      })
      .collect()
  }

  #[test]
  fn closest_stem_prefers_smallest_distance() {
    let words = vec![
      word(0, "cargaremos", &[(0, 5), (5, 10)]),
      word(1, "cargando", &[(0, 4), (4, 8)]),
    ];
    let stems: Vec<String> = words
      .iter()
      .map(|w| w.segmentation().unwrap().without_last(w.surface()).unwrap())
      .collect();
    let c = candidates(&words, &stems);

    // "cargar" vs "carga" (1) and "carg" (2)
    assert_eq!(ClosestStem.select("cargar", &c), Some(0));
  }

  #[test]
  fn closest_stem_breaks_ties_by_ordinal() {
    let words = vec![word(5, "walked", &[(0, 4), (4, 6)]), word(2, "walks", &[(0, 4), (4, 5)])];
    let stems = vec!["walk".to_string(), "walk".to_string()];
    let c = candidates(&words, &stems);

    assert_eq!(ClosestStem.select("walk", &c), Some(1));
  }

  #[test]
  fn suffix_table_ranks_final_morph() {
    let words = vec![word(0, "walked", &[(0, 4), (4, 6)]), word(1, "walking", &[(0, 4), (4, 7)])];
    let stems = vec!["walk".to_string(), "walk".to_string()];
    let c = candidates(&words, &stems);

    let table = SuffixTable::new(vec!["ing".into(), "ed".into()]);
    assert_eq!(table.select("walk", &c), Some(1));

    let unknown = SuffixTable::new(vec!["s".into()]);
    assert_eq!(unknown.select("walk", &c), None);
  }

  #[test]
  fn selector_from_config_follows_strategy() {
    let config = ResolverConfig {
      strategy: SiblingStrategyKind::SuffixTable,
      suffix_table: vec!["ando".into()],
    };
    assert_eq!(selector_from_config(&config).name(), "suffix-table");
    assert_eq!(selector_from_config(&ResolverConfig::default()).name(), "closest-stem");
  }

  #[test]
  fn empty_candidates_select_nothing() {
    assert_eq!(ClosestStem.select("x", &[]), None);
  }
}
