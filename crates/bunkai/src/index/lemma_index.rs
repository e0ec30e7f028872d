//! LemmaGroup Index
//!
//! Builds the canonical words of one dataset in two phases:
//!
//! 1. every non-placeholder entry is validated and aligned on its own
//! 2. placeholder entries are resolved against the frozen phase-1 words
//!
//! Phase 2 needs siblings that may appear anywhere in the raw stream, so it
//! only starts once phase 1 is complete. Both phases are independent per
//! entry and run on rayon when `loading.parallel` is set; results are merged
//! in ingestion order either way.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::alignment::{Aligner, align_derivation, derivation_morphemes};
use crate::config::BunkaiConfig;
use crate::errors::{AlignmentError, EntryError, IndexError, ResolveError};
use crate::index::report::{EntryFailure, FailureKind, LoadReport};
use crate::models::{Decomposition, RawEntry, RawMorphemes, UnresolvedReason, Word};
use crate::resolver::PlaceholderResolver;

/// Per-entry result of the build, before it is tallied.
enum Outcome {
  Aligned,
  Derived,
  Unannotated,
  AlignmentFailed(AlignmentError),
  Deferred,
  Resolved,
  Unresolved(ResolveError),
  Malformed(EntryError),
}

/// Immutable index over one loaded dataset.
#[derive(Debug, Clone)]
pub struct LemmaIndex {
  /// Words in ingestion order (malformed entries excluded)
  words: Vec<Word>,
  /// lemma -> positions in `words`
  by_lemma: HashMap<String, Vec<usize>>,
  /// surface -> positions in `words`
  by_surface: HashMap<String, Vec<usize>>,
  report: LoadReport,
}

impl LemmaIndex {
  /// Builds the index from a raw entry stream.
  ///
  /// Per-entry failures never abort the build; they end up in
  /// [`LemmaIndex::report`].
  ///
  /// # Errors
  /// `IndexError::EmptyDataset` if `entries` is empty.
  pub fn build(entries: &[RawEntry], config: &BunkaiConfig) -> Result<Self, IndexError> {
    if entries.is_empty() {
      return Err(IndexError::EmptyDataset);
    }

    let parallel = config.parallel_loading();
    let aligner = Aligner::from_config(&config.alignment);
    let resolver = PlaceholderResolver::from_config(&config.resolver);
    info!(
      entries = entries.len(),
      parallel,
      strategy = resolver.strategy_name(),
      "loading dataset"
    );

    // ===== Phase 1: align =====
    let first_pass = |(ordinal, entry): (usize, &RawEntry)| analyze(ordinal, entry, &aligner);
    let analyzed: Vec<(Option<Word>, Outcome)> = if parallel {
      entries.par_iter().enumerate().map(first_pass).collect()
    } else {
      entries.iter().enumerate().map(first_pass).collect()
    };
    let (mut slots, mut outcomes): (Vec<Option<Word>>, Vec<Outcome>) = analyzed.into_iter().unzip();

    // ===== Freeze =====
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (ordinal, word) in slots.iter().enumerate() {
      if let Some(word) = word {
        groups.entry(word.lemma()).or_default().push(ordinal);
      }
    }
    let deferred: Vec<usize> = outcomes
      .iter()
      .enumerate()
      .filter(|(_, outcome)| matches!(outcome, Outcome::Deferred))
      .map(|(ordinal, _)| ordinal)
      .collect();

    // ===== Phase 2: resolve placeholders =====
    let second_pass = |&ordinal: &usize| {
      let entry = &entries[ordinal];
      let group: Vec<&Word> = groups
        .get(entry.lemma.as_str())
        .map(|ordinals| ordinals.iter().filter_map(|&o| slots[o].as_ref()).collect())
        .unwrap_or_default();
      (ordinal, resolver.resolve(ordinal, entry, &group))
    };
    let resolved: Vec<(usize, Result<Word, ResolveError>)> = if parallel {
      deferred.par_iter().map(second_pass).collect()
    } else {
      deferred.iter().map(second_pass).collect()
    };
    drop(groups);

    for (ordinal, result) in resolved {
      let entry = &entries[ordinal];
      let (word, outcome) = match result {
        Ok(word) => (word, Outcome::Resolved),
        Err(e) => (
          Word::unresolved(
            ordinal,
            entry.lemma.as_str(),
            entry.surface.as_str(),
            entry.tag.as_str(),
            UnresolvedReason::PlaceholderUnresolved,
          ),
          Outcome::Unresolved(e),
        ),
      };
      slots[ordinal] = Some(word);
      outcomes[ordinal] = outcome;
    }

    // ===== Merge in ingestion order =====
    let mut report = LoadReport::with_failure_limit(config.max_reported_failures());
    let mut words = Vec::with_capacity(entries.len());
    let mut by_lemma: HashMap<String, Vec<usize>> = HashMap::new();
    let mut by_surface: HashMap<String, Vec<usize>> = HashMap::new();

    for (ordinal, (slot, outcome)) in slots.into_iter().zip(outcomes).enumerate() {
      report.record_total();
      tally(&mut report, ordinal, &entries[ordinal], outcome);

      if let Some(word) = slot {
        let position = words.len();
        by_lemma.entry(word.lemma().to_string()).or_default().push(position);
        by_surface.entry(word.surface().to_string()).or_default().push(position);
        words.push(word);
      }
    }

    info!(
      total = report.total,
      aligned = report.aligned,
      derived = report.derived,
      decomposition_only = report.decomposition_only,
      resolved_placeholders = report.resolved_placeholders,
      unresolved_placeholders = report.unresolved_placeholders,
      unannotated = report.unannotated,
      malformed = report.malformed,
      "dataset loaded"
    );

    Ok(Self {
      words,
      by_lemma,
      by_surface,
      report,
    })
  }

  /// Words sharing `lemma`, in ingestion order. Empty if absent.
  pub fn lookup(&self, lemma: &str) -> Vec<&Word> {
    self.positions(&self.by_lemma, lemma)
  }

  /// Words with exactly this surface, in ingestion order. Empty if absent.
  pub fn words_for_surface(&self, surface: &str) -> Vec<&Word> {
    self.positions(&self.by_surface, surface)
  }

  fn positions(&self, map: &HashMap<String, Vec<usize>>, key: &str) -> Vec<&Word> {
    map
      .get(key)
      .map(|positions| positions.iter().filter_map(|&p| self.words.get(p)).collect())
      .unwrap_or_default()
  }

  /// All words in ingestion order
  pub fn words(&self) -> &[Word] {
    &self.words
  }

  /// Load diagnostics
  pub fn report(&self) -> &LoadReport {
    &self.report
  }

  /// Number of words
  pub fn len(&self) -> usize {
    self.words.len()
  }

  /// Always false for a successfully built index with at least one valid entry
  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  /// Number of distinct lemmas
  pub fn lemma_count(&self) -> usize {
    self.by_lemma.len()
  }
}

/// Phase 1 for one entry. Placeholders are deferred.
fn analyze(ordinal: usize, entry: &RawEntry, aligner: &Aligner) -> (Option<Word>, Outcome) {
  if let Err(e) = entry.validate() {
    return (None, Outcome::Malformed(e));
  }

  let (lemma, surface, tag) = (entry.lemma.as_str(), entry.surface.as_str(), entry.tag.as_str());
  match &entry.morphemes {
    RawMorphemes::Explicit { morphemes } => {
      let decomposition = Decomposition::from_raw(lemma, morphemes);
      match aligner.align(surface, decomposition.morphemes()) {
        Ok(alignment) => (
          Some(Word::analyzed(ordinal, lemma, surface, tag, decomposition, Some(alignment.segmentation))),
          Outcome::Aligned,
        ),
        Err(e) => (
          Some(Word::analyzed(ordinal, lemma, surface, tag, decomposition, None)),
          Outcome::AlignmentFailed(e),
        ),
      }
    }
    RawMorphemes::Derivation {
      base,
      affix,
      position,
    } => match align_derivation(aligner, surface, base, affix, *position) {
      Ok(derived) => (
        Some(Word::analyzed(
          ordinal,
          lemma,
          surface,
          tag,
          derived.decomposition,
          Some(derived.alignment.segmentation),
        )),
        Outcome::Derived,
      ),
      Err(e) => {
        let decomposition = Decomposition::new(derivation_morphemes(base, affix, *position));
        (
          Some(Word::analyzed(ordinal, lemma, surface, tag, decomposition, None)),
          Outcome::AlignmentFailed(e),
        )
      }
    },
    RawMorphemes::Absent => (
      Some(Word::unresolved(ordinal, lemma, surface, tag, UnresolvedReason::Unannotated)),
      Outcome::Unannotated,
    ),
    RawMorphemes::SameAsLemma => (None, Outcome::Deferred),
  }
}

fn tally(report: &mut LoadReport, ordinal: usize, entry: &RawEntry, outcome: Outcome) {
  let (kind, reason) = match outcome {
    Outcome::Aligned => return report.record_aligned(),
    Outcome::Derived => return report.record_derived(),
    Outcome::Unannotated => return report.record_unannotated(),
    Outcome::Resolved => return report.record_resolved_placeholder(),
    // phase 2 replaces every deferred outcome
    Outcome::Deferred => return,
    Outcome::AlignmentFailed(e) => (FailureKind::AlignmentFailure, e.to_string()),
    Outcome::Unresolved(e) => (FailureKind::UnresolvedPlaceholder, e.to_string()),
    Outcome::Malformed(e) => (FailureKind::Malformed, e.to_string()),
  };

  debug!(
    ordinal,
    kind = ?kind,
    lemma = %entry.lemma,
    surface = %entry.surface,
    reason = %reason,
    "entry failed"
  );
  report.record_failure(EntryFailure {
    ordinal,
    lemma: entry.lemma.clone(),
    surface: entry.surface.clone(),
    kind,
    reason,
  });
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::AffixPosition;

  fn sequential() -> BunkaiConfig {
    let mut config = BunkaiConfig::default();
    config.loading.parallel = false;
    config
  }

  fn spanish() -> Vec<RawEntry> {
    vec![
      RawEntry::same_as_lemma("cargar", "cargar", "V|NFIN"),
      RawEntry::explicit("cargar", "cargando", "V|V.CVB", ["cargar", "ando"]),
      RawEntry::explicit("hablar", "hablando", "V|V.CVB", ["hablar", "ando"]),
      RawEntry::absent("hablar", "hablamos", "V|IND;PRS;1;PL"),
      RawEntry::explicit("", "x", "", ["x"]),
      RawEntry::same_as_lemma("comer", "comer", "V|NFIN"),
    ]
  }

  // ─── build() ─────────────────────────────────────────────────────────────

  #[test]
  fn empty_dataset_is_fatal() {
    let err = LemmaIndex::build(&[], &BunkaiConfig::default()).unwrap_err();
    assert!(matches!(err, IndexError::EmptyDataset));
  }

  #[test]
  fn placeholder_resolves_from_later_sibling() {
    let index = LemmaIndex::build(&spanish(), &sequential()).unwrap();
    let group = index.lookup("cargar");

    assert_eq!(group.len(), 2);
    assert_eq!(group[0].surface(), "cargar");
    assert!(group[0].is_resolved());
    assert_eq!(group[0].segmentation().unwrap().texts(), vec!["carga", "r"]);
  }

  #[test]
  fn report_counts_every_outcome() {
    let index = LemmaIndex::build(&spanish(), &sequential()).unwrap();
    let report = index.report();

    assert_eq!(report.total, 6);
    assert_eq!(report.aligned, 2);
    assert_eq!(report.resolved_placeholders, 1);
    assert_eq!(report.unresolved_placeholders, 1);
    assert_eq!(report.unannotated, 1);
    assert_eq!(report.malformed, 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].ordinal, 4);
    assert_eq!(report.failures[0].kind, FailureKind::Malformed);
    assert_eq!(report.failures[1].surface, "comer");
  }

  #[test]
  fn malformed_entries_are_excluded() {
    let index = LemmaIndex::build(&spanish(), &sequential()).unwrap();
    assert_eq!(index.len(), 5);
    assert!(index.words_for_surface("x").is_empty());
    assert_eq!(index.lemma_count(), 3);
  }

  #[test]
  fn unresolved_placeholder_stays_in_index() {
    let index = LemmaIndex::build(&spanish(), &sequential()).unwrap();
    let comer = index.words_for_surface("comer");

    assert_eq!(comer.len(), 1);
    assert_eq!(
      comer[0].unresolved_reason(),
      Some(UnresolvedReason::PlaceholderUnresolved)
    );
  }

  #[test]
  fn alignment_failure_keeps_decomposition() {
    let entries = vec![RawEntry::explicit("gehen", "ging", "V", ["walk", "ed"])];
    let index = LemmaIndex::build(&entries, &sequential()).unwrap();
    let word = &index.words()[0];

    assert_eq!(word.decomposition().unwrap().canonical_forms(), vec!["walk", "ed"]);
    assert!(word.segmentation().is_none());
    assert_eq!(index.report().decomposition_only, 1);
  }

  #[test]
  fn derivation_records_are_aligned() {
    let entries = vec![
      RawEntry::derivation("kindness", "kind", "ness", AffixPosition::Suffix),
      RawEntry::derivation("zzz", "kind", "ness", AffixPosition::Suffix),
    ];
    let index = LemmaIndex::build(&entries, &sequential()).unwrap();

    assert_eq!(index.report().derived, 1);
    assert_eq!(index.report().decomposition_only, 1);
    let failed = &index.words()[1];
    assert_eq!(failed.decomposition().unwrap().canonical_forms(), vec!["kind", "ness"]);
  }

  #[test]
  fn lookup_of_absent_lemma_is_empty() {
    let index = LemmaIndex::build(&spanish(), &sequential()).unwrap();
    assert!(index.lookup("nadar").is_empty());
  }

  #[test]
  fn placeholders_do_not_resolve_from_placeholders() {
    let entries = vec![
      RawEntry::same_as_lemma("walk", "walk", ""),
      RawEntry::same_as_lemma("walk", "walks", ""),
    ];
    let index = LemmaIndex::build(&entries, &sequential()).unwrap();
    assert_eq!(index.report().unresolved_placeholders, 2);
  }

  // ─── Concurrency ─────────────────────────────────────────────────────────

  #[test]
  fn parallel_and_sequential_builds_agree() {
    let mut entries = spanish();
    for i in 0..200 {
      entries.push(RawEntry::explicit(
        format!("walk{i}"),
        format!("walk{i}ed"),
        "V",
        [format!("walk{i}"), "ed".to_string()],
      ));
      entries.push(RawEntry::same_as_lemma(format!("walk{i}"), format!("walk{i}"), "V"));
    }

    let sequential_index = LemmaIndex::build(&entries, &sequential()).unwrap();
    let parallel_index = LemmaIndex::build(&entries, &BunkaiConfig::default()).unwrap();

    assert_eq!(sequential_index.words(), parallel_index.words());
    assert_eq!(sequential_index.report(), parallel_index.report());
  }
}
