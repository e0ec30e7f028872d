//! Alignment Engine
//!
//! Partitions a surface string into exactly one non-empty span per morpheme,
//! minimizing the summed edit distance between each morpheme's canonical form
//! and the substring assigned to it.
//!
//! The DP runs backwards: `best[idx][pos]` is the best way for morphemes
//! `idx..n` to cover characters `pos..m`. Storing the first span of every
//! cell lets the tie-break walk the remaining chain without keeping full cost
//! vectors.

use serde::Serialize;
use tracing::trace;

use crate::alignment::edit_distance::prefix_distances;
use crate::alignment::normalize::{char_offsets, fold_chars};
use crate::config::AlignmentConfig;
use crate::errors::AlignmentError;
use crate::models::{Morpheme, Segmentation};

/// Successful alignment of one surface against one morpheme list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
  /// One morph per morpheme, covering the whole surface
  pub segmentation: Segmentation,
  /// Edit distance of each morph against its morpheme
  pub costs: Vec<u32>,
  /// Sum of `costs`
  pub total_cost: u32,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
  total: u32,
  first: u32,
  span: usize,
}

/// Edit-distance aligner.
///
/// Pure: the same inputs always give the same output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aligner {
  span_slack: usize,
  max_edits_per_morpheme: u32,
  fold: bool,
}

impl Default for Aligner {
  fn default() -> Self {
    Self::from_config(&AlignmentConfig::default())
  }
}

impl Aligner {
  /// Builds an aligner from the `[alignment]` section.
  pub fn from_config(config: &AlignmentConfig) -> Self {
    Self {
      span_slack: config.span_slack,
      max_edits_per_morpheme: config.max_edits_per_morpheme,
      fold: config.fold_diacritics,
    }
  }

  /// Acceptance threshold for `morphemes` morphemes.
  pub fn threshold(&self, morphemes: usize) -> u32 {
    u32::try_from(morphemes)
      .unwrap_or(u32::MAX)
      .saturating_mul(self.max_edits_per_morpheme)
  }

  /// Aligns `surface` against `morphemes`.
  ///
  /// Among partitions with equal total cost, the one whose per-morpheme costs
  /// are lexicographically smallest wins; remaining ties go to the shorter
  /// earlier span.
  ///
  /// # Errors
  /// - `EmptySurface` / `EmptyMorphemes` for empty input
  /// - `NoPartition` when the surface has fewer characters than there are
  ///   morphemes, or when spans bounded by `len(canonical) + span_slack`
  ///   cannot reach the end of the surface
  /// - `CostAboveThreshold` when the best partition costs more than
  ///   `morphemes.len() * max_edits_per_morpheme`
  pub fn align(&self, surface: &str, morphemes: &[Morpheme]) -> Result<Alignment, AlignmentError> {
    if surface.is_empty() {
      return Err(AlignmentError::EmptySurface);
    }
    if morphemes.is_empty() {
      return Err(AlignmentError::EmptyMorphemes {
        surface: surface.to_string(),
      });
    }

    let chars = fold_chars(surface, self.fold);
    let (n, m) = (morphemes.len(), chars.len());
    let no_partition = || AlignmentError::NoPartition {
      surface: surface.to_string(),
      morphemes: n,
    };
    if m < n {
      return Err(no_partition());
    }

    let canon: Vec<Vec<char>> = morphemes
      .iter()
      .map(|morpheme| fold_chars(&morpheme.canonical_form, self.fold))
      .collect();

    let mut best: Vec<Vec<Option<Cell>>> = vec![vec![None; m + 1]; n + 1];
    best[n][m] = Some(Cell {
      total: 0,
      first: 0,
      span: 0,
    });

    for idx in (0..n).rev() {
      let max_span = (canon[idx].len() + self.span_slack).max(1);
      let remaining = n - idx - 1;
      // every later morpheme needs at least one character
      for pos in idx..=(m - remaining - 1) {
        let window_end = (pos + max_span).min(m - remaining);
        let distances = prefix_distances(&canon[idx], &chars[pos..window_end]);

        for len in 1..=(window_end - pos) {
          let Some(next) = best[idx + 1][pos + len] else {
            continue;
          };
          let candidate = Cell {
            total: distances[len] + next.total,
            first: distances[len],
            span: len,
          };
          let replace = match best[idx][pos] {
            None => true,
            Some(current) => beats(&best, idx, pos, candidate, current),
          };
          if replace {
            best[idx][pos] = Some(candidate);
          }
        }
      }
    }

    let Some(root) = best[0][0] else {
      return Err(no_partition());
    };

    let offsets = char_offsets(surface);
    let mut spans = Vec::with_capacity(n);
    let mut costs = Vec::with_capacity(n);
    let mut pos = 0;
    for row in best.iter().take(n) {
      let cell = row[pos].ok_or_else(no_partition)?;
      spans.push((offsets[pos], offsets[pos + cell.span]));
      costs.push(cell.first);
      pos += cell.span;
    }

    let threshold = self.threshold(n);
    trace!(surface, total_cost = root.total, threshold, ?spans, "alignment selected");
    if root.total > threshold {
      return Err(AlignmentError::CostAboveThreshold {
        surface: surface.to_string(),
        cost: root.total,
        threshold,
      });
    }

    Ok(Alignment {
      segmentation: Segmentation::from_spans(surface, &spans)?,
      costs,
      total_cost: root.total,
    })
  }
}

/// Strict "candidate beats current" under (total, per-morpheme costs).
fn beats(
  best: &[Vec<Option<Cell>>],
  idx: usize,
  pos: usize,
  candidate: Cell,
  current: Cell,
) -> bool {
  if candidate.total != current.total {
    return candidate.total < current.total;
  }
  if candidate.first != current.first {
    return candidate.first < current.first;
  }

  // Equal so far: compare the two tails morpheme by morpheme.
  let (mut a, mut b) = (pos + candidate.span, pos + current.span);
  for row in best.iter().skip(idx + 1) {
    let (Some(ca), Some(cb)) = (row[a], row[b]) else {
      return false;
    };
    if ca.first != cb.first {
      return ca.first < cb.first;
    }
    a += ca.span;
    b += cb.span;
  }
  false
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::MorphemeKind;

  fn morphemes(forms: &[&str]) -> Vec<Morpheme> {
    forms.iter().map(|f| Morpheme::new(*f, MorphemeKind::Unknown)).collect()
  }

  // ─── Exact Matches ───────────────────────────────────────────────────────

  #[test]
  fn exact_partition_costs_zero() {
    let result = Aligner::default()
      .align("isometrisch", &morphemes(&["iso", "metr", "isch"]))
      .unwrap();

    assert_eq!(result.segmentation.spans(), vec![(0, 3), (3, 7), (7, 11)]);
    assert_eq!(result.segmentation.texts(), vec!["iso", "metr", "isch"]);
    assert_eq!(result.costs, vec![0, 0, 0]);
    assert_eq!(result.total_cost, 0);
  }

  #[test]
  fn walked_splits_at_suffix() {
    let result = Aligner::default().align("walked", &morphemes(&["walk", "ed"])).unwrap();
    assert_eq!(result.segmentation.texts(), vec!["walk", "ed"]);
    assert!(result.segmentation.covers("walked"));
  }

  #[test]
  fn single_morpheme_takes_whole_surface() {
    let result = Aligner::default().align("walk", &morphemes(&["walk"])).unwrap();
    assert_eq!(result.segmentation.spans(), vec![(0, 4)]);
  }

  // ─── Orthographic Drift ──────────────────────────────────────────────────

  #[test]
  fn tolerates_one_edit_per_morpheme() {
    let result = Aligner::default()
      .align("isometrisch", &morphemes(&["iso", "meter", "isch"]))
      .unwrap();
    assert_eq!(result.segmentation.texts(), vec!["iso", "metr", "isch"]);
    assert_eq!(result.total_cost, 1);
  }

  #[test]
  fn equal_totals_prefer_cheaper_earlier_morphemes() {
    // carg|ando costs (2, 0); carga|ndo costs (1, 1)
    let result = Aligner::default()
      .align("cargando", &morphemes(&["cargar", "ando"]))
      .unwrap();
    assert_eq!(result.costs, vec![1, 1]);
    assert_eq!(result.segmentation.texts(), vec!["carga", "ndo"]);
  }

  #[test]
  fn folds_diacritics_before_scoring() {
    let result = Aligner::default()
      .align("Désengageraient", &morphemes(&["des", "engager", "aient"]))
      .unwrap();
    assert_eq!(result.segmentation.texts(), vec!["Dés", "engager", "aient"]);
    assert_eq!(result.total_cost, 0);
    assert_eq!(result.segmentation.spans(), vec![(0, 4), (4, 11), (11, 16)]);
  }

  #[test]
  fn without_folding_diacritics_cost_edits() {
    let aligner = Aligner::from_config(&AlignmentConfig {
      fold_diacritics: false,
      max_edits_per_morpheme: 2,
      ..AlignmentConfig::default()
    });
    let result = aligner.align("Dés", &morphemes(&["des"])).unwrap();
    assert_eq!(result.total_cost, 2);
  }

  // ─── Failures ────────────────────────────────────────────────────────────

  #[test]
  fn rejects_empty_input() {
    let aligner = Aligner::default();
    assert_eq!(aligner.align("", &morphemes(&["a"])), Err(AlignmentError::EmptySurface));
    assert!(matches!(
      aligner.align("a", &[]),
      Err(AlignmentError::EmptyMorphemes { .. })
    ));
  }

  #[test]
  fn more_morphemes_than_characters_has_no_partition() {
    let err = Aligner::default().align("ab", &morphemes(&["a", "b", "c"])).unwrap_err();
    assert_eq!(
      err,
      AlignmentError::NoPartition {
        surface: "ab".to_string(),
        morphemes: 3
      }
    );
  }

  #[test]
  fn span_bound_can_leave_no_partition() {
    let aligner = Aligner::from_config(&AlignmentConfig {
      span_slack: 0,
      ..AlignmentConfig::default()
    });
    let err = aligner.align("walkeded", &morphemes(&["walk", "ed"])).unwrap_err();
    assert!(matches!(err, AlignmentError::NoPartition { .. }));
  }

  #[test]
  fn poor_annotation_is_rejected() {
    let err = Aligner::default().align("gehen", &morphemes(&["walk", "ed"])).unwrap_err();
    match err {
      AlignmentError::CostAboveThreshold { cost, threshold, .. } => {
        assert_eq!(threshold, 2);
        assert!(cost > 2);
      }
      other => panic!("expected CostAboveThreshold, got {other:?}"),
    }
  }

  #[test]
  fn threshold_scales_with_morpheme_count() {
    let aligner = Aligner::from_config(&AlignmentConfig {
      max_edits_per_morpheme: 3,
      ..AlignmentConfig::default()
    });
    assert_eq!(aligner.threshold(4), 12);
  }

  // ─── Determinism ─────────────────────────────────────────────────────────

  #[test]
  fn repeated_runs_are_identical() {
    let aligner = Aligner::default();
    let forms = morphemes(&["un", "believ", "able"]);
    let first = aligner.align("unbelievable", &forms).unwrap();
    for _ in 0..5 {
      assert_eq!(aligner.align("unbelievable", &forms).unwrap(), first);
    }
  }
}
