//! Canonical Data Model Definition
//!
//! Morpheme / Morph / Decomposition / Segmentation / Word.
//! All offsets are byte offsets into one specific surface string.
use serde::{Deserialize, Serialize};

use crate::errors::SegmentationError;

/// Position of a morpheme relative to the stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MorphemeKind {
  /// Free or lexical stem
  Stem,
  /// Bound morpheme before the stem
  Prefix,
  /// Bound morpheme after the stem
  Suffix,
  /// Bound morpheme inside the stem
  Infix,
  /// Source annotation does not say
  Unknown,
}

impl MorphemeKind {
  /// Returns the label used in API payloads and logs.
  pub fn code(&self) -> &'static str {
    match self {
      MorphemeKind::Stem => "stem",
      MorphemeKind::Prefix => "prefix",
      MorphemeKind::Suffix => "suffix",
      MorphemeKind::Infix => "infix",
      MorphemeKind::Unknown => "unknown",
    }
  }
}

impl std::fmt::Display for MorphemeKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.code())
  }
}

/// Abstract morphological unit.
///
/// `canonical_form` is the spelling used by the lexical resource, which may
/// differ from the substring that realizes it on a given surface word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Morpheme {
  /// Spelling in the lexical resource
  pub canonical_form: String,
  /// Position relative to the stem
  pub kind: MorphemeKind,
}

impl Morpheme {
  /// Constructor for Morpheme
  pub fn new(canonical_form: impl Into<String>, kind: MorphemeKind) -> Self {
    Self {
      canonical_form: canonical_form.into(),
      kind,
    }
  }

  /// Shorthand for a stem morpheme
  pub fn stem(canonical_form: impl Into<String>) -> Self {
    Self::new(canonical_form, MorphemeKind::Stem)
  }

  /// Shorthand for a suffix morpheme
  pub fn suffix(canonical_form: impl Into<String>) -> Self {
    Self::new(canonical_form, MorphemeKind::Suffix)
  }

  /// Shorthand for a prefix morpheme
  pub fn prefix(canonical_form: impl Into<String>) -> Self {
    Self::new(canonical_form, MorphemeKind::Prefix)
  }
}

/// Literal realization of a morpheme: `surface[start..end] == text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Morph {
  /// Substring of the surface
  pub text: String,
  /// Start byte (inclusive)
  pub start: usize,
  /// End byte (exclusive)
  pub end: usize,
}

impl Morph {
  /// Builds a morph by slicing `surface`.
  ///
  /// # Errors
  /// - `start >= end` or `end > surface.len()`
  /// - a boundary that is not a UTF-8 character boundary
  pub fn from_span(surface: &str, start: usize, end: usize) -> Result<Self, SegmentationError> {
    check_span(surface, start, end)?;
    Ok(Self {
      text: surface[start..end].to_string(),
      start,
      end,
    })
  }

  /// Byte length of the span
  pub fn byte_len(&self) -> usize {
    self.end - self.start
  }
}

fn check_span(surface: &str, start: usize, end: usize) -> Result<(), SegmentationError> {
  if start >= end || end > surface.len() {
    return Err(SegmentationError::InvalidSpan {
      start,
      end,
      len: surface.len(),
    });
  }
  for offset in [start, end] {
    if !surface.is_char_boundary(offset) {
      return Err(SegmentationError::NotCharBoundary { offset });
    }
  }
  Ok(())
}

/// Ordered morphemes of a word, left to right.
///
/// An empty decomposition means "no internal structure", which is different
/// from an unresolved word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
  morphemes: Vec<Morpheme>,
}

impl Decomposition {
  /// Constructor for Decomposition
  pub fn new(morphemes: Vec<Morpheme>) -> Self {
    Self { morphemes }
  }

  /// Builds a decomposition from raw morpheme strings, inferring kinds.
  ///
  /// The first morpheme equal to `lemma` is the stem; morphemes before it are
  /// prefixes and morphemes after it are suffixes. A single morpheme is a stem.
  /// Anything else is `Unknown`.
  pub fn from_raw<S: AsRef<str>>(lemma: &str, raw: &[S]) -> Self {
    let stem_at = raw.iter().position(|m| m.as_ref() == lemma);
    let morphemes = raw
      .iter()
      .enumerate()
      .map(|(i, m)| {
        let kind = match stem_at {
          Some(s) if i < s => MorphemeKind::Prefix,
          Some(s) if i == s => MorphemeKind::Stem,
          Some(_) => MorphemeKind::Suffix,
          None if raw.len() == 1 => MorphemeKind::Stem,
          None => MorphemeKind::Unknown,
        };
        Morpheme::new(m.as_ref(), kind)
      })
      .collect();
    Self { morphemes }
  }

  /// Returns the morphemes in reading order
  pub fn morphemes(&self) -> &[Morpheme] {
    &self.morphemes
  }

  /// Number of morphemes
  pub fn len(&self) -> usize {
    self.morphemes.len()
  }

  /// Whether the word has no internal structure
  pub fn is_empty(&self) -> bool {
    self.morphemes.is_empty()
  }

  /// Canonical forms in order
  pub fn canonical_forms(&self) -> Vec<&str> {
    self.morphemes.iter().map(|m| m.canonical_form.as_str()).collect()
  }
}

/// Which morph stays separate in [`Segmentation::binary_split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitSide {
  /// `[everything before the last morph] [last morph]`
  Last,
  /// `[first morph] [everything after it]`
  First,
}

/// Ordered morphs over one surface string.
///
/// Invariants (checked by every constructor):
/// - non-empty
/// - spans are valid, on character boundaries, and `text == surface[start..end]`
/// - spans are strictly increasing and never overlap (gaps are allowed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segmentation {
  morphs: Vec<Morph>,
}

impl Segmentation {
  /// Validates `morphs` against `surface`.
  ///
  /// # Errors
  /// Returns the first violated invariant as a `SegmentationError`.
  pub fn new(surface: &str, morphs: Vec<Morph>) -> Result<Self, SegmentationError> {
    if morphs.is_empty() {
      return Err(SegmentationError::Empty);
    }

    let mut previous_end = 0;
    for (i, morph) in morphs.iter().enumerate() {
      check_span(surface, morph.start, morph.end)?;

      let expected = &surface[morph.start..morph.end];
      if expected != morph.text {
        return Err(SegmentationError::TextMismatch {
          expected: expected.to_string(),
          actual: morph.text.clone(),
        });
      }

      if i > 0 && morph.start < previous_end {
        return Err(SegmentationError::Overlap {
          previous_end,
          start: morph.start,
        });
      }
      previous_end = morph.end;
    }

    Ok(Self { morphs })
  }

  /// Builds a segmentation from `(start, end)` byte spans.
  ///
  /// # Errors
  /// Same as [`Segmentation::new`].
  pub fn from_spans(surface: &str, spans: &[(usize, usize)]) -> Result<Self, SegmentationError> {
    let morphs = spans
      .iter()
      .map(|&(start, end)| Morph::from_span(surface, start, end))
      .collect::<Result<Vec<_>, _>>()?;
    Self::new(surface, morphs)
  }

  /// Returns the morphs in order
  pub fn morphs(&self) -> &[Morph] {
    &self.morphs
  }

  /// Number of morphs
  pub fn len(&self) -> usize {
    self.morphs.len()
  }

  /// Always false for a validated segmentation
  pub fn is_empty(&self) -> bool {
    self.morphs.is_empty()
  }

  /// Morph texts in order
  pub fn texts(&self) -> Vec<&str> {
    self.morphs.iter().map(|m| m.text.as_str()).collect()
  }

  /// `(start, end)` spans in order
  pub fn spans(&self) -> Vec<(usize, usize)> {
    self.morphs.iter().map(|m| (m.start, m.end)).collect()
  }

  /// Final morph
  pub fn last(&self) -> Option<&Morph> {
    self.morphs.last()
  }

  /// No gaps between consecutive morphs
  pub fn is_contiguous(&self) -> bool {
    self.morphs.windows(2).all(|w| w[0].end == w[1].start)
  }

  /// Contiguous and spanning the whole surface
  pub fn covers(&self, surface: &str) -> bool {
    self.is_contiguous()
      && self.morphs.first().is_some_and(|m| m.start == 0)
      && self.morphs.last().is_some_and(|m| m.end == surface.len())
  }

  /// Returns `surface` with the final morph's span cut out.
  ///
  /// `None` when there are fewer than two morphs, since removing the only
  /// morph leaves nothing to call a stem.
  pub fn without_last(&self, surface: &str) -> Option<String> {
    if self.morphs.len() < 2 {
      return None;
    }
    let last = self.morphs.last()?;
    let mut stem = String::with_capacity(surface.len().saturating_sub(last.byte_len()));
    stem.push_str(surface.get(..last.start)?);
    stem.push_str(surface.get(last.end..)?);
    Some(stem)
  }

  /// Coarsens the segmentation to at most two morphs.
  ///
  /// The merged morph covers the surface from the first merged start to the
  /// last merged end, so gaps inside it become part of its text.
  ///
  /// # Errors
  /// Only if `surface` is not the string this segmentation was built on.
  pub fn binary_split(&self, surface: &str, side: SplitSide) -> Result<Self, SegmentationError> {
    let n = self.morphs.len();
    if n < 2 {
      return Self::new(surface, self.morphs.clone());
    }
    let first = &self.morphs[0];
    let last = &self.morphs[n - 1];
    let spans = match side {
      SplitSide::Last => [(first.start, self.morphs[n - 2].end), (last.start, last.end)],
      SplitSide::First => [(first.start, first.end), (self.morphs[1].start, last.end)],
    };
    Self::from_spans(surface, &spans)
  }

  /// Merges the first two morphs when there are more than two.
  ///
  /// `stem + suffix1 + suffix2` becomes `stem·suffix1 + suffix2`; shorter
  /// segmentations are returned as is. Like [`Segmentation::binary_split`],
  /// a gap between the merged morphs becomes part of the merged text.
  ///
  /// # Errors
  /// Only if `surface` is not the string this segmentation was built on.
  pub fn merge_first_pair(&self, surface: &str) -> Result<Self, SegmentationError> {
    if self.morphs.len() <= 2 {
      return Self::new(surface, self.morphs.clone());
    }
    let mut spans = Vec::with_capacity(self.morphs.len() - 1);
    spans.push((self.morphs[0].start, self.morphs[1].end));
    spans.extend(self.morphs[2..].iter().map(|m| (m.start, m.end)));
    Self::from_spans(surface, &spans)
  }
}

/// Why a word carries no decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedReason {
  /// The source had no morpheme annotation for this entry
  Unannotated,
  /// "Same as lemma" placeholder with no verifiable sibling
  PlaceholderUnresolved,
}

/// Decomposition state of a word.
///
/// A segmentation can only exist next to a decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Analysis {
  /// Morphemes are known; literal boundaries may or may not be
  Known {
    /// Morphemes in reading order
    decomposition: Decomposition,
    /// Literal spans, `None` when alignment failed
    segmentation: Option<Segmentation>,
  },
  /// "We don't know"
  Unresolved {
    /// Cause
    reason: UnresolvedReason,
  },
}

/// Canonical word record, immutable once the load finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
  /// Position in the raw entry stream
  ordinal: usize,
  lemma: String,
  surface: String,
  /// Opaque source label, never parsed
  tag: String,
  analysis: Analysis,
}

impl Word {
  /// Word with a known decomposition.
  pub fn analyzed(
    ordinal: usize,
    lemma: impl Into<String>,
    surface: impl Into<String>,
    tag: impl Into<String>,
    decomposition: Decomposition,
    segmentation: Option<Segmentation>,
  ) -> Self {
    Self {
      ordinal,
      lemma: lemma.into(),
      surface: surface.into(),
      tag: tag.into(),
      analysis: Analysis::Known {
        decomposition,
        segmentation,
      },
    }
  }

  /// Word whose decomposition is unknown.
  pub fn unresolved(
    ordinal: usize,
    lemma: impl Into<String>,
    surface: impl Into<String>,
    tag: impl Into<String>,
    reason: UnresolvedReason,
  ) -> Self {
    Self {
      ordinal,
      lemma: lemma.into(),
      surface: surface.into(),
      tag: tag.into(),
      analysis: Analysis::Unresolved { reason },
    }
  }

  /// Position in the raw entry stream
  pub fn ordinal(&self) -> usize {
    self.ordinal
  }

  /// Lemma
  pub fn lemma(&self) -> &str {
    &self.lemma
  }

  /// Surface form
  pub fn surface(&self) -> &str {
    &self.surface
  }

  /// Source tag
  pub fn tag(&self) -> &str {
    &self.tag
  }

  /// Full analysis state
  pub fn analysis(&self) -> &Analysis {
    &self.analysis
  }

  /// Decomposition, `None` when unresolved
  pub fn decomposition(&self) -> Option<&Decomposition> {
    match &self.analysis {
      Analysis::Known { decomposition, .. } => Some(decomposition),
      Analysis::Unresolved { .. } => None,
    }
  }

  /// Segmentation, `None` when unresolved or not aligned
  pub fn segmentation(&self) -> Option<&Segmentation> {
    match &self.analysis {
      Analysis::Known { segmentation, .. } => segmentation.as_ref(),
      Analysis::Unresolved { .. } => None,
    }
  }

  /// Whether the decomposition is known
  pub fn is_resolved(&self) -> bool {
    matches!(self.analysis, Analysis::Known { .. })
  }

  /// Reason when unresolved
  pub fn unresolved_reason(&self) -> Option<UnresolvedReason> {
    match self.analysis {
      Analysis::Unresolved { reason } => Some(reason),
      Analysis::Known { .. } => None,
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  // ─── Morph ───────────────────────────────────────────────────────────

  #[test]
  fn morph_from_span_slices_surface() {
    let morph = Morph::from_span("walked", 4, 6).unwrap();
    assert_eq!(morph.text, "ed");
    assert_eq!(morph.byte_len(), 2);
  }

  #[test]
  fn morph_rejects_empty_and_out_of_range_spans() {
    assert!(matches!(
      Morph::from_span("walk", 2, 2),
      Err(SegmentationError::InvalidSpan { .. })
    ));
    assert!(matches!(
      Morph::from_span("walk", 2, 9),
      Err(SegmentationError::InvalidSpan { len: 4, .. })
    ));
  }

  #[test]
  fn morph_rejects_non_char_boundary() {
    // "é" is two bytes
    let err = Morph::from_span("été", 0, 1).unwrap_err();
    assert_eq!(err, SegmentationError::NotCharBoundary { offset: 1 });
  }

  // ─── Segmentation ────────────────────────────────────────────────────

  #[test]
  fn segmentation_accepts_gaps_but_not_overlaps() {
    let with_gap = Segmentation::from_spans("abcdef", &[(0, 2), (3, 6)]).unwrap();
    assert!(!with_gap.is_contiguous());
    assert!(!with_gap.covers("abcdef"));

    let err = Segmentation::from_spans("abcdef", &[(0, 3), (2, 6)]).unwrap_err();
    assert_eq!(
      err,
      SegmentationError::Overlap {
        previous_end: 3,
        start: 2
      }
    );
  }

  #[test]
  fn segmentation_rejects_text_mismatch() {
    let morphs = vec![
      Morph {
        text: "iso".into(),
        start: 0,
        end: 3,
      },
      Morph {
        text: "meter".into(),
        start: 3,
        end: 8,
      },
    ];
    let err = Segmentation::new("isometrisch", morphs).unwrap_err();
    assert!(matches!(err, SegmentationError::TextMismatch { .. }));
  }

  #[test]
  fn segmentation_rejects_empty() {
    assert_eq!(Segmentation::new("a", vec![]).unwrap_err(), SegmentationError::Empty);
  }

  #[test]
  fn without_last_cuts_final_span() {
    let seg = Segmentation::from_spans("walked", &[(0, 4), (4, 6)]).unwrap();
    assert_eq!(seg.without_last("walked").as_deref(), Some("walk"));

    let single = Segmentation::from_spans("walk", &[(0, 4)]).unwrap();
    assert_eq!(single.without_last("walk"), None);
  }

  #[test]
  fn binary_split_merges_towards_requested_side() {
    let surface = "unbelievable";
    let seg = Segmentation::from_spans(surface, &[(0, 2), (2, 8), (8, 12)]).unwrap();

    let last = seg.binary_split(surface, SplitSide::Last).unwrap();
    assert_eq!(last.texts(), vec!["unbeliev", "able"]);
    assert_eq!(last.spans(), vec![(0, 8), (8, 12)]);

    let first = seg.binary_split(surface, SplitSide::First).unwrap();
    assert_eq!(first.spans(), vec![(0, 2), (2, 12)]);
    assert_eq!(first.texts(), vec!["un", "believable"]);
  }

  #[test]
  fn merge_first_pair_joins_stem_and_first_suffix() {
    let surface = "hopelessness";
    let seg = Segmentation::from_spans(surface, &[(0, 4), (4, 8), (8, 12)]).unwrap();

    let merged = seg.merge_first_pair(surface).unwrap();
    assert_eq!(merged.texts(), vec!["hopeless", "ness"]);
    assert_eq!(merged.spans(), vec![(0, 8), (8, 12)]);
  }

  #[test]
  fn merge_first_pair_keeps_short_segmentations() {
    let surface = "walked";
    let seg = Segmentation::from_spans(surface, &[(0, 4), (4, 6)]).unwrap();
    assert_eq!(seg.merge_first_pair(surface).unwrap(), seg);

    let single = Segmentation::from_spans("walk", &[(0, 4)]).unwrap();
    assert_eq!(single.merge_first_pair("walk").unwrap(), single);
  }

  // ─── Decomposition ───────────────────────────────────────────────────

  #[test]
  fn from_raw_infers_kinds_around_lemma() {
    let d = Decomposition::from_raw("engager", &["dés", "engager", "eraient"]);
    let kinds: Vec<_> = d.morphemes().iter().map(|m| m.kind).collect();
    assert_eq!(
      kinds,
      vec![MorphemeKind::Prefix, MorphemeKind::Stem, MorphemeKind::Suffix]
    );
  }

  #[test]
  fn from_raw_single_morpheme_is_stem() {
    let d = Decomposition::from_raw("x", &["walk"]);
    assert_eq!(d.morphemes()[0].kind, MorphemeKind::Stem);
  }

  #[test]
  fn from_raw_without_lemma_is_unknown() {
    let d = Decomposition::from_raw("cargar", &["carg", "ando"]);
    assert!(d.morphemes().iter().all(|m| m.kind == MorphemeKind::Unknown));
  }

  // ─── Word ────────────────────────────────────────────────────────────

  #[test]
  fn unresolved_word_differs_from_empty_decomposition() {
    let unknown = Word::unresolved(0, "a", "a", "", UnresolvedReason::PlaceholderUnresolved);
    let atomic = Word::analyzed(1, "a", "a", "", Decomposition::default(), None);

    assert!(unknown.decomposition().is_none());
    assert_eq!(atomic.decomposition().map(Decomposition::is_empty), Some(true));
    assert!(!unknown.is_resolved());
    assert!(atomic.is_resolved());
    assert_eq!(
      unknown.unresolved_reason(),
      Some(UnresolvedReason::PlaceholderUnresolved)
    );
  }

  #[test]
  fn unresolved_word_has_no_segmentation() {
    let w = Word::unresolved(0, "a", "a", "", UnresolvedReason::Unannotated);
    assert!(w.segmentation().is_none());
  }

  #[test]
  fn analysis_serializes_with_status_tag() {
    let w = Word::unresolved(3, "a", "b", "N", UnresolvedReason::Unannotated);
    let json = serde_json::to_value(&w).unwrap();
    assert_eq!(json["analysis"]["status"], "unresolved");
    assert_eq!(json["analysis"]["reason"], "unannotated");
    assert_eq!(json["ordinal"], 3);
  }
}
