//! Response Model Definition
//!
//! Absent or unresolved words serialize their payload field as `null`.

use serde::Serialize;

use bunkai::index::LoadReport;
use bunkai::models::{Decomposition, Morph, Morpheme, Segmentation, UnresolvedReason, Word};

/// Morpheme (DTO)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MorphemeDto {
  /// Spelling in the lexical resource
  pub canonical_form: String,
  /// "stem" / "prefix" / "suffix" / "infix" / "unknown"
  pub kind: &'static str,
}

impl From<&Morpheme> for MorphemeDto {
  fn from(morpheme: &Morpheme) -> Self {
    Self {
      canonical_form: morpheme.canonical_form.clone(),
      kind: morpheme.kind.code(),
    }
  }
}

/// Morph (DTO)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MorphDto {
  /// Substring of the surface
  pub text: String,
  /// Start byte position
  pub start: usize,
  /// End byte position
  pub end: usize,
}

impl From<&Morph> for MorphDto {
  fn from(morph: &Morph) -> Self {
    Self {
      text: morph.text.clone(),
      start: morph.start,
      end: morph.end,
    }
  }
}

fn morpheme_dtos(decomposition: &Decomposition) -> Vec<MorphemeDto> {
  decomposition.morphemes().iter().map(MorphemeDto::from).collect()
}

fn morph_dtos(segmentation: &Segmentation) -> Vec<MorphDto> {
  segmentation.morphs().iter().map(MorphDto::from).collect()
}

/// GET /decomposition/{word}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecompositionResponse {
  /// Queried surface
  pub word: String,
  /// Morphemes, `null` when unknown
  pub morphemes: Option<Vec<MorphemeDto>>,
}

impl DecompositionResponse {
  /// Builds the response from a lookup result
  #[must_use]
  pub fn new(word: impl Into<String>, decomposition: Option<&Decomposition>) -> Self {
    Self {
      word: word.into(),
      morphemes: decomposition.map(morpheme_dtos),
    }
  }
}

/// GET /segmentation/{word}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentationResponse {
  /// Queried surface
  pub word: String,
  /// Morphs, `null` when unknown or not aligned
  pub morphs: Option<Vec<MorphDto>>,
}

impl SegmentationResponse {
  /// Builds the response from a lookup result
  #[must_use]
  pub fn new(word: impl Into<String>, segmentation: Option<&Segmentation>) -> Self {
    Self {
      word: word.into(),
      morphs: segmentation.map(morph_dtos),
    }
  }
}

/// One word of a lemma group (DTO)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordDto {
  /// Surface form
  pub surface: String,
  /// Opaque source tag
  pub tag: String,
  /// Morphemes, `null` when unresolved
  pub morphemes: Option<Vec<MorphemeDto>>,
  /// Morphs, `null` when unresolved or not aligned
  pub morphs: Option<Vec<MorphDto>>,
  /// Why the word is unresolved
  #[serde(skip_serializing_if = "Option::is_none")]
  pub unresolved_reason: Option<UnresolvedReason>,
}

impl From<&Word> for WordDto {
  fn from(word: &Word) -> Self {
    Self {
      surface: word.surface().to_string(),
      tag: word.tag().to_string(),
      morphemes: word.decomposition().map(morpheme_dtos),
      morphs: word.segmentation().map(morph_dtos),
      unresolved_reason: word.unresolved_reason(),
    }
  }
}

/// GET /lemma/{lemma}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LemmaResponse {
  /// Queried lemma
  pub lemma: String,
  /// Words in ingestion order, empty when the lemma is unknown
  pub words: Vec<WordDto>,
}

/// GET /diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsResponse {
  /// Sibling selection strategy the dataset was loaded with
  pub sibling_strategy: String,
  /// Load counts and enumerated failures
  pub report: LoadReport,
}

#[cfg(test)]
mod tests {
  use super::*;
  use bunkai::models::MorphemeKind;

  #[test]
  fn absent_decomposition_serializes_as_null() {
    let json = serde_json::to_value(DecompositionResponse::new("ran", None)).unwrap();
    assert_eq!(json["word"], "ran");
    assert!(json["morphemes"].is_null());
  }

  #[test]
  fn morpheme_kind_uses_code() {
    let dto = MorphemeDto::from(&Morpheme::new("ed", MorphemeKind::Suffix));
    assert_eq!(dto.kind, "suffix");
  }

  #[test]
  fn segmentation_carries_byte_offsets() {
    let segmentation = Segmentation::from_spans("été", &[(0, 2), (2, 5)]).unwrap();
    let response = SegmentationResponse::new("été", Some(&segmentation));
    let morphs = response.morphs.unwrap();
    assert_eq!(morphs[1].text, "té");
    assert_eq!((morphs[1].start, morphs[1].end), (2, 5));
  }

  #[test]
  fn morph_serializes_text_start_end() {
    let segmentation = Segmentation::from_spans("walked", &[(0, 4), (4, 6)]).unwrap();
    let json = serde_json::to_value(SegmentationResponse::new("walked", Some(&segmentation))).unwrap();
    assert_eq!(
      json["morphs"][1],
      serde_json::json!({"text": "ed", "start": 4, "end": 6})
    );
  }

  #[test]
  fn unresolved_word_has_null_payload_and_reason() {
    let word = Word::unresolved(0, "hablar", "hablamos", "V", UnresolvedReason::Unannotated);
    let json = serde_json::to_value(WordDto::from(&word)).unwrap();
    assert!(json["morphemes"].is_null());
    assert_eq!(json["unresolved_reason"], "unannotated");
  }
}
