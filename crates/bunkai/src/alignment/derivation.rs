//! Alignment of derivation records (`base + one affix`).
//!
//! Suffixing derivations often carry material the record does not mention,
//! e.g. an inflectional ending or an interfix after the derivational suffix
//! (`pose + ier -> posieren`). That trailing residue becomes an extra suffix
//! morpheme instead of being forced into the affix span.

use crate::alignment::aligner::{Aligner, Alignment};
use crate::errors::AlignmentError;
use crate::models::{AffixPosition, Decomposition, Morpheme, Segmentation};

/// Decomposition and alignment produced for one derivation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAnalysis {
  /// `[affix, base]` or `[base, affix]`, plus a residue suffix if any
  pub decomposition: Decomposition,
  /// Alignment over the whole surface
  pub alignment: Alignment,
}

/// Morphemes stated by a derivation record, in reading order.
///
/// A leading `-` on `base` is ignored.
pub fn derivation_morphemes(base: &str, affix: &str, position: AffixPosition) -> Vec<Morpheme> {
  let base = base.trim_start_matches('-');
  match position {
    AffixPosition::Prefix => vec![Morpheme::prefix(affix), Morpheme::stem(base)],
    AffixPosition::Suffix => vec![Morpheme::stem(base), Morpheme::suffix(affix)],
  }
}

/// Aligns a derivation record against `surface`.
///
/// A leading `-` on `base` is ignored. Suffix records try every end position
/// and keep the cheapest; on equal cost the longer aligned prefix (less
/// residue) wins.
///
/// # Errors
/// The alignment error for the full surface when no end position aligns.
pub fn align_derivation(
  aligner: &Aligner,
  surface: &str,
  base: &str,
  affix: &str,
  position: AffixPosition,
) -> Result<DerivedAnalysis, AlignmentError> {
  let morphemes = derivation_morphemes(base, affix, position);
  match position {
    AffixPosition::Prefix => {
      let alignment = aligner.align(surface, &morphemes)?;
      Ok(DerivedAnalysis {
        decomposition: Decomposition::new(morphemes),
        alignment,
      })
    }
    AffixPosition::Suffix => align_suffix(aligner, surface, morphemes),
  }
}

fn align_suffix(
  aligner: &Aligner,
  surface: &str,
  mut morphemes: Vec<Morpheme>,
) -> Result<DerivedAnalysis, AlignmentError> {
  let mut ends: Vec<usize> = surface
    .char_indices()
    .map(|(i, _)| i)
    .skip(1)
    .chain(std::iter::once(surface.len()))
    .collect();
  // longest prefix first, so ties keep the smaller residue
  ends.reverse();

  let mut best: Option<(usize, Alignment)> = None;
  let mut full_error = None;
  for end in ends {
    match aligner.align(&surface[..end], &morphemes) {
      Ok(alignment) => {
        if best.as_ref().is_none_or(|(_, b)| alignment.total_cost < b.total_cost) {
          best = Some((end, alignment));
        }
      }
      Err(e) if end == surface.len() => full_error = Some(e),
      Err(_) => {}
    }
  }

  let Some((end, alignment)) = best else {
    return Err(full_error.unwrap_or_else(|| AlignmentError::NoPartition {
      surface: surface.to_string(),
      morphemes: morphemes.len(),
    }));
  };

  if end == surface.len() {
    return Ok(DerivedAnalysis {
      decomposition: Decomposition::new(morphemes),
      alignment,
    });
  }

  let residue = &surface[end..];
  let mut spans = alignment.segmentation.spans();
  spans.push((end, surface.len()));
  let mut costs = alignment.costs;
  costs.push(0);

  morphemes.push(Morpheme::suffix(residue));

  Ok(DerivedAnalysis {
    decomposition: Decomposition::new(morphemes),
    alignment: Alignment {
      segmentation: Segmentation::from_spans(surface, &spans)?,
      costs,
      total_cost: alignment.total_cost,
    },
  })
}
