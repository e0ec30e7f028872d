//! Placeholder Resolver
//!
//! SAME_AS_LEMMA エントリーの分解を、同じ見出し語を持つ兄弟語の分節から復元する。
//!
//! 1. 参照兄弟語を選ぶ（[`SiblingSelector`]）
//! 2. 兄弟語の最終 morph を切り取り語幹を得る
//! 3. 語幹が表層形の接頭辞であることを検証する（推測はしない）
//! 4. 語幹 + 残余から分解・分節を合成する

use tracing::trace;

use crate::config::ResolverConfig;
use crate::errors::ResolveError;
use crate::models::{Decomposition, Morpheme, RawEntry, Segmentation, Word};
use crate::resolver::strategy::{Candidate, SiblingSelector, selector_from_config};

/// SAME_AS_LEMMA エントリーの解決器
///
/// 兄弟語は読み取るだけで、変更しない。
#[derive(Debug)]
pub struct PlaceholderResolver {
  selector: Box<dyn SiblingSelector>,
}

impl Default for PlaceholderResolver {
  fn default() -> Self {
    Self::from_config(&ResolverConfig::default())
  }
}

impl PlaceholderResolver {
  /// 任意の選択戦略で構築する
  pub fn new(selector: Box<dyn SiblingSelector>) -> Self {
    Self { selector }
  }

  /// `[resolver]` セクションから構築する
  pub fn from_config(config: &ResolverConfig) -> Self {
    Self::new(selector_from_config(config))
  }

  /// 使用中の選択戦略名
  pub fn strategy_name(&self) -> &'static str {
    self.selector.name()
  }

  /// プレースホルダーエントリーを解決する。
  ///
  /// # 引数
  /// - `ordinal`: エントリーの取り込み順位置（自分自身は兄弟語から除外される）
  /// - `entry`: SAME_AS_LEMMA のエントリー
  /// - `group`: 同じ見出し語を持つ第1フェーズ済みの語（取り込み順）
  ///
  /// # Errors
  /// - `NotPlaceholder`: SAME_AS_LEMMA ではない
  /// - `NoEligibleSibling`: 2 morph 以上の分節を持つ兄弟語がない、または戦略が選ばない
  /// - `StemNotPrefix`: 語幹が表層形の接頭辞ではない
  pub fn resolve(&self, ordinal: usize, entry: &RawEntry, group: &[&Word]) -> Result<Word, ResolveError> {
    if !entry.morphemes.is_placeholder() {
      return Err(ResolveError::NotPlaceholder {
        surface: entry.surface.clone(),
      });
    }

    let eligible: Vec<(&Word, &Segmentation, String)> = group
      .iter()
      .filter(|w| w.ordinal() != ordinal && w.decomposition().is_some())
      .filter_map(|w| {
        let segmentation = w.segmentation()?;
        let stem = segmentation.without_last(w.surface())?;
        Some((*w, segmentation, stem))
      })
      .collect();

    let candidates: Vec<Candidate<'_>> = eligible
      .iter()
      .map(|(word, segmentation, stem)| Candidate {
        word: *word,
        segmentation: *segmentation,
        stem: stem.as_str(),
      })
      .collect();

    let chosen = self.selector.select(&entry.surface, &candidates);
    let Some(reference) = chosen.and_then(|i| candidates.get(i).copied()) else {
      return Err(ResolveError::NoEligibleSibling {
        lemma: entry.lemma.clone(),
        surface: entry.surface.clone(),
      });
    };

    trace!(
      surface = %entry.surface,
      sibling = %reference.word.surface(),
      stem = %reference.stem,
      strategy = self.selector.name(),
      "reference sibling selected"
    );

    synthesize(ordinal, entry, reference.stem)
  }
}

/// 検証済みの語幹から語を組み立てる
fn synthesize(ordinal: usize, entry: &RawEntry, stem: &str) -> Result<Word, ResolveError> {
  let surface = entry.surface.as_str();
  if stem.is_empty() || !surface.starts_with(stem) {
    return Err(ResolveError::StemNotPrefix {
      stem: stem.to_string(),
      surface: surface.to_string(),
    });
  }

  let residue = &surface[stem.len()..];
  let mut morphemes = vec![Morpheme::stem(stem)];
  let mut spans = vec![(0, stem.len())];
  if !residue.is_empty() {
    morphemes.push(Morpheme::suffix(residue));
    spans.push((stem.len(), surface.len()));
  }

  let segmentation = Segmentation::from_spans(surface, &spans)?;
  Ok(Word::analyzed(
    ordinal,
    entry.lemma.as_str(),
    surface,
    entry.tag.as_str(),
    Decomposition::new(morphemes),
    Some(segmentation),
  ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
