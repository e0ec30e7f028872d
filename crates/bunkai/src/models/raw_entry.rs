//! RawEntry: FormatAdapter からコアへ渡されるレコードの契約
//!
//! `{lemma, surface, tag, morphemes}` の4項目のみを扱う。
//! タグは不透明なラベルとしてそのまま保持し、コアでは解析しない。

use serde::{Deserialize, Serialize};

use crate::errors::EntryError;

/// MorphyNet 系の表で「見出し語と同じ」を表すセンチネル
pub const SAME_AS_LEMMA_MARKER: &str = "-";

/// 派生レコードにおける接辞の位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AffixPosition {
  /// 接頭辞（基底の前）
  Prefix,
  /// 接尾辞（基底の後）
  Suffix,
}

/// 形態素注釈の3(+1)状態
///
/// JSON 表現は `kind` タグ付き:
/// ```json
/// {"kind": "explicit", "morphemes": ["walk", "ed"]}
/// {"kind": "same-as-lemma"}
/// {"kind": "derivation", "base": "pose", "affix": "ier", "position": "suffix"}
/// {"kind": "absent"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RawMorphemes {
  /// 明示的な形態素列
  Explicit {
    /// 読み順の形態素（正書形）
    morphemes: Vec<String>,
  },
  /// SAME_AS_LEMMA センチネル（兄弟語から復元する）
  SameAsLemma,
  /// 基底 + 接辞1つの派生レコード
  Derivation {
    /// 派生元の語
    base: String,
    /// 付加された接辞
    affix: String,
    /// 接辞の位置
    position: AffixPosition,
  },
  /// 注釈なし
  #[default]
  Absent,
}

impl RawMorphemes {
  /// 区切り文字で連結された形態素フィールドを解釈する。
  ///
  /// - `"-"` → [`RawMorphemes::SameAsLemma`]
  /// - 空（空白のみ含む） → [`RawMorphemes::Absent`]
  /// - それ以外 → `separator` で分割した [`RawMorphemes::Explicit`]
  ///
  /// # Examples
  /// ```
  /// use bunkai::models::RawMorphemes;
  ///
  /// assert_eq!(RawMorphemes::from_delimited("-", '|'), RawMorphemes::SameAsLemma);
  /// assert_eq!(
  ///   RawMorphemes::from_delimited("walk|ed", '|'),
  ///   RawMorphemes::Explicit { morphemes: vec!["walk".into(), "ed".into()] }
  /// );
  /// ```
  pub fn from_delimited(field: &str, separator: char) -> Self {
    let field = field.trim();
    if field.is_empty() {
      return RawMorphemes::Absent;
    }
    if field == SAME_AS_LEMMA_MARKER {
      return RawMorphemes::SameAsLemma;
    }
    RawMorphemes::Explicit {
      morphemes: field.split(separator).map(str::to_string).collect(),
    }
  }

  /// SAME_AS_LEMMA かどうか
  pub fn is_placeholder(&self) -> bool {
    matches!(self, RawMorphemes::SameAsLemma)
  }
}

/// FormatAdapter が生成する1レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
  /// 見出し語
  pub lemma: String,

  /// 表層形（空であってはならない）
  pub surface: String,

  /// 不透明なタグ（例: `V|V.PTCP;PST`）
  #[serde(default)]
  pub tag: String,

  /// 形態素注釈
  #[serde(default)]
  pub morphemes: RawMorphemes,
}

impl RawEntry {
  /// 任意の注釈で構築する
  pub fn new(
    lemma: impl Into<String>,
    surface: impl Into<String>,
    tag: impl Into<String>,
    morphemes: RawMorphemes,
  ) -> Self {
    Self {
      lemma: lemma.into(),
      surface: surface.into(),
      tag: tag.into(),
      morphemes,
    }
  }

  /// 明示的な形態素列を持つエントリー
  pub fn explicit<I, S>(
    lemma: impl Into<String>,
    surface: impl Into<String>,
    tag: impl Into<String>,
    morphemes: I,
  ) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::new(
      lemma,
      surface,
      tag,
      RawMorphemes::Explicit {
        morphemes: morphemes.into_iter().map(Into::into).collect(),
      },
    )
  }

  /// SAME_AS_LEMMA のエントリー
  pub fn same_as_lemma(
    lemma: impl Into<String>,
    surface: impl Into<String>,
    tag: impl Into<String>,
  ) -> Self {
    Self::new(lemma, surface, tag, RawMorphemes::SameAsLemma)
  }

  /// 注釈なしのエントリー
  pub fn absent(lemma: impl Into<String>, surface: impl Into<String>, tag: impl Into<String>) -> Self {
    Self::new(lemma, surface, tag, RawMorphemes::Absent)
  }

  /// 派生レコード（見出し語は先頭の `-` を除いた基底）
  pub fn derivation(
    surface: impl Into<String>,
    base: impl Into<String>,
    affix: impl Into<String>,
    position: AffixPosition,
  ) -> Self {
    let base = base.into();
    let lemma = base.trim_start_matches('-').to_string();
    Self::new(
      lemma,
      surface,
      "",
      RawMorphemes::Derivation {
        base,
        affix: affix.into(),
        position,
      },
    )
  }

  /// FormatAdapter の契約を満たしているか検証する。
  ///
  /// # Errors
  /// - 表層形または見出し語が空
  /// - 明示的な形態素列が空、または空の形態素を含む
  /// - 派生レコードの基底・接辞が空
  pub fn validate(&self) -> Result<(), EntryError> {
    if self.surface.is_empty() {
      return Err(EntryError::EmptySurface {
        lemma: self.lemma.clone(),
      });
    }
    if self.lemma.is_empty() {
      return Err(EntryError::EmptyLemma {
        surface: self.surface.clone(),
      });
    }

    match &self.morphemes {
      RawMorphemes::Explicit { morphemes } => {
        if morphemes.is_empty() {
          return Err(EntryError::EmptyMorphemeList {
            surface: self.surface.clone(),
          });
        }
        if let Some(index) = morphemes.iter().position(|m| m.is_empty()) {
          return Err(EntryError::EmptyMorpheme {
            surface: self.surface.clone(),
            index,
          });
        }
      }
      RawMorphemes::Derivation { base, affix, .. } => {
        if base.trim_start_matches('-').is_empty() || affix.is_empty() {
          return Err(EntryError::EmptyDerivationPart {
            surface: self.surface.clone(),
          });
        }
      }
      RawMorphemes::SameAsLemma | RawMorphemes::Absent => {}
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_delimited_recognises_sentinel_and_absence() {
    assert_eq!(RawMorphemes::from_delimited("-", '|'), RawMorphemes::SameAsLemma);
    assert_eq!(RawMorphemes::from_delimited(" - ", '|'), RawMorphemes::SameAsLemma);
    assert_eq!(RawMorphemes::from_delimited("", '|'), RawMorphemes::Absent);
    assert_eq!(
      RawMorphemes::from_delimited("désengager|eraient", '|'),
      RawMorphemes::Explicit {
        morphemes: vec!["désengager".to_string(), "eraient".to_string()]
      }
    );
  }

  #[test]
  fn validate_rejects_empty_surface() {
    let entry = RawEntry::explicit("walk", "", "V", ["walk"]);
    assert_eq!(
      entry.validate(),
      Err(EntryError::EmptySurface {
        lemma: "walk".to_string()
      })
    );
  }

  #[test]
  fn validate_rejects_empty_morpheme() {
    let entry = RawEntry::explicit("walk", "walked", "V", ["walk", ""]);
    assert!(matches!(
      entry.validate(),
      Err(EntryError::EmptyMorpheme { index: 1, .. })
    ));
  }

  #[test]
  fn validate_rejects_empty_list_and_derivation_parts() {
    let empty: [&str; 0] = [];
    assert!(RawEntry::explicit("a", "a", "", empty).validate().is_err());
    assert!(
      RawEntry::derivation("posieren", "-", "ier", AffixPosition::Suffix).validate().is_err()
    );
  }

  #[test]
  fn derivation_lemma_drops_leading_dash_but_base_keeps_it() {
    let entry = RawEntry::derivation("posieren", "-pose", "ier", AffixPosition::Suffix);
    assert_eq!(entry.lemma, "pose");
    assert_eq!(
      entry.morphemes,
      RawMorphemes::Derivation {
        base: "-pose".into(),
        affix: "ier".into(),
        position: AffixPosition::Suffix,
      }
    );
  }

  #[test]
  fn validate_accepts_placeholder_and_absent() {
    assert!(RawEntry::same_as_lemma("walk", "walk", "V|NFIN").validate().is_ok());
    assert!(RawEntry::absent("walk", "walks", "").validate().is_ok());
  }

  #[test]
  fn deserializes_json_with_default_annotation() {
    let json = r#"{"lemma": "walk", "surface": "walks"}"#;
    let entry: RawEntry = serde_json::from_str(json).unwrap();
    assert_eq!(entry.morphemes, RawMorphemes::Absent);
    assert_eq!(entry.tag, "");

    let json = r#"{"lemma": "walk", "surface": "walk", "tag": "V", "morphemes": {"kind": "same-as-lemma"}}"#;
    let entry: RawEntry = serde_json::from_str(json).unwrap();
    assert!(entry.morphemes.is_placeholder());
  }
}
