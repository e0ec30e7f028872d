//! Orthographic folding applied before edit-distance scoring.
//!
//! Folding works one character at a time so the folded sequence always has
//! the same length as the input; spans found on it map straight back to the
//! original surface.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folds one character: NFD, drop combining marks, NFKC, lowercase.
///
/// Characters whose fold is not exactly one character (ligatures such as
/// `ﬁ`, or a lone combining mark) fall back to their lowercase form, or to
/// themselves when lowercasing also expands.
pub fn fold_char(c: char) -> char {
  let folded = std::iter::once(c)
    .nfd()
    .filter(|m| !is_combining_mark(*m))
    .nfkc()
    .flat_map(char::to_lowercase);
  single(folded).or_else(|| single(c.to_lowercase())).unwrap_or(c)
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
  match (chars.next(), chars.next()) {
    (Some(c), None) => Some(c),
    _ => None,
  }
}

/// Splits `text` into the character sequence used for scoring.
pub fn fold_chars(text: &str, fold: bool) -> Vec<char> {
  if fold {
    text.chars().map(fold_char).collect()
  } else {
    text.chars().collect()
  }
}

/// Byte offset of every character start in `text`, plus `text.len()`.
///
/// `offsets[i]` is where character `i` starts, so a character span
/// `[a, b)` is the byte span `[offsets[a], offsets[b])`.
pub fn char_offsets(text: &str) -> Vec<usize> {
  text
    .char_indices()
    .map(|(i, _)| i)
    .chain(std::iter::once(text.len()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_diacritics_and_case() {
    assert_eq!(fold_char('É'), 'e');
    assert_eq!(fold_char('ñ'), 'n');
    assert_eq!(fold_char('Ü'), 'u');
    assert_eq!(fold_char('a'), 'a');
  }

  #[test]
  fn keeps_characters_that_would_expand() {
    // NFKC turns the ligature into two letters
    assert_eq!(fold_char('ﬁ'), 'ﬁ');
    assert_eq!(fold_char('ß'), 'ß');
  }

  #[test]
  fn folded_length_matches_input() {
    let text = "Désengageraient";
    assert_eq!(fold_chars(text, true).len(), text.chars().count());
    assert_eq!(fold_chars(text, true).iter().collect::<String>(), "desengageraient");
    assert_eq!(fold_chars(text, false).iter().collect::<String>(), text);
  }

  #[test]
  fn offsets_include_end() {
    assert_eq!(char_offsets("été"), vec![0, 2, 3, 5]);
    assert_eq!(char_offsets(""), vec![0]);
  }
}
