//! Unit-cost Levenshtein distance from one pattern to every prefix of a window.

/// Returns `d` with `d[j] == levenshtein(pattern, &window[..j])` for
/// `j in 0..=window.len()`.
///
/// One row sweep over the pattern answers every candidate span length that
/// starts at the same position.
pub fn prefix_distances(pattern: &[char], window: &[char]) -> Vec<u32> {
  let mut previous: Vec<u32> = (0..=window.len() as u32).collect();
  let mut current = vec![0u32; window.len() + 1];

  for (i, &p) in pattern.iter().enumerate() {
    current[0] = i as u32 + 1;
    for (j, &w) in window.iter().enumerate() {
      let substitution = previous[j] + u32::from(p != w);
      let deletion = previous[j + 1] + 1;
      let insertion = current[j] + 1;
      current[j + 1] = substitution.min(deletion).min(insertion);
    }
    std::mem::swap(&mut previous, &mut current);
  }

  previous
}
