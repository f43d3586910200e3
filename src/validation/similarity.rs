//! Near-duplicate detection between two turn outputs.
//!
//! The metric is the Ratcliff/Obershelp ratio `2·M / T`, where `T` is the
//! combined length of both texts and `M` the number of characters covered
//! by matching blocks: the longest common substring, then recursively the
//! longest common substrings to its left and to its right. Comparison is
//! case-insensitive and ignores surrounding whitespace.

/// Similarity ratio in `[0.0, 1.0]`; two empty texts are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.trim().to_lowercase().chars().collect();
    let b: Vec<char> = b.trim().to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Whether `candidate` reproduces `reference` at or above `threshold`.
///
/// A blank reference never matches: there is nothing to mirror yet.
pub fn too_similar(candidate: &str, reference: &str, threshold: f64) -> bool {
    if reference.trim().is_empty() {
        return false;
    }
    similarity(candidate, reference) >= threshold
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matches = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_common_block(&a[a_lo..a_hi], &b[b_lo..b_hi]);
        if size == 0 {
            continue;
        }
        matches += size;
        let (i, j) = (a_lo + i, b_lo + j);
        pending.push((a_lo, i, b_lo, j));
        pending.push((i + size, a_hi, j + size, b_hi));
    }
    matches
}

/// Longest common substring as `(start_in_a, start_in_b, len)`; the
/// earliest block in `a` wins ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    if a.is_empty() || b.is_empty() {
        return (0, 0, 0);
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let (mut best_i, mut best_j, mut best) = (0, 0, 0);
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best {
                best = curr[j + 1];
                best_i = i + 1 - best;
                best_j = j + 1 - best;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    (best_i, best_j, best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings() {
        assert_eq!(similarity("hello", "hello"), 1.0);
    }

    #[test]
    fn completely_different() {
        assert!(similarity("abc", "xyz") < 0.5);
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(similarity("  Hello", "hello \n"), 1.0);
    }

    #[test]
    fn empty_strings() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn partial_overlap_ratio() {
        assert!((similarity("abcd", "bcde") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn recurses_on_both_sides_of_the_longest_block() {
        // "ab" + "XYZ" + "cd" vs "ab" + "QQQ" + "cd": blocks "ab" and "cd".
        let ratio = similarity("abXYZcd", "abQQQcd");
        assert!((ratio - 8.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn blank_reference_never_too_similar() {
        assert!(!too_similar("anything", "   ", 0.0));
    }

    #[test]
    fn near_verbatim_copy_is_too_similar() {
        let original = "- PRO1: Heat pumps are three times as efficient as gas boilers\n\
                        - PRO2: The grid decarbonises every year\n\
                        - NEW_ASSUMPTION: Electricity prices stay stable\n\
                        - RISK: Poor installation";
        let copy = original.replace("three", "3");
        assert!(too_similar(&copy, original, 0.92));
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(too_similar("abcd", "bcde", 0.75));
        assert!(!too_similar("abcd", "bcde", 0.76));
    }
}
