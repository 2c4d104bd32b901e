//! Boyer–Moore exact subsequence search
//!
//! Works over any slice of hashable symbols: bytes, chars, interned tokens.
//! Used wherever a phrase has to be located inside a longer token sequence.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Find the leftmost occurrence of `needle` in `haystack`
///
/// Returns `None` if `needle` does not occur. An empty needle matches at 0.
pub fn search<T: Eq + Hash>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    BoyerMoore::new(needle).find(haystack)
}

/// Precomputed shift tables for one needle
#[derive(Debug, Clone)]
pub struct BoyerMoore<'n, T> {
    needle: &'n [T],
    /// Distance from the rightmost occurrence (excluding the last position) to the end
    bad_char: FxHashMap<&'n T, usize>,
    /// Shift indexed by the number of symbols matched before the mismatch
    good_suffix: Vec<usize>,
}

impl<'n, T: Eq + Hash> BoyerMoore<'n, T> {
    pub fn new(needle: &'n [T]) -> Self {
        Self {
            needle,
            bad_char: bad_char_table(needle),
            good_suffix: good_suffix_table(needle),
        }
    }

    pub fn needle(&self) -> &'n [T] {
        self.needle
    }

    /// Leftmost match at or after `start`
    fn find_from(&self, haystack: &[T], start: usize) -> Option<usize> {
        let n = self.needle.len();
        if n == 0 {
            return (start <= haystack.len()).then_some(start);
        }

        let mut i = start + n - 1;
        while i < haystack.len() {
            let mut j = n - 1;
            while self.needle[j] == haystack[i] {
                if j == 0 {
                    return Some(i);
                }
                i -= 1;
                j -= 1;
            }
            // Symbols missing from the table fall back to the good-suffix shift
            let bad = self.bad_char.get(&haystack[i]).copied().unwrap_or(0);
            i += self.good_suffix[n - 1 - j].max(bad);
        }
        None
    }

    pub fn find(&self, haystack: &[T]) -> Option<usize> {
        self.find_from(haystack, 0)
    }

    /// All match positions, overlapping matches included
    pub fn find_all(&self, haystack: &[T]) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.find_from(haystack, start) {
            positions.push(pos);
            start = pos + 1;
            if start > haystack.len() {
                break;
            }
        }
        positions
    }
}

fn bad_char_table<T: Eq + Hash>(needle: &[T]) -> FxHashMap<&T, usize> {
    let n = needle.len();
    let mut table = FxHashMap::default();
    for (i, symbol) in needle.iter().enumerate().take(n.saturating_sub(1)) {
        table.insert(symbol, n - 1 - i);
    }
    table
}

fn good_suffix_table<T: Eq>(needle: &[T]) -> Vec<usize> {
    let n = needle.len();
    let mut table = Vec::with_capacity(n);

    let mut last_prefix_position = n;
    for i in (0..n).rev() {
        if is_prefix(needle, i + 1) {
            last_prefix_position = i + 1;
        }
        table.push(last_prefix_position - i + n - 1);
    }

    for i in 0..n.saturating_sub(1) {
        let slen = suffix_length(needle, i);
        table[slen] = n - 1 - i + slen;
    }

    table
}

/// Is `needle[p..]` also a prefix of `needle`?
fn is_prefix<T: Eq>(needle: &[T], p: usize) -> bool {
    needle[p..].iter().zip(needle).all(|(a, b)| a == b)
}

/// Length of the longest substring ending at `p` that is a suffix of `needle`
fn suffix_length<T: Eq>(needle: &[T], p: usize) -> usize {
    needle[..=p]
        .iter()
        .rev()
        .zip(needle.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}
