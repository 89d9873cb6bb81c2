//! N-gram frequency tables and the two table operations the scorer needs:
//! the key-presence difference and the clipped intersection count.

use std::collections::HashMap;

/// Highest n-gram order. Fixed for the whole crate.
pub const ORDER: usize = 4;

pub type Ngram = Vec<String>;

/// Occurrence count of every n-gram of one order within one sentence.
pub type NgramTable = HashMap<Ngram, usize>;

/// Counts every contiguous window of `n` tokens in `tokens`.
///
/// A sentence shorter than `n` yields an empty table.
pub fn ngram_counts<S: AsRef<str>>(tokens: &[S], n: usize) -> NgramTable {
    let mut table = NgramTable::new();
    if n == 0 || tokens.len() < n {
        return table;
    }
    for window in tokens.windows(n) {
        let key: Ngram = window.iter().map(|t| t.as_ref().to_string()).collect();
        *table.entry(key).or_insert(0) += 1;
    }
    table
}

/// Tables for orders `1..=ORDER`, index `n - 1` holds order `n`.
pub fn ngram_tables<S: AsRef<str>>(tokens: &[S]) -> Vec<NgramTable> {
    (1..=ORDER).map(|n| ngram_counts(tokens, n)).collect()
}

/// Returns the entries of `a` whose key does not occur in `b` at all.
///
/// This is a key filter, not a count subtraction: `{x: 2}` minus `{x: 1}`
/// is empty, not `{x: 1}`.
pub fn ngram_diff(a: &NgramTable, b: &NgramTable) -> NgramTable {
    a.iter()
        .filter(|(k, _)| !b.contains_key(*k))
        .map(|(k, &c)| (k.clone(), c))
        .collect()
}

/// Sum over shared keys of the smaller of the two counts.
pub fn overlap(a: &NgramTable, b: &NgramTable) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(k, &c)| large.get(k).map(|&d| c.min(d)))
        .sum()
}

/// Raises every count in `base` to the count in `other` where `other` is higher,
/// adding keys `base` lacks.
pub fn merge_max(base: &mut NgramTable, other: &NgramTable) {
    for (k, &c) in other {
        let slot = base.entry(k.clone()).or_insert(0);
        if c > *slot {
            *slot = c;
        }
    }
}
