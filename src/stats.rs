//! Sufficient statistics for one hypothesis/reference pair.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::corpus::CorpusIndex;
use crate::error::Result;
use crate::ngram::{ngram_counts, ngram_diff, ngram_tables, overlap, NgramTable, ORDER};

/// Number of entries in a statistics tuple.
pub const STATS_LEN: usize = 2 + 2 * ORDER;

/// `(c, r, numerator_1, denominator_1, ..., numerator_4, denominator_4)`.
///
/// Corpus statistics are the column-wise sum of per-sentence tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats(pub [usize; STATS_LEN]);

impl Stats {
    pub fn hypothesis_len(&self) -> usize {
        self.0[0]
    }

    pub fn reference_len(&self) -> usize {
        self.0[1]
    }

    /// `(numerator, denominator)` for order `n` in `1..=ORDER`.
    pub fn precision(&self, n: usize) -> (usize, usize) {
        (self.0[2 * n], self.0[2 * n + 1])
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(mut self, rhs: Stats) -> Stats {
        self += rhs;
        self
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl Sum for Stats {
    fn sum<I: Iterator<Item = Stats>>(iter: I) -> Stats {
        iter.fold(Stats::default(), Add::add)
    }
}

impl<'a> Sum<&'a Stats> for Stats {
    fn sum<I: Iterator<Item = &'a Stats>>(iter: I) -> Stats {
        iter.copied().sum()
    }
}

/// A tokenized hypothesis sentence with its n-gram tables for every order.
#[derive(Debug, Clone)]
pub struct Hypothesis {
    len: usize,
    ngrams: Vec<NgramTable>,
}

impl Hypothesis {
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self {
            len: tokens.len(),
            ngrams: ngram_tables(tokens),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn ngrams(&self, n: usize) -> &NgramTable {
        &self.ngrams[n - 1]
    }
}

/// Statistics of `hyp` against reference `r` of source sentence `i`.
///
/// Each numerator is the reference overlap minus the overlap with source
/// n-grams that this reference dropped, floored at zero.
pub fn collect(index: &CorpusIndex, i: usize, r: usize, hyp: &Hypothesis) -> Result<Stats> {
    let source = index.source_ngrams(i)?;
    let reference = index.reference(i, r)?;

    let mut stats = [0usize; STATS_LEN];
    stats[0] = hyp.len();
    stats[1] = index.reference_len(i, r)?;

    for n in 1..=ORDER {
        let h_ngrams = hyp.ngrams(n);
        let r_ngrams = ngram_counts(reference, n);
        let s_diff = ngram_diff(&source[n - 1], &r_ngrams);

        let matched = overlap(h_ngrams, &r_ngrams);
        let penalty = overlap(h_ngrams, &s_diff);

        stats[2 * n] = matched.saturating_sub(penalty);
        stats[2 * n + 1] = (hyp.len() + 1).saturating_sub(n);
    }
    Ok(Stats(stats))
}

/// Statistics of `hyp` against every reference of sentence `i`, in stream order.
pub fn collect_all(index: &CorpusIndex, i: usize, hyp: &Hypothesis) -> Result<Vec<Stats>> {
    (0..index.num_references(i))
        .map(|r| collect(index, i, r, hyp))
        .collect()
}
