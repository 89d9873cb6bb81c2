//! Brevity penalty times geometric-mean precision over a statistics tuple.
//!
//! Corpus scores must be computed from the column-wise sum of sentence
//! statistics ([`corpus_score`]); averaging [`sentence_score`] values is a
//! different quantity.

use crate::error::{GleuError, Result};
use crate::ngram::ORDER;
use crate::stats::Stats;

/// Log-space brevity term: `min(0, 1 - r / c)`.
pub fn brevity(c: usize, r: usize) -> Result<f64> {
    if c == 0 {
        return Err(GleuError::DivisionByZero);
    }
    Ok((1.0 - r as f64 / c as f64).min(0.0))
}

/// GLEU of one statistics tuple.
///
/// With `smooth`, zero entries count as 1. Without it, any zero entry makes
/// the score 0, except a zero hypothesis length, which is an error.
pub fn score(stats: &Stats, smooth: bool) -> Result<f64> {
    let mut s = stats.0;
    if smooth {
        for x in s.iter_mut().filter(|x| **x == 0) {
            *x = 1;
        }
    }

    let (c, r) = (s[0], s[1]);
    if c == 0 {
        return Err(GleuError::DivisionByZero);
    }
    if s.contains(&0) {
        return Ok(0.0);
    }

    let log_precision = (1..=ORDER)
        .map(|n| (s[2 * n] as f64 / s[2 * n + 1] as f64).ln())
        .sum::<f64>()
        / ORDER as f64;

    Ok((brevity(c, r)? + log_precision).exp())
}

/// Unsmoothed score of the summed statistics of a whole corpus.
pub fn corpus_score<'a, I>(stats: I) -> Result<f64>
where
    I: IntoIterator<Item = &'a Stats>,
{
    score(&stats.into_iter().sum(), false)
}

/// Smoothed score of a single sentence.
pub fn sentence_score(stats: &Stats) -> Result<f64> {
    score(stats, true)
}
