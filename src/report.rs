//! Corpus scoring over random reference choices, with optional sentence-level rows.
//!
//! With several reference streams, each iteration draws one reference per
//! sentence, sums the chosen statistics and scores the sum. The reported
//! value is the mean over iterations.

use std::fmt;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::GleuConfig;
use crate::corpus::{CorpusIndex, Tokens};
use crate::error::{GleuError, Result};
use crate::score::{score, sentence_score};
use crate::stats::{collect, Hypothesis, Stats};

/// Two-sided 95% quantile of the standard normal distribution.
const Z_95: f64 = 1.959_963_984_540_054;

const PROGRESS_EVERY: usize = 1000;

/// Mean, population standard deviation and normal 95% interval of a set of scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub stdev: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl Summary {
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                mean: 0.0,
                stdev: 0.0,
                ci_low: 0.0,
                ci_high: 0.0,
            };
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        let stdev = variance.sqrt();
        Self {
            mean,
            stdev,
            ci_low: mean - Z_95 * stdev,
            ci_high: mean + Z_95 * stdev,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} {:.6} ({:.3},{:.3})",
            self.mean, self.stdev, self.ci_low, self.ci_high
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SentenceReport {
    pub index: usize,
    pub summary: Summary,
}

/// Scores of one hypothesis corpus.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub iterations: usize,
    pub overall: Summary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<SentenceReport>,
}

/// For every iteration, one reference index per sentence.
///
/// Iteration `j` uses a generator seeded with `j * seed_stride`, so the draws
/// depend only on the iteration number, not on the hypothesis being scored.
pub fn reference_draws(
    iterations: usize,
    sentences: usize,
    references: usize,
    seed_stride: u64,
) -> Vec<Vec<usize>> {
    (0..iterations)
        .map(|j| {
            let mut rng = StdRng::seed_from_u64(j as u64 * seed_stride);
            (0..sentences)
                .map(|_| rng.gen_range(0..references))
                .collect()
        })
        .collect()
}

/// Scores `hypotheses` (line-aligned to the sources of `index`).
pub fn evaluate(index: &CorpusIndex, hypotheses: &[Tokens], config: &GleuConfig) -> Result<Report> {
    let references = index.num_streams();
    if references == 0 {
        return Err(GleuError::NoReferences);
    }
    if hypotheses.len() > index.len() {
        return Err(GleuError::SentenceOutOfRange {
            sentence: index.len(),
            len: index.len(),
        });
    }
    if hypotheses.len() < index.len() {
        warn!(
            "hypothesis has {} sentences, source has {}; scoring the first {}",
            hypotheses.len(),
            index.len(),
            hypotheses.len()
        );
    }

    let iterations = config.effective_iterations(references);
    info!(
        "scoring {} sentences against {} reference stream(s), {} iteration(s)",
        hypotheses.len(),
        references,
        iterations
    );
    let draws = reference_draws(iterations, hypotheses.len(), references, config.seed_stride);

    let mut iter_stats = vec![Stats::default(); iterations];
    let mut sentences = Vec::new();

    for (i, tokens) in hypotheses.iter().enumerate() {
        let hyp = Hypothesis::new(tokens);
        let mut by_ref: Vec<Option<Stats>> = vec![None; references];

        for (total, draw) in iter_stats.iter_mut().zip(&draws) {
            let r = draw[i];
            let stats = match by_ref[r] {
                Some(stats) => stats,
                None => {
                    let stats = collect(index, i, r, &hyp)?;
                    by_ref[r] = Some(stats);
                    stats
                }
            };
            *total += stats;
        }

        if config.sentence_level {
            let mut scores = Vec::with_capacity(references);
            for (r, cached) in by_ref.iter().enumerate() {
                let stats = match cached {
                    Some(stats) => *stats,
                    None => collect(index, i, r, &hyp)?,
                };
                scores.push(sentence_score(&stats)?);
            }
            sentences.push(SentenceReport {
                index: i,
                summary: Summary::from_scores(&scores),
            });
        }

        if (i + 1) % PROGRESS_EVERY == 0 {
            debug!("scored {} sentences", i + 1);
        }
    }

    let scores = iter_stats
        .iter()
        .map(|stats| score(stats, false))
        .collect::<Result<Vec<_>>>()?;

    Ok(Report {
        iterations,
        overall: Summary::from_scores(&scores),
        sentences,
    })
}
