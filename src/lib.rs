//! GLEU: n-gram precision of a corrected sentence against reference
//! corrections, penalizing n-grams the references removed from the source.
//!
//! ```
//! use gleu::{collect, sentence_score, CorpusIndex, Hypothesis};
//!
//! let toks = |s: &str| s.split_whitespace().map(String::from).collect::<Vec<_>>();
//! let mut index = CorpusIndex::new();
//! index.load_sources(&[toks("a b c")]);
//! index.load_references(&[vec![toks("a b c")]]).unwrap();
//!
//! let stats = collect(&index, 0, 0, &Hypothesis::new(&toks("a b d"))).unwrap();
//! assert_eq!(stats.0, [3, 3, 2, 3, 1, 2, 0, 1, 0, 0]);
//! assert!((sentence_score(&stats).unwrap() - 0.7599).abs() < 1e-4);
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod loader;
pub mod m2;
pub mod ngram;
pub mod report;
pub mod score;
pub mod stats;

pub use config::GleuConfig;
pub use corpus::{CorpusIndex, Tokens};
pub use error::{GleuError, Result};
pub use ngram::{ngram_counts, ngram_diff, Ngram, NgramTable, ORDER};
pub use report::{evaluate, Report, Summary};
pub use score::{corpus_score, score, sentence_score};
pub use stats::{collect, collect_all, Hypothesis, Stats};
