//! Error type shared by the scorer, the corpus loader and the M2 reader.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GleuError>;

#[derive(Debug, Error)]
pub enum GleuError {
    /// Unsmoothed score requested for a hypothesis of length zero.
    #[error("division by zero: hypothesis length is 0 in unsmoothed scoring")]
    DivisionByZero,

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A reference stream does not have one line per source sentence.
    #[error("reference {name} has {found} lines, source has {expected}")]
    MisalignedReference {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("sentence {sentence} has no reference {reference}")]
    MissingReference { sentence: usize, reference: usize },

    #[error("sentence index {sentence} out of range (corpus has {len} sentences)")]
    SentenceOutOfRange { sentence: usize, len: usize },

    #[error("no reference streams loaded")]
    NoReferences,

    #[error("m2 line {line}: {message}")]
    M2Parse { line: usize, message: String },
}

impl GleuError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
