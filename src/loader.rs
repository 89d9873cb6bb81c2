//! Reads whitespace-tokenized corpora, one sentence per line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::corpus::Tokens;
use crate::error::{GleuError, Result};

/// Splits a line on whitespace, optionally lowercasing it first.
pub fn tokenize(line: &str, lowercase: bool) -> Tokens {
    if lowercase {
        line.to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    } else {
        line.split_whitespace().map(str::to_string).collect()
    }
}

/// Tokenizes every line of `reader`.
pub fn read_lines<R: BufRead>(reader: R, lowercase: bool) -> io::Result<Vec<Tokens>> {
    reader
        .lines()
        .map(|line| line.map(|l| tokenize(&l, lowercase)))
        .collect()
}

/// Reads the corpus at `path`; `-` reads standard input.
pub fn read_corpus(path: &Path, lowercase: bool) -> Result<Vec<Tokens>> {
    let lines = if path == Path::new("-") {
        read_lines(io::stdin().lock(), lowercase)
    } else {
        File::open(path).and_then(|f| read_lines(BufReader::new(f), lowercase))
    };
    lines.map_err(|e| GleuError::io(path, e))
}
