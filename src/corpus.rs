//! Source and reference n-gram index, built once per scoring run.

use std::collections::HashMap;
use std::path::Path;

use log::info;

use crate::error::{GleuError, Result};
use crate::loader::read_corpus;
use crate::ngram::{merge_max, ngram_counts, ngram_tables, Ngram, NgramTable, ORDER};

pub type Tokens = Vec<String>;

/// Per-sentence n-gram tables for the sources and their aligned references.
///
/// Every per-sentence vector is indexed by source position. Read-only once
/// `load_references` has run, so it can be shared across threads as `&CorpusIndex`.
#[derive(Debug, Default, Clone)]
pub struct CorpusIndex {
    source_ngrams: Vec<Vec<NgramTable>>,
    refs: Vec<Vec<Tokens>>,
    ref_lens: Vec<Vec<usize>>,
    merged_ref_ngrams: Vec<Vec<NgramTable>>,
    ref_freq: Vec<HashMap<Ngram, usize>>,
    streams: usize,
}

impl CorpusIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the source file and every reference file, checking that each
    /// reference has exactly one line per source sentence.
    pub fn from_files<S, P>(source: S, references: &[P], lowercase: bool) -> Result<Self>
    where
        S: AsRef<Path>,
        P: AsRef<Path>,
    {
        let mut index = Self::new();
        index.load_sources(&read_corpus(source.as_ref(), lowercase)?);

        let mut streams = Vec::with_capacity(references.len());
        for path in references {
            let stream = read_corpus(path.as_ref(), lowercase)?;
            if stream.len() != index.len() {
                return Err(GleuError::MisalignedReference {
                    name: path.as_ref().display().to_string(),
                    expected: index.len(),
                    found: stream.len(),
                });
            }
            streams.push(stream);
        }
        index.load_references(&streams)?;
        Ok(index)
    }

    pub fn load_sources(&mut self, sources: &[Tokens]) {
        self.source_ngrams = sources.iter().map(|s| ngram_tables(s)).collect();
        info!("loaded {} source sentences", self.source_ngrams.len());
    }

    /// Loads one or more reference streams, each line-aligned to the sources,
    /// then builds the merged reference tables and the reference frequencies.
    ///
    /// The merged table of a sentence starts from the first stream's reference;
    /// later streams only ever raise counts.
    pub fn load_references(&mut self, streams: &[Vec<Tokens>]) -> Result<()> {
        if streams.is_empty() {
            return Err(GleuError::NoReferences);
        }
        let len = self.len();
        for (k, stream) in streams.iter().enumerate() {
            if stream.len() != len {
                return Err(GleuError::MisalignedReference {
                    name: format!("stream {k}"),
                    expected: len,
                    found: stream.len(),
                });
            }
        }

        self.streams = streams.len();
        self.refs = vec![Vec::with_capacity(streams.len()); len];
        self.ref_lens = vec![Vec::with_capacity(streams.len()); len];
        for stream in streams {
            for (i, sentence) in stream.iter().enumerate() {
                self.refs[i].push(sentence.clone());
                self.ref_lens[i].push(sentence.len());
            }
        }

        self.ref_freq = vec![HashMap::new(); ORDER];
        self.merged_ref_ngrams = Vec::with_capacity(len);
        for refset in &self.refs {
            let mut merged = Vec::with_capacity(ORDER);
            for n in 1..=ORDER {
                let mut table = ngram_counts(&refset[0], n);
                for other in &refset[1..] {
                    merge_max(&mut table, &ngram_counts(other, n));
                }
                for key in table.keys() {
                    *self.ref_freq[n - 1].entry(key.clone()).or_insert(0) += 1;
                }
                merged.push(table);
            }
            self.merged_ref_ngrams.push(merged);
        }

        info!(
            "loaded {} reference stream(s) for {} sentences",
            streams.len(),
            len
        );
        Ok(())
    }

    /// Number of source sentences.
    pub fn len(&self) -> usize {
        self.source_ngrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_ngrams.is_empty()
    }

    /// Number of reference streams loaded.
    pub fn num_streams(&self) -> usize {
        self.streams
    }

    /// Number of references loaded for sentence `i` (0 before `load_references`).
    pub fn num_references(&self, i: usize) -> usize {
        self.refs.get(i).map_or(0, Vec::len)
    }

    pub fn source_ngrams(&self, i: usize) -> Result<&[NgramTable]> {
        self.source_ngrams
            .get(i)
            .map(Vec::as_slice)
            .ok_or(GleuError::SentenceOutOfRange {
                sentence: i,
                len: self.len(),
            })
    }

    pub fn reference(&self, i: usize, r: usize) -> Result<&[String]> {
        self.refs
            .get(i)
            .and_then(|refset| refset.get(r))
            .map(Vec::as_slice)
            .ok_or(GleuError::MissingReference {
                sentence: i,
                reference: r,
            })
    }

    pub fn reference_len(&self, i: usize, r: usize) -> Result<usize> {
        self.ref_lens
            .get(i)
            .and_then(|lens| lens.get(r))
            .copied()
            .ok_or(GleuError::MissingReference {
                sentence: i,
                reference: r,
            })
    }

    /// Element-wise maximum of the reference tables of sentence `i`, one per order.
    pub fn merged_reference_ngrams(&self, i: usize) -> Result<&[NgramTable]> {
        self.merged_ref_ngrams
            .get(i)
            .map(Vec::as_slice)
            .ok_or(GleuError::SentenceOutOfRange {
                sentence: i,
                len: self.len(),
            })
    }

    /// Number of sentences whose merged reference table contains `ngram`.
    ///
    /// Not used in scoring.
    pub fn reference_frequency(&self, n: usize, ngram: &[String]) -> usize {
        n.checked_sub(1)
            .and_then(|k| self.ref_freq.get(k))
            .and_then(|freq| freq.get(ngram))
            .copied()
            .unwrap_or(0)
    }

    /// `reference_frequency` divided by the number of references of sentence 0.
    pub fn normalization(&self, n: usize, ngram: &[String]) -> f64 {
        match self.num_references(0) {
            0 => 0.0,
            refs => self.reference_frequency(n, ngram) as f64 / refs as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Tokens {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn index(sources: &[&str], streams: &[&[&str]]) -> CorpusIndex {
        let mut index = CorpusIndex::new();
        index.load_sources(&sources.iter().map(|s| toks(s)).collect::<Vec<_>>());
        let streams: Vec<Vec<Tokens>> = streams
            .iter()
            .map(|stream| stream.iter().map(|s| toks(s)).collect())
            .collect();
        index.load_references(&streams).unwrap();
        index
    }

    #[test]
    fn test_references_grouped_by_sentence() {
        let idx = index(&["a b", "c d e"], &[&["a", "c d"], &["a b x", "c"]]);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.num_streams(), 2);
        assert_eq!(idx.num_references(1), 2);
        assert_eq!(idx.reference(1, 0).unwrap(), toks("c d").as_slice());
        assert_eq!(idx.reference_len(0, 1).unwrap(), 3);
        assert_eq!(idx.source_ngrams(1).unwrap()[2].len(), 1);
    }

    #[test]
    fn test_merged_reference_takes_max_count() {
        let idx = index(&["x"], &[&["the cat the"], &["the the the dog"]]);
        let unigrams = &idx.merged_reference_ngrams(0).unwrap()[0];
        assert_eq!(unigrams.get(&toks("the")), Some(&3));
        assert_eq!(unigrams.get(&toks("cat")), Some(&1));
        assert_eq!(unigrams.get(&toks("dog")), Some(&1));
    }

    #[test]
    fn test_reference_frequency_counts_sentences() {
        let idx = index(&["s1", "s2", "s3"], &[&["a b", "a a", "c"], &["b", "x", "a"]]);
        assert_eq!(idx.reference_frequency(1, &toks("a")), 3);
        assert_eq!(idx.reference_frequency(1, &toks("b")), 1);
        assert_eq!(idx.reference_frequency(2, &toks("a b")), 1);
        assert_eq!(idx.reference_frequency(1, &toks("zzz")), 0);
        assert_eq!(idx.reference_frequency(0, &toks("a")), 0);
        assert!((idx.normalization(1, &toks("a")) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_misaligned_stream_rejected() {
        let mut idx = CorpusIndex::new();
        idx.load_sources(&[toks("a"), toks("b")]);
        let err = idx.load_references(&[vec![toks("a")]]).unwrap_err();
        assert!(matches!(
            err,
            GleuError::MisalignedReference {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_no_references_rejected() {
        let mut idx = CorpusIndex::new();
        idx.load_sources(&[toks("a")]);
        assert!(matches!(idx.load_references(&[]), Err(GleuError::NoReferences)));
    }

    #[test]
    fn test_out_of_range_lookups() {
        let idx = index(&["a"], &[&["a"]]);
        assert!(matches!(
            idx.source_ngrams(5),
            Err(GleuError::SentenceOutOfRange { sentence: 5, len: 1 })
        ));
        assert!(matches!(
            idx.reference(0, 1),
            Err(GleuError::MissingReference { sentence: 0, reference: 1 })
        ));
    }
}
