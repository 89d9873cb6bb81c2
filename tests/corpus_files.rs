//! Scoring from files on disk, the way `compute-gleu` drives the library.

use std::fs;
use std::path::{Path, PathBuf};

use gleu::loader::read_corpus;
use gleu::m2::read_m2;
use gleu::{collect, evaluate, score, CorpusIndex, GleuConfig, GleuError, Hypothesis, Stats};

fn write(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_single_reference_corpus_score() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "source.txt", &["he go to school yesterday", "this are a pen"]);
    let reference = write(
        dir.path(),
        "ref0.txt",
        &["he went to school yesterday", "this is a pen"],
    );
    let hypothesis = write(
        dir.path(),
        "hyp.txt",
        &["he went to school yesterday", "this are a pen"],
    );

    let index = CorpusIndex::from_files(&source, &[&reference], false).unwrap();
    let hyps = read_corpus(&hypothesis, false).unwrap();
    let report = evaluate(&index, &hyps, &GleuConfig::default()).unwrap();

    let first = collect(&index, 0, 0, &Hypothesis::new(&hyps[0])).unwrap();
    let second = collect(&index, 1, 0, &Hypothesis::new(&hyps[1])).unwrap();
    assert_eq!(first, Stats([5, 5, 5, 5, 4, 4, 3, 3, 2, 2]));
    // three unigrams match the reference, minus one for keeping the
    // rejected "are"
    assert_eq!(second.precision(1), (2, 4));

    assert_eq!(report.iterations, 1);
    assert_eq!(report.overall.mean, score(&(first + second), false).unwrap());
    assert!(report.overall.mean > 0.0 && report.overall.mean < 1.0);
}

#[test]
fn test_multiple_references_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "source.txt", &["a b c d e", "f g h i j"]);
    let ref0 = write(dir.path(), "ref0.txt", &["a b c d e", "f g h i x"]);
    let ref1 = write(dir.path(), "ref1.txt", &["a b c d y", "f g h i j"]);
    let hypothesis = write(dir.path(), "hyp.txt", &["a b c d e", "f g h i j"]);

    let index = CorpusIndex::from_files(&source, &[&ref0, &ref1], false).unwrap();
    assert_eq!(index.num_streams(), 2);

    let config = GleuConfig {
        iterations: 20,
        sentence_level: true,
        ..GleuConfig::default()
    };
    let hyps = read_corpus(&hypothesis, false).unwrap();
    let report = evaluate(&index, &hyps, &config).unwrap();

    assert_eq!(report.iterations, 20);
    assert_eq!(report.sentences.len(), 2);
    assert!(report.overall.mean > 0.0 && report.overall.mean <= 1.0);
    assert!(report.overall.ci_low <= report.overall.mean);
    assert!(report.overall.mean <= report.overall.ci_high);

    // same draws every run
    let again = evaluate(&index, &hyps, &config).unwrap();
    assert_eq!(report.overall, again.overall);
}

#[test]
fn test_lowercase_matches_across_case() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "source.txt", &["The Cat sat on mat"]);
    let reference = write(dir.path(), "ref0.txt", &["The cat sat on the mat"]);
    let hypothesis = write(dir.path(), "hyp.txt", &["the CAT sat on the mat"]);

    let index = CorpusIndex::from_files(&source, &[&reference], true).unwrap();
    let hyps = read_corpus(&hypothesis, true).unwrap();
    let report = evaluate(&index, &hyps, &GleuConfig::default()).unwrap();
    assert_eq!(report.overall.mean, 1.0);
}

#[test]
fn test_misaligned_reference_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "source.txt", &["a", "b", "c"]);
    let reference = write(dir.path(), "ref0.txt", &["a", "b"]);

    let err = CorpusIndex::from_files(&source, &[&reference], false).unwrap_err();
    match err {
        GleuError::MisalignedReference {
            expected, found, ..
        } => {
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_m2_targets_score_as_references() {
    let dir = tempfile::tempdir().unwrap();
    let m2 = dir.path().join("dev.m2");
    fs::write(
        &m2,
        "S She go to the market every day .\n\
         A 1 2|||R:VERB:SVA|||goes|||REQUIRED|||-NONE-|||0\n\
         \n\
         S I like this book very much .\n\
         A -1 -1|||noop|||-NONE-|||REQUIRED|||-NONE-|||0\n",
    )
    .unwrap();

    let entries = read_m2(&m2).unwrap();
    let sources: Vec<String> = entries.iter().map(|e| e.source.join(" ")).collect();
    let targets: Vec<String> = entries
        .iter()
        .map(|e| e.corrected(None).unwrap().join(" "))
        .collect();
    assert_eq!(targets[0], "She goes to the market every day .");
    assert_eq!(targets[1], sources[1]);

    let source = write(
        dir.path(),
        "source.txt",
        &sources.iter().map(String::as_str).collect::<Vec<_>>(),
    );
    let reference = write(
        dir.path(),
        "target.txt",
        &targets.iter().map(String::as_str).collect::<Vec<_>>(),
    );

    let index = CorpusIndex::from_files(&source, &[&reference], false).unwrap();

    let perfect = read_corpus(&reference, false).unwrap();
    let report = evaluate(&index, &perfect, &GleuConfig::default()).unwrap();
    assert_eq!(report.overall.mean, 1.0);

    // leaving the error in scores lower than fixing it
    let unchanged = read_corpus(&source, false).unwrap();
    let report = evaluate(&index, &unchanged, &GleuConfig::default()).unwrap();
    assert!(report.overall.mean < 1.0);
}
