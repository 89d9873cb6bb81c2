use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use serde::Serialize;

use gleu::loader::read_corpus;
use gleu::{evaluate, CorpusIndex, GleuConfig, Report};

/// Compute GLEU for one or more hypothesis files.
#[derive(Debug, Parser)]
#[command(name = "compute-gleu")]
struct Args {
    /// Source sentences, one per line, whitespace tokenized.
    #[arg(short = 's', long)]
    source: PathBuf,

    /// Reference files, each line-aligned to the source.
    #[arg(short = 'r', long = "reference", required = true, num_args = 1..)]
    references: Vec<PathBuf>,

    /// Hypothesis files to score; `-` reads stdin.
    #[arg(short = 'o', long = "hypothesis", required = true, num_args = 1..)]
    hypotheses: Vec<PathBuf>,

    /// Iterations over random reference choices.
    #[arg(long = "iter", default_value_t = 500)]
    iterations: usize,

    /// Print sentence-level scores.
    #[arg(short, long)]
    debug: bool,

    /// Lowercase all input.
    #[arg(short, long)]
    lowercase: bool,

    /// Print a JSON report instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct HypothesisReport {
    hypothesis: String,
    #[serde(flatten)]
    report: Report,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_text<W: Write>(out: &mut W, name: &str, report: &Report, debug: bool) -> io::Result<()> {
    if !debug {
        writeln!(out, "{}", name)?;
        return writeln!(out, "{:.6}", report.overall.mean);
    }

    writeln!(out, "===== Sentence-level scores =====")?;
    writeln!(out, "SID Mean Stdev 95%CI GLEU")?;
    for row in &report.sentences {
        writeln!(out, "{} {}", row.index, row.summary)?;
    }
    writeln!(out)?;
    writeln!(out, "==== Overall score =====")?;
    writeln!(out, "Mean Stdev 95%CI GLEU")?;
    writeln!(out, "{}", report.overall)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = GleuConfig {
        iterations: args.iterations,
        lowercase: args.lowercase,
        sentence_level: args.debug,
        ..GleuConfig::default()
    };

    let index = CorpusIndex::from_files(&args.source, &args.references, config.lowercase)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut reports = Vec::new();

    for path in &args.hypotheses {
        let name = display_name(path);
        info!("scoring {}", name);
        let hypotheses = read_corpus(path, config.lowercase)?;
        let report = evaluate(&index, &hypotheses, &config)?;

        if args.json {
            reports.push(HypothesisReport {
                hypothesis: name,
                report,
            });
        } else {
            write_text(&mut out, &name, &report, args.debug)?;
        }
    }

    if args.json {
        serde_json::to_writer_pretty(&mut out, &reports)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
