use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use gleu::m2::read_m2;

/// Turn M2-annotated files into source and corrected-target sentences.
///
/// With `--source-out` and `--target-out`, writes one sentence per line to
/// each file. Otherwise writes `source ||| target` pairs to stdout.
#[derive(Debug, Parser)]
#[command(name = "m2-to-parallel")]
struct Args {
    /// M2 files, read in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[arg(short = 's', long, requires = "target_out")]
    source_out: Option<PathBuf>,

    #[arg(short = 't', long, requires = "source_out")]
    target_out: Option<PathBuf>,

    /// Apply only the edits of this annotator.
    #[arg(long)]
    annotator: Option<usize>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    let mut pairs: Vec<(String, String)> = Vec::new();
    for path in &args.inputs {
        let entries = read_m2(path)?;
        info!("{}: {} sentences", path.display(), entries.len());
        for entry in &entries {
            let target = entry.corrected(args.annotator)?;
            pairs.push((entry.source.join(" "), target.join(" ")));
        }
    }

    match (&args.source_out, &args.target_out) {
        (Some(source_out), Some(target_out)) => {
            let mut src = BufWriter::new(File::create(source_out)?);
            let mut tgt = BufWriter::new(File::create(target_out)?);
            for (source, target) in &pairs {
                writeln!(src, "{}", source)?;
                writeln!(tgt, "{}", target)?;
            }
            src.flush()?;
            tgt.flush()?;
        }
        _ => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            for (source, target) in &pairs {
                writeln!(out, "{} ||| {}", source, target)?;
            }
            out.flush()?;
        }
    }

    info!("wrote {} sentence pairs", pairs.len());
    Ok(())
}
