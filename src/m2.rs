//! Reader for M2 edit annotations and the splice that turns them into
//! corrected sentences.
//!
//! ```text
//! S She go to the market every day .
//! A 1 2|||R:VERB:SVA|||goes|||REQUIRED|||-NONE-|||0
//! ```

use std::fs;
use std::path::Path;

use crate::corpus::Tokens;
use crate::error::{GleuError, Result};

/// Correction text of an annotation that changes nothing.
pub const NOOP: &str = "-NONE-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// 1-based line of the annotation in its file.
    pub line: usize,
    pub start: i64,
    pub end: i64,
    pub error_type: String,
    pub correction: String,
    pub annotator: usize,
}

impl Edit {
    pub fn is_noop(&self) -> bool {
        self.correction == NOOP
    }
}

/// One `S` line with the `A` lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct M2Entry {
    pub source: Tokens,
    pub edits: Vec<Edit>,
}

impl M2Entry {
    /// The source with every edit applied in order, optionally restricted to
    /// one annotator.
    ///
    /// Spans are in source coordinates; each applied edit shifts later spans
    /// by the difference between its correction length and its span length.
    pub fn corrected(&self, annotator: Option<usize>) -> Result<Tokens> {
        let mut sentence = self.source.clone();
        let mut offset: i64 = 0;

        for edit in &self.edits {
            if edit.is_noop() || annotator.is_some_and(|a| a != edit.annotator) {
                continue;
            }
            let start = edit.start + offset;
            let end = edit.end + offset;
            if start < 0 || end > sentence.len() as i64 {
                return Err(GleuError::M2Parse {
                    line: edit.line,
                    message: format!(
                        "span {}..{} falls outside a sentence of {} tokens",
                        edit.start,
                        edit.end,
                        sentence.len()
                    ),
                });
            }

            let replacement: Tokens = edit
                .correction
                .split_whitespace()
                .map(str::to_string)
                .collect();
            let inserted = replacement.len() as i64;
            sentence.splice(start as usize..end as usize, replacement);
            offset += inserted - (edit.end - edit.start);
        }
        Ok(sentence)
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> GleuError {
    GleuError::M2Parse {
        line,
        message: message.into(),
    }
}

fn parse_annotation(line_no: usize, body: &str) -> Result<Edit> {
    let fields: Vec<&str> = body.split("|||").collect();
    if fields.len() < 3 {
        return Err(parse_error(
            line_no,
            format!("expected at least 3 fields, found {}", fields.len()),
        ));
    }

    let positions: Vec<i64> = fields[0]
        .split_whitespace()
        .map(|p| p.parse::<i64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| parse_error(line_no, format!("bad span {:?}: {e}", fields[0])))?;
    let (start, end) = match positions[..] {
        [start, end] => (start, end),
        _ => return Err(parse_error(line_no, format!("bad span {:?}", fields[0]))),
    };

    let correction = fields[2].trim().to_string();
    if correction != NOOP && (start < 0 || end < start) {
        return Err(parse_error(line_no, format!("bad span {start}..{end}")));
    }

    let annotator = match fields.get(5) {
        Some(id) => id
            .trim()
            .parse()
            .map_err(|e| parse_error(line_no, format!("bad annotator id {id:?}: {e}")))?,
        None => 0,
    };

    Ok(Edit {
        line: line_no,
        start,
        end,
        error_type: fields[1].trim().to_string(),
        correction,
        annotator,
    })
}

/// Parses M2 text. Blocks are separated by blank lines.
pub fn parse_m2(text: &str) -> Result<Vec<M2Entry>> {
    let mut entries: Vec<M2Entry> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "S" || line.starts_with("S ") {
            entries.push(M2Entry {
                source: line[1..].split_whitespace().map(str::to_string).collect(),
                edits: Vec::new(),
            });
        } else if let Some(body) = line.strip_prefix("A ") {
            let edit = parse_annotation(line_no, body)?;
            entries
                .last_mut()
                .ok_or_else(|| parse_error(line_no, "annotation before any sentence"))?
                .edits
                .push(edit);
        } else {
            return Err(parse_error(line_no, "line starts with neither S nor A"));
        }
    }
    Ok(entries)
}

/// Reads every M2 entry in the file at `path`.
pub fn read_m2(path: &Path) -> Result<Vec<M2Entry>> {
    let text = fs::read_to_string(path).map_err(|e| GleuError::io(path, e))?;
    parse_m2(&text)
}
