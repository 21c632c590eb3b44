//! Flat-file ingestion engine.
//!
//! Reads a delimited text file line by line and hands each well-shaped line to
//! a store-specific parser. Failure policy:
//!
//! - a missing file is the only hard failure ([`IngestError::FileNotFound`]);
//! - a bad line is logged, recorded in the [`IngestReport`] and skipped;
//! - any other I/O problem stops reading, is logged and recorded as
//!   `interrupted`, and the run still counts as a success.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

/// Shape of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatFileFormat {
    pub delimiter: char,
    pub fields: usize,
}

impl Default for FlatFileFormat {
    fn default() -> Self {
        Self {
            delimiter: '/',
            fields: 4,
        }
    }
}

impl FlatFileFormat {
    /// Split a line, requiring exactly `self.fields` parts.
    pub fn split<'a>(&self, line: &'a str) -> Result<Vec<&'a str>, LineError> {
        let parts: Vec<&str> = line.split(self.delimiter).collect();
        if parts.len() == self.fields {
            Ok(parts)
        } else {
            Err(LineError::MissingData {
                expected: self.fields,
                found: parts.len(),
            })
        }
    }
}

/// Why a single line was skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum LineError {
    #[error("missing data: expected {expected} fields, found {found}")]
    MissingData { expected: usize, found: usize },

    #[error("invalid {field} format or value '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("could not convert data due to format error: {0}")]
    Format(String),

    #[error("record validation failed, not added")]
    Rejected,
}

impl LineError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
        }
    }
}

/// Hard ingestion failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("file {} could not be found", .0.display())]
    FileNotFound(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: LineError,
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub path: PathBuf,
    /// Lines read, including skipped ones.
    pub lines: usize,
    pub created: usize,
    pub skipped: Vec<SkippedLine>,
    /// Set when reading stopped early on an unexpected I/O error.
    pub interrupted: Option<String>,
}

impl IngestReport {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: 0,
            created: 0,
            skipped: Vec::new(),
            interrupted: None,
        }
    }

    /// No skipped lines and no interruption.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.interrupted.is_none()
    }
}

/// Parse a trimmed field, mapping any parse failure to [`LineError::InvalidField`].
pub fn parse_field<T: FromStr>(raw: &str, field: &'static str) -> Result<T, LineError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| LineError::invalid(field, raw))
}

/// Turn a failed predicate into [`LineError::InvalidField`].
pub fn require(ok: bool, field: &'static str, raw: &str) -> Result<(), LineError> {
    if ok {
        Ok(())
    } else {
        Err(LineError::invalid(field, raw))
    }
}

/// Run `parse_line` over every line of `path`.
///
/// `parse_line` receives the 1-based line number and the split fields and
/// returns `Ok(())` once it has stored a record. The file handle is dropped
/// before this returns on every path.
pub fn ingest_file<P, F>(
    path: P,
    format: &FlatFileFormat,
    mut parse_line: F,
) -> Result<IngestReport, IngestError>
where
    P: AsRef<Path>,
    F: FnMut(usize, &[&str]) -> Result<(), LineError>,
{
    let path = path.as_ref();
    let mut report = IngestReport::new(path);

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "file could not be found");
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "unexpected error opening file");
            report.interrupted = Some(err.to_string());
            return Ok(report);
        }
    };

    info!(path = %path.display(), "data read from file");

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!(
                    path = %path.display(),
                    line = report.lines + 1,
                    error = %err,
                    "unexpected error during file reading"
                );
                report.interrupted = Some(err.to_string());
                break;
            }
        }

        report.lines += 1;
        let line_no = report.lines;
        let outcome = decode_line(&buf, line_no == 1).and_then(|line| {
            let fields = format.split(line)?;
            parse_line(line_no, &fields)
        });

        match outcome {
            Ok(()) => report.created += 1,
            Err(reason) => {
                warn!(path = %path.display(), line = line_no, %reason, "skipping line");
                report.skipped.push(SkippedLine {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    Ok(report)
}

// A byte-order mark is only meaningful at the very start of the file.
fn decode_line(raw: &[u8], first: bool) -> Result<&str, LineError> {
    let mut line = std::str::from_utf8(raw).map_err(|e| LineError::Format(e.to_string()))?;
    if first {
        line = line.strip_prefix('\u{FEFF}').unwrap_or(line);
    }
    Ok(line.trim_end_matches(['\n', '\r']))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn split_requires_exact_field_count() {
        let format = FlatFileFormat::default();
        assert_eq!(format.split("1/a/2/3").unwrap(), vec!["1", "a", "2", "3"]);
        assert_eq!(
            format.split("1/a/2").unwrap_err(),
            LineError::MissingData {
                expected: 4,
                found: 3
            }
        );
        assert_eq!(
            format.split("1/a/2/3/").unwrap_err(),
            LineError::MissingData {
                expected: 4,
                found: 5
            }
        );
    }

    #[test]
    fn parse_field_trims_and_reports_raw_value() {
        assert_eq!(parse_field::<i32>(" 42 ", "id"), Ok(42));
        assert_eq!(
            parse_field::<i32>("x", "id"),
            Err(LineError::invalid("id", "x"))
        );
        assert_eq!(parse_field::<f64>("2.50", "price"), Ok(2.5));
    }

    #[test]
    fn missing_file_is_a_hard_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let mut calls = 0;
        let err = ingest_file(&path, &FlatFileFormat::default(), |_, _| {
            calls += 1;
            Ok(())
        })
        .unwrap_err();
        assert_eq!(err, IngestError::FileNotFound(path));
        assert_eq!(calls, 0);
    }

    #[test]
    fn bad_lines_are_skipped_and_reading_continues() {
        let file = write_file(b"1/a/b/c\nshort\n\n2/a/b/c\r\n3/a/b/c");
        let mut seen = Vec::new();
        let report = ingest_file(file.path(), &FlatFileFormat::default(), |line, fields| {
            seen.push((line, fields[0].to_string(), fields[3].to_string()));
            if fields[0] == "2" {
                Err(LineError::Rejected)
            } else {
                Ok(())
            }
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (1, "1".to_string(), "c".to_string()),
                (4, "2".to_string(), "c".to_string()),
                (5, "3".to_string(), "c".to_string()),
            ]
        );
        assert_eq!(report.lines, 5);
        assert_eq!(report.created, 2);
        let skipped: Vec<usize> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(skipped, vec![2, 3, 4]);
        assert_eq!(report.skipped[2].reason, LineError::Rejected);
        assert!(!report.is_clean());
    }

    #[test]
    fn invalid_utf8_line_is_a_format_error() {
        let file = write_file(b"1/a/b/c\n\xff\xfe/a/b/c\n");
        let report = ingest_file(file.path(), &FlatFileFormat::default(), |_, _| Ok(())).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0].reason, LineError::Format(_)));
    }

    #[test]
    fn leading_byte_order_mark_is_dropped() {
        let file = write_file(b"\xEF\xBB\xBF1/a/b/c\n\xEF\xBB\xBF2/a/b/c\n");
        let mut ids = Vec::new();
        let report = ingest_file(file.path(), &FlatFileFormat::default(), |_, fields| {
            ids.push(fields[0].to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(report.created, 2);
        assert_eq!(ids, vec!["1".to_string(), "\u{FEFF}2".to_string()]);
    }

    #[test]
    fn unreadable_path_is_logged_but_not_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let report = ingest_file(dir.path(), &FlatFileFormat::default(), |_, _| Ok(())).unwrap();
        assert_eq!(report.created, 0);
        assert!(report.interrupted.is_some());
    }

    #[test]
    fn custom_format_is_honoured() {
        let file = write_file(b"1;a\n2;b;c\n");
        let format = FlatFileFormat {
            delimiter: ';',
            fields: 2,
        };
        let report = ingest_file(file.path(), &format, |_, _| Ok(())).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.skipped[0].line, 2);
    }

    #[test]
    fn report_serializes_skip_reasons() {
        let file = write_file(b"x\n");
        let report = ingest_file(file.path(), &FlatFileFormat::default(), |_, _| Ok(())).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["lines"], 1);
        assert_eq!(json["skipped"][0]["line"], 1);
        assert_eq!(json["skipped"][0]["reason"]["MissingData"]["found"], 1);
    }
}
