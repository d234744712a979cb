//! Classification report output.
//!
//! The JSON report is the hand-off shape for the storage collaborator:
//! one record per image, in input order.

use crate::classifier::ClassificationResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ReportRecord<'a> {
    path: String,
    #[serde(flatten)]
    result: &'a ClassificationResult,
}

#[derive(Debug)]
pub enum ReportingError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl Display for ReportingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {}", error),
            Self::Serialization(error) => write!(f, "serialization error: {}", error),
        }
    }
}

impl Error for ReportingError {}

/// Write one JSON record per classified image.
pub fn write_report(
    entries: &[(PathBuf, ClassificationResult)],
    output_path: &Path,
) -> Result<(), ReportingError> {
    let records: Vec<ReportRecord<'_>> = entries
        .iter()
        .map(|(path, result)| ReportRecord {
            path: path.to_string_lossy().into_owned(),
            result,
        })
        .collect();

    let file = File::create(output_path).map_err(ReportingError::Io)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &records).map_err(ReportingError::Serialization)
}

/// Print a per-category tally to stdout.
pub fn print_summary(entries: &[(PathBuf, ClassificationResult)]) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, result) in entries {
        *counts.entry(result.category.as_str()).or_insert(0) += 1;
    }

    println!("Classified {} images:", entries.len());
    for (category, count) in counts {
        println!("  {:<12} {}", category, count);
    }
}
