//! Column header validation for the METAR cache CSV
//!
//! The feed opens with a few free-form status lines followed by a column
//! header row starting with `raw_text`. Parsing is positional, so a layout
//! change upstream would silently mis-assign every field; this module
//! compares the header names at each position the parser reads.

use crate::constants::{HEADER_MARKER, columns};
use crate::{Error, Result};

/// Outcome of inspecting the column header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderCheck {
    /// Header found and every mapped position has the expected name
    Matched { line: usize, columns: usize },

    /// Header found but names or column count differ
    Mismatched { line: usize, problems: Vec<String> },

    /// No line starting with the header marker
    Missing,
}

impl HeaderCheck {
    /// Inspect the text for the column header row
    pub fn inspect(text: &str, min_fields: usize) -> Self {
        let found = text.lines().enumerate().find_map(|(line_num, line)| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            (fields.first() == Some(&HEADER_MARKER)).then_some((line_num, fields))
        });

        match found {
            Some((line, fields)) => {
                let problems = header_problems(&fields, min_fields);
                if problems.is_empty() {
                    HeaderCheck::Matched {
                        line,
                        columns: fields.len(),
                    }
                } else {
                    HeaderCheck::Mismatched { line, problems }
                }
            }
            None => HeaderCheck::Missing,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, HeaderCheck::Matched { .. })
    }

    /// Convert anything but a match into an error
    pub fn into_result(self) -> Result<()> {
        match self {
            HeaderCheck::Matched { .. } => Ok(()),
            HeaderCheck::Mismatched { line, problems } => Err(Error::header_mismatch(format!(
                "column header on line {} differs from expected layout: {}",
                line + 1,
                problems.join("; ")
            ))),
            HeaderCheck::Missing => Err(Error::header_mismatch(format!(
                "no column header row starting with '{}'",
                HEADER_MARKER
            ))),
        }
    }
}

/// List every difference between a header row and the expected layout
fn header_problems(fields: &[&str], min_fields: usize) -> Vec<String> {
    let mut problems = Vec::new();

    if fields.len() < min_fields {
        problems.push(format!(
            "expected at least {} columns, found {}",
            min_fields,
            fields.len()
        ));
    }

    for &(index, expected) in columns::EXPECTED_HEADER {
        match fields.get(index) {
            Some(&actual) if actual == expected => {}
            Some(&actual) => problems.push(format!(
                "column {} is '{}', expected '{}'",
                index, actual, expected
            )),
            None => problems.push(format!("column {} ('{}') is missing", index, expected)),
        }
    }

    problems
}
