use std::{num::ParseFloatError, path::PathBuf};

use thiserror::Error;

/// Errors found while parsing count or location screen files.
///
/// Line numbers are 1 based and include the header line.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{}:{}: expected at least 3 tab separated fields, found {}", .path.display(), .line, .found)]
    TooFewFields {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("{}:{}: expected 4 tab separated fields, found {}", .path.display(), .line, .found)]
    FieldCount {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("{}:{}: read count '{}' is not a number", .path.display(), .line, .value)]
    ReadCount {
        path: PathBuf,
        line: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}
