//! Error taxonomy for the load phase.

use std::io;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while loading reference data.
///
/// Every variant aborts catalog construction; lookups never see a partially
/// built index.
pub enum LoadError {
    /// The source has no header line.
    #[error("{name}: missing header line")]
    MissingHeader {
        /// Sheet or file the header was expected in.
        name: String,
    },
    /// A quoted field was never closed.
    #[error("unterminated quoted field at line {line}, column {column}")]
    UnterminatedQuote {
        /// One-based line number of the offending row.
        line: usize,
        /// One-based column of the opening quote.
        column: usize,
    },
    /// A closing quote was followed by something other than a separator.
    #[error("expected separator after closing quote at line {line}, column {column}")]
    SeparatorExpected {
        /// One-based line number of the offending row.
        line: usize,
        /// One-based column of the stray character.
        column: usize,
    },
    /// A cell could not be converted to its declared field type.
    #[error("cannot convert {value:?} in column {column} to {target}")]
    Conversion {
        /// Column the cell came from.
        column: String,
        /// The raw cell text.
        value: String,
        /// Name of the destination type.
        target: &'static str,
    },
    /// A second row expanded to an already present key (strict mode only).
    #[error("duplicate key {key:?}")]
    DuplicateKey {
        /// The expanded, normalized key.
        key: String,
    },
    /// A key template references a column the input does not have.
    #[error("key template {template:?} references unknown column {column:?}")]
    UnknownColumn {
        /// The placeholder's column name.
        column: String,
        /// The full template text.
        template: String,
    },
    /// A required named sheet is absent from the workbook.
    #[error("missing sheet {name:?}")]
    MissingSheet {
        /// The sheet that was requested.
        name: String,
    },
    /// A WKT-style coordinate point could not be parsed.
    #[error("cannot parse coordinate point {value:?}")]
    BadCoordinate {
        /// The raw point text.
        value: String,
    },
    /// Reading the source file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
