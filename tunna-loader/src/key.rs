//! Key-expansion engine: template-driven keys for record dictionaries.

use std::collections::HashMap;

use tracing::debug;

use crate::convert::{RowView, SheetRecord};
use crate::error::LoadError;
use crate::sheet::Sheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What to do when two rows expand to the same key.
pub enum DuplicatePolicy {
    /// Keep the first row, silently drop later ones. Deliberate precision
    /// loss; pick a more discriminating template when uniqueness matters.
    FirstWins,
    /// Fail the load with [`LoadError::DuplicateKey`].
    Fail,
}

/// Expand a `{ColumnName}` template against one row and normalize the result.
///
/// Placeholders match columns case-insensitively. Normalization trims,
/// lowercases, and collapses internal whitespace runs to single spaces, so
/// the same key always comes out for cosmetically different inputs.
///
/// # Errors
///
/// [`LoadError::UnknownColumn`] when a placeholder names a column the input
/// does not have.
pub fn expand_key(template: &str, row: &RowView<'_>) -> Result<String, LoadError> {
    let mut expanded = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(current) = chars.next() {
        if current != '{' {
            expanded.push(current);
            continue;
        }
        let mut column = String::new();
        let mut closed = false;
        for inner in chars.by_ref() {
            if inner == '}' {
                closed = true;
                break;
            }
            column.push(inner);
        }
        if !closed {
            // No closing brace: keep the text literally, like any other char.
            expanded.push('{');
            expanded.push_str(&column);
            break;
        }
        let value = row.raw(&column).ok_or_else(|| LoadError::UnknownColumn {
            column: column.clone(),
            template: template.to_owned(),
        })?;
        expanded.push_str(value);
    }

    Ok(normalize_key(&expanded))
}

/// Trim, lowercase, and collapse whitespace runs to single spaces.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Build a dictionary of typed records keyed by an expanded template.
///
/// Rows are visited in file order; the policy decides what a repeated key
/// does. Lookup through the result is deterministic and single-valued.
///
/// # Errors
///
/// Propagates conversion and template errors, and
/// [`LoadError::DuplicateKey`] under [`DuplicatePolicy::Fail`].
pub fn keyed_records<T: SheetRecord>(
    sheet: &Sheet,
    template: &str,
    policy: DuplicatePolicy,
) -> Result<HashMap<String, T>, LoadError> {
    let mut records = HashMap::new();
    for row in sheet.rows() {
        let view = RowView::new(sheet, row);
        let key = expand_key(template, &view)?;
        // Converted before the duplicate check; a bad cell fails the load
        // even on a row that gets dropped.
        let record = T::from_row(&view)?;
        if records.contains_key(&key) {
            match policy {
                DuplicatePolicy::FirstWins => {
                    debug!(sheet = sheet.name(), key, "duplicate key skipped");
                    continue;
                }
                DuplicatePolicy::Fail => return Err(LoadError::DuplicateKey { key }),
            }
        }
        records.insert(key, record);
    }
    Ok(records)
}
