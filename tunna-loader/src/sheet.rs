//! Delimited-text parsing: separator selection, quote-aware splitting,
//! sheets, and workbooks.

use core::mem;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Field separator of a delimited source.
///
/// Locales that write decimal commas ship semicolon-separated files so the
/// separator stays clear of numeric cells; dot-decimal locales use commas.
pub enum Separator {
    /// Comma-separated, decimal point in numeric cells.
    Comma,
    /// Semicolon-separated, decimal comma in numeric cells.
    Semicolon,
}

impl Separator {
    /// The separator character itself.
    #[must_use]
    pub fn char(self) -> char {
        match self {
            Separator::Comma => ',',
            Separator::Semicolon => ';',
        }
    }

    /// Whether numeric cells in this dialect use a decimal comma.
    #[must_use]
    pub fn decimal_comma(self) -> bool {
        matches!(self, Separator::Semicolon)
    }

    /// Pick the separator from a header line: semicolon when present,
    /// comma otherwise.
    #[must_use]
    pub fn detect(header: &str) -> Self {
        if header.contains(';') {
            Separator::Semicolon
        } else {
            Separator::Comma
        }
    }
}

#[derive(Debug)]
/// One parsed table: a header row plus data rows.
pub struct Sheet {
    name: String,
    columns: Vec<String>,
    column_map: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
    separator: Separator,
}

impl Sheet {
    /// Parse delimited text into a sheet.
    ///
    /// The first line is the header; column names match case-insensitively
    /// later. When no separator is given it is detected from the header.
    /// Blank data lines are skipped.
    ///
    /// # Errors
    ///
    /// [`LoadError::MissingHeader`] when the text has no lines at all, and
    /// the quoting errors from [`split_line`] for malformed rows.
    pub fn parse(name: &str, text: &str, separator: Option<Separator>) -> Result<Self, LoadError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or_else(|| LoadError::MissingHeader {
            name: name.to_owned(),
        })?;

        let separator = separator.unwrap_or_else(|| Separator::detect(header));
        let columns = split_line(header, separator.char(), 1)?;

        let mut column_map = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            column_map.entry(column.trim().to_lowercase()).or_insert(position);
        }

        let mut rows = Vec::new();
        for (offset, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            // Header is line 1, so data starts at line 2.
            rows.push(split_line(line, separator.char(), offset + 2)?);
        }

        debug!(sheet = name, rows = rows.len(), ?separator, "parsed sheet");

        Ok(Self {
            name: name.to_owned(),
            columns,
            column_map,
            rows,
            separator,
        })
    }

    /// Sheet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Separator dialect the sheet was parsed with.
    #[must_use]
    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// Header columns in file order, original casing.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a column by case-insensitive name.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_map.get(&column.trim().to_lowercase()).copied()
    }

    /// Parsed data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// Split one delimited line into fields, honoring double quotes.
///
/// A quoted field may contain the separator; `""` inside quotes is a literal
/// quote. `line_number` is only used for diagnostics.
///
/// # Errors
///
/// [`LoadError::UnterminatedQuote`] when a quoted field never closes, and
/// [`LoadError::SeparatorExpected`] when a closing quote is followed by
/// anything but the separator or end of line.
pub fn split_line(
    line: &str,
    separator: char,
    line_number: usize,
) -> Result<Vec<String>, LoadError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_closed = false;
    let mut open_quote_column = 0;

    let mut chars = line.chars().enumerate().peekable();
    while let Some((position, current)) = chars.next() {
        let column = position + 1;
        if in_quotes {
            if current == '"' {
                if chars.peek().is_some_and(|&(_, next)| next == '"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                    quote_closed = true;
                }
            } else {
                field.push(current);
            }
        } else if quote_closed {
            if current == separator {
                fields.push(mem::take(&mut field));
                quote_closed = false;
            } else {
                return Err(LoadError::SeparatorExpected {
                    line: line_number,
                    column,
                });
            }
        } else if current == '"' && field.is_empty() {
            in_quotes = true;
            open_quote_column = column;
        } else if current == separator {
            fields.push(mem::take(&mut field));
        } else {
            field.push(current);
        }
    }

    if in_quotes {
        return Err(LoadError::UnterminatedQuote {
            line: line_number,
            column: open_quote_column,
        });
    }

    fields.push(field);
    Ok(fields)
}

#[derive(Debug)]
/// A set of named sheets.
///
/// On disk a workbook is either a directory whose files are the sheets
/// (file stem = sheet name) or a single delimited file exposed as one sheet.
/// Sheet names resolve case-insensitively.
pub struct Workbook {
    sheets: HashMap<String, Sheet>,
}

impl Workbook {
    /// Open a workbook from a directory of delimited files or a single file.
    ///
    /// Every file is read fully and closed before this returns; no handle
    /// survives into query time.
    ///
    /// # Errors
    ///
    /// I/O failures and any sheet parse error abort the open.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let mut sheets = HashMap::new();
        if path.is_dir() {
            let mut entries: Vec<_> = fs::read_dir(path)?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|entry| entry.path())
                .filter(|candidate| candidate.is_file())
                .collect();
            // Deterministic sheet registration no matter the directory order.
            entries.sort();
            for file in entries {
                let sheet = read_sheet(&file)?;
                sheets.insert(sheet.name().to_lowercase(), sheet);
            }
        } else {
            let sheet = read_sheet(path)?;
            sheets.insert(sheet.name().to_lowercase(), sheet);
        }
        Ok(Self { sheets })
    }

    /// Build a workbook from already parsed sheets.
    #[must_use]
    pub fn from_sheets(parsed: Vec<Sheet>) -> Self {
        let sheets = parsed
            .into_iter()
            .map(|sheet| (sheet.name().to_lowercase(), sheet))
            .collect();
        Self { sheets }
    }

    /// A named sheet, or an error when it is absent.
    ///
    /// # Errors
    ///
    /// [`LoadError::MissingSheet`] when no sheet of that name exists.
    pub fn sheet(&self, name: &str) -> Result<&Sheet, LoadError> {
        self.try_sheet(name).ok_or_else(|| LoadError::MissingSheet {
            name: name.to_owned(),
        })
    }

    /// A named sheet when present.
    #[must_use]
    pub fn try_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(&name.to_lowercase())
    }

    /// A named sheet, falling back to the only sheet of a single-sheet
    /// workbook regardless of its name.
    ///
    /// # Errors
    ///
    /// [`LoadError::MissingSheet`] when the name misses and the workbook has
    /// more than one sheet.
    pub fn sheet_or_single(&self, name: &str) -> Result<&Sheet, LoadError> {
        if let Some(sheet) = self.try_sheet(name) {
            return Ok(sheet);
        }
        let mut values = self.sheets.values();
        match (values.next(), values.next()) {
            (Some(only), None) => Ok(only),
            _ => Err(LoadError::MissingSheet {
                name: name.to_owned(),
            }),
        }
    }
}

fn read_sheet(path: &Path) -> Result<Sheet, LoadError> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = fs::read_to_string(path)?;
    Sheet::parse(&name, &text, None)
}
