//! Typed field conversion and row-to-record mapping.
//!
//! Record types declare an explicit `from_row` mapping from column names to
//! typed fields; there is no runtime reflection. A declared field whose
//! column is absent from the input keeps its default value.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::LoadError;
use crate::sheet::Sheet;

/// Date formats accepted for schedule cells, tried in order.
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// Conversion from a raw cell to a typed field value.
///
/// `decimal_comma` carries the sheet's numeric dialect; only numeric targets
/// care. A `None` result becomes a [`LoadError::Conversion`] naming the
/// column and raw value.
pub trait FromField: Sized {
    /// Name of the target type for diagnostics.
    const TARGET: &'static str;

    /// Convert the raw cell text, `None` when it does not parse.
    fn from_field(raw: &str, decimal_comma: bool) -> Option<Self>;
}

impl FromField for String {
    const TARGET: &'static str = "string";

    fn from_field(raw: &str, _decimal_comma: bool) -> Option<Self> {
        Some(raw.to_owned())
    }
}

impl FromField for f64 {
    const TARGET: &'static str = "double";

    fn from_field(raw: &str, decimal_comma: bool) -> Option<Self> {
        let trimmed = raw.trim();
        if decimal_comma {
            trimmed.replace(',', ".").parse().ok()
        } else {
            trimmed.parse().ok()
        }
    }
}

impl FromField for NaiveDateTime {
    const TARGET: &'static str = "datetime";

    fn from_field(raw: &str, _decimal_comma: bool) -> Option<Self> {
        let trimmed = raw.trim();
        for format in DATE_TIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(parsed);
            }
        }
        for format in DATE_FORMATS {
            if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
                return parsed.and_hms_opt(0, 0, 0);
            }
        }
        None
    }
}

impl<T: FromField> FromField for Option<T> {
    const TARGET: &'static str = T::TARGET;

    fn from_field(raw: &str, decimal_comma: bool) -> Option<Self> {
        if raw.trim().is_empty() {
            Some(None)
        } else {
            T::from_field(raw, decimal_comma).map(Some)
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// One data row of a sheet with typed, column-name-addressed access.
pub struct RowView<'sheet> {
    sheet: &'sheet Sheet,
    row: &'sheet [String],
}

impl<'sheet> RowView<'sheet> {
    /// Wrap one row of the given sheet.
    #[must_use]
    pub fn new(sheet: &'sheet Sheet, row: &'sheet [String]) -> Self {
        Self { sheet, row }
    }

    /// Raw cell text for a column, `None` when the column is absent.
    ///
    /// A row shorter than the header reads as empty cells.
    #[must_use]
    pub fn raw(&self, column: &str) -> Option<&'sheet str> {
        let position = self.sheet.column_index(column)?;
        Some(self.row.get(position).map_or("", String::as_str))
    }

    /// Typed cell value for a column; a missing column yields the type's
    /// default, matching the subset-construction rule for records.
    ///
    /// # Errors
    ///
    /// [`LoadError::Conversion`] when the cell text does not parse.
    pub fn field<T: FromField + Default>(&self, column: &str) -> Result<T, LoadError> {
        match self.raw(column) {
            None => Ok(T::default()),
            Some(raw) => self.convert(column, raw),
        }
    }

    /// Typed cell value for a column that must exist in the input.
    ///
    /// # Errors
    ///
    /// [`LoadError::Conversion`] when the column is absent or the cell text
    /// does not parse.
    pub fn required<T: FromField>(&self, column: &str) -> Result<T, LoadError> {
        match self.raw(column) {
            None => Err(LoadError::Conversion {
                column: column.to_owned(),
                value: String::new(),
                target: T::TARGET,
            }),
            Some(raw) => self.convert(column, raw),
        }
    }

    fn convert<T: FromField>(&self, column: &str, raw: &str) -> Result<T, LoadError> {
        T::from_field(raw, self.sheet.separator().decimal_comma()).ok_or_else(|| {
            LoadError::Conversion {
                column: column.to_owned(),
                value: raw.to_owned(),
                target: T::TARGET,
            }
        })
    }
}

/// A record type with an explicit column-to-field mapping.
pub trait SheetRecord: Sized {
    /// Build one record from a row.
    ///
    /// # Errors
    ///
    /// Conversion failures propagate as [`LoadError`].
    fn from_row(row: &RowView<'_>) -> Result<Self, LoadError>;
}

/// Fetch every row of a sheet as a typed record, in file order.
///
/// # Errors
///
/// The first conversion failure aborts the fetch.
pub fn fetch<T: SheetRecord>(sheet: &Sheet) -> Result<Vec<T>, LoadError> {
    sheet
        .rows()
        .iter()
        .map(|row| T::from_row(&RowView::new(sheet, row)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semicolon_sheet() -> Sheet {
        Sheet::parse(
            "t",
            "Name;Value;When\nfoo;3,14;2026-04-06\nbar;;2026-04-06 08:30:00\n",
            None,
        )
        .expect("parses")
    }

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        name: String,
        value: Option<f64>,
        missing: String,
    }

    impl SheetRecord for Sample {
        fn from_row(row: &RowView<'_>) -> Result<Self, LoadError> {
            Ok(Self {
                name: row.field("Name")?,
                value: row.field("Value")?,
                missing: row.field("NoSuchColumn")?,
            })
        }
    }

    #[test]
    fn semicolon_dialect_parses_decimal_commas() {
        let sheet = semicolon_sheet();
        let records: Vec<Sample> = fetch(&sheet).expect("fetches");
        let value = records
            .first()
            .and_then(|sample| sample.value)
            .expect("value given");
        assert!((value - 3.14).abs() < f64::EPSILON, "decimal comma parsed");
    }

    #[test]
    fn empty_cell_is_none_for_nullable_fields() {
        let sheet = semicolon_sheet();
        let records: Vec<Sample> = fetch(&sheet).expect("fetches");
        assert_eq!(records.get(1).map(|sample| sample.value), Some(None));
    }

    #[test]
    fn absent_column_takes_the_default() {
        let sheet = semicolon_sheet();
        let records: Vec<Sample> = fetch(&sheet).expect("fetches");
        assert_eq!(
            records.first().map(|sample| sample.missing.as_str()),
            Some("")
        );
    }

    #[test]
    fn datetime_accepts_date_only_and_full_timestamps() {
        let sheet = semicolon_sheet();
        let rows = sheet.rows();
        let first = RowView::new(&sheet, rows.first().expect("row"));
        let second = RowView::new(&sheet, rows.get(1).expect("row"));
        let date_only: NaiveDateTime = first.required("When").expect("parses");
        let with_time: NaiveDateTime = second.required("When").expect("parses");
        assert_eq!(date_only.format("%H:%M").to_string(), "00:00");
        assert_eq!(with_time.format("%H:%M").to_string(), "08:30");
    }

    #[test]
    fn bad_cell_reports_column_and_value() {
        let sheet = Sheet::parse("t", "Value\nnot-a-number\n", None).expect("parses");
        let row = RowView::new(&sheet, sheet.rows().first().expect("row"));
        let err = row.required::<f64>("Value").expect_err("must fail");
        match err {
            LoadError::Conversion {
                column,
                value,
                target,
            } => {
                assert_eq!(column, "Value");
                assert_eq!(value, "not-a-number");
                assert_eq!(target, "double");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn comma_dialect_keeps_decimal_points() {
        let sheet = Sheet::parse("t", "Value\n2.5\n", None).expect("parses");
        let row = RowView::new(&sheet, sheet.rows().first().expect("row"));
        let value: f64 = row.required("Value").expect("parses");
        assert!((value - 2.5).abs() < f64::EPSILON, "parsed with dot decimal");
    }
}
