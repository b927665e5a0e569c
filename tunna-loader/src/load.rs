//! Catalog assembly from the named reference sheets.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use tunna_core::{
    catalog::Catalog,
    index::AddressIndex,
    model::{AddressInfo, AreaSchedule, Stream},
    schedule::ScheduleIndex,
};

use crate::convert::{RowView, SheetRecord, fetch};
use crate::error::LoadError;
use crate::key::{DuplicatePolicy, keyed_records};
use crate::sheet::{Sheet, Workbook};

/// Sheet holding the address-to-area mapping.
pub const ADDRESS_SHEET: &str = "StadfongSvaedi";
/// Sheet holding grey-stream collection windows.
pub const GREY_SHEET: &str = "LosunGra";
/// Sheet holding blue-stream collection windows.
pub const BLUE_SHEET: &str = "LosunBla";
/// Fallback sheet for single-stream sources; feeds the grey stream.
pub const SINGLE_STREAM_SHEET: &str = "Losun";
/// Sheet holding area display names.
pub const AREA_SHEET: &str = "SvaediNofn";
/// Sheet of the optional address-registry enrichment file.
pub const INFO_SHEET: &str = "Stadfangaskra";

/// Key template for the enrichment dictionary.
pub const INFO_KEY_TEMPLATE: &str = "{Heiti_nf} {Husmerking} {Serheiti}";

/// Address-to-area row of the `StadfongSvaedi` sheet.
#[derive(Debug, PartialEq, Eq)]
pub struct AddressRow {
    /// Full address label, street plus specifier.
    pub address: String,
    /// Collection area code.
    pub area: String,
}

impl SheetRecord for AddressRow {
    fn from_row(row: &RowView<'_>) -> Result<Self, LoadError> {
        Ok(Self {
            address: row.field("Stadfang")?,
            area: row.field("Svaedi")?,
        })
    }
}

/// Collection-window row of the `LosunGra`/`LosunBla` sheets.
#[derive(Debug, PartialEq)]
pub struct ScheduleRow {
    /// Collection area code.
    pub area: String,
    /// Start of the window.
    pub start: chrono::NaiveDateTime,
    /// End of the window, open-ended when absent.
    pub end: Option<chrono::NaiveDateTime>,
}

impl SheetRecord for ScheduleRow {
    fn from_row(row: &RowView<'_>) -> Result<Self, LoadError> {
        Ok(Self {
            area: row.field("Svaedi")?,
            start: row.required("Dags_Fra")?,
            end: row.field("Dags_Til")?,
        })
    }
}

/// Area display-name row of the `SvaediNofn` sheet.
#[derive(Debug, PartialEq, Eq)]
pub struct AreaRow {
    /// Collection area code.
    pub area: String,
    /// Human-friendly name.
    pub name: String,
}

impl SheetRecord for AreaRow {
    fn from_row(row: &RowView<'_>) -> Result<Self, LoadError> {
        Ok(Self {
            area: row.field("Svaedi")?,
            name: row.field("Nafn")?,
        })
    }
}

impl SheetRecord for AddressInfo {
    fn from_row(row: &RowView<'_>) -> Result<Self, LoadError> {
        let latitude: Option<f64> = row.field("N_HNIT_WGS84")?;
        let longitude: Option<f64> = row.field("E_HNIT_WGS84")?;
        // Prefer the plain numeric columns; fall back to the packed WKT
        // point, parsed once here instead of on every access.
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(north), Some(east)) => (north, east),
            _ => {
                let point: String = row.field("Hnit")?;
                if point.trim().is_empty() {
                    (0.0, 0.0)
                } else {
                    let (east, north) = parse_point(&point)?;
                    (north, east)
                }
            }
        };
        Ok(Self {
            street_name: row.field("Heiti_nf")?,
            house_number: row.field("Husmerking")?,
            postal_code: row.field("Postnr")?,
            special_name: row.field("Serheiti")?,
            latitude,
            longitude,
        })
    }
}

/// Parse a WKT-style point, `POINT (east north)`, into its two coordinates.
///
/// # Errors
///
/// [`LoadError::BadCoordinate`] when the text has no parenthesized pair of
/// numbers.
pub fn parse_point(text: &str) -> Result<(f64, f64), LoadError> {
    let mut inside = String::new();
    let mut in_parens = false;
    for current in text.chars() {
        match current {
            '(' if !in_parens => in_parens = true,
            ')' if in_parens => break,
            _ if in_parens => inside.push(current),
            _ => {}
        }
    }

    let mut numbers = inside.split_whitespace().map(str::parse::<f64>);
    match (numbers.next(), numbers.next()) {
        (Some(Ok(east)), Some(Ok(north))) => Ok((east, north)),
        _ => Err(LoadError::BadCoordinate {
            value: text.to_owned(),
        }),
    }
}

/// Load the catalog from a disposal workbook and an optional enrichment file.
///
/// Both sources are read fully and closed before this returns. Any error
/// aborts the whole load; no partially built catalog escapes.
///
/// # Errors
///
/// Every [`LoadError`] variant can surface here.
pub fn load_catalog(disposal: &Path, enrichment: Option<&Path>) -> Result<Catalog, LoadError> {
    let workbook = Workbook::open(disposal)?;
    let info_workbook = enrichment.map(Workbook::open).transpose()?;
    build_catalog(&workbook, info_workbook.as_ref())
}

/// Build the catalog from already opened workbooks.
///
/// # Errors
///
/// Missing required sheets and any parse or conversion failure.
pub fn build_catalog(
    workbook: &Workbook,
    enrichment: Option<&Workbook>,
) -> Result<Catalog, LoadError> {
    let mut addresses = AddressIndex::new();
    for row in fetch::<AddressRow>(workbook.sheet(ADDRESS_SHEET)?)? {
        addresses.insert(&row.address, &row.area);
    }
    info!(streets = addresses.len(), "address index built");

    let mut schedules = ScheduleIndex::new();
    match (workbook.try_sheet(GREY_SHEET), workbook.try_sheet(BLUE_SHEET)) {
        (None, None) => {
            // Single-stream source variant: one Losun sheet, grey only.
            add_schedules(&mut schedules, Stream::Grey, workbook.sheet(SINGLE_STREAM_SHEET)?)?;
        }
        (grey, blue) => {
            if let Some(sheet) = grey {
                add_schedules(&mut schedules, Stream::Grey, sheet)?;
            }
            if let Some(sheet) = blue {
                add_schedules(&mut schedules, Stream::Blue, sheet)?;
            }
        }
    }

    for row in fetch::<AreaRow>(workbook.sheet(AREA_SHEET)?)? {
        schedules.add_area_name(row.area, row.name);
    }

    let info = match enrichment {
        Some(info_workbook) => {
            let sheet = info_workbook.sheet_or_single(INFO_SHEET)?;
            let records: HashMap<String, AddressInfo> =
                keyed_records(sheet, INFO_KEY_TEMPLATE, DuplicatePolicy::FirstWins)?;
            info!(entries = records.len(), "enrichment dictionary built");
            records
        }
        None => HashMap::new(),
    };

    Ok(Catalog::new(addresses, schedules, info))
}

fn add_schedules(
    schedules: &mut ScheduleIndex,
    stream: Stream,
    sheet: &Sheet,
) -> Result<(), LoadError> {
    let rows = fetch::<ScheduleRow>(sheet)?;
    info!(sheet = sheet.name(), windows = rows.len(), %stream, "schedule sheet loaded");
    for row in rows {
        schedules.add_schedule(
            stream,
            AreaSchedule {
                area: row.area,
                start_date: row.start,
                end_date: row.end,
            },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, text: &str) -> Sheet {
        Sheet::parse(name, text, None).expect("parses")
    }

    fn sample_workbook() -> Workbook {
        Workbook::from_sheets(vec![
            sheet(
                ADDRESS_SHEET,
                "Stadfang;Svaedi\nLaugavegur 12;V2\nLaugavegur 14A;V2\nAegisgata 3;V1\n",
            ),
            sheet(
                GREY_SHEET,
                "Svaedi;Dags_Fra;Dags_Til\nV2;2099-04-06;2099-04-10\nV1;2099-05-04;\n",
            ),
            sheet(BLUE_SHEET, "Svaedi;Dags_Fra;Dags_Til\nV2;2099-06-01;2099-06-05\n"),
            sheet(AREA_SHEET, "Svaedi;Nafn\nV2;Vesturbaer\nV1;Midborg\n"),
        ])
    }

    #[test]
    fn every_loaded_address_resolves_to_its_area() {
        let catalog = build_catalog(&sample_workbook(), None).expect("builds");
        assert_eq!(catalog.lookup_area("Laugavegur 12"), Some("V2"));
        assert_eq!(catalog.lookup_area("Laugavegur 14A"), Some("V2"));
        assert_eq!(catalog.lookup_area("Aegisgata 3"), Some("V1"));
        assert_eq!(catalog.area_name("V2"), Some("Vesturbaer"));
    }

    #[test]
    fn both_streams_are_loaded() {
        let catalog = build_catalog(&sample_workbook(), None).expect("builds");
        assert_eq!(catalog.schedules_for_area("V2", Stream::Grey, false).len(), 1);
        assert_eq!(catalog.schedules_for_area("V2", Stream::Blue, false).len(), 1);
        let open_ended = catalog.schedules_for_area("V1", Stream::Grey, false);
        assert_eq!(open_ended.first().and_then(|window| window.end_date), None);
    }

    #[test]
    fn single_losun_sheet_feeds_the_grey_stream() {
        let workbook = Workbook::from_sheets(vec![
            sheet(ADDRESS_SHEET, "Stadfang;Svaedi\nLaugavegur 12;V2\n"),
            sheet(SINGLE_STREAM_SHEET, "Svaedi;Dags_Fra;Dags_Til\nV2;2099-04-06;\n"),
            sheet(AREA_SHEET, "Svaedi;Nafn\nV2;Vesturbaer\n"),
        ]);
        let catalog = build_catalog(&workbook, None).expect("builds");
        assert_eq!(catalog.schedules_for_area("V2", Stream::Grey, false).len(), 1);
        assert!(catalog.schedules_for_area("V2", Stream::Blue, false).is_empty());
    }

    #[test]
    fn missing_address_sheet_fails_the_load() {
        let workbook =
            Workbook::from_sheets(vec![sheet(AREA_SHEET, "Svaedi;Nafn\nV2;Vesturbaer\n")]);
        let err = build_catalog(&workbook, None).expect_err("must fail");
        assert!(matches!(err, LoadError::MissingSheet { name } if name == ADDRESS_SHEET));
    }

    #[test]
    fn enrichment_feeds_autocomplete_info() {
        let info_workbook = Workbook::from_sheets(vec![sheet(
            INFO_SHEET,
            "Heiti_nf;Husmerking;Serheiti;Postnr;N_HNIT_WGS84;E_HNIT_WGS84;Hnit\n\
             Laugavegur;12;;101;64,145;-21,927;\n",
        )]);
        let catalog =
            build_catalog(&sample_workbook(), Some(&info_workbook)).expect("builds");
        let results = catalog.autocomplete_search("Laugavegur 12", false);
        let entry = results.first().expect("one suggestion");
        let attached = entry.info.as_ref().expect("info attached");
        assert_eq!(attached.postal_code, "101");
        assert!((attached.latitude - 64.145).abs() < f64::EPSILON);
    }

    #[test]
    fn wkt_point_is_parsed_eagerly_when_numeric_columns_are_absent() {
        let info_workbook = Workbook::from_sheets(vec![sheet(
            INFO_SHEET,
            "Heiti_nf;Husmerking;Serheiti;Hnit\nLaugavegur;12;;POINT (-21.927 64.145)\n",
        )]);
        let catalog =
            build_catalog(&sample_workbook(), Some(&info_workbook)).expect("builds");
        let results = catalog.autocomplete_search("Laugavegur 12", false);
        let attached = results
            .first()
            .and_then(|entry| entry.info.as_ref())
            .expect("info attached");
        assert!((attached.latitude - 64.145).abs() < f64::EPSILON);
        assert!((attached.longitude - -21.927).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_point_is_a_bad_coordinate() {
        let err = parse_point("POINT (oops)").expect_err("must fail");
        assert!(matches!(err, LoadError::BadCoordinate { .. }));
        assert!(parse_point("POINT (1.5 2.5)").is_ok());
    }
}
