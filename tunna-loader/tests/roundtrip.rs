//! End-to-end load tests against real files on disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use tunna_core::model::Stream;
use tunna_loader::{
    ADDRESS_SHEET, AREA_SHEET, AddressRow, BLUE_SHEET, GREY_SHEET, LoadError, Workbook, fetch,
    load_catalog,
};

fn write_sheet(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(format!("{name}.csv")), text).expect("writes fixture");
}

fn write_disposal_workbook(dir: &Path) {
    write_sheet(
        dir,
        ADDRESS_SHEET,
        "Stadfang;Svaedi\n\
         Laugavegur 12;V2\n\
         Laugavegur 14A;V2\n\
         \"Aegisgata;torg 3\";V1\n\
         Skolavordustigur 8;A1\n",
    );
    write_sheet(
        dir,
        GREY_SHEET,
        "Svaedi;Dags_Fra;Dags_Til\n\
         V2;2099-04-06;2099-04-10\n\
         V1;2099-05-04;\n\
         A1;2020-01-06;2020-01-10\n",
    );
    write_sheet(dir, BLUE_SHEET, "Svaedi;Dags_Fra;Dags_Til\nV2;2099-06-01;2099-06-05\n");
    write_sheet(dir, AREA_SHEET, "Svaedi;Nafn\nV2;Vesturbaer\nV1;Midborg\nA1;Austurbaer\n");
}

#[test]
fn loaded_workbook_round_trips_every_address() {
    let dir = TempDir::new().expect("temp dir");
    write_disposal_workbook(dir.path());

    let catalog = load_catalog(dir.path(), None).expect("loads");

    // Every row of the source must resolve back to its recorded area.
    let workbook = Workbook::open(dir.path()).expect("reopens");
    let rows: Vec<AddressRow> =
        fetch(workbook.sheet(ADDRESS_SHEET).expect("sheet")).expect("rows");
    assert_eq!(rows.len(), 4, "fixture rows");
    for row in rows {
        assert_eq!(
            catalog.lookup_area(&row.address),
            Some(row.area.as_str()),
            "{}",
            row.address
        );
    }
}

#[test]
fn quoted_street_splits_on_space_not_separator() {
    let dir = TempDir::new().expect("temp dir");
    write_disposal_workbook(dir.path());
    let catalog = load_catalog(dir.path(), None).expect("loads");
    assert_eq!(catalog.lookup_area("Aegisgata;torg 3"), Some("V1"));
}

#[test]
fn future_filter_applies_at_the_service_boundary() {
    let dir = TempDir::new().expect("temp dir");
    write_disposal_workbook(dir.path());
    let catalog = load_catalog(dir.path(), None).expect("loads");

    // A1's only window closed in 2020.
    assert!(catalog.schedules_for_area("A1", Stream::Grey, true).is_empty());
    assert_eq!(catalog.schedules_for_area("A1", Stream::Grey, false).len(), 1);
    // V1's open-ended window survives the filter.
    assert_eq!(catalog.schedules_for_area("V1", Stream::Grey, true).len(), 1);
}

#[test]
fn unterminated_quote_fails_the_whole_load() {
    let dir = TempDir::new().expect("temp dir");
    write_disposal_workbook(dir.path());
    write_sheet(
        dir.path(),
        ADDRESS_SHEET,
        "Stadfang;Svaedi\nLaugavegur 12;V2\n\"broken;V1\n",
    );

    let err = load_catalog(dir.path(), None).expect_err("must fail");
    match err {
        LoadError::UnterminatedQuote { line, .. } => {
            assert_eq!(line, 3, "names the offending line");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn flat_enrichment_file_loads_under_any_name() {
    let dir = TempDir::new().expect("temp dir");
    write_disposal_workbook(dir.path());

    let info_dir = TempDir::new().expect("temp dir");
    let info_file = info_dir.path().join("registry-export.csv");
    fs::write(
        &info_file,
        "Heiti_nf;Husmerking;Serheiti;Postnr;N_HNIT_WGS84;E_HNIT_WGS84\n\
         Laugavegur;12;;101;64,145;-21,927\n\
         Laugavegur;12;;999;0,0;0,0\n",
    )
    .expect("writes fixture");

    let catalog = load_catalog(dir.path(), Some(&info_file)).expect("loads");
    let results = catalog.autocomplete_search("Laugavegur 12", false);
    let attached = results
        .first()
        .and_then(|entry| entry.info.as_ref())
        .expect("info attached");
    assert_eq!(attached.postal_code, "101", "first duplicate wins");
}
