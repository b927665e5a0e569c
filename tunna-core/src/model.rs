//! Domain data structures for addresses, areas, and pickup schedules.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Waste streams collected by the municipality.
pub enum Stream {
    /// General household waste (grey bin).
    Grey,
    /// Recyclable waste (blue bin).
    Blue,
}

impl fmt::Display for Stream {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            Stream::Grey => "grey",
            Stream::Blue => "blue",
        };
        write!(formatter, "{slug}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// House-number/unit portion of an address together with its collection area.
pub struct Address {
    specifier: String,
    area: String,
    key: String,
}

impl Address {
    /// Build an address entry, caching the lowercase comparison key.
    #[must_use]
    pub fn new<S: Into<String>, A: Into<String>>(specifier: S, area: A) -> Self {
        let specifier = specifier.into();
        let key = specifier.to_lowercase();
        Self {
            specifier,
            area: area.into(),
            key,
        }
    }

    /// Specifier text exactly as it appeared in the source data.
    #[must_use]
    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    /// Collection area code this address belongs to.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Lowercase comparison key of the specifier.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Clone)]
/// Normalized street name: a display label plus its lowercase comparison key.
///
/// Ordering and equality use only the comparison key, so two keys that differ
/// in casing are the same street.
pub struct StreetKey {
    label: String,
    key: String,
}

impl StreetKey {
    /// Build a street key from the display label.
    #[must_use]
    pub fn new<L: Into<String>>(label: L) -> Self {
        let label = label.into();
        let key = label.to_lowercase();
        Self { label, key }
    }

    /// Street name as it appeared in the source data.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lowercase comparison key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for StreetKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for StreetKey {}

impl PartialOrd for StreetKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StreetKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

// Lets ordered-map lookups and range scans take a plain lowercase &str.
impl Borrow<str> for StreetKey {
    fn borrow(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One collection window for an area; `end_date` of `None` is open-ended.
pub struct AreaSchedule {
    /// Area code the window applies to.
    pub area: String,
    /// Start of the collection window.
    pub start_date: NaiveDateTime,
    /// End of the window; `None` means the rule recurs indefinitely.
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Display-name record for a collection area.
pub struct AreaInfo {
    /// Area code.
    pub area: String,
    /// Human-friendly area name.
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Enrichment record for a single address from the national address registry.
///
/// Coordinates are parsed once at load time; there is no raw point text kept
/// around to re-parse on access.
pub struct AddressInfo {
    /// Street name in nominative form.
    pub street_name: String,
    /// House number or unit marking.
    pub house_number: String,
    /// Postal code, empty when the registry row had none.
    pub postal_code: String,
    /// Special name of the building or lot, usually empty.
    pub special_name: String,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single autocomplete suggestion.
///
/// Field names stay lowercase on the wire; the consuming JS autocomplete
/// widget matches JSON keys case-sensitively.
pub struct LabelValue {
    /// Suggestion text shown to the user.
    pub label: String,
    /// Registry enrichment for the suggested address, when known.
    pub info: Option<AddressInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Composite lookup result for one address: its area and both stream schedules.
pub struct DisposalInformation {
    /// The address as the caller typed it.
    pub address: String,
    /// Resolved area code, `None` when the address is unknown.
    pub area: Option<String>,
    /// Display name of the resolved area.
    pub area_name: Option<String>,
    /// Upcoming grey-stream collection windows.
    pub grey_schedule_list: Vec<AreaSchedule>,
    /// Upcoming blue-stream collection windows.
    pub blue_schedule_list: Vec<AreaSchedule>,
}
