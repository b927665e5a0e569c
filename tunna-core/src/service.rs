//! High-level service facade wrapping the catalog for clients.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::model::{AreaSchedule, DisposalInformation, LabelValue, Stream};

/// Public entry point for address lookup, schedules, and autocomplete.
///
/// Clones share the underlying catalog; every operation is a pure read.
#[derive(Clone)]
pub struct DisposalService {
    catalog: Arc<Catalog>,
}

impl DisposalService {
    /// Create a new service bound to the provided catalog.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Resolve a full address to its collection area code.
    #[must_use]
    pub fn lookup_area(&self, address: &str) -> Option<String> {
        self.catalog.lookup_area(address).map(str::to_owned)
    }

    /// Display name for an area code.
    #[must_use]
    pub fn area_name(&self, area: &str) -> Option<String> {
        self.catalog.area_name(area).map(str::to_owned)
    }

    /// Collection windows for an area and stream.
    #[must_use]
    pub fn schedules_for_area(
        &self,
        area: &str,
        stream: Stream,
        show_future_only: bool,
    ) -> Vec<AreaSchedule> {
        self.catalog
            .schedules_for_area(area, stream, show_future_only)
    }

    /// Autocomplete suggestions for a partially typed address.
    #[must_use]
    pub fn autocomplete_search(&self, term: &str, suppress_exact: bool) -> Vec<LabelValue> {
        self.catalog.autocomplete_search(term, suppress_exact)
    }

    /// Composite lookup: area, area name, and upcoming windows of both
    /// streams for one address. `None` for blank input.
    #[must_use]
    pub fn disposal_information(&self, address: &str) -> Option<DisposalInformation> {
        if address.trim().is_empty() {
            return None;
        }
        let area = self.lookup_area(address);
        let area_name = area.as_deref().and_then(|code| self.area_name(code));
        let (grey, blue) = area.as_deref().map_or_else(
            || (Vec::new(), Vec::new()),
            |code| {
                (
                    self.schedules_for_area(code, Stream::Grey, true),
                    self.schedules_for_area(code, Stream::Blue, true),
                )
            },
        );
        Some(DisposalInformation {
            address: address.to_owned(),
            area,
            area_name,
            grey_schedule_list: grey,
            blue_schedule_list: blue,
        })
    }

    /// Autocomplete suggestions serialized as a JSONP body,
    /// `callback(<json>)`, for cross-origin script-tag consumption.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when serialization fails.
    pub fn autocomplete_search_jsonp(
        &self,
        term: &str,
        suppress_exact: bool,
        callback: &str,
    ) -> Result<String, serde_json::Error> {
        let suggestions = self.autocomplete_search(term, suppress_exact);
        wrap_callback(callback, &suggestions)
    }
}

/// Serialize a value and wrap it in a JSONP callback invocation.
///
/// A callback name that is not a plain JS identifier path is ignored and the
/// bare JSON body is returned instead, so hostile names never end up in
/// script text.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] when serialization fails.
pub fn wrap_callback<T: Serialize>(callback: &str, value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    if is_callback_name(callback) {
        Ok(format!("{callback}({json})"))
    } else {
        Ok(json)
    }
}

/// Valid JS identifier path: dot-separated segments of `[A-Za-z_$][A-Za-z0-9_$]*`.
fn is_callback_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|rest| rest.is_ascii_alphanumeric() || rest == '_' || rest == '$')
        })
}
