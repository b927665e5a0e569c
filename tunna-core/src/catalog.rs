//! The fully built, immutable catalog backing every lookup operation.

use std::collections::HashMap;

use crate::autocomplete;
use crate::index::AddressIndex;
use crate::model::{AddressInfo, AreaSchedule, LabelValue, Stream};
use crate::schedule::ScheduleIndex;

#[derive(Debug, Default)]
/// All indices of the service, built once at startup and read-only after.
///
/// There is no writer after construction, so concurrent readers never race
/// and lookups need no locking.
pub struct Catalog {
    addresses: AddressIndex,
    schedules: ScheduleIndex,
    info: HashMap<String, AddressInfo>,
}

impl Catalog {
    /// Assemble a catalog from its fully built parts.
    #[must_use]
    pub fn new(
        addresses: AddressIndex,
        schedules: ScheduleIndex,
        info: HashMap<String, AddressInfo>,
    ) -> Self {
        Self {
            addresses,
            schedules,
            info,
        }
    }

    /// The street-to-address index.
    #[must_use]
    pub fn addresses(&self) -> &AddressIndex {
        &self.addresses
    }

    /// The area-to-schedule index.
    #[must_use]
    pub fn schedules(&self) -> &ScheduleIndex {
        &self.schedules
    }

    /// Resolve a full address to its collection area code.
    #[must_use]
    pub fn lookup_area(&self, address: &str) -> Option<&str> {
        self.addresses.lookup_area(address)
    }

    /// Display name for an area code.
    #[must_use]
    pub fn area_name(&self, area: &str) -> Option<&str> {
        self.schedules.area_name(area)
    }

    /// Collection windows for an area and stream, future windows only when
    /// `show_future_only` is set.
    #[must_use]
    pub fn schedules_for_area(
        &self,
        area: &str,
        stream: Stream,
        show_future_only: bool,
    ) -> Vec<AreaSchedule> {
        self.schedules.schedules_for(area, stream, show_future_only)
    }

    /// Autocomplete suggestions for a partially typed address.
    #[must_use]
    pub fn autocomplete_search(&self, term: &str, suppress_exact: bool) -> Vec<LabelValue> {
        autocomplete::search(&self.addresses, &self.info, term, suppress_exact)
    }
}
