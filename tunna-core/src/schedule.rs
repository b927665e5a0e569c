//! Area-to-schedule index partitioned by waste stream, plus area names.

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime};

use crate::model::{AreaSchedule, Stream};

#[derive(Debug, Default)]
/// Mapping from area code to its collection windows, one list per stream,
/// plus the area display names.
pub struct ScheduleIndex {
    grey: HashMap<String, Vec<AreaSchedule>>,
    blue: HashMap<String, Vec<AreaSchedule>>,
    names: HashMap<String, String>,
}

impl ScheduleIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one collection window to its area's list for the given stream.
    pub fn add_schedule(&mut self, stream: Stream, schedule: AreaSchedule) {
        self.stream_map_mut(stream)
            .entry(schedule.area.clone())
            .or_default()
            .push(schedule);
    }

    /// Register the display name for an area code.
    pub fn add_area_name<A: Into<String>, N: Into<String>>(&mut self, area: A, name: N) {
        self.names.insert(area.into(), name.into());
    }

    /// Display name for an area code, `None` when unknown.
    #[must_use]
    pub fn area_name(&self, area: &str) -> Option<&str> {
        self.names.get(area).map(String::as_str)
    }

    /// Collection windows for an area, filtered to windows that have not yet
    /// fully elapsed when `show_future_only` is set.
    ///
    /// An unknown area yields an empty list, never an error.
    #[must_use]
    pub fn schedules_for(
        &self,
        area: &str,
        stream: Stream,
        show_future_only: bool,
    ) -> Vec<AreaSchedule> {
        self.schedules_from(area, stream, show_future_only, Local::now().naive_local())
    }

    /// Same as [`Self::schedules_for`] but filtering relative to an explicit
    /// instant instead of the wall clock.
    ///
    /// A window survives the filter when its start is still ahead, or when it
    /// has a closing date that is still ahead. A window whose start has passed
    /// without a future closing date is dropped, open-ended or not.
    #[must_use]
    pub fn schedules_from(
        &self,
        area: &str,
        stream: Stream,
        show_future_only: bool,
        now: NaiveDateTime,
    ) -> Vec<AreaSchedule> {
        let Some(schedules) = self.stream_map(stream).get(area) else {
            return Vec::new();
        };
        if !show_future_only {
            return schedules.clone();
        }
        schedules
            .iter()
            .filter(|schedule| {
                schedule.start_date > now || schedule.end_date.is_some_and(|end| end > now)
            })
            .cloned()
            .collect()
    }

    /// Whether no schedules were loaded for either stream.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grey.is_empty() && self.blue.is_empty()
    }

    fn stream_map(&self, stream: Stream) -> &HashMap<String, Vec<AreaSchedule>> {
        match stream {
            Stream::Grey => &self.grey,
            Stream::Blue => &self.blue,
        }
    }

    fn stream_map_mut(&mut self, stream: Stream) -> &mut HashMap<String, Vec<AreaSchedule>> {
        match stream {
            Stream::Grey => &mut self.grey,
            Stream::Blue => &mut self.blue,
        }
    }
}
