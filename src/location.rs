//! Recent-location suggestions.
//!
//! A bounded MRU list of location strings used on tasks: de-duplicated
//! case-insensitively, most recent first.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCATIONS_CAP: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentLocations {
    entries: Vec<String>,
}

impl RecentLocations {
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Record a use of `location`: moves it to the front, evicting the
    /// oldest entry past the capacity. Blank input is ignored.
    pub fn touch(&mut self, location: &str, capacity: usize) {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return;
        }

        self.entries
            .retain(|entry| !entry.eq_ignore_ascii_case(trimmed));
        self.entries.insert(0, trimmed.to_string());
        self.entries.truncate(capacity.max(1));
    }
}
