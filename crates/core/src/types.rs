//! Domain types for a parsed venue recommendation request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names the deck template knows how to place.
///
/// The parser accepts any field name; these are only the ones the renderer
/// looks up.
pub mod fields {
    pub const VENUE_NAME: &str = "venue_name";
    pub const VENUE_CITY: &str = "venue_city";
    pub const VENUE_GUEST_ROOMS: &str = "venue_guest_rooms";
    pub const PROPOSED_DATES: &str = "proposed_dates";
    pub const AVERAGE_DAILY_RATE: &str = "average_daily_rate";
    pub const TOTAL_F_AND_B: &str = "total_FandB";
    pub const ADDITIONAL_FEES: &str = "additional_fees";
}

/// The full contents of one request, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInput {
    /// First non-empty line.
    pub heading: String,

    /// Second non-empty line.
    pub date_to_present: String,

    /// Third non-empty line, as an integer.
    pub record_count: usize,

    /// Exactly `record_count` records; `records[i]` holds the `R{i+1}.*` fields.
    pub records: Vec<VenueRecord>,
}

impl ParsedInput {
    /// Create an input with `record_count` empty records.
    pub fn new(
        heading: impl Into<String>,
        date_to_present: impl Into<String>,
        record_count: usize,
    ) -> Self {
        Self {
            heading: heading.into(),
            date_to_present: date_to_present.into(),
            record_count,
            records: vec![VenueRecord::default(); record_count],
        }
    }

    /// Get the record for a 1-based `R<n>` reference.
    pub fn record(&self, number: usize) -> Option<&VenueRecord> {
        number.checked_sub(1).and_then(|idx| self.records.get(idx))
    }
}

/// One venue recommendation: a free-form mapping of field name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueRecord {
    fields: BTreeMap<String, String>,
}

impl VenueRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Get a field's value if it was assigned.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Get a field's value, or an empty string if it was never assigned.
    pub fn get_or_empty(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Number of assigned fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was assigned.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for VenueRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}
