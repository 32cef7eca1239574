//! Tracker data model and its persisted wire shape
//!
//! `TrackerState` is the canonical in-memory record; `StoredRecord` is the
//! lenient view used when decoding whatever sits in storage.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::utils::Timezone;

/// One recorded submission. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LogEntry {
    #[serde(with = "iso_millis")]
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) description: String,
    /// Rendered once at creation; kept verbatim on reload.
    #[serde(rename = "displayDate")]
    pub(crate) display_date: String,
}

impl LogEntry {
    /// Build an entry for `now`. The description must already be trimmed.
    pub(crate) fn new(description: String, now: DateTime<Utc>, timezone: Timezone) -> Self {
        // Millisecond precision matches what the wire format can carry
        let timestamp = now.trunc_subsecs(3);
        LogEntry {
            display_date: timezone.format_display(timestamp),
            timestamp,
            description,
        }
    }
}

/// Counter plus newest-first log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub(crate) struct TrackerState {
    pub(crate) counter: u64,
    pub(crate) logs: Vec<LogEntry>,
}

impl TrackerState {
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.counter == 0 && self.logs.is_empty()
    }

    /// Insert at the head and bump the counter.
    pub(crate) fn record(&mut self, entry: LogEntry) {
        self.logs.insert(0, entry);
        self.counter += 1;
    }

    /// Undo the most recent `record`.
    pub(crate) fn discard_newest(&mut self) {
        if !self.logs.is_empty() {
            self.logs.remove(0);
            self.counter = self.counter.saturating_sub(1);
        }
    }

    pub(crate) fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(StoreError::Encode)
    }

    /// Strict decode: malformed input or `counter != logs.len()` is an error.
    /// Missing or null fields take their zero value first.
    pub(crate) fn from_json(raw: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(raw).map_err(StoreError::Decode)?;
        // Derived struct decoding would also take a positional array
        let Value::Object(fields) = &value else {
            return Err(StoreError::NotAnObject { what: "stored record" });
        };
        if let Some(Value::Array(entries)) = fields.get("logs")
            && entries.iter().any(|e| !e.is_object())
        {
            return Err(StoreError::NotAnObject { what: "log entry" });
        }
        let record: StoredRecord = serde_json::from_value(value).map_err(StoreError::Decode)?;
        record.into_state()
    }
}

/// Lenient mirror of the persisted object
#[derive(Debug, Deserialize)]
struct StoredRecord {
    #[serde(default)]
    counter: Option<u64>,
    #[serde(default)]
    logs: Option<Vec<LogEntry>>,
}

impl StoredRecord {
    fn into_state(self) -> Result<TrackerState, StoreError> {
        let counter = self.counter.unwrap_or(0);
        let logs = self.logs.unwrap_or_default();
        if usize::try_from(counter).ok() != Some(logs.len()) {
            return Err(StoreError::Inconsistent {
                counter,
                entries: logs.len(),
            });
        }
        Ok(TrackerState { counter, logs })
    }
}

/// RFC 3339 UTC with millisecond precision: `2026-10-18T12:04:05.123Z`.
/// Finer input precision is truncated on read.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(serde::de::Error::custom)
    }
}
