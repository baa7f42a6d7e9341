//! Full address detail records, keyed by their display string.
//!
//! The storefront persists two shapes for the same data: a single
//! `fullAddresses` JSON object mapping display strings to records, and an
//! individual `address_<displayString>` entry per record. Writes maintain
//! both; reads prefer the map and fall back to the individual entry.

use crate::kv::KeyValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key under which the display-string → record map is persisted
pub const FULL_ADDRESSES_KEY: &str = "fullAddresses";

const RECORD_KEY_PREFIX: &str = "address_";

/// A geographic coordinate pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Everything captured on the address-entry screen
///
/// Field names serialize in the camelCase shape the storefront has always
/// persisted, so existing on-device payloads stay readable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    /// Address label: `Home`, `Work`, `Other`, ... (free-form, trusted)
    #[serde(rename = "type")]
    pub kind: String,
    /// The resolved address line
    pub address: String,
    /// Flat/door number
    pub flat_number: String,
    /// Optional landmark hint
    pub landmark: String,
    /// Delivery instruction
    pub instruction: String,
    /// Contact name for the delivery
    pub contact_name: String,
    /// Contact phone for the delivery
    pub contact_phone: String,
    /// Where the pin was dropped
    pub coordinates: Coordinates,
    /// When the record was captured
    pub timestamp: DateTime<Utc>,
}

impl AddressRecord {
    /// The display string under which this record is listed and keyed:
    /// `"<kind> - <flat_number>, <address>"`
    #[must_use]
    pub fn display_string(&self) -> String {
        format!("{} - {}, {}", self.kind, self.flat_number, self.address)
    }
}

/// Best-effort persistence for [`AddressRecord`]s
#[derive(Clone)]
pub struct AddressBook {
    kv: Arc<dyn KeyValue>,
}

impl AddressBook {
    /// Create an address book over the given key-value store
    #[must_use]
    pub const fn new(kv: Arc<dyn KeyValue>) -> Self {
        Self { kv }
    }

    /// Read the full display-string → record map
    ///
    /// A corrupt map is logged and read as empty.
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, AddressRecord> {
        let Some(raw) = self.kv.get(FULL_ADDRESSES_KEY) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(key = FULL_ADDRESSES_KEY, %err, "corrupt address map, falling back to empty");
                BTreeMap::new()
            },
        }
    }

    /// Look a record up by its display string
    #[must_use]
    pub fn get(&self, display: &str) -> Option<AddressRecord> {
        if let Some(record) = self.all().remove(display) {
            return Some(record);
        }

        let raw = self.kv.get(&format!("{RECORD_KEY_PREFIX}{display}"))?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(display = display, %err, "corrupt address record, treating as missing");
                None
            },
        }
    }

    /// Store a record under its display string, best-effort
    ///
    /// Returns the display string the record was keyed by.
    pub fn insert(&self, record: &AddressRecord) -> String {
        let display = record.display_string();

        let mut map = self.all();
        map.insert(display.clone(), record.clone());
        if let Ok(json) = serde_json::to_string(&map) {
            self.kv.set(FULL_ADDRESSES_KEY, &json);
        }

        if let Ok(json) = serde_json::to_string(record) {
            self.kv.set(&format!("{RECORD_KEY_PREFIX}{display}"), &json);
        }

        display
    }
}
