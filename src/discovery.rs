//! Classification of the simulator's flat API listing.
//!
//! The listing mixes readable values and invokable actions in one namespace.
//! Entries are split by identifier prefix:
//!
//! | prefix               | mapping   | logical name      |
//! |----------------------|-----------|-------------------|
//! | `b.`                 | telemetry | `body_<suffix>`   |
//! | `tar.`               | telemetry | `target_<suffix>` |
//! | `f.`, `mj.`, `v.set` | commands  | `<suffix>`        |
//! | anything else        | telemetry | `<suffix>`        |

use serde::Deserialize;
use std::collections::HashMap;

pub const LISTING_QUERY: &str = "api=a.api";

const BODY_PREFIX: &str = "b.";
const TARGET_PREFIX: &str = "tar.";
const COMMAND_PREFIXES: [&str; 3] = ["f.", "mj.", "v.set"];

/// One entry of the API listing. Only the identifier matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEntry {
    pub apistring: String,
}

/// The listing groups entries by plugin section; section names are ignored.
pub type ApiListing = HashMap<String, Vec<ApiEntry>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Telemetry,
    Command,
}

/// Name to identifier mappings produced by one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityMaps {
    pub telemetry: HashMap<String, String>,
    pub commands: HashMap<String, String>,
}

impl CapabilityMaps {
    pub fn from_listing(listing: &ApiListing) -> Self {
        let mut maps = Self::default();
        for entry in listing.values().flatten() {
            maps.insert(&entry.apistring);
        }
        maps
    }

    pub fn insert(&mut self, apistring: &str) {
        let (kind, name) = classify(apistring);
        let target = match kind {
            EntryKind::Telemetry => &mut self.telemetry,
            EntryKind::Command => &mut self.commands,
        };
        target.insert(name, apistring.to_string());
    }

    pub fn telemetry_id(&self, name: &str) -> Option<&str> {
        self.telemetry.get(name).map(String::as_str)
    }

    pub fn command_id(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(String::as_str)
    }

    pub fn sorted_telemetry(&self) -> Vec<&str> {
        sorted_keys(&self.telemetry)
    }

    pub fn sorted_commands(&self) -> Vec<&str> {
        sorted_keys(&self.commands)
    }
}

/// Decide which mapping an identifier belongs to and under which logical name.
pub fn classify(apistring: &str) -> (EntryKind, String) {
    let suffix = identifier_suffix(apistring);

    if apistring.starts_with(BODY_PREFIX) {
        (EntryKind::Telemetry, format!("body_{}", suffix))
    } else if apistring.starts_with(TARGET_PREFIX) {
        (EntryKind::Telemetry, format!("target_{}", suffix))
    } else if COMMAND_PREFIXES.iter().any(|p| apistring.starts_with(p)) {
        (EntryKind::Command, suffix.to_string())
    } else {
        (EntryKind::Telemetry, suffix.to_string())
    }
}

pub fn parse_listing(body: &[u8]) -> Result<ApiListing, serde_json::Error> {
    serde_json::from_slice(body)
}

// Text after the last '.'; identifiers without a namespace keep their full text.
fn identifier_suffix(apistring: &str) -> &str {
    apistring
        .rsplit_once('.')
        .map_or(apistring, |(_, suffix)| suffix)
}

fn sorted_keys(map: &HashMap<String, String>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(classify("b.name"), (EntryKind::Telemetry, "body_name".to_string()));
        assert_eq!(classify("tar.o.mass"), (EntryKind::Telemetry, "target_mass".to_string()));
        assert_eq!(classify("f.throttleZero"), (EntryKind::Command, "throttleZero".to_string()));
        assert_eq!(classify("mj.smartassoff"), (EntryKind::Command, "smartassoff".to_string()));
        assert_eq!(classify("v.setThrottle"), (EntryKind::Command, "setThrottle".to_string()));
        assert_eq!(classify("v.altitude"), (EntryKind::Telemetry, "altitude".to_string()));
        assert_eq!(classify("o.ApA"), (EntryKind::Telemetry, "ApA".to_string()));
    }

    #[test]
    fn test_identifier_without_namespace() {
        assert_eq!(classify("paused"), (EntryKind::Telemetry, "paused".to_string()));
    }

    #[test]
    fn test_listing_sections_are_merged() {
        let body = br#"{
            "vessel": [{"apistring": "v.altitude", "name": "Altitude", "units": "DISTANCE"}],
            "flight": [{"apistring": "f.throttleZero"}, {"apistring": "f.sas"}]
        }"#;
        let listing = parse_listing(body).unwrap();
        let maps = CapabilityMaps::from_listing(&listing);

        assert_eq!(maps.telemetry_id("altitude"), Some("v.altitude"));
        assert_eq!(maps.command_id("throttleZero"), Some("f.throttleZero"));
        assert_eq!(maps.sorted_commands(), vec!["sas", "throttleZero"]);
        assert!(maps.telemetry_id("throttleZero").is_none());
    }

    #[test]
    fn test_malformed_listing() {
        assert!(parse_listing(b"[1, 2, 3]").is_err());
        assert!(parse_listing(br#"{"vessel": [{"name": "no identifier"}]}"#).is_err());
    }
}
