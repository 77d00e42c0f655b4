//! The identity store document

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids;

/// In-memory mirror of `storage.json`.
///
/// `config_path` and `is_read_only` are filled in by the reader; whatever
/// the file says about them is overwritten. Keys this tool does not manage
/// are kept in `extra` and written back after the fixed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageRecord {
    #[serde(rename = "telemetry.machineId")]
    pub machine_id: String,
    #[serde(rename = "telemetry.macMachineId")]
    pub mac_machine_id: String,
    #[serde(rename = "telemetry.devDeviceId")]
    pub dev_device_id: String,
    #[serde(rename = "telemetry.sqmId")]
    pub sqm_id: String,
    #[serde(rename = "isReadOnly")]
    pub is_read_only: bool,
    #[serde(rename = "configPath")]
    pub config_path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StorageRecord {
    /// Parse a document; any JSON object is accepted, missing fields are empty.
    /// A bare `null` parses as the empty record.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Option<Self>>(bytes).map(Option::unwrap_or_default)
    }

    /// The zero record: signals "store unavailable" to callers
    pub fn is_unavailable(&self) -> bool {
        self.config_path.is_empty()
    }

    /// Copy of this record with all four identifiers freshly generated
    pub fn regenerated(&self) -> Self {
        Self {
            machine_id: ids::generate_machine_id(),
            mac_machine_id: ids::generate_uuid(),
            dev_device_id: ids::generate_uuid(),
            sqm_id: ids::generate_sqm_id(),
            ..self.clone()
        }
    }

    /// Serialize with 4-space indentation in the fixed field order
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"telemetry.machineId":"old1","telemetry.macMachineId":"old2","telemetry.devDeviceId":"old3","telemetry.sqmId":"{OLD}"}"#;

    #[test]
    fn test_parse_sample() {
        let record = StorageRecord::from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(record.machine_id, "old1");
        assert_eq!(record.mac_machine_id, "old2");
        assert_eq!(record.dev_device_id, "old3");
        assert_eq!(record.sqm_id, "{OLD}");
        assert!(record.extra.is_empty());
        assert!(record.is_unavailable());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(StorageRecord::from_slice(b"not json").is_err());
        assert!(StorageRecord::from_slice(b"[1, 2]").is_err());
        assert!(StorageRecord::from_slice(br#"{"telemetry.machineId": 5}"#).is_err());
    }

    #[test]
    fn test_parse_null_is_empty() {
        let record = StorageRecord::from_slice(b"null").unwrap();
        assert_eq!(record, StorageRecord::default());
        assert!(StorageRecord::from_slice(b"").is_err());
    }

    #[test]
    fn test_pretty_json_layout() {
        let record = StorageRecord {
            machine_id: "m".into(),
            mac_machine_id: "a".into(),
            dev_device_id: "d".into(),
            sqm_id: "s".into(),
            is_read_only: false,
            config_path: "/p".into(),
            extra: Map::new(),
        };
        let json = String::from_utf8(record.to_pretty_json().unwrap()).unwrap();
        let expected = "{\n    \"telemetry.machineId\": \"m\",\n    \"telemetry.macMachineId\": \"a\",\n    \"telemetry.devDeviceId\": \"d\",\n    \"telemetry.sqmId\": \"s\",\n    \"isReadOnly\": false,\n    \"configPath\": \"/p\"\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_unknown_keys_survive_regeneration() {
        let doc = r#"{"telemetry.machineId":"old1","window.zoom":2,"theme":"dark"}"#;
        let record = StorageRecord::from_slice(doc.as_bytes()).unwrap();
        let fresh = record.regenerated();
        assert_ne!(fresh.machine_id, "old1");
        assert_eq!(fresh.extra.get("theme"), Some(&Value::from("dark")));

        let json = String::from_utf8(fresh.to_pretty_json().unwrap()).unwrap();
        let config_at = json.find("\"configPath\"").unwrap();
        assert!(json.find("\"theme\"").unwrap() > config_at);
        assert!(json.find("\"window.zoom\"").unwrap() > config_at);
    }
}
