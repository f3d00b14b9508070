//! Wire types for the geotogether API.
//!
//! Only the fields geolive reads are modelled; everything else in the
//! responses is ignored by serde.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a physical monitored system (smart meter display)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(String);

impl SystemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /usersservice/v2/login`
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

/// Response of `POST /usersservice/v2/login`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub access_token: String,
}

/// Response of `GET /api/userapi/v2/user/detail-systems`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DetailSystemsResponse {
    #[serde(default)]
    pub system_details: Vec<SystemDetail>,
}

/// One entry of the account's system list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SystemDetail {
    pub system_id: SystemId,
}

/// A single typed power measurement (e.g. "IMPORT", "EXPORT")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerReading {
    #[serde(rename = "type")]
    pub kind: String,
    pub watts: f64,
}

/// One live-data response: instantaneous power readings for a system
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiveDataSnapshot {
    /// Reading time, unix seconds
    pub utc: i64,
    /// Measurements; missing when the meter has nothing to report
    #[serde(default)]
    pub power: Vec<PowerReading>,
}

impl LiveDataSnapshot {
    /// Measurement type used for the chart
    pub const IMPORT: &'static str = "IMPORT";

    /// Wattage of the first measurement of the given type
    pub fn watts(&self, kind: &str) -> Option<f64> {
        self.power.iter().find(|p| p.kind == kind).map(|p| p.watts)
    }

    /// Whether the snapshot carries any measurement at all
    pub fn has_power(&self) -> bool {
        !self.power.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_live_data() {
        let json = r#"{
            "latestUtc": 1700000005,
            "id": "abc",
            "utc": 1700000000,
            "power": [
                {"type": "IMPORT", "watts": 450, "valueAvailable": true},
                {"type": "EXPORT", "watts": 0}
            ]
        }"#;

        let snapshot: LiveDataSnapshot = serde_json::from_str(json).expect("Should parse");
        assert_eq!(snapshot.utc, 1_700_000_000);
        assert_eq!(snapshot.power.len(), 2);
        assert_eq!(snapshot.watts(LiveDataSnapshot::IMPORT), Some(450.0));
        assert_eq!(snapshot.watts("EXPORT"), Some(0.0));
        assert_eq!(snapshot.watts("GAS"), None);
    }

    #[test]
    fn test_missing_power_is_empty() {
        let snapshot: LiveDataSnapshot =
            serde_json::from_str(r#"{"utc": 1700000000}"#).expect("Should parse");
        assert!(!snapshot.has_power());
    }

    #[test]
    fn test_parse_detail_systems() {
        let json = r#"{
            "systemRoles": [],
            "systemDetails": [
                {"systemId": "A", "name": "Home"},
                {"systemId": "B", "name": "Cabin"}
            ]
        }"#;

        let resp: DetailSystemsResponse = serde_json::from_str(json).expect("Should parse");
        let ids: Vec<&str> = resp
            .system_details
            .iter()
            .map(|d| d.system_id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_login_request_shape() {
        let body = serde_json::to_value(LoginRequest {
            identity: "me@example.com",
            password: "hunter2",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"identity": "me@example.com", "password": "hunter2"})
        );
    }
}
