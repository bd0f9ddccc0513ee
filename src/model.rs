//! Data models for the PC catalog
//!
//! This module defines the stored record, the raw create payload as it arrives
//! over the wire, and the validated form that sits between the two.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A PC build configuration as stored in the database
///
/// Serialized with camelCase keys, so `created_at` travels as `createdAt`.
///
/// # Example
/// ```json
/// {
///   "id": "pc1",
///   "name": "Gaming",
///   "cpu": "i7",
///   "ram": 16,
///   "storage": 512,
///   "purpose": "gaming",
///   "note": "",
///   "createdAt": "2026-10-16T09:30:00.123456Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PcRecord {
    /// Client-supplied unique identifier
    pub id: String,

    /// Display name of the build
    pub name: String,

    /// CPU model
    pub cpu: String,

    /// Memory size in GB, always > 0
    pub ram: i64,

    /// Storage size in GB, always > 0
    pub storage: i64,

    /// What the machine is used for
    pub purpose: String,

    /// Free-form note, empty when the client sent none
    #[serde(default)]
    pub note: String,

    /// Server-assigned creation time, never taken from the client
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A record that passed validation but has not been stamped or stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPc {
    pub id: String,
    pub name: String,
    pub cpu: String,
    pub ram: i64,
    pub storage: i64,
    pub purpose: String,
    pub note: String,
}

impl NewPc {
    /// Stamps the record with its creation time.
    ///
    /// The timestamp is truncated to microseconds, the precision the store
    /// persists, so the echoed record matches what a later list returns.
    pub fn into_record(self, created_at: DateTime<Utc>) -> PcRecord {
        PcRecord {
            id: self.id,
            name: self.name,
            cpu: self.cpu,
            ram: self.ram,
            storage: self.storage,
            purpose: self.purpose,
            note: self.note,
            created_at: created_at.trunc_subsecs(6),
        }
    }
}

/// A single loosely-typed field of the create payload
///
/// Clients send numbers either as JSON numbers or as strings, so the raw
/// value is kept until validation decides what it means.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawField {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

/// Request payload for creating a PC record
///
/// Unknown keys are rejected outright, which also keeps clients from
/// supplying their own `createdAt`. JSON `null` is treated like an absent key.
///
/// # Example
/// ```json
/// {
///   "id": "pc1",
///   "name": "Gaming",
///   "cpu": "i7",
///   "ram": "16",
///   "storage": 512,
///   "purpose": "gaming",
///   "note": "RGB everything"  // Optional
/// }
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct CreatePcRequest {
    pub id: Option<RawField>,
    pub name: Option<RawField>,
    pub cpu: Option<RawField>,
    pub ram: Option<RawField>,
    pub storage: Option<RawField>,
    pub purpose: Option<RawField>,
    pub note: Option<RawField>,
}

/// Fixed-width RFC 3339 timestamps (`2026-10-16T09:30:00.123456Z`)
///
/// Every stored value has the same width and a `Z` suffix, so comparing the
/// strings orders them chronologically.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(at))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
