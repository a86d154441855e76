//! Payload definitions
//!
//! The variant-specific data a command carries. Zero-valued fields are
//! left out of the encoded form and restored to their defaults on decode.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};

use super::PayloadKind;

/// Payload for execute and query commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabasePayload {
    /// Connection the statements run on (0 = default connection)
    #[serde(rename = "conn_id", skip_serializing_if = "is_zero")]
    pub connection_id: u64,

    /// Run all statements in a single transaction
    #[serde(skip_serializing_if = "is_false")]
    pub atomic: bool,

    /// SQL statements, in execution order
    ///
    /// `None` and an empty list are distinct on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<String>>,

    /// Collect per-statement timings
    #[serde(skip_serializing_if = "is_false")]
    pub timings: bool,
}

impl DatabasePayload {
    /// Create a payload carrying the given statements
    pub fn new<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queries: Some(queries.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_connection_id(mut self, id: u64) -> Self {
        self.connection_id = id;
        self
    }

    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn with_timings(mut self, timings: bool) -> Self {
        self.timings = timings;
        self
    }
}

/// Payload for metadata-set commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSetPayload {
    /// Raft node the metadata belongs to
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raft_id: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

/// Payload for connect and disconnect commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPayload {
    #[serde(rename = "conn_id", skip_serializing_if = "is_zero")]
    pub connection_id: u64,

    #[serde(with = "duration_nanos", skip_serializing_if = "Duration::is_zero")]
    pub idle_timeout: Duration,

    #[serde(with = "duration_nanos", skip_serializing_if = "Duration::is_zero")]
    pub tx_timeout: Duration,
}

/// Longest duration the wire carries: i64 nanoseconds (about 292 years)
pub const MAX_WIRE_DURATION: Duration = Duration::from_nanos(i64::MAX as u64);

impl ConnectionPayload {
    /// Saturate both timeouts to [`MAX_WIRE_DURATION`]
    pub fn clamped(self) -> Self {
        Self {
            idle_timeout: self.idle_timeout.min(MAX_WIRE_DURATION),
            tx_timeout: self.tx_timeout.min(MAX_WIRE_DURATION),
            ..self
        }
    }
}

/// A command payload, one variant per [`PayloadKind`]
///
/// Serializes as the bare inner value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Database(DatabasePayload),
    MetadataSet(MetadataSetPayload),
    MetadataDelete(String),
    Connection(ConnectionPayload),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Database(_) => PayloadKind::Database,
            Payload::MetadataSet(_) => PayloadKind::MetadataSet,
            Payload::MetadataDelete(_) => PayloadKind::MetadataDelete,
            Payload::Connection(_) => PayloadKind::Connection,
        }
    }

    /// Whether this is the zero value of its schema
    pub fn is_zero(&self) -> bool {
        *self == self.kind().zero_payload()
    }
}

impl PayloadKind {
    /// The default payload of this schema
    pub fn zero_payload(self) -> Payload {
        match self {
            PayloadKind::Database => Payload::Database(DatabasePayload::default()),
            PayloadKind::MetadataSet => Payload::MetadataSet(MetadataSetPayload::default()),
            PayloadKind::MetadataDelete => Payload::MetadataDelete(String::new()),
            PayloadKind::Connection => Payload::Connection(ConnectionPayload::default()),
        }
    }

    /// Parse raw payload JSON according to this schema
    pub(crate) fn parse(self, raw: &str) -> serde_json::Result<Payload> {
        match self {
            PayloadKind::Database => parse_object(raw).map(Payload::Database),
            PayloadKind::MetadataSet => parse_object(raw).map(Payload::MetadataSet),
            PayloadKind::MetadataDelete => serde_json::from_str(raw).map(Payload::MetadataDelete),
            PayloadKind::Connection => parse_object(raw).map(Payload::Connection),
        }
    }
}

/// Derived structs also accept JSON arrays; payload objects must be objects.
fn parse_object<T: DeserializeOwned>(raw: &str) -> serde_json::Result<T> {
    if !raw.trim_start().starts_with('{') {
        return Err(serde_json::Error::custom("expected a JSON object"));
    }
    serde_json::from_str(raw)
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Durations travel as non-negative i64 nanoseconds
mod duration_nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = i64::try_from(value.as_nanos())
            .map_err(|_| serde::ser::Error::custom("duration overflows i64 nanoseconds"))?;
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let nanos = i64::deserialize(deserializer)?;
        let nanos = u64::try_from(nanos)
            .map_err(|_| serde::de::Error::custom(format!("negative duration: {}ns", nanos)))?;
        Ok(Duration::from_nanos(nanos))
    }
}
