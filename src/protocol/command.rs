//! Command definitions
//!
//! A command pairs a tag with the payload that tag requires. The
//! constructors below are the only way to build one, so the pairing
//! always holds.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{CommandError, Result};
use super::{CommandTag, ConnectionPayload, DatabasePayload, MetadataSetPayload, Payload};

/// A state-machine command destined for the replicated log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub(crate) tag: CommandTag,
    pub(crate) payload: Payload,
}

impl Command {
    /// Pair a tag with a payload, rejecting payloads of the wrong shape
    ///
    /// Connection timeouts saturate at [`MAX_WIRE_DURATION`](super::MAX_WIRE_DURATION).
    pub fn new(tag: CommandTag, payload: Payload) -> Result<Self> {
        let expected = tag.payload_kind();
        let found = payload.kind();
        if expected != found {
            return Err(CommandError::SchemaMismatch {
                tag,
                expected,
                found,
            });
        }
        let payload = match payload {
            Payload::Connection(p) => Payload::Connection(p.clamped()),
            other => other,
        };
        Ok(Self { tag, payload })
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Statements that modify the database
    pub fn execute(payload: DatabasePayload) -> Self {
        Self {
            tag: CommandTag::Execute,
            payload: Payload::Database(payload),
        }
    }

    /// Statements that only read the database
    pub fn query(payload: DatabasePayload) -> Self {
        Self {
            tag: CommandTag::Query,
            payload: Payload::Database(payload),
        }
    }

    /// Set metadata for a raft node
    pub fn metadata_set<I, K, V>(raft_id: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data: BTreeMap<String, String> = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            tag: CommandTag::MetadataSet,
            payload: Payload::MetadataSet(MetadataSetPayload {
                raft_id: raft_id.into(),
                data,
            }),
        }
    }

    /// Delete the metadata stored under `id`
    pub fn metadata_delete(id: impl Into<String>) -> Self {
        Self {
            tag: CommandTag::MetadataDelete,
            payload: Payload::MetadataDelete(id.into()),
        }
    }

    /// Open a database connection
    ///
    /// Timeouts saturate at [`MAX_WIRE_DURATION`](super::MAX_WIRE_DURATION).
    pub fn connect(connection_id: u64, idle_timeout: Duration, tx_timeout: Duration) -> Self {
        let payload = ConnectionPayload {
            connection_id,
            idle_timeout,
            tx_timeout,
        };
        Self {
            tag: CommandTag::Connect,
            payload: Payload::Connection(payload.clamped()),
        }
    }

    /// Close a database connection
    pub fn disconnect(connection_id: u64) -> Self {
        Self {
            tag: CommandTag::Disconnect,
            payload: Payload::Connection(ConnectionPayload {
                connection_id,
                ..ConnectionPayload::default()
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tag(&self) -> CommandTag {
        self.tag
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_parts(self) -> (CommandTag, Payload) {
        (self.tag, self.payload)
    }
}
