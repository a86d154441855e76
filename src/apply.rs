//! Apply Module
//!
//! Hands decoded log entries to the state machine.
//!
//! ## Responsibilities
//! - Decode committed entry bytes
//! - Route each command to the matching [`Applier`] callback
//! - Surface decode failures to the caller; a bad entry is never skipped,
//!   since replicas must apply the same entries in the same order

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::error;

use crate::error::CommandError;
use crate::protocol::{Codec, Command, CommandTag, ConnectionPayload, DatabasePayload, Payload};

/// State machine callbacks invoked for each committed command
///
/// Every replica calls the same callbacks for the same entries, in log
/// order.
pub trait Applier {
    /// Result of applying one command
    type Output;

    /// Failure raised by the state machine
    type Error: std::error::Error + 'static;

    /// Run statements that modify the database
    fn execute(&mut self, payload: DatabasePayload) -> Result<Self::Output, Self::Error>;

    /// Run read-only statements
    fn query(&mut self, payload: DatabasePayload) -> Result<Self::Output, Self::Error>;

    /// Store metadata for a raft node
    fn set_metadata(
        &mut self,
        raft_id: String,
        data: BTreeMap<String, String>,
    ) -> Result<Self::Output, Self::Error>;

    /// Remove the metadata stored under `id`
    fn delete_metadata(&mut self, id: String) -> Result<Self::Output, Self::Error>;

    fn connect(&mut self, payload: ConnectionPayload) -> Result<Self::Output, Self::Error>;

    fn disconnect(&mut self, payload: ConnectionPayload) -> Result<Self::Output, Self::Error>;
}

/// Failure applying a log entry
#[derive(Debug, Error)]
pub enum ApplyError<E: std::error::Error + 'static> {
    /// Entry bytes could not be turned into a command
    #[error("failed to decode log entry: {0}")]
    Decode(#[source] CommandError),

    /// The state machine rejected the command
    #[error("failed to apply {tag} command: {source}")]
    Apply {
        tag: CommandTag,
        #[source]
        source: E,
    },
}

/// Route a decoded command to its callback
pub fn apply_command<A: Applier>(
    applier: &mut A,
    command: Command,
) -> Result<A::Output, ApplyError<A::Error>> {
    let (tag, payload) = command.into_parts();
    let result = match (tag, payload) {
        (CommandTag::Execute, Payload::Database(p)) => applier.execute(p),
        (CommandTag::Query, Payload::Database(p)) => applier.query(p),
        (CommandTag::MetadataSet, Payload::MetadataSet(p)) => applier.set_metadata(p.raft_id, p.data),
        (CommandTag::MetadataDelete, Payload::MetadataDelete(id)) => applier.delete_metadata(id),
        (CommandTag::Connect, Payload::Connection(p)) => applier.connect(p),
        (CommandTag::Disconnect, Payload::Connection(p)) => applier.disconnect(p),
        (tag, payload) => {
            return Err(ApplyError::Decode(CommandError::SchemaMismatch {
                tag,
                expected: tag.payload_kind(),
                found: payload.kind(),
            }))
        }
    };
    result.map_err(|source| ApplyError::Apply { tag, source })
}

/// Decode committed entry bytes and apply the command
pub fn apply_entry<A: Applier>(
    applier: &mut A,
    codec: &Codec,
    entry: &[u8],
) -> Result<A::Output, ApplyError<A::Error>> {
    let command = codec.decode(entry).map_err(|e| {
        error!(error = %e, size = entry.len(), "log entry could not be decoded");
        ApplyError::Decode(e)
    })?;
    apply_command(applier, command)
}
