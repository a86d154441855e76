//! Error types for raftcmd
//!
//! Provides a unified error type for all codec operations.

use thiserror::Error;

use crate::protocol::{CommandTag, PayloadKind};

/// Result type alias using CommandError
pub type Result<T> = std::result::Result<T, CommandError>;

/// Unified error type for raftcmd operations
#[derive(Debug, Error)]
pub enum CommandError {
    // -------------------------------------------------------------------------
    // Encode Errors
    // -------------------------------------------------------------------------
    /// Payload carried by a command is not the shape its tag requires.
    #[error("Schema mismatch: {tag} requires {expected} payload, found {found}")]
    SchemaMismatch {
        tag: CommandTag,
        expected: PayloadKind,
        found: PayloadKind,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Malformed command envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    #[error("Unknown command type: {0}")]
    UnknownCommandType(i128),

    #[error("Invalid {tag} payload: expected {expected}: {source}")]
    PayloadSchema {
        tag: CommandTag,
        expected: PayloadKind,
        #[source]
        source: serde_json::Error,
    },

    // -------------------------------------------------------------------------
    // Entry Errors
    // -------------------------------------------------------------------------
    #[error("Entry too large: {size} bytes (max {max})")]
    EntryTooLarge { size: usize, max: usize },

    #[error("Checksum mismatch: expected 0x{expected:08x}, got 0x{actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CommandError {
    /// Whether this error was produced while decoding entry bytes.
    ///
    /// Decode errors are permanent: the same bytes always fail the same way.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            CommandError::MalformedEnvelope(_)
                | CommandError::UnknownCommandType(_)
                | CommandError::PayloadSchema { .. }
                | CommandError::ChecksumMismatch { .. }
        )
    }
}
