//! # raftcmd
//!
//! Canonical codec for the commands a replicated log carries to a
//! distributed database state machine:
//! - Tagged commands (execute, query, metadata set/delete, connect/disconnect)
//! - Two-phase decoding: tag first, payload by the schema the tag selects
//! - Legacy entries without a tag decode as execute
//! - Checksummed framing for entry streams
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Request Translation                         │
//! │              (Command constructors)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Codec::encode                              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ bytes
//!          ┌────────────▼────────────┐
//!          │     Replicated Log      │
//!          │  (external transport)   │
//!          └────────────┬────────────┘
//!                       │ bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Codec::decode                              │
//! │         (envelope split → payload by tag schema)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//!                ┌──────▼──────┐
//!                │   Applier   │
//!                └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod stream;
pub mod apply;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CommandError, Result};
pub use config::Config;
pub use protocol::{Codec, Command, CommandTag, Payload};
pub use apply::{Applier, ApplyError};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of raftcmd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
