//! Protocol Module
//!
//! Defines the command entries carried by the replicated log.
//!
//! ## Entry Format
//! ```text
//! {"typ":2,"sub":{"raft_id":"node1","data":{"k":"v"}}}
//!   │        │
//!   │        └── payload, schema selected by typ
//!   └── command tag
//! ```
//!
//! ### Tags
//! - 0: EXECUTE         - Payload: database object
//! - 1: QUERY           - Payload: database object
//! - 2: METADATA_SET    - Payload: metadata object
//! - 3: METADATA_DELETE - Payload: bare string
//! - 4: CONNECT         - Payload: connection object
//! - 5: DISCONNECT      - Payload: connection object
//!
//! A missing `typ` decodes as EXECUTE. A zero-valued payload is omitted.

mod tag;
mod payload;
mod command;
mod codec;

pub use tag::{CommandTag, PayloadKind, ALL_TAGS};
pub use payload::{
    ConnectionPayload, DatabasePayload, MetadataSetPayload, Payload, MAX_WIRE_DURATION,
};
pub use command::Command;
pub use codec::{Codec, encode_command, decode_command};
