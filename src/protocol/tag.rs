//! Command tag registry
//!
//! Every command tag and the payload schema it implies. Both the encoder
//! and the second decode phase consult [`CommandTag::payload_kind`], so
//! what can be written and what can be read never drift apart.

use std::fmt;

/// Command discriminant
///
/// The numeric values are persisted in the replicated log and must never
/// be reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CommandTag {
    /// Modifies the database
    Execute = 0,

    /// Reads from the database
    Query = 1,

    /// Sets store metadata
    MetadataSet = 2,

    /// Deletes store metadata
    MetadataDelete = 3,

    /// Opens a database connection
    Connect = 4,

    /// Closes a database connection
    Disconnect = 5,
}

/// All registered tags, in wire order
pub const ALL_TAGS: [CommandTag; 6] = [
    CommandTag::Execute,
    CommandTag::Query,
    CommandTag::MetadataSet,
    CommandTag::MetadataDelete,
    CommandTag::Connect,
    CommandTag::Disconnect,
];

/// Payload schemas a tag can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Database,
    MetadataSet,
    /// Bare string, no wrapping object
    MetadataDelete,
    Connection,
}

impl CommandTag {
    /// Tag assumed for entries written before the tag field existed
    pub const LEGACY_DEFAULT: CommandTag = CommandTag::Execute;

    /// The payload schema this tag selects
    pub const fn payload_kind(self) -> PayloadKind {
        match self {
            CommandTag::Execute | CommandTag::Query => PayloadKind::Database,
            CommandTag::MetadataSet => PayloadKind::MetadataSet,
            CommandTag::MetadataDelete => PayloadKind::MetadataDelete,
            CommandTag::Connect | CommandTag::Disconnect => PayloadKind::Connection,
        }
    }

    /// Numeric value written to the wire
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    /// Look up a tag by its wire value
    pub fn from_wire(value: i64) -> Option<Self> {
        ALL_TAGS
            .iter()
            .copied()
            .find(|tag| i64::from(tag.wire_value()) == value)
    }

    pub const fn name(self) -> &'static str {
        match self {
            CommandTag::Execute => "execute",
            CommandTag::Query => "query",
            CommandTag::MetadataSet => "metadata-set",
            CommandTag::MetadataDelete => "metadata-delete",
            CommandTag::Connect => "connect",
            CommandTag::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for CommandTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PayloadKind {
    /// Human-readable description of the expected wire shape
    pub const fn shape(self) -> &'static str {
        match self {
            PayloadKind::Database => "database object",
            PayloadKind::MetadataSet => "metadata object",
            PayloadKind::MetadataDelete => "bare string",
            PayloadKind::Connection => "connection object",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shape())
    }
}
