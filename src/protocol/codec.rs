//! Command codec
//!
//! Encoding and decoding between [`Command`] values and log entry bytes.
//!
//! ## Wire Format
//!
//! ```text
//! { "typ": <tag, optional, default 0>,
//!   "sub": <payload selected by typ, omitted when zero> }
//! ```
//!
//! Decoding runs in two phases. The first splits the envelope into the tag
//! and the verbatim payload text; the second parses that text with the
//! schema the tag selects.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Number;
use tracing::debug;

use crate::config::Config;
use crate::error::{CommandError, Result};
use super::{Command, CommandTag, Payload};

/// Outgoing envelope; the tag is always written
#[derive(Serialize)]
struct EnvelopeOut<'a> {
    typ: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<&'a Payload>,
}

/// Incoming envelope with the payload left unparsed
#[derive(Deserialize)]
struct RawEnvelope<'a> {
    #[serde(default)]
    typ: Option<Number>,
    #[serde(default, borrow)]
    sub: Option<&'a RawValue>,
}

/// Encodes and decodes commands under a given [`Config`]
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: Config,
}

impl Codec {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Encode a command into entry bytes
    pub fn encode(&self, command: &Command) -> Result<Vec<u8>> {
        let tag = command.tag;
        let expected = tag.payload_kind();
        let found = command.payload.kind();
        if expected != found {
            return Err(CommandError::SchemaMismatch {
                tag,
                expected,
                found,
            });
        }

        let envelope = EnvelopeOut {
            typ: tag.wire_value(),
            sub: (!command.payload.is_zero()).then_some(&command.payload),
        };
        let bytes = serde_json::to_vec(&envelope).map_err(CommandError::Serialization)?;
        self.check_size(bytes.len())?;

        debug!(%tag, size = bytes.len(), "encoded command");
        Ok(bytes)
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decode entry bytes into a command
    pub fn decode(&self, bytes: &[u8]) -> Result<Command> {
        self.check_size(bytes.len())?;

        // Phase 1: envelope split
        let envelope = split_envelope(bytes)?;
        let tag = resolve_tag(envelope.typ)?;

        // Phase 2: payload decode
        let payload = decode_payload(tag, envelope.sub)?;

        debug!(%tag, size = bytes.len(), "decoded command");
        Ok(Command { tag, payload })
    }

    /// Reject entries larger than the configured maximum
    pub(crate) fn check_size(&self, size: usize) -> Result<()> {
        if size > self.config.max_entry_size {
            return Err(CommandError::EntryTooLarge {
                size,
                max: self.config.max_entry_size,
            });
        }
        Ok(())
    }
}

fn split_envelope(bytes: &[u8]) -> Result<RawEnvelope<'_>> {
    // Derived structs also accept arrays; the envelope must be an object.
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    if first != Some(&b'{') {
        return Err(CommandError::MalformedEnvelope(serde_json::Error::custom(
            "expected a JSON object",
        )));
    }
    serde_json::from_slice(bytes).map_err(CommandError::MalformedEnvelope)
}

/// Map the optional wire tag onto the registry
///
/// Any integer is a tag candidate; fractional numbers are malformed.
fn resolve_tag(typ: Option<Number>) -> Result<CommandTag> {
    let Some(number) = typ else {
        debug!(tag = %CommandTag::LEGACY_DEFAULT, "command type absent, using legacy default");
        return Ok(CommandTag::LEGACY_DEFAULT);
    };

    let value = match (number.as_i64(), number.as_u64()) {
        (Some(signed), _) => i128::from(signed),
        (None, Some(unsigned)) => i128::from(unsigned),
        (None, None) => {
            return Err(CommandError::MalformedEnvelope(serde_json::Error::custom(format!(
                "command type must be an integer, got {}",
                number
            ))))
        }
    };
    i64::try_from(value)
        .ok()
        .and_then(CommandTag::from_wire)
        .ok_or(CommandError::UnknownCommandType(value))
}

fn decode_payload(tag: CommandTag, raw: Option<&RawValue>) -> Result<Payload> {
    let expected = tag.payload_kind();
    match raw {
        None => Ok(expected.zero_payload()),
        Some(raw) => expected
            .parse(raw.get())
            .map_err(|source| CommandError::PayloadSchema {
                tag,
                expected,
                source,
            }),
    }
}

// =============================================================================
// Default-config helpers
// =============================================================================

/// Encode a command with the default configuration
pub fn encode_command(command: &Command) -> Result<Vec<u8>> {
    Codec::default().encode(command)
}

/// Decode a command with the default configuration
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    Codec::default().decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{DatabasePayload, PayloadKind};

    #[test]
    fn test_encode_rejects_mismatched_payload() {
        let command = Command {
            tag: CommandTag::MetadataDelete,
            payload: Payload::Database(DatabasePayload::new(["SELECT 1"])),
        };

        let err = encode_command(&command).unwrap_err();
        match err {
            CommandError::SchemaMismatch {
                tag,
                expected,
                found,
            } => {
                assert_eq!(tag, CommandTag::MetadataDelete);
                assert_eq!(expected, PayloadKind::MetadataDelete);
                assert_eq!(found, PayloadKind::Database);
            }
            other => panic!("Expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_tag_defaults_to_execute() {
        assert_eq!(resolve_tag(None).unwrap(), CommandTag::Execute);
        assert_eq!(resolve_tag(Some(Number::from(1))).unwrap(), CommandTag::Query);
        assert!(matches!(
            resolve_tag(Some(Number::from(-1))),
            Err(CommandError::UnknownCommandType(-1))
        ));
    }

    #[test]
    fn test_resolve_tag_beyond_i64() {
        let value = u64::MAX;
        match resolve_tag(Some(Number::from(value))) {
            Err(CommandError::UnknownCommandType(v)) => assert_eq!(v, i128::from(value)),
            other => panic!("Expected UnknownCommandType, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_tag_rejects_fraction() {
        let number = Number::from_f64(1.5).unwrap();
        assert!(matches!(
            resolve_tag(Some(number)),
            Err(CommandError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_decode_payload_absent_is_zero() {
        for tag in crate::protocol::ALL_TAGS {
            let payload = decode_payload(tag, None).unwrap();
            assert!(payload.is_zero());
            assert_eq!(payload.kind(), tag.payload_kind());
        }
    }
}
