//! Registry and Constructor Tests
//!
//! Tests for the tag registry, payload kinds and command constructors.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use raftcmd::protocol::{
    Command, CommandTag, ConnectionPayload, DatabasePayload, MetadataSetPayload, Payload,
    PayloadKind, ALL_TAGS,
};
use raftcmd::{CommandError, Config};

// =============================================================================
// Tag Registry Tests
// =============================================================================

#[test]
fn test_wire_values_are_stable() {
    assert_eq!(CommandTag::Execute.wire_value(), 0);
    assert_eq!(CommandTag::Query.wire_value(), 1);
    assert_eq!(CommandTag::MetadataSet.wire_value(), 2);
    assert_eq!(CommandTag::MetadataDelete.wire_value(), 3);
    assert_eq!(CommandTag::Connect.wire_value(), 4);
    assert_eq!(CommandTag::Disconnect.wire_value(), 5);
}

#[test]
fn test_from_wire_covers_registry() {
    for tag in ALL_TAGS {
        assert_eq!(CommandTag::from_wire(i64::from(tag.wire_value())), Some(tag));
    }
    assert_eq!(CommandTag::from_wire(6), None);
    assert_eq!(CommandTag::from_wire(-1), None);
    assert_eq!(CommandTag::from_wire(i64::MAX), None);
}

#[test]
fn test_tags_are_unique() {
    let values: HashSet<u8> = ALL_TAGS.iter().map(|t| t.wire_value()).collect();
    assert_eq!(values.len(), ALL_TAGS.len());
}

#[test]
fn test_payload_kind_mapping() {
    assert_eq!(CommandTag::Execute.payload_kind(), PayloadKind::Database);
    assert_eq!(CommandTag::Query.payload_kind(), PayloadKind::Database);
    assert_eq!(CommandTag::MetadataSet.payload_kind(), PayloadKind::MetadataSet);
    assert_eq!(CommandTag::MetadataDelete.payload_kind(), PayloadKind::MetadataDelete);
    assert_eq!(CommandTag::Connect.payload_kind(), PayloadKind::Connection);
    assert_eq!(CommandTag::Disconnect.payload_kind(), PayloadKind::Connection);
}

#[test]
fn test_legacy_default_is_execute() {
    assert_eq!(CommandTag::LEGACY_DEFAULT, CommandTag::Execute);
}

#[test]
fn test_zero_payload_matches_kind() {
    for tag in ALL_TAGS {
        let kind = tag.payload_kind();
        let zero = kind.zero_payload();
        assert_eq!(zero.kind(), kind);
        assert!(zero.is_zero());
    }
}

// =============================================================================
// Constructor Tests
// =============================================================================

#[test]
fn test_constructors_set_tag_and_payload() {
    let payload = DatabasePayload::new(["SELECT 1"]).with_timings(true);

    let execute = Command::execute(payload.clone());
    assert_eq!(execute.tag(), CommandTag::Execute);
    assert_eq!(execute.payload(), &Payload::Database(payload.clone()));

    let query = Command::query(payload.clone());
    assert_eq!(query.tag(), CommandTag::Query);
    assert_eq!(query.payload(), &Payload::Database(payload));

    let delete = Command::metadata_delete("node3");
    assert_eq!(delete.tag(), CommandTag::MetadataDelete);
    assert_eq!(delete.payload(), &Payload::MetadataDelete("node3".to_string()));
}

#[test]
fn test_metadata_set_constructor() {
    let mut data = BTreeMap::new();
    data.insert("api_addr".to_string(), "localhost:4001".to_string());

    let command = Command::metadata_set("node1", data.clone());
    assert_eq!(command.tag(), CommandTag::MetadataSet);
    assert_eq!(
        command.payload(),
        &Payload::MetadataSet(MetadataSetPayload {
            raft_id: "node1".to_string(),
            data,
        })
    );
}

#[test]
fn test_metadata_set_duplicate_keys_keep_last() {
    let command = Command::metadata_set("n", [("k", "first"), ("k", "second")]);
    match command.payload() {
        Payload::MetadataSet(p) => {
            assert_eq!(p.data.len(), 1);
            assert_eq!(p.data["k"], "second");
        }
        other => panic!("Expected metadata payload, got {:?}", other),
    }
}

#[test]
fn test_connection_constructors() {
    let connect = Command::connect(9, Duration::from_secs(60), Duration::from_secs(10));
    assert_eq!(connect.tag(), CommandTag::Connect);
    assert_eq!(
        connect.payload(),
        &Payload::Connection(ConnectionPayload {
            connection_id: 9,
            idle_timeout: Duration::from_secs(60),
            tx_timeout: Duration::from_secs(10),
        })
    );

    let (tag, payload) = Command::disconnect(9).into_parts();
    assert_eq!(tag, CommandTag::Disconnect);
    assert_eq!(
        payload,
        Payload::Connection(ConnectionPayload {
            connection_id: 9,
            ..ConnectionPayload::default()
        })
    );
}

#[test]
fn test_database_payload_builder() {
    let payload = DatabasePayload::new(vec!["a".to_string(), "b".to_string()])
        .with_connection_id(4)
        .with_atomic(true)
        .with_timings(true);
    assert_eq!(payload.connection_id, 4);
    assert!(payload.atomic);
    assert!(payload.timings);
    assert_eq!(payload.queries, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn test_new_accepts_matching_payload() {
    let command = Command::new(CommandTag::Query, Payload::Database(DatabasePayload::default()))
        .unwrap();
    assert_eq!(command, Command::query(DatabasePayload::default()));
}

#[test]
fn test_new_rejects_mismatched_payload() {
    let result = Command::new(
        CommandTag::Connect,
        Payload::MetadataDelete("node1".to_string()),
    );
    match result {
        Err(CommandError::SchemaMismatch {
            tag,
            expected,
            found,
        }) => {
            assert_eq!(tag, CommandTag::Connect);
            assert_eq!(expected, PayloadKind::Connection);
            assert_eq!(found, PayloadKind::MetadataDelete);
        }
        other => panic!("Expected SchemaMismatch, got {:?}", other),
    }
}

#[test]
fn test_schema_mismatch_is_not_decode_error() {
    let err = Command::new(CommandTag::Execute, Payload::MetadataDelete(String::new()))
        .unwrap_err();
    assert!(!err.is_decode_error());
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.max_entry_size, 16 * 1024 * 1024);
    assert!(config.verify_checksums);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_rejects_zero_entry_size() {
    let result = Config::builder().max_entry_size(0).build();
    assert!(matches!(result, Err(CommandError::Config(_))));
}
