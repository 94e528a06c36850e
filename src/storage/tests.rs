use std::fs;

use futures::stream;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, duplex};

use super::*;
use crate::codec::{Decoder, Encoder};
use crate::message::{Message, MessageType, Payload, PayloadConnect};

fn session() -> Vec<Message> {
    vec![
        Message {
            connection_id: b"abcd".to_vec(),
            timestamp: 1,
            message_type: MessageType::Connect,
            channel_id: Message::NO_CHANNEL,
            payload: Some(Payload::Connect(PayloadConnect {
                remote_addr: "192.0.2.1".to_string(),
            })),
        },
        Message {
            connection_id: b"abcd".to_vec(),
            timestamp: 2,
            message_type: MessageType::Disconnect,
            channel_id: Message::NO_CHANNEL,
            payload: None,
        },
    ]
}

#[tokio::test]
async fn test_store_and_replay_log() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();

    let mut writer = storage.open_writer("session-1").unwrap();
    writer.set_metadata(1_725_000_000, "192.0.2.1", None);
    Encoder::new()
        .encode(stream::iter(session()), writer)
        .await
        .unwrap();

    let reader = storage.open_reader("session-1").unwrap();
    let outcome = Decoder::new().decode(reader).collect().await;
    assert!(outcome.error.is_none());
    assert_eq!(outcome.messages, session());
}

#[test]
fn test_metadata_is_replaced_once_authenticated() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    let mut writer = storage.open_writer("session-1").unwrap();

    writer.set_metadata(1_725_000_000, "192.0.2.1", None);
    assert_eq!(
        storage.metadata("session-1").unwrap(),
        Some(LogMetadata {
            start_time: 1_725_000_000,
            source_ip: "192.0.2.1".to_string(),
            username: None,
        })
    );

    writer.set_metadata(1_725_000_000, "192.0.2.1", Some("alice"));
    let metadata = storage.metadata("session-1").unwrap().unwrap();
    assert_eq!(metadata.username.as_deref(), Some("alice"));
}

#[test]
fn test_metadata_survives_reopen() {
    let dir = tempdir().unwrap();
    {
        let storage = FileStorage::open(dir.path()).unwrap();
        let mut writer = storage.open_writer("session-1").unwrap();
        writer.set_metadata(1_725_000_000, "192.0.2.1", Some("alice"));
    }

    let storage = FileStorage::open(dir.path()).unwrap();
    let metadata = storage.metadata("session-1").unwrap().unwrap();
    assert_eq!(metadata.start_time, 1_725_000_000);
    assert_eq!(metadata.username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_metadata_stays_out_of_the_byte_stream() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();

    let mut writer = storage.open_writer("empty").unwrap();
    writer.set_metadata(42, "192.0.2.1", Some("alice"));
    Encoder::new()
        .encode(stream::iter(Vec::new()), writer)
        .await
        .unwrap();

    assert_eq!(fs::metadata(dir.path().join("empty")).unwrap().len(), 0);
}

#[test]
fn test_list_skips_index_and_hidden_files() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();

    let mut indexed = storage.open_writer("b-indexed").unwrap();
    indexed.set_metadata(7, "198.51.100.4", Some("bob"));
    storage.open_writer("a-plain").unwrap();
    fs::write(dir.path().join(".hidden"), b"").unwrap();

    let mut entries: Vec<Entry> = storage.list().map(Result::unwrap).collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "a-plain");
    assert!(entries[0].metadata.is_none());
    assert_eq!(entries[1].name, "b-indexed");
    assert_eq!(entries[1].metadata.as_ref().unwrap().start_time, 7);
}

#[test]
fn test_invalid_names_rejected() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();

    for name in ["", ".index", "../escape", "a/b", "a\\b"] {
        assert!(matches!(
            storage.open_writer(name),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            storage.open_reader(name),
            Err(StorageError::InvalidName(_))
        ));
    }
}

#[test]
fn test_missing_and_existing_logs() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();

    assert!(matches!(
        storage.open_reader("missing"),
        Err(StorageError::NotFound(name)) if name == "missing"
    ));

    storage.open_writer("taken").unwrap();
    assert!(matches!(
        storage.open_writer("taken"),
        Err(StorageError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn test_proxy_passes_bytes_through() {
    let (mut reader, writer) = duplex(64);
    let mut proxy = StorageWriterProxy::new(writer);
    proxy.set_metadata(1, "192.0.2.1", None);

    let encoder = Encoder::new();
    let mut expected = Vec::new();
    encoder
        .encode(stream::iter(session()), &mut expected)
        .await
        .unwrap();

    let encode = encoder.encode(stream::iter(session()), proxy);
    let mut received = Vec::new();
    let (encoded, read) = tokio::join!(encode, reader.read_to_end(&mut received));
    encoded.unwrap();
    read.unwrap();
    assert_eq!(received, expected);
}

fn assert_read_write<S: ReadWriteStorage>(_: &S) {}

#[test]
fn test_file_storage_is_read_write() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    assert_read_write(&storage);
    assert_eq!(storage.directory(), dir.path());
}
