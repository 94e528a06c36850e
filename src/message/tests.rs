use super::*;

fn connect(remote_addr: &str) -> Message {
    Message {
        connection_id: b"1234".to_vec(),
        timestamp: 1234,
        message_type: MessageType::Connect,
        channel_id: Message::NO_CHANNEL,
        payload: Some(Payload::Connect(PayloadConnect {
            remote_addr: remote_addr.to_string(),
        })),
    }
}

#[test]
fn test_message_type_tags_round_trip() {
    for message_type in MessageType::ALL {
        assert_eq!(MessageType::try_from(message_type.tag()), Ok(message_type));
    }
    assert_eq!(MessageType::try_from(2), Err(2));
    assert_eq!(MessageType::try_from(9999), Err(9999));
}

#[test]
fn test_message_type_display() {
    assert_eq!(MessageType::ChannelRequestPty.to_string(), "channel_request_pty (404)");
    assert_eq!(MessageType::Connect.to_string(), "connect (0)");
}

#[test]
fn test_equality_compares_every_field() {
    let msg = connect("127.0.0.1");
    assert_eq!(msg, msg.clone());
    assert_ne!(msg, connect("127.0.0.2"));

    let mut other_channel = msg.clone();
    other_channel.channel_id = 0;
    assert_ne!(msg, other_channel);

    let mut other_connection = msg.clone();
    other_connection.connection_id = b"1235".to_vec();
    assert_ne!(msg, other_connection);
}

#[test]
fn test_absent_payload_differs_from_empty_payload() {
    let shell = Message {
        connection_id: b"1234".to_vec(),
        timestamp: 1234,
        message_type: MessageType::ChannelRequestShell,
        channel_id: 0,
        payload: Some(Payload::ChannelRequestShell(PayloadChannelRequestShell::default())),
    };
    let mut absent = shell.clone();
    absent.payload = None;

    assert_ne!(shell, absent);
    assert_eq!(shell.payload_shape(), Some(PayloadShape::ChannelRequestShell));
    assert_eq!(absent.payload_shape(), None);
}

#[test]
fn test_payload_fields_compare_bytewise() {
    let a = Payload::AuthPubKey(PayloadAuthPubKey {
        username: "foo".to_string(),
        key: vec![1, 2, 3],
    });
    let b = Payload::AuthPubKey(PayloadAuthPubKey {
        username: "foo".to_string(),
        key: vec![1, 2, 4],
    });
    assert_ne!(a, b);
    assert_eq!(a.shape(), b.shape());
}

#[test]
fn test_no_channel_sentinel() {
    let mut msg = connect("127.0.0.1");
    assert!(!msg.has_channel());
    msg.channel_id = 0;
    assert!(msg.has_channel());
}

#[test]
fn test_serialization_roundtrip() {
    let msg = connect("10.0.0.1");
    let data = serde_json::to_vec(&msg).unwrap();
    let parsed: Message = serde_json::from_slice(&data).unwrap();
    assert_eq!(parsed, msg);

    let value: serde_json::Value = serde_json::from_slice(&data).unwrap();
    assert_eq!(value["message_type"], "connect");
    assert_eq!(value["payload"]["shape"], "connect");
    assert_eq!(value["payload"]["remote_addr"], "10.0.0.1");
}
