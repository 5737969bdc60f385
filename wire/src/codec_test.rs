use super::*;

fn sample_envelope() -> Envelope {
    Envelope::new(
        "moveMade",
        vec![
            serde_json::json!({"from": "e2", "to": "e4", "extra": {"ok": true, "n": 1.5, "nil": null, "tags": ["a"]}}),
            serde_json::json!("w"),
        ],
    )
}

#[test]
fn binary_round_trip_preserves_envelope() {
    let envelope = sample_envelope();
    let bytes = encode_binary(&envelope);
    assert!(!bytes.is_empty());
    assert_eq!(decode_binary(&bytes).expect("decode"), envelope);
}

#[test]
fn binary_preserves_argument_order_and_bare_envelopes() {
    let bare = Envelope::bare("bothPlayersReady");
    let decoded = decode_binary(&encode_binary(&bare)).expect("decode");
    assert_eq!(decoded.name, "bothPlayersReady");
    assert!(decoded.args.is_empty());
}

#[test]
fn decode_binary_rejects_malformed_bytes() {
    let err = decode_binary(&[0xff, 0x00, 0x01]).expect_err("bytes should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_binary_rejects_missing_name() {
    let bytes = encode_binary(&Envelope::bare(""));
    let err = decode_binary(&bytes).expect_err("name required");
    assert!(matches!(err, CodecError::EmptyName));
}

#[test]
fn text_round_trip_preserves_envelope() {
    let envelope = sample_envelope();
    let text = encode_text(&envelope);
    assert_eq!(decode_text(&text).expect("decode"), envelope);
}

#[test]
fn decode_text_defaults_missing_args() {
    let envelope = decode_text(r#"{"name":"disconnect"}"#).expect("decode");
    assert_eq!(envelope, Envelope::bare("disconnect"));
}

#[test]
fn decode_text_rejects_garbage_and_blank_names() {
    assert!(matches!(decode_text("not json"), Err(CodecError::Json(_))));
    assert!(matches!(decode_text(r#"{"args":[]}"#), Err(CodecError::Json(_))));
    assert!(matches!(decode_text(r#"{"name":"","args":[]}"#), Err(CodecError::EmptyName)));
}

#[test]
fn proto_value_without_kind_maps_to_null() {
    assert_eq!(proto_to_json_value(&prost_types::Value { kind: None }), Value::Null);
}
