//! Envelope model and codec.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned by the decode functions.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf `WireEnvelope`.
    #[error("failed to decode protobuf envelope: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The text could not be parsed as a JSON envelope.
    #[error("failed to decode json envelope: {0}")]
    Json(#[from] serde_json::Error),
    /// The envelope has no message name.
    #[error("envelope has an empty name")]
    EmptyName,
}

/// One named message with positional arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Message name, e.g. `"moveMade"`.
    pub name: String,
    /// Positional arguments. Most messages carry one object; `moveMade`
    /// carries the move and the mover's color.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Envelope {
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self { name: name.into(), args }
    }

    /// An envelope with no arguments.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// Encode an envelope into protobuf bytes.
#[must_use]
pub fn encode_binary(envelope: &Envelope) -> Vec<u8> {
    let wire = WireEnvelope {
        name: envelope.name.clone(),
        args: envelope.args.iter().map(json_to_proto_value).collect(),
    };

    let mut out = Vec::with_capacity(wire.encoded_len());
    // Encoding into a growable Vec cannot run out of buffer, the only error prost reports.
    wire.encode(&mut out).unwrap_or_default();
    out
}

/// Decode protobuf bytes into an envelope.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes and
/// [`CodecError::EmptyName`] when the name field is missing.
pub fn decode_binary(bytes: &[u8]) -> Result<Envelope, CodecError> {
    let wire = WireEnvelope::decode(bytes)?;
    if wire.name.is_empty() {
        return Err(CodecError::EmptyName);
    }
    Ok(Envelope {
        name: wire.name,
        args: wire.args.iter().map(proto_to_json_value).collect(),
    })
}

/// Encode an envelope as JSON text.
#[must_use]
pub fn encode_text(envelope: &Envelope) -> String {
    serde_json::json!({ "name": envelope.name, "args": envelope.args }).to_string()
}

/// Decode JSON text into an envelope.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for text that is not an envelope object and
/// [`CodecError::EmptyName`] when the name is blank.
pub fn decode_text(text: &str) -> Result<Envelope, CodecError> {
    let envelope = serde_json::from_str::<Envelope>(text)?;
    if envelope.name.is_empty() {
        return Err(CodecError::EmptyName);
    }
    Ok(envelope)
}

fn json_to_proto_value(value: &Value) -> prost_types::Value {
    use prost_types::value::Kind;

    let kind = match value {
        Value::Null => Kind::NullValue(prost_types::NullValue::NullValue as i32),
        Value::Bool(v) => Kind::BoolValue(*v),
        Value::Number(v) => Kind::NumberValue(v.as_f64().unwrap_or(0.0)),
        Value::String(v) => Kind::StringValue(v.clone()),
        Value::Array(v) => Kind::ListValue(prost_types::ListValue { values: v.iter().map(json_to_proto_value).collect() }),
        Value::Object(v) => Kind::StructValue(prost_types::Struct {
            fields: v.iter().map(|(k, v)| (k.clone(), json_to_proto_value(v))).collect(),
        }),
    };

    prost_types::Value { kind: Some(kind) }
}

fn proto_to_json_value(value: &prost_types::Value) -> Value {
    use prost_types::value::Kind;

    let Some(kind) = &value.kind else {
        return Value::Null;
    };

    match kind {
        Kind::NullValue(_) => Value::Null,
        Kind::NumberValue(v) => serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number),
        Kind::StringValue(v) => Value::String(v.clone()),
        Kind::BoolValue(v) => Value::Bool(*v),
        Kind::StructValue(v) => Value::Object(v.fields.iter().map(|(k, v)| (k.clone(), proto_to_json_value(v))).collect()),
        Kind::ListValue(v) => Value::Array(v.values.iter().map(proto_to_json_value).collect()),
    }
}

#[derive(Clone, PartialEq, Message)]
struct WireEnvelope {
    #[prost(string, tag = "1")]
    name: String,
    #[prost(message, repeated, tag = "2")]
    args: Vec<prost_types::Value>,
}
