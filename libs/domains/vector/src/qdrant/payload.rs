//! Conversions between record metadata and Qdrant payloads.

use std::collections::HashMap;

use qdrant_client::qdrant::{ListValue, Struct, Value as QdrantValue, value::Kind};
use serde_json::Value;

use crate::models::Metadata;

/// Payload key holding the caller's record id. Qdrant only accepts UUIDs and
/// integers as point ids.
pub const RECORD_ID_KEY: &str = "_record_id";

pub fn json_to_qdrant_value(val: Value) -> QdrantValue {
    let kind = match val {
        Value::Null => Kind::NullValue(0),
        Value::Bool(b) => Kind::BoolValue(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Kind::IntegerValue(i),
            None => Kind::DoubleValue(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => Kind::StringValue(s),
        Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(json_to_qdrant_value).collect(),
        }),
        Value::Object(map) => Kind::StructValue(Struct {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, json_to_qdrant_value(v)))
                .collect(),
        }),
    };
    QdrantValue { kind: Some(kind) }
}

pub fn qdrant_value_to_json(val: QdrantValue) -> Value {
    match val.kind {
        Some(Kind::NullValue(_)) | None => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(b),
        Some(Kind::IntegerValue(i)) => Value::Number(i.into()),
        Some(Kind::DoubleValue(f)) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Some(Kind::StringValue(s)) => Value::String(s),
        Some(Kind::ListValue(list)) => {
            Value::Array(list.values.into_iter().map(qdrant_value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, qdrant_value_to_json(v)))
                .collect(),
        ),
    }
}

/// Metadata plus the reserved record-id key.
pub fn to_payload(record_id: &str, metadata: Metadata) -> HashMap<String, QdrantValue> {
    let mut payload: HashMap<String, QdrantValue> = metadata
        .into_iter()
        .map(|(k, v)| (k, json_to_qdrant_value(v)))
        .collect();
    payload.insert(
        RECORD_ID_KEY.to_string(),
        json_to_qdrant_value(Value::String(record_id.to_string())),
    );
    payload
}

/// Splits a stored payload into the record id (if present) and metadata.
pub fn from_payload(payload: HashMap<String, QdrantValue>) -> (Option<String>, Metadata) {
    let mut record_id = None;
    let mut metadata = Metadata::new();

    for (key, value) in payload {
        match qdrant_value_to_json(value) {
            Value::String(id) if key == RECORD_ID_KEY => record_id = Some(id),
            json => {
                metadata.insert(key, json);
            }
        }
    }

    (record_id, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_values_survive() {
        let original = json!({
            "text": "hello",
            "page": 3,
            "score": 0.25,
            "tags": ["a", "b"],
            "author": {"name": "x", "active": true},
            "missing": null
        });
        let Value::Object(metadata) = original.clone() else {
            unreachable!()
        };

        let (id, restored) = from_payload(to_payload("doc_7", metadata));

        assert_eq!(id.as_deref(), Some("doc_7"));
        assert_eq!(Value::Object(restored), original);
    }

    #[test]
    fn test_record_id_key_is_stripped() {
        let payload = to_payload("a", Metadata::new());
        assert!(payload.contains_key(RECORD_ID_KEY));

        let (_, metadata) = from_payload(payload);
        assert!(!metadata.contains_key(RECORD_ID_KEY));
    }
}
