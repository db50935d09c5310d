use serde_json::{Map, Value as JsonValue};

use crate::conv::value::Value;

/// Convert a parsed JSON document into a loosely-typed value.
///
/// Integers become `I64` when they fit, `U64` above that, floats `F64`.
pub fn from_json(value: JsonValue) -> Value {
	match value {
		JsonValue::Null => Value::Null,
		JsonValue::Bool(v) => Value::Bool(v),
		JsonValue::Number(n) => {
			if let Some(v) = n.as_i64() {
				Value::I64(v)
			} else if let Some(v) = n.as_u64() {
				Value::U64(v)
			} else {
				Value::F64(n.as_f64().unwrap_or(f64::NAN))
			}
		}
		JsonValue::String(v) => Value::String(v),
		JsonValue::Array(items) => Value::Array(items.into_iter().map(from_json).collect()),
		JsonValue::Object(map) => Value::Map(map.into_iter().map(|(key, item)| (key, from_json(item))).collect()),
	}
}

/// Render a value as JSON.
///
/// Timestamps become RFC 3339 strings and bytes arrays of numbers. Structs
/// become `{"type": .., "fields": {..}}`; extensions use their textual form.
/// Non-finite floats become `null`.
pub fn to_json(value: &Value) -> JsonValue {
	match value {
		Value::Null => JsonValue::Null,
		Value::Bool(v) => serde_json::json!(v),
		Value::I64(v) => serde_json::json!(v),
		Value::U64(v) => serde_json::json!(v),
		Value::F32(v) => serde_json::json!(v),
		Value::F64(v) => serde_json::json!(v),
		Value::Bytes(v) => JsonValue::Array(v.iter().map(|byte| serde_json::json!(byte)).collect()),
		Value::String(v) => serde_json::json!(v),
		Value::Time(v) => serde_json::json!(v.to_rfc3339()),
		Value::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
		Value::Map(map) => JsonValue::Object(map.iter().map(|(key, item)| (key.clone(), to_json(item))).collect()),
		Value::Struct(item) => {
			let fields: Map<String, JsonValue> = item
				.fields
				.iter()
				.map(|field| (field.name.to_string(), to_json(&field.value)))
				.collect();

			let mut out = Map::new();
			out.insert("type".to_owned(), serde_json::json!(item.type_name.as_ref()));
			out.insert("fields".to_owned(), JsonValue::Object(fields));
			JsonValue::Object(out)
		}
		Value::Ext(_) => serde_json::json!(value.to_string()),
	}
}

impl From<JsonValue> for Value {
	fn from(value: JsonValue) -> Self {
		from_json(value)
	}
}
