use std::path::Path;

use anyconv::conv::{ConvError, Mapping, Result, Value, from_json};

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Read a JSON file into a loosely-typed value.
pub(crate) fn read_value(path: &Path) -> Result<Value> {
	let text = std::fs::read_to_string(path)?;
	let json: serde_json::Value = serde_json::from_str(&text)?;
	Ok(from_json(json))
}

/// Read a JSON file whose top level must be an object.
pub(crate) fn read_document(path: &Path) -> Result<Mapping> {
	match read_value(path)? {
		Value::Map(map) => Ok(map),
		other => Err(ConvError::InvalidDocument { kind: other.kind().as_str() }),
	}
}

/// Parse a command-line literal as JSON, falling back to the raw text.
pub(crate) fn parse_literal(input: &str) -> Value {
	match serde_json::from_str::<serde_json::Value>(input) {
		Ok(json) => from_json(json),
		Err(_) => Value::String(input.to_owned()),
	}
}

/// Shorten text to `max_len` Unicode scalar values.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
