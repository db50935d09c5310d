use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ConvError>;

/// Errors produced by the fallible conversion surfaces.
///
/// The coercion family itself never fails; these only come out of helpers that
/// opt into reporting (`to_int64`, byte codecs, `MapReport::into_result`) and
/// the CLI.
#[derive(Debug, Error)]
pub enum ConvError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON input could not be parsed.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Value was not one of the numeric variants.
	#[error("numeric value required, got `{kind}`")]
	NotNumeric {
		/// Kind of the offending value.
		kind: &'static str,
	},
	/// Byte payload had the wrong length for a fixed-width decode.
	#[error("expected 8 bytes, got {len}")]
	InvalidByteLength {
		/// Length of the provided payload.
		len: usize,
	},
	/// Byte payload was not valid UTF-8.
	#[error("utf8: {0}")]
	Utf8(#[from] std::str::Utf8Error),
	/// Mapping target was not a struct value.
	#[error("unsupported target of kind `{kind}`, only struct values can be populated")]
	UnsupportedTarget {
		/// Kind of the rejected target.
		kind: &'static str,
	},
	/// Mapping left keys unassigned.
	#[error("mapping incomplete, skipped keys: {}", keys.join(", "))]
	Incomplete {
		/// Keys (dotted for nested records) that were not assigned.
		keys: Vec<String>,
	},
	/// Input document had an unexpected top-level shape.
	#[error("expected a JSON object at the document root, got `{kind}`")]
	InvalidDocument {
		/// Kind of the parsed root value.
		kind: &'static str,
	},
}
