use crate::conv::{ConvError, Result};

/// Encode an `i64` as 8 big-endian bytes.
pub fn int64_to_bytes(value: i64) -> [u8; 8] {
	value.to_be_bytes()
}

/// Decode exactly 8 big-endian bytes into an `i64`.
pub fn bytes_to_int64(bytes: &[u8]) -> Result<i64> {
	let raw: [u8; 8] = bytes.try_into().map_err(|_| ConvError::InvalidByteLength { len: bytes.len() })?;
	Ok(i64::from_be_bytes(raw))
}

/// Borrow a byte payload as text without copying.
pub fn bytes_to_str(bytes: &[u8]) -> Result<&str> {
	Ok(std::str::from_utf8(bytes)?)
}
