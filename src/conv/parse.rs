use chrono::{DateTime, NaiveDate, Utc};

use crate::conv::coerce::saturate_i32;
use crate::conv::{ConvError, Result, Value};

/// Parse a float, 0 on failure.
pub fn str_to_float(value: &str) -> f64 {
	value.parse::<f64>().unwrap_or(0.0)
}

/// Parse as float first, then truncate toward zero. `"3.9"` gives 3.
pub fn str_to_fint64(value: &str) -> i64 {
	str_to_float(value) as i64
}

/// Same as [`str_to_fint64`], saturated into `i32`.
pub fn str_to_fint(value: &str) -> i32 {
	saturate_i32(str_to_fint64(value))
}

/// Parse a plain decimal integer, 0 on failure. `"3.9"` gives 0.
pub fn str_to_int(value: &str) -> i64 {
	value.parse::<i64>().unwrap_or(0)
}

/// Integer-flavoured truthiness of a string: non-empty and its float-truncated
/// value is strictly positive.
pub fn str_to_int_bool(value: &str) -> bool {
	!value.is_empty() && str_to_fint64(value) > 0
}

/// Parse an integer with prefix-detected base.
///
/// Accepts an optional sign, then `0x`/`0X` hex, `0o`/`0O` octal, `0b`/`0B`
/// binary, or a leading `0` for octal. Single underscores may separate digits
/// or follow a prefix (`1_000`, `0x_ff`).
pub fn parse_int_auto(input: &str) -> Option<i64> {
	let (negative, body) = match input.as_bytes().first() {
		Some(b'-') => (true, &input[1..]),
		Some(b'+') => (false, &input[1..]),
		_ => (false, input),
	};
	if body.is_empty() {
		return None;
	}

	let lower = body.get(..2).map(str::to_ascii_lowercase);
	let (radix, digits, prefixed) = match lower.as_deref() {
		Some("0x") => (16, &body[2..], true),
		Some("0o") => (8, &body[2..], true),
		Some("0b") => (2, &body[2..], true),
		_ if body.len() > 1 && body.starts_with('0') => (8, &body[1..], true),
		_ => (10, body, false),
	};

	if digits.contains('_') && ((!prefixed && digits.starts_with('_')) || digits.ends_with('_') || digits.contains("__")) {
		return None;
	}
	let cleaned = digits.replace('_', "");
	if cleaned.is_empty() || cleaned.starts_with(['+', '-']) {
		return None;
	}

	let magnitude = u64::from_str_radix(&cleaned, radix).ok()?;
	if negative {
		if magnitude == i64::MIN.unsigned_abs() {
			Some(i64::MIN)
		} else {
			i64::try_from(magnitude).ok().map(|v| -v)
		}
	} else {
		i64::try_from(magnitude).ok()
	}
}

/// Widen any numeric variant to `i64`.
///
/// Unsigned values above `i64::MAX` wrap. Every non-numeric variant is an
/// error, strings included.
pub fn to_int64(value: &Value) -> Result<i64> {
	match value {
		Value::I64(v) => Ok(*v),
		Value::U64(v) => Ok(*v as i64),
		other => Err(ConvError::NotNumeric { kind: other.kind().as_str() }),
	}
}

/// Integer coercion with an explicit default.
///
/// `Null` gives the default, signed integers pass through, anything else is
/// rendered in its generic textual form and parsed with [`parse_int_auto`].
pub fn to_int64_with_default(value: &Value, default: i64) -> i64 {
	match value {
		Value::Null => default,
		Value::I64(v) => *v,
		other => parse_int_auto(&other.to_string()).unwrap_or(default),
	}
}

/// Same as [`to_int64_with_default`] for `i32` targets.
///
/// Text is parsed as plain decimal, and in-range integers are saturated.
pub fn to_int_with_default(value: &Value, default: i32) -> i32 {
	match value {
		Value::Null => default,
		Value::I64(v) => saturate_i32(*v),
		other => other.to_string().parse::<i32>().unwrap_or(default),
	}
}

/// Timestamp from Unix seconds; non-positive input gives the zero timestamp.
pub fn int_to_time(value: i64) -> DateTime<Utc> {
	if value <= 0 {
		return zero_time();
	}
	DateTime::from_timestamp(value, 0).unwrap_or_else(zero_time)
}

/// Zero-initialized timestamp (`0001-01-01 00:00:00 UTC`).
pub fn zero_time() -> DateTime<Utc> {
	NaiveDate::from_ymd_opt(1, 1, 1)
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|naive| naive.and_utc())
		.unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Whether a timestamp is set and lies after the Unix epoch.
pub fn is_valid_time(value: &DateTime<Utc>) -> bool {
	value.timestamp() > 0
}
