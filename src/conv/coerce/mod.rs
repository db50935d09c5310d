use crate::conv::parse::{is_valid_time, str_to_fint64, str_to_float};
use crate::conv::value::{DynValue, MAX_CAPABILITY_HOPS, Value, format_float};

#[derive(Clone, Copy)]
enum Capability {
	Int,
	String,
	Float,
}

fn call_capability(ext: &dyn DynValue, capability: Capability) -> Value {
	let out = match capability {
		Capability::Int => ext.int_value(),
		Capability::String => ext.string_value(),
		Capability::Float => ext.float_value(),
	};
	out.unwrap_or(Value::Null)
}

/// Coerce any value to `i64`. Never fails; unknown shapes yield 0.
pub fn any_to_int64(value: &Value) -> i64 {
	int64_impl(value, 0)
}

fn int64_impl(value: &Value, hops: u32) -> i64 {
	match value {
		Value::Null => 0,
		Value::Bool(v) => i64::from(*v),
		Value::I64(v) => *v,
		Value::U64(v) => *v as i64,
		Value::F32(v) => *v as i64,
		Value::F64(v) => *v as i64,
		Value::String(v) => str_to_fint64(v),
		Value::Time(v) => v.timestamp(),
		Value::Ext(ext) if hops < MAX_CAPABILITY_HOPS => int64_impl(&call_capability(ext.as_ref(), Capability::Int), hops + 1),
		_ => 0,
	}
}

/// Coerce any value to `i64`, then saturate into `i32`.
pub fn any_to_int32(value: &Value) -> i32 {
	saturate_i32(any_to_int64(value))
}

/// Coerce any value to `i64`, then saturate into `i16`.
pub fn any_to_int16(value: &Value) -> i16 {
	saturate_i16(any_to_int64(value))
}

/// Coerce any value to `i64`, then saturate into `i8`.
pub fn any_to_int8(value: &Value) -> i8 {
	saturate_i8(any_to_int64(value))
}

/// Coerce any value to `u64`.
///
/// This reinterprets the `i64` result, so negative inputs wrap (`-1` becomes
/// `u64::MAX`). Use the narrower unsigned coercions for saturation.
pub fn any_to_uint64(value: &Value) -> u64 {
	any_to_int64(value) as u64
}

/// Coerce any value to `i64`, then saturate into `u32`.
pub fn any_to_uint32(value: &Value) -> u32 {
	saturate_u32(any_to_int64(value))
}

/// Coerce any value to `i64`, then saturate into `u16`.
pub fn any_to_uint16(value: &Value) -> u16 {
	saturate_u16(any_to_int64(value))
}

/// Coerce any value to `i64`, then saturate into `u8`.
pub fn any_to_uint8(value: &Value) -> u8 {
	saturate_u8(any_to_int64(value))
}

macro_rules! saturating_narrow {
	($($name:ident => $ty:ty),* $(,)?) => {
		$(
			pub(crate) fn $name(value: i64) -> $ty {
				if value > <$ty>::MAX as i64 {
					<$ty>::MAX
				} else if value < <$ty>::MIN as i64 {
					<$ty>::MIN
				} else {
					value as $ty
				}
			}
		)*
	};
}

saturating_narrow! {
	saturate_i8 => i8,
	saturate_i16 => i16,
	saturate_i32 => i32,
	saturate_u8 => u8,
	saturate_u16 => u16,
	saturate_u32 => u32,
}

pub(crate) fn saturate_isize(value: i64) -> isize {
	isize::try_from(value).unwrap_or(if value < 0 { isize::MIN } else { isize::MAX })
}

/// Coerce any value to `f64`. Never fails; unknown shapes yield 0.
pub fn any_to_float(value: &Value) -> f64 {
	float_impl(value, 0)
}

fn float_impl(value: &Value, hops: u32) -> f64 {
	match value {
		Value::Null => 0.0,
		Value::Bool(v) => f64::from(u8::from(*v)),
		Value::I64(v) => *v as f64,
		Value::U64(v) => *v as f64,
		Value::F32(v) => f64::from(*v),
		Value::F64(v) => *v,
		Value::String(v) => str_to_float(v),
		Value::Time(v) => v.timestamp() as f64,
		Value::Ext(ext) if hops < MAX_CAPABILITY_HOPS => float_impl(&call_capability(ext.as_ref(), Capability::Float), hops + 1),
		_ => 0.0,
	}
}

/// Coerce any value to a string. Never fails; unknown shapes yield `""`.
///
/// `true` renders as `"1"` and `false` as `""`, not `"0"`.
pub fn any_to_str(value: &Value) -> String {
	str_impl(value, 0)
}

fn str_impl(value: &Value, hops: u32) -> String {
	match value {
		Value::Null => String::new(),
		Value::Bool(true) => "1".to_owned(),
		Value::Bool(false) => String::new(),
		Value::I64(v) => v.to_string(),
		Value::U64(v) => v.to_string(),
		Value::F32(v) => format_float(f64::from(*v)),
		Value::F64(v) => format_float(*v),
		Value::Bytes(v) => String::from_utf8_lossy(v).into_owned(),
		Value::String(v) => v.clone(),
		Value::Time(v) => v.to_string(),
		Value::Ext(ext) if hops < MAX_CAPABILITY_HOPS => str_impl(&call_capability(ext.as_ref(), Capability::String), hops + 1),
		_ => String::new(),
	}
}

/// Coerce any value to a boolean.
///
/// Numbers are truthy only when strictly positive. Strings are truthy when
/// non-empty, so `"false"` and `"0"` are both `true`. Timestamps are truthy
/// when they lie after the Unix epoch.
pub fn any_to_bool(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(v) => *v,
		Value::I64(v) => *v > 0,
		Value::U64(v) => *v > 0,
		Value::F32(v) => *v > 0.0,
		Value::F64(v) => *v > 0.0,
		Value::String(v) => !v.is_empty(),
		Value::Time(v) => is_valid_time(v),
		Value::Bytes(v) => !v.is_empty(),
		Value::Array(v) => !v.is_empty(),
		Value::Map(v) => !v.is_empty(),
		Value::Struct(_) | Value::Ext(_) => true,
	}
}

/// Round half up to `places` decimals: `floor(value * 10^places + 0.5) / 10^places`.
///
/// Not symmetric around zero: `round(2.5, 0)` is `3.0` but `round(-2.5, 0)` is
/// `-2.0`.
pub fn round(value: f64, places: i32) -> f64 {
	let shift = 10_f64.powi(places);
	(value * shift + 0.5).floor() / shift
}

/// Coerce to `f64` and round half up to `places` decimals.
pub fn any_to_round(value: &Value, places: i32) -> f64 {
	round(any_to_float(value), places)
}

/// Total conversion from a loosely-typed [`Value`].
pub trait FromAny: Sized {
	/// Convert, falling back to the target's zero value.
	fn from_any(value: &Value) -> Self;
}

macro_rules! impl_from_any {
	($($ty:ty => $func:path),* $(,)?) => {
		$(impl FromAny for $ty {
			fn from_any(value: &Value) -> Self {
				$func(value)
			}
		})*
	};
}

impl_from_any! {
	i64 => any_to_int64,
	i32 => any_to_int32,
	i16 => any_to_int16,
	i8 => any_to_int8,
	u64 => any_to_uint64,
	u32 => any_to_uint32,
	u16 => any_to_uint16,
	u8 => any_to_uint8,
	f64 => any_to_float,
	String => any_to_str,
	bool => any_to_bool,
}

impl FromAny for f32 {
	fn from_any(value: &Value) -> Self {
		any_to_float(value) as f32
	}
}
