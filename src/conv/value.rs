use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::conv::coerce::FromAny;

/// Capability hops followed before an extension value gives up.
pub(crate) const MAX_CAPABILITY_HOPS: u32 = 16;

/// String-keyed mapping of loosely-typed values.
///
/// Iteration follows sorted key order.
pub type Mapping = BTreeMap<String, Value>;

/// Loosely-typed runtime value.
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// Explicit null marker.
	#[default]
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar, any source width.
	I64(i64),
	/// Unsigned integer scalar, any source width.
	U64(u64),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// Opaque byte payload.
	Bytes(Vec<u8>),
	/// UTF-8 string.
	String(String),
	/// UTC timestamp.
	Time(DateTime<Utc>),
	/// Heterogeneous sequence.
	Array(Vec<Value>),
	/// Nested string-keyed mapping.
	Map(Mapping),
	/// Struct-shaped value with field names preserved.
	Struct(StructValue),
	/// Caller-defined value exposing optional conversion capabilities.
	Ext(Arc<dyn DynValue>),
}

/// Struct-shaped value with declared field order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Struct type name.
	pub type_name: Box<str>,
	/// Field values in declaration order.
	pub fields: Vec<FieldValue>,
}

/// Named struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Field payload.
	pub value: Value,
}

/// Conversion capabilities of a caller-defined value.
///
/// Each capability hands back another [`Value`] which the coercer converts
/// again, so a capability may return any variant. Capabilities left at their
/// default make the matching coercion yield its zero value.
pub trait DynValue: fmt::Debug + Send + Sync {
	/// Name used in diagnostics and the generic textual form.
	fn type_name(&self) -> &str;

	/// Value used for integer coercions.
	fn int_value(&self) -> Option<Value> {
		None
	}

	/// Value used for string coercions and the generic textual form.
	fn string_value(&self) -> Option<Value> {
		None
	}

	/// Value used for float coercions.
	fn float_value(&self) -> Option<Value> {
		None
	}
}

/// Coarse runtime kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// `Value::Null`.
	Nil,
	/// `Value::Bool`.
	Bool,
	/// `Value::I64`.
	Int,
	/// `Value::U64`.
	Uint,
	/// `Value::F32` or `Value::F64`.
	Float,
	/// `Value::String`.
	String,
	/// `Value::Bytes`.
	Bytes,
	/// `Value::Time`.
	Time,
	/// `Value::Array`.
	Array,
	/// `Value::Map`.
	Map,
	/// `Value::Struct`.
	Struct,
	/// `Value::Ext`.
	Ext,
}

impl Kind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Kind::Nil => "nil",
			Kind::Bool => "bool",
			Kind::Int => "int",
			Kind::Uint => "uint",
			Kind::Float => "float",
			Kind::String => "string",
			Kind::Bytes => "bytes",
			Kind::Time => "time",
			Kind::Array => "array",
			Kind::Map => "map",
			Kind::Struct => "struct",
			Kind::Ext => "ext",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Value {
	/// Runtime kind of this value.
	pub fn kind(&self) -> Kind {
		match self {
			Value::Null => Kind::Nil,
			Value::Bool(_) => Kind::Bool,
			Value::I64(_) => Kind::Int,
			Value::U64(_) => Kind::Uint,
			Value::F32(_) | Value::F64(_) => Kind::Float,
			Value::Bytes(_) => Kind::Bytes,
			Value::String(_) => Kind::String,
			Value::Time(_) => Kind::Time,
			Value::Array(_) => Kind::Array,
			Value::Map(_) => Kind::Map,
			Value::Struct(_) => Kind::Struct,
			Value::Ext(_) => Kind::Ext,
		}
	}

	/// Whether this is `Value::Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Borrow the string payload, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	/// Borrow the mapping payload, if any.
	pub fn as_map(&self) -> Option<&Mapping> {
		match self {
			Value::Map(v) => Some(v),
			_ => None,
		}
	}

	/// Coerce into any primitive target. Never fails.
	pub fn coerce<T: FromAny>(&self) -> T {
		T::from_any(self)
	}

	/// Wrap a caller-defined value.
	pub fn ext(value: impl DynValue + 'static) -> Self {
		Value::Ext(Arc::new(value))
	}
}

impl StructValue {
	/// Look up a field by exact name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::I64(a), Value::I64(b)) => a == b,
			(Value::U64(a), Value::U64(b)) => a == b,
			(Value::F32(a), Value::F32(b)) => a == b,
			(Value::F64(a), Value::F64(b)) => a == b,
			(Value::Bytes(a), Value::Bytes(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Time(a), Value::Time(b)) => a == b,
			(Value::Array(a), Value::Array(b)) => a == b,
			(Value::Map(a), Value::Map(b)) => a == b,
			(Value::Struct(a), Value::Struct(b)) => a == b,
			(Value::Ext(a), Value::Ext(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
			_ => false,
		}
	}
}

/// Generic textual form used for string fallbacks and diagnostics.
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_value(f, self, 0)
	}
}

/// `hops` counts extension `string_value` calls on the current path; past
/// [`MAX_CAPABILITY_HOPS`] an extension prints its type name.
fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, hops: u32) -> fmt::Result {
	match value {
		Value::Null => f.write_str("<nil>"),
		Value::Bool(v) => write!(f, "{v}"),
		Value::I64(v) => write!(f, "{v}"),
		Value::U64(v) => write!(f, "{v}"),
		Value::F32(v) => f.write_str(&format_float(f64::from(*v))),
		Value::F64(v) => f.write_str(&format_float(*v)),
		Value::Bytes(v) => {
			f.write_str("[")?;
			for (idx, byte) in v.iter().enumerate() {
				if idx > 0 {
					f.write_str(" ")?;
				}
				write!(f, "{byte}")?;
			}
			f.write_str("]")
		}
		Value::String(v) => f.write_str(v),
		Value::Time(v) => write!(f, "{v}"),
		Value::Array(items) => {
			f.write_str("[")?;
			for (idx, item) in items.iter().enumerate() {
				if idx > 0 {
					f.write_str(" ")?;
				}
				write_value(f, item, hops)?;
			}
			f.write_str("]")
		}
		Value::Map(map) => {
			f.write_str("map[")?;
			for (idx, (key, item)) in map.iter().enumerate() {
				if idx > 0 {
					f.write_str(" ")?;
				}
				write!(f, "{key}:")?;
				write_value(f, item, hops)?;
			}
			f.write_str("]")
		}
		Value::Struct(item) => {
			f.write_str("{")?;
			for (idx, field) in item.fields.iter().enumerate() {
				if idx > 0 {
					f.write_str(" ")?;
				}
				write_value(f, &field.value, hops)?;
			}
			f.write_str("}")
		}
		Value::Ext(ext) => match ext.string_value() {
			Some(inner) if hops < MAX_CAPABILITY_HOPS => write_value(f, &inner, hops + 1),
			_ => f.write_str(ext.type_name()),
		},
	}
}

/// Shortest round-trip decimal text without exponent.
pub(crate) fn format_float(value: f64) -> String {
	if value.is_nan() {
		"NaN".to_owned()
	} else if value == f64::INFINITY {
		"+Inf".to_owned()
	} else if value == f64::NEG_INFINITY {
		"-Inf".to_owned()
	} else {
		format!("{value}")
	}
}

macro_rules! impl_from_signed {
	($($ty:ty),*) => {
		$(impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				Value::I64(value as i64)
			}
		})*
	};
}

macro_rules! impl_from_unsigned {
	($($ty:ty),*) => {
		$(impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				Value::U64(value as u64)
			}
		})*
	};
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Value::F32(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Value::Bytes(value)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Value::Time(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Value::Array(value)
	}
}

impl From<Mapping> for Value {
	fn from(value: Mapping) -> Self {
		Value::Map(value)
	}
}

impl From<StructValue> for Value {
	fn from(value: StructValue) -> Self {
		Value::Struct(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

/// Build a [`Mapping`] from `key => value` pairs.
///
/// Values go through `Value::from`, so plain literals work.
#[macro_export]
macro_rules! mapping {
	() => {
		$crate::conv::Mapping::new()
	};
	($($key:expr => $value:expr),+ $(,)?) => {{
		let mut map = $crate::conv::Mapping::new();
		$(map.insert(::std::string::String::from($key), $crate::conv::Value::from($value));)+
		map
	}};
}
