use chrono::{DateTime, Utc};

use crate::conv::coerce::{saturate_i8, saturate_i16, saturate_i32, saturate_isize};
use crate::conv::value::{FieldValue, Mapping, StructValue, Value};

/// Statically shaped record that the mapper can read and populate.
///
/// Field names are the exported names, matched exactly against title-cased
/// mapping keys. Implement it with [`impl_record!`](crate::impl_record).
pub trait Record {
	/// Record type name used in diagnostics.
	fn type_name(&self) -> &str;

	/// Every declared field with its current value, in declaration order.
	fn fields(&self) -> Vec<FieldValue>;

	/// Writable view of one field, `None` when no field has that name.
	fn field_slot(&mut self, name: &str) -> Option<FieldSlot<'_>>;

	/// Snapshot the record as a dynamic struct value.
	fn to_struct_value(&self) -> StructValue {
		StructValue {
			type_name: self.type_name().into(),
			fields: self.fields(),
		}
	}
}

/// Writable view of one record field, tagged by how the mapper assigns it.
pub enum FieldSlot<'a> {
	/// Text field.
	Str(&'a mut String),
	/// Signed integer field of any width.
	Int(IntSlot<'a>),
	/// Sequence-of-strings field.
	Strings(StringsSlot<'a>),
	/// Mapping field, assigned raw.
	Map(&'a mut Mapping),
	/// Timestamp field.
	Time(&'a mut DateTime<Utc>),
	/// Nested record, populated recursively.
	Record(&'a mut dyn Record),
	/// Indirect field (`Option`, `Box`); never assigned.
	Pointer,
	/// Field that exists but is not writable.
	Readonly,
	/// Any other field, assigned raw when the value already fits.
	Raw(RawSlot<'a>),
}

/// Signed integer field widths. Assignments saturate into the width.
pub enum IntSlot<'a> {
	/// `i8` field.
	I8(&'a mut i8),
	/// `i16` field.
	I16(&'a mut i16),
	/// `i32` field.
	I32(&'a mut i32),
	/// `i64` field.
	I64(&'a mut i64),
	/// `isize` field.
	Isize(&'a mut isize),
}

impl IntSlot<'_> {
	/// Store `value`, saturating into the field width.
	pub fn set(&mut self, value: i64) {
		match self {
			IntSlot::I8(slot) => **slot = saturate_i8(value),
			IntSlot::I16(slot) => **slot = saturate_i16(value),
			IntSlot::I32(slot) => **slot = saturate_i32(value),
			IntSlot::I64(slot) => **slot = value,
			IntSlot::Isize(slot) => **slot = saturate_isize(value),
		}
	}
}

/// Storage behind a sequence-of-strings field.
pub enum StringsSlot<'a> {
	/// Typed `Vec<String>` field.
	Typed(&'a mut Vec<String>),
	/// Dynamic array field; strings are stored as `Value::String`.
	Values(&'a mut Vec<Value>),
}

impl StringsSlot<'_> {
	/// Replace the field contents.
	pub fn set(&mut self, items: Vec<String>) {
		match self {
			StringsSlot::Typed(slot) => **slot = items,
			StringsSlot::Values(slot) => **slot = items.into_iter().map(Value::String).collect(),
		}
	}
}

/// Field types that only accept an already-matching value.
pub enum RawSlot<'a> {
	/// `bool` field.
	Bool(&'a mut bool),
	/// `u8` field.
	U8(&'a mut u8),
	/// `u16` field.
	U16(&'a mut u16),
	/// `u32` field.
	U32(&'a mut u32),
	/// `u64` field.
	U64(&'a mut u64),
	/// `usize` field.
	Usize(&'a mut usize),
	/// `f32` field.
	F32(&'a mut f32),
	/// `f64` field.
	F64(&'a mut f64),
	/// Untyped field; takes any value.
	Value(&'a mut Value),
}

impl RawSlot<'_> {
	/// Assign `value` without conversion. Returns `false` when the value's
	/// runtime shape does not fit the field.
	pub fn assign(&mut self, value: &Value) -> bool {
		match (self, value) {
			(RawSlot::Bool(slot), Value::Bool(v)) => **slot = *v,
			(RawSlot::U8(slot), value) => return assign_unsigned(&mut **slot, value),
			(RawSlot::U16(slot), value) => return assign_unsigned(&mut **slot, value),
			(RawSlot::U32(slot), value) => return assign_unsigned(&mut **slot, value),
			(RawSlot::U64(slot), value) => return assign_unsigned(&mut **slot, value),
			(RawSlot::Usize(slot), value) => return assign_unsigned(&mut **slot, value),
			(RawSlot::F32(slot), Value::F32(v)) => **slot = *v,
			(RawSlot::F64(slot), Value::F64(v)) => **slot = *v,
			(RawSlot::F64(slot), Value::F32(v)) => **slot = f64::from(*v),
			(RawSlot::Value(slot), value) => **slot = value.clone(),
			_ => return false,
		}
		true
	}

	/// Declared type label used in diagnostics.
	pub fn type_label(&self) -> &'static str {
		match self {
			RawSlot::Bool(_) => "bool",
			RawSlot::U8(_) => "u8",
			RawSlot::U16(_) => "u16",
			RawSlot::U32(_) => "u32",
			RawSlot::U64(_) => "u64",
			RawSlot::Usize(_) => "usize",
			RawSlot::F32(_) => "f32",
			RawSlot::F64(_) => "f64",
			RawSlot::Value(_) => "value",
		}
	}
}

fn assign_unsigned<T: TryFrom<u64>>(slot: &mut T, value: &Value) -> bool {
	let raw = match value {
		Value::U64(v) => *v,
		Value::I64(v) => match u64::try_from(*v) {
			Ok(v) => v,
			Err(_) => return false,
		},
		_ => return false,
	};
	match T::try_from(raw) {
		Ok(v) => {
			*slot = v;
			true
		}
		Err(_) => false,
	}
}

impl FieldSlot<'_> {
	/// Declared type label used in diagnostics.
	pub fn type_label(&self) -> &'static str {
		match self {
			FieldSlot::Str(_) => "string",
			FieldSlot::Int(_) => "int",
			FieldSlot::Strings(_) => "[]string",
			FieldSlot::Map(_) => "map",
			FieldSlot::Time(_) => "time",
			FieldSlot::Record(_) => "struct",
			FieldSlot::Pointer => "pointer",
			FieldSlot::Readonly => "readonly",
			FieldSlot::Raw(raw) => raw.type_label(),
		}
	}
}

/// Field types usable inside [`impl_record!`](crate::impl_record).
pub trait Slot {
	/// Writable view of this field.
	fn slot(&mut self) -> FieldSlot<'_>;

	/// Current value, without coercion.
	fn to_value(&self) -> Value;
}

impl Slot for String {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Str(self)
	}

	fn to_value(&self) -> Value {
		Value::String(self.clone())
	}
}

macro_rules! impl_int_slot {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(impl Slot for $ty {
			fn slot(&mut self) -> FieldSlot<'_> {
				FieldSlot::Int(IntSlot::$variant(self))
			}

			fn to_value(&self) -> Value {
				Value::from(*self)
			}
		})*
	};
}

macro_rules! impl_raw_slot {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(impl Slot for $ty {
			fn slot(&mut self) -> FieldSlot<'_> {
				FieldSlot::Raw(RawSlot::$variant(self))
			}

			fn to_value(&self) -> Value {
				Value::from(*self)
			}
		})*
	};
}

impl_int_slot! {
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	isize => Isize,
}

impl_raw_slot! {
	bool => Bool,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	usize => Usize,
	f32 => F32,
	f64 => F64,
}

impl Slot for Vec<String> {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Strings(StringsSlot::Typed(self))
	}

	fn to_value(&self) -> Value {
		Value::Array(self.iter().cloned().map(Value::String).collect())
	}
}

impl Slot for Mapping {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Map(self)
	}

	fn to_value(&self) -> Value {
		Value::Map(self.clone())
	}
}

impl Slot for DateTime<Utc> {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Time(self)
	}

	fn to_value(&self) -> Value {
		Value::Time(*self)
	}
}

impl Slot for Value {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Raw(RawSlot::Value(self))
	}

	fn to_value(&self) -> Value {
		self.clone()
	}
}

impl<T: Slot> Slot for Option<T> {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Pointer
	}

	fn to_value(&self) -> Value {
		self.as_ref().map_or(Value::Null, Slot::to_value)
	}
}

impl<T: Slot> Slot for Box<T> {
	fn slot(&mut self) -> FieldSlot<'_> {
		FieldSlot::Pointer
	}

	fn to_value(&self) -> Value {
		self.as_ref().to_value()
	}
}

/// Dynamic struct values act as records whose declared field types are the
/// current variants of their field values.
impl Record for StructValue {
	fn type_name(&self) -> &str {
		&self.type_name
	}

	fn fields(&self) -> Vec<FieldValue> {
		self.fields.clone()
	}

	fn field_slot(&mut self, name: &str) -> Option<FieldSlot<'_>> {
		let field = self.fields.iter_mut().find(|field| &*field.name == name)?;
		Some(match &mut field.value {
			Value::String(v) => FieldSlot::Str(v),
			Value::I64(v) => FieldSlot::Int(IntSlot::I64(v)),
			Value::Array(v) => FieldSlot::Strings(StringsSlot::Values(v)),
			Value::Map(v) => FieldSlot::Map(v),
			Value::Time(v) => FieldSlot::Time(v),
			Value::Struct(v) => FieldSlot::Record(v),
			Value::Bool(v) => FieldSlot::Raw(RawSlot::Bool(v)),
			Value::U64(v) => FieldSlot::Raw(RawSlot::U64(v)),
			Value::F32(v) => FieldSlot::Raw(RawSlot::F32(v)),
			Value::F64(v) => FieldSlot::Raw(RawSlot::F64(v)),
			other @ (Value::Null | Value::Bytes(_) | Value::Ext(_)) => FieldSlot::Raw(RawSlot::Value(other)),
		})
	}

	fn to_struct_value(&self) -> StructValue {
		self.clone()
	}
}

/// Implement [`Record`](crate::conv::Record) from a field-descriptor table.
///
/// Each entry maps an exported field name to a struct field whose type
/// implements [`Slot`](crate::conv::Slot). `as record` marks a nested record,
/// `as hidden` a field that is listed but never written.
///
/// Names are matched after the mapper upper-cases the first character of each
/// key, so they must be written in that title-cased form. A lowercase name is
/// dumped but can never be reached from a mapping.
///
/// ```
/// use anyconv::conv::Record;
///
/// #[derive(Default)]
/// struct Pages {
/// 	permalink: String,
/// }
///
/// #[derive(Default)]
/// struct Site {
/// 	theme: String,
/// 	pages: Pages,
/// 	secret: i64,
/// }
///
/// anyconv::impl_record!(Pages { "Permalink" => permalink });
/// anyconv::impl_record!(Site {
/// 	"Theme" => theme,
/// 	"Pages" => pages as record,
/// 	"Secret" => secret as hidden,
/// });
///
/// let mut site = Site::default();
/// assert_eq!(site.fields().len(), 3);
///
/// let report = anyconv::conv::map_to_record(&anyconv::mapping! { "secret" => 7 }, &mut site);
/// assert_eq!(report.reason_for("secret"), Some(anyconv::conv::SkipReason::Readonly));
/// assert_eq!(site.secret, 0);
/// ```
#[macro_export]
macro_rules! impl_record {
	(@value $place:expr) => {
		$crate::conv::Slot::to_value(&$place)
	};
	(@value $place:expr, record) => {
		$crate::conv::Value::Struct($crate::conv::Record::to_struct_value(&$place))
	};
	(@value $place:expr, hidden) => {
		$crate::conv::Slot::to_value(&$place)
	};
	(@slot $place:expr) => {
		$crate::conv::Slot::slot(&mut $place)
	};
	(@slot $place:expr, record) => {
		$crate::conv::FieldSlot::Record(&mut $place)
	};
	(@slot $place:expr, hidden) => {
		$crate::conv::FieldSlot::Readonly
	};
	($ty:ty { $($name:literal => $field:ident $(as $kind:ident)?),* $(,)? }) => {
		impl $crate::conv::Record for $ty {
			fn type_name(&self) -> &str {
				stringify!($ty)
			}

			fn fields(&self) -> ::std::vec::Vec<$crate::conv::FieldValue> {
				::std::vec![$($crate::conv::FieldValue {
					name: $name.into(),
					value: $crate::impl_record!(@value self.$field $(, $kind)?),
				}),*]
			}

			fn field_slot(&mut self, name: &str) -> ::std::option::Option<$crate::conv::FieldSlot<'_>> {
				match name {
					$($name => ::std::option::Option::Some($crate::impl_record!(@slot self.$field $(, $kind)?)),)*
					_ => ::std::option::Option::None,
				}
			}
		}
	};
}
