mod bytes;
mod coerce;
mod error;
mod json;
mod mapper;
mod parse;
mod record;
mod timefmt;
mod value;

/// Fixed-width integer and text byte helpers.
pub use bytes::{bytes_to_int64, bytes_to_str, int64_to_bytes};
/// Total coercions from any value into primitive targets.
pub use coerce::{
	FromAny, any_to_bool, any_to_float, any_to_int8, any_to_int16, any_to_int32, any_to_int64, any_to_round, any_to_str, any_to_uint8, any_to_uint16,
	any_to_uint32, any_to_uint64, round,
};
/// Error and result aliases.
pub use error::{ConvError, Result};
/// JSON document bridge.
pub use json::{from_json, to_json};
/// Mapping-to-record population and record dumps.
pub use mapper::{MapOptions, MapReport, SkipReason, Skipped, map_to_record, map_to_record_with, map_to_value, map_to_value_with, record_to_mapping, title_case, value_to_mapping};
/// String parsing and timestamp helpers.
pub use parse::{
	int_to_time, is_valid_time, parse_int_auto, str_to_fint, str_to_fint64, str_to_float, str_to_int, str_to_int_bool, to_int_with_default, to_int64,
	to_int64_with_default, zero_time,
};
/// Record field tables and writable field slots.
pub use record::{FieldSlot, IntSlot, RawSlot, Record, Slot, StringsSlot};
/// Token-substitution date formatting.
pub use timefmt::date_format;
/// Runtime value model.
pub use value::{DynValue, FieldValue, Kind, Mapping, StructValue, Value};
