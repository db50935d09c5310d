use std::fmt;

use crate::conv::parse::to_int64_with_default;
use crate::conv::record::{FieldSlot, Record};
use crate::conv::{ConvError, Mapping, Result, Value};

/// Behavior switches for mapping-to-record population.
#[derive(Debug, Clone)]
pub struct MapOptions {
	/// Maximum nested record depth.
	pub max_depth: u32,
	/// Stop processing the remaining keys of a level when a nested record
	/// receives a non-mapping value.
	pub abandon_on_nested_mismatch: bool,
}

impl Default for MapOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			abandon_on_nested_mismatch: true,
		}
	}
}

impl MapOptions {
	/// Preset that skips a mismatched nested key and keeps going.
	pub fn lenient() -> Self {
		Self {
			abandon_on_nested_mismatch: false,
			..Self::default()
		}
	}
}

/// Why a mapping key was not assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// No field carries the title-cased key.
	NoSuchField,
	/// Field exists but is not writable.
	Readonly,
	/// Indirect field kinds are never populated.
	Unsupported,
	/// Value shape does not fit the field.
	TypeMismatch,
	/// Array element was not a string.
	ElementNotString,
	/// Nested record received a non-mapping value.
	NotAMapping,
	/// Key was never visited after a nested mismatch ended its level.
	Abandoned,
	/// Nested record was deeper than `MapOptions::max_depth`.
	DepthExceeded,
}

impl SkipReason {
	/// Stable snake_case label.
	pub fn as_str(self) -> &'static str {
		match self {
			SkipReason::NoSuchField => "no_such_field",
			SkipReason::Readonly => "readonly",
			SkipReason::Unsupported => "unsupported",
			SkipReason::TypeMismatch => "type_mismatch",
			SkipReason::ElementNotString => "element_not_string",
			SkipReason::NotAMapping => "not_a_mapping",
			SkipReason::Abandoned => "abandoned",
			SkipReason::DepthExceeded => "depth_exceeded",
		}
	}
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One unassigned key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
	/// Dotted key path; array elements carry an `[index]` suffix.
	pub key: String,
	/// Why it was skipped.
	pub reason: SkipReason,
}

/// Outcome of a best-effort mapping pass.
///
/// Assignments have already happened by the time a report exists; it only
/// tells the caller what was left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapReport {
	/// Keys that were not assigned, in visit order.
	pub skipped: Vec<Skipped>,
	/// Kind of a target that could not be populated at all.
	pub rejected_target: Option<&'static str>,
}

impl MapReport {
	/// Whether every key was assigned.
	pub fn is_clean(&self) -> bool {
		self.skipped.is_empty() && self.rejected_target.is_none()
	}

	/// Skipped key paths.
	pub fn skipped_keys(&self) -> Vec<&str> {
		self.skipped.iter().map(|item| item.key.as_str()).collect()
	}

	/// Reason recorded for `key`, if it was skipped.
	pub fn reason_for(&self, key: &str) -> Option<SkipReason> {
		self.skipped.iter().find(|item| item.key == key).map(|item| item.reason)
	}

	/// Turn any skipped key or rejected target into an error.
	pub fn into_result(self) -> Result<()> {
		if let Some(kind) = self.rejected_target {
			return Err(ConvError::UnsupportedTarget { kind });
		}
		if !self.skipped.is_empty() {
			return Err(ConvError::Incomplete {
				keys: self.skipped.into_iter().map(|item| item.key).collect(),
			});
		}
		Ok(())
	}

	fn skip(&mut self, key: String, reason: SkipReason) {
		self.skipped.push(Skipped { key, reason });
	}
}

/// Populate `record` from `mapping`, best effort.
///
/// Keys are title-cased (first character upper-cased) and matched exactly
/// against field names. Unmatched keys, unwritable fields and values that do
/// not fit are skipped; fields that were not touched keep their values.
pub fn map_to_record(mapping: &Mapping, record: &mut dyn Record) -> MapReport {
	map_to_record_with(mapping, record, &MapOptions::default())
}

/// [`map_to_record`] with explicit options.
pub fn map_to_record_with(mapping: &Mapping, record: &mut dyn Record, opt: &MapOptions) -> MapReport {
	let mut report = MapReport::default();
	assign_fields(mapping, record, opt, "", 0, &mut report);
	report
}

/// Populate a dynamic struct value from `mapping`.
///
/// Any target other than `Value::Struct` is rejected with an error trace and
/// left untouched.
pub fn map_to_value(mapping: &Mapping, target: &mut Value) -> MapReport {
	map_to_value_with(mapping, target, &MapOptions::default())
}

/// [`map_to_value`] with explicit options.
pub fn map_to_value_with(mapping: &Mapping, target: &mut Value, opt: &MapOptions) -> MapReport {
	match target {
		Value::Struct(item) => map_to_record_with(mapping, item, opt),
		other => {
			let kind = other.kind().as_str();
			log::error!("unsupported type of {kind}, only struct values can be populated");
			MapReport {
				skipped: Vec::new(),
				rejected_target: Some(kind),
			}
		}
	}
}

/// Dump every declared field name to its current value. One level deep.
pub fn record_to_mapping(record: &dyn Record) -> Mapping {
	record.fields().into_iter().map(|field| (field.name.into_string(), field.value)).collect()
}

/// Dump a dynamic struct value. `Null` gives an empty mapping.
pub fn value_to_mapping(value: &Value) -> Mapping {
	match value {
		Value::Null => Mapping::new(),
		Value::Struct(item) => record_to_mapping(item),
		other => {
			log::error!("cannot dump fields of {}, only struct values have fields", other.kind());
			Mapping::new()
		}
	}
}

/// Upper-case the first character of a mapping key.
pub fn title_case(key: &str) -> String {
	let mut chars = key.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn assign_fields(mapping: &Mapping, record: &mut dyn Record, opt: &MapOptions, prefix: &str, depth: u32, report: &mut MapReport) {
	if depth >= opt.max_depth {
		log::error!("nested record depth exceeded (max={}) at `{prefix}`", opt.max_depth);
		for key in mapping.keys() {
			report.skip(join_key(prefix, key), SkipReason::DepthExceeded);
		}
		return;
	}

	let mut entries = mapping.iter();
	while let Some((key, value)) = entries.next() {
		let path = join_key(prefix, key);
		let Some(slot) = record.field_slot(&title_case(key)) else {
			report.skip(path, SkipReason::NoSuchField);
			continue;
		};

		log::debug!("found key={key}, value={value}, type [{}]", slot.type_label());
		let flow = assign_field(slot, key, value, opt, &path, depth, report);
		if flow == Flow::Abandon {
			for (rest, _) in entries.by_ref() {
				report.skip(join_key(prefix, rest), SkipReason::Abandoned);
			}
			return;
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
	Continue,
	Abandon,
}

fn assign_field(slot: FieldSlot<'_>, key: &str, value: &Value, opt: &MapOptions, path: &str, depth: u32, report: &mut MapReport) -> Flow {
	match slot {
		FieldSlot::Readonly => {
			log::debug!("field for key={key} is not settable, value={value}");
			report.skip(path.to_owned(), SkipReason::Readonly);
		}
		FieldSlot::Str(field) => {
			*field = match value {
				Value::String(text) => text.clone(),
				other => other.to_string(),
			};
		}
		FieldSlot::Int(mut field) => field.set(to_int64_with_default(value, 0)),
		FieldSlot::Strings(mut field) => {
			let Value::Array(items) = value else {
				log::debug!("only string sequences are supported, key={key} is {}", value.kind());
				report.skip(path.to_owned(), SkipReason::TypeMismatch);
				return Flow::Continue;
			};
			let mut strings = Vec::with_capacity(items.len());
			for (idx, item) in items.iter().enumerate() {
				match item {
					Value::String(text) => strings.push(text.clone()),
					other => {
						log::debug!("dropping {} element at {key}[{idx}], expected string", other.kind());
						report.skip(format!("{path}[{idx}]"), SkipReason::ElementNotString);
					}
				}
			}
			field.set(strings);
		}
		FieldSlot::Map(field) => match value {
			Value::Map(inner) => *field = inner.clone(),
			other => {
				log::debug!("mapping field for key={key} cannot take {}", other.kind());
				report.skip(path.to_owned(), SkipReason::TypeMismatch);
			}
		},
		FieldSlot::Pointer => report.skip(path.to_owned(), SkipReason::Unsupported),
		FieldSlot::Time(field) => match value {
			Value::Time(t) => *field = *t,
			Value::Map(inner) => {
				// Timestamps expose no settable fields.
				for inner_key in inner.keys() {
					report.skip(join_key(path, inner_key), SkipReason::NoSuchField);
				}
			}
			other => return nested_mismatch(key, other, opt, path, report),
		},
		FieldSlot::Record(nested) => match value {
			Value::Map(inner) => assign_fields(inner, nested, opt, path, depth + 1, report),
			other => return nested_mismatch(key, other, opt, path, report),
		},
		FieldSlot::Raw(mut field) => {
			if !field.assign(value) {
				log::debug!("cannot assign {} to {} field for key={key}", value.kind(), field.type_label());
				report.skip(path.to_owned(), SkipReason::TypeMismatch);
			}
		}
	}
	Flow::Continue
}

fn nested_mismatch(key: &str, value: &Value, opt: &MapOptions, path: &str, report: &mut MapReport) -> Flow {
	log::debug!("not a mapping key={key} value={value}");
	report.skip(path.to_owned(), SkipReason::NotAMapping);
	if opt.abandon_on_nested_mismatch { Flow::Abandon } else { Flow::Continue }
}

fn join_key(prefix: &str, key: &str) -> String {
	if prefix.is_empty() { key.to_owned() } else { format!("{prefix}.{key}") }
}

#[cfg(test)]
mod tests;
