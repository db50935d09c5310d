use anyconv::conv::{
	Result, Value, any_to_bool, any_to_float, any_to_int8, any_to_int16, any_to_int32, any_to_int64, any_to_round, any_to_str, any_to_uint8, any_to_uint16,
	any_to_uint32, any_to_uint64, to_json,
};

use crate::cmd::util::{emit_json, parse_literal};

/// Primitive target selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Target {
	Int64,
	Int32,
	Int16,
	Int8,
	Uint64,
	Uint32,
	Uint16,
	Uint8,
	Float,
	Round,
	#[value(name = "string")]
	Text,
	Bool,
}

impl Target {
	fn label(self) -> &'static str {
		match self {
			Target::Int64 => "int64",
			Target::Int32 => "int32",
			Target::Int16 => "int16",
			Target::Int8 => "int8",
			Target::Uint64 => "uint64",
			Target::Uint32 => "uint32",
			Target::Uint16 => "uint16",
			Target::Uint8 => "uint8",
			Target::Float => "float",
			Target::Round => "round",
			Target::Text => "string",
			Target::Bool => "bool",
		}
	}
}

#[derive(clap::Args)]
pub struct Args {
	/// JSON literal; anything that does not parse is taken as a string.
	pub value: String,
	#[arg(long, value_enum)]
	pub to: Target,
	#[arg(long, default_value_t = 2)]
	pub places: i32,
	#[arg(long)]
	pub json: bool,
}

/// Coerce one literal into the requested primitive target.
pub fn run(args: Args) -> Result<()> {
	let Args { value, to, places, json } = args;

	let input = parse_literal(&value);
	let output = coerce_to(&input, to, places);
	log::debug!("coerced {} input to {}", input.kind(), to.label());

	if json {
		return emit_json(&CoerceJson {
			input: to_json(&input),
			kind: input.kind().as_str(),
			target: to.label(),
			result: to_json(&output),
		});
	}

	println!("{output}");
	Ok(())
}

/// Apply one coercion, wrapping the primitive back into a value.
pub(crate) fn coerce_to(input: &Value, target: Target, places: i32) -> Value {
	match target {
		Target::Int64 => Value::from(any_to_int64(input)),
		Target::Int32 => Value::from(any_to_int32(input)),
		Target::Int16 => Value::from(any_to_int16(input)),
		Target::Int8 => Value::from(any_to_int8(input)),
		Target::Uint64 => Value::from(any_to_uint64(input)),
		Target::Uint32 => Value::from(any_to_uint32(input)),
		Target::Uint16 => Value::from(any_to_uint16(input)),
		Target::Uint8 => Value::from(any_to_uint8(input)),
		Target::Float => Value::from(any_to_float(input)),
		Target::Round => Value::from(any_to_round(input, places)),
		Target::Text => Value::from(any_to_str(input)),
		Target::Bool => Value::from(any_to_bool(input)),
	}
}

#[derive(serde::Serialize)]
struct CoerceJson {
	input: serde_json::Value,
	kind: &'static str,
	target: &'static str,
	result: serde_json::Value,
}
