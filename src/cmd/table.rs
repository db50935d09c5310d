use std::path::PathBuf;

use anyconv::conv::{Mapping, Result, Value, any_to_bool, any_to_float, any_to_int64, any_to_str, any_to_uint8};

use crate::cmd::util::{emit_json, read_document, truncate};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print common coercions for every top-level key of a JSON object.
pub fn run(args: Args) -> Result<()> {
	let Args { file, json } = args;

	let document = read_document(&file)?;
	let rows = build_rows(&document);

	if json {
		return emit_json(&TableJson {
			path: file.display().to_string(),
			rows,
		});
	}

	println!("path: {}", file.display());
	println!("keys: {}", rows.len());
	println!("{:<20} {:<7} {:>20} {:>5} {:>14} {:<5} string", "key", "kind", "int64", "uint8", "float", "bool");
	for row in &rows {
		println!(
			"{:<20} {:<7} {:>20} {:>5} {:>14} {:<5} {}",
			truncate(&row.key, 20),
			row.kind,
			row.int64,
			row.uint8,
			Value::from(row.float).to_string(),
			row.bool,
			truncate(&row.string, 40)
		);
	}
	Ok(())
}

pub(crate) fn build_rows(document: &Mapping) -> Vec<RowJson> {
	document
		.iter()
		.map(|(key, value)| RowJson {
			key: key.clone(),
			kind: value.kind().as_str(),
			int64: any_to_int64(value),
			uint8: any_to_uint8(value),
			float: any_to_float(value),
			string: any_to_str(value),
			bool: any_to_bool(value),
		})
		.collect()
}

#[derive(serde::Serialize)]
struct TableJson {
	path: String,
	rows: Vec<RowJson>,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct RowJson {
	key: String,
	kind: &'static str,
	int64: i64,
	uint8: u8,
	float: f64,
	string: String,
	bool: bool,
}
