use std::path::PathBuf;

use anyconv::conv::Result;

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::read_value;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
}

/// Print the value tree of a JSON file.
pub fn run(args: Args) -> Result<()> {
	let Args { file, max_depth, max_items } = args;

	let value = read_value(&file)?;

	let mut print = PrintOptions::default();
	if let Some(max_depth) = max_depth {
		print.max_print_depth = max_depth;
	}
	if let Some(max_items) = max_items {
		print.max_array_items = max_items;
		print.max_fields_per_struct = max_items;
	}

	println!("path: {}", file.display());
	println!("kind: {}", value.kind());
	println!("value:");
	print_value(&value, print);
	Ok(())
}
