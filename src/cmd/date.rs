use anyconv::conv::{Result, date_format, int_to_time};
use chrono::Utc;

#[derive(clap::Args)]
pub struct Args {
	/// Layout using YYYY, YY, MM, DD, HH, hh, mm, ss and A tokens.
	pub layout: String,
	/// Unix seconds to render instead of the current time.
	#[arg(long, allow_hyphen_values = true)]
	pub unix: Option<i64>,
}

/// Render a timestamp with a token layout.
pub fn run(args: Args) -> Result<()> {
	let Args { layout, unix } = args;

	let time = match unix {
		Some(seconds) => int_to_time(seconds),
		None => Utc::now(),
	};
	println!("{}", date_format(&time, &layout));
	Ok(())
}
