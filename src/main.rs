#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "anyconv", about = "Loose value coercion tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Coerce(cmd::coerce::Args),
	Table(cmd::table::Args),
	Dump(cmd::dump::Args),
	Date(cmd::date::Args),
}

fn main() {
	env_logger::init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> anyconv::conv::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Coerce(args) => cmd::coerce::run(args),
		Commands::Table(args) => cmd::table::run(args),
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Date(args) => cmd::date::run(args),
	}
}
