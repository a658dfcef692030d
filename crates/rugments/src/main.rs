mod cli;
mod commands;
mod tokenizer;


use std::process::ExitCode;

use anyhow::{anyhow, Context};
use cli::flags::{Rugments, RugmentsCmd};
use commands::bench::BenchCommand;
use commands::highlight::HighlightCommand;
use commands::{Command, CommandInvocationError};
use tracing::Level;

/// Entry point for rugments.
pub fn main() -> ExitCode {
	let cmd = match Rugments::from_env() {
		Ok(cmd) => cmd,
		Err(err) if err.is_help() => {
			println!("{}", err);
			return ExitCode::SUCCESS;
		}
		Err(err) => {
			eprintln!("{}", err);
			return ExitCode::FAILURE;
		}
	};

	match run(cmd) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("error: {:#}", err);
			ExitCode::FAILURE
		}
	}
}

fn run(cmd: Rugments) -> anyhow::Result<()> {
	let level = log_level(cmd.loglevel.as_deref())?;
	tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).with_target(false).init();

	match cmd.subcommand {
		RugmentsCmd::Bench(config) => run_command(&BenchCommand::new(config)).context("the benchmark failed"),
		RugmentsCmd::Highlight(config) => Ok(run_command(&HighlightCommand::new(config))?),
	}
}

/// Parses the `--loglevel` flag. Without one, only warnings and errors are logged.
fn log_level(flag: Option<&str>) -> anyhow::Result<Level> {
	match flag {
		None => Ok(Level::WARN),
		Some(level) => level.parse().map_err(|_| anyhow!("invalid log level '{}'", level)),
	}
}

fn run_command(cmd: &dyn Command) -> Result<(), CommandInvocationError> {
	cmd.run()
}
