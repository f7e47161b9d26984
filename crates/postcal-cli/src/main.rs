use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

mod agenda_cmd;
mod civil_cmd;
mod cli;
mod config;
mod error;
mod grid_cmd;
mod parse_cmd;
mod shared;
mod stats_cmd;
mod window_cmd;

use agenda_cmd::run_agenda;
use civil_cmd::run_civil;
use cli::{Cli, Commands};
use config::CliConfig;
use error::{output_format_hint, parse_output_format, render_error};
use grid_cmd::run_grid;
use parse_cmd::run_parse;
use stats_cmd::run_stats;
use window_cmd::run_window;

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("Parsed CLI args: {:?}", cli);

    let requested = cli.command.output_format().map(str::to_string);
    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let fallback = output_format_hint(requested.as_deref().unwrap_or("text"));
            return render_error(&err, fallback);
        }
    };

    let format_name = requested
        .or_else(|| config.output_format.clone())
        .unwrap_or_else(|| "text".to_string());
    let output_format = match parse_output_format(&format_name) {
        Ok(format) => format,
        Err(err) => return render_error(&err, output_format_hint(&format_name)),
    };

    let result = match cli.command {
        Commands::Civil(args) => run_civil(args, output_format),
        Commands::Window(args) => run_window(args, output_format),
        Commands::Grid(args) => run_grid(args, output_format),
        Commands::Parse(args) => run_parse(args, output_format),
        Commands::Agenda(args) => run_agenda(args, &config, output_format),
        Commands::Stats(args) => run_stats(args, &config, output_format),
    };

    match result {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}
