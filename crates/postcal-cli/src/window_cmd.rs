use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use postcal_core::format::format_window_title;
use postcal_core::{
    DisplayStyle, Granularity, TimestampFormat, Window, format_for_display, parse_instant,
    window_for,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::WindowArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{parse_format, parse_granularity};

pub fn run_window(args: WindowArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let granularity = parse_granularity(&args.granularity)?;
    let format = parse_format(&args.format)?;

    let reader: Box<dyn BufRead> = if args.stdin || args.input == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input).map_err(|e| {
            CliError::runtime(format!("Failed to open file '{}': {}", args.input, e))
        })?;
        Box::new(BufReader::new(file))
    };

    for line in reader.lines() {
        let line = line.map_err(|e| CliError::runtime(format!("Failed to read line: {}", e)))?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let report = window_report(trimmed, granularity, format)
            .map_err(|e| e.context(format!("Error processing '{}'", trimmed)))?;
        debug!(input = trimmed, key = %report.window.key, "Computed window");

        match output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string(&report)
                    .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                println!(
                    "{} -> {} to {}",
                    report.window.key, report.start_local, report.end_local
                );
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct WindowReport {
    input: String,
    epoch_ms: i64,
    window: Window,
    title: String,
    start_local: String,
    end_local: String,
}

fn window_report(
    input: &str,
    granularity: Granularity,
    format: TimestampFormat,
) -> CliResult<WindowReport> {
    let instant = parse_instant(input, format)?;
    let window = window_for(instant, granularity)?;

    Ok(WindowReport {
        input: input.to_string(),
        epoch_ms: instant.epoch_millis(),
        title: format_window_title(&window),
        start_local: format_for_display(window.start, DisplayStyle::LocalRfc3339),
        end_local: format_for_display(window.end, DisplayStyle::LocalRfc3339),
        window,
    })
}
