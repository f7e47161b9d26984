use std::process::ExitCode;

use postcal_core::{
    CivilDateTime, Instant, parse_datetime_local, parse_user_date_time, to_civil,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::ParseArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::print_json;

/// Validate scheduling form input. Nothing is printed to stdout unless the
/// input is accepted, so a caller can gate its write on the exit code.
pub fn run_parse(args: ParseArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let instant = match (&args.datetime_local, &args.date, &args.time) {
        (Some(value), _, _) => parse_datetime_local(value)?,
        (None, Some(date), Some(time)) => parse_user_date_time(date, time)?,
        _ => {
            return Err(CliError::input(
                "Provide --date and --time, or --datetime-local",
            ));
        }
    };
    debug!(%instant, "Accepted form input");

    let report = ParseReport {
        instant,
        civil: to_civil(instant),
    };

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => println!("{}", report.instant),
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct ParseReport {
    instant: Instant,
    civil: CivilDateTime,
}
