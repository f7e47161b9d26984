use std::process::ExitCode;

use postcal_core::{CivilDateTime, DisplayStyle, Instant, format_for_display, to_civil};
use serde::Serialize;

use crate::cli::CivilArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::print_json;

pub fn run_civil(args: CivilArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let reports = args
        .instants
        .iter()
        .map(|raw| civil_report(raw))
        .collect::<CliResult<Vec<_>>>()?;

    match output_format {
        OutputFormat::Json => print_json(&reports)?,
        OutputFormat::Text => {
            for report in reports {
                println!("{} -> {} ({})", report.instant, report.local, report.display);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct CivilReport {
    input: String,
    instant: Instant,
    civil: CivilDateTime,
    local: String,
    display: String,
}

fn civil_report(raw: &str) -> CliResult<CivilReport> {
    let instant = Instant::parse(raw)?;

    Ok(CivilReport {
        input: raw.to_string(),
        instant,
        civil: to_civil(instant),
        local: format_for_display(instant, DisplayStyle::LocalRfc3339),
        display: format_for_display(instant, DisplayStyle::FullDateTime),
    })
}
