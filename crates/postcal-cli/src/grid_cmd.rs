use std::process::ExitCode;

use postcal_core::format::format_window_title;
use postcal_core::{Granularity, Instant, calendar_grid, is_today, to_civil, window_for};
use serde::Serialize;

use crate::cli::GridArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{instant_or_now, parse_granularity, print_json};

pub fn run_grid(args: GridArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let view = parse_granularity(&args.view)?;
    let now = instant_or_now("now", args.now.as_deref())?;
    let at = match args.at.as_deref() {
        Some(raw) => instant_or_now("at", Some(raw))?,
        None => now,
    };

    let report = grid_report(at, now, view)?;

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("{}", report.title);
            for cell in &report.cells {
                let mut line = format!("{} {}", cell.key, cell.weekday);
                if !cell.in_focus {
                    line.push_str(" (outside)");
                }
                if cell.today {
                    line.push_str(" [today]");
                }
                println!("{}", line);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct GridReport {
    view: Granularity,
    title: String,
    cells: Vec<CellReport>,
}

#[derive(Debug, Serialize)]
struct CellReport {
    key: String,
    weekday: String,
    start: Instant,
    end: Instant,
    in_focus: bool,
    today: bool,
}

fn grid_report(at: Instant, now: Instant, view: Granularity) -> CliResult<GridReport> {
    let focus = window_for(at, view)?;
    let cells = calendar_grid(at, view)?
        .into_iter()
        .map(|cell| CellReport {
            weekday: to_civil(cell.day.start).date().format("%a").to_string(),
            today: is_today(cell.day.start, now),
            in_focus: cell.in_focus,
            start: cell.day.start,
            end: cell.day.end,
            key: cell.day.key,
        })
        .collect();

    Ok(GridReport {
        view,
        title: format_window_title(&focus),
        cells,
    })
}
