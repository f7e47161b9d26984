use std::process::ExitCode;

use postcal_core::calendar_stats;
use postcal_core::format::format_window_title;

use crate::cli::StatsArgs;
use crate::config::CliConfig;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{instant_or_now, load_posts, print_json, resolve_posts_path};

pub fn run_stats(
    args: StatsArgs,
    config: &CliConfig,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let now = instant_or_now("now", args.now.as_deref())?;
    let posts = load_posts(&resolve_posts_path(args.posts, config)?)?;
    let stats = calendar_stats(&posts, now)?;

    match output_format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Text => {
            for s in &stats {
                println!(
                    "{} ({}): {} posts - {} posted, {} scheduled, {} drafted, {} ideas - LinkedIn {}, Twitter {}",
                    s.title,
                    format_window_title(&s.window),
                    s.total,
                    s.posted,
                    s.scheduled,
                    s.drafted,
                    s.ideas,
                    s.linkedin,
                    s.twitter
                );
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
