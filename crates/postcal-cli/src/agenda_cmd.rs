use std::process::ExitCode;

use postcal_core::format::{format_hour_label, format_window_title};
use postcal_core::posts::{posts_by_day, posts_by_hour};
use postcal_core::{
    DisplayStyle, Granularity, Instant, Platform, Post, PostStatus, Window, format_for_display,
    window_for,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::AgendaArgs;
use crate::config::CliConfig;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{instant_or_now, load_posts, parse_granularity, print_json, resolve_posts_path};

pub fn run_agenda(
    args: AgendaArgs,
    config: &CliConfig,
    output_format: OutputFormat,
) -> CliResult<ExitCode> {
    let view = parse_granularity(&args.view)?;
    let at = instant_or_now("at", args.at.as_deref())?;
    let posts = load_posts(&resolve_posts_path(args.posts, config)?)?;

    let report = agenda_report(&posts, at, view)?;
    debug!(window = %report.window.key, groups = report.groups.len(), "Built agenda");

    match output_format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("{}", report.title);
            if report.groups.is_empty() {
                println!("  (no posts)");
            }
            for group in &report.groups {
                println!("{}", group.label);
                for entry in &group.posts {
                    let platforms: Vec<String> =
                        entry.platform.iter().map(ToString::to_string).collect();
                    println!(
                        "  {}  [{}] {} ({})",
                        entry.time,
                        entry.status,
                        entry.title,
                        platforms.join(", ")
                    );
                }
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct AgendaReport {
    title: String,
    window: Window,
    groups: Vec<AgendaGroup>,
}

#[derive(Debug, Serialize)]
struct AgendaGroup {
    label: String,
    posts: Vec<AgendaEntry>,
}

#[derive(Debug, Serialize)]
struct AgendaEntry {
    id: String,
    title: String,
    status: PostStatus,
    platform: Vec<Platform>,
    scheduled_at: Instant,
    time: String,
}

impl From<&Post> for AgendaEntry {
    fn from(post: &Post) -> Self {
        AgendaEntry {
            id: post.id.clone(),
            title: post.title.clone(),
            status: post.status,
            platform: post.platform.clone(),
            scheduled_at: post.scheduled_at,
            time: format_for_display(post.scheduled_at, DisplayStyle::TimeOnly),
        }
    }
}

/// Day views group by hour of day; week and month views group by day.
fn agenda_report(posts: &[Post], at: Instant, view: Granularity) -> CliResult<AgendaReport> {
    let window = window_for(at, view)?;

    let groups: Vec<AgendaGroup> = match view {
        Granularity::Day => posts_by_hour(posts, &window)
            .into_iter()
            .map(|(hour, posts)| group(format_hour_label(hour), &posts))
            .collect(),
        Granularity::Week | Granularity::Month => posts_by_day(posts, &window)
            .into_iter()
            .map(|(key, posts)| {
                let label = posts
                    .first()
                    .map(|post| format_for_display(post.scheduled_at, DisplayStyle::DateOnly))
                    .unwrap_or(key);
                group(label, &posts)
            })
            .collect(),
    };

    Ok(AgendaReport {
        title: format_window_title(&window),
        window,
        groups,
    })
}

fn group(label: String, posts: &[&Post]) -> AgendaGroup {
    AgendaGroup {
        label,
        posts: posts.iter().map(|post| AgendaEntry::from(*post)).collect(),
    }
}
