use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use postcal_core::{Granularity, Instant, Post, TimestampFormat};
use serde::Serialize;
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

pub fn parse_granularity(s: &str) -> CliResult<Granularity> {
    match s.to_lowercase().as_str() {
        "day" => Ok(Granularity::Day),
        "week" => Ok(Granularity::Week),
        "month" => Ok(Granularity::Month),
        _ => Err(CliError::input(format!(
            "Invalid granularity '{}'. Expected: day, week, month",
            s
        ))),
    }
}

pub fn parse_format(s: &str) -> CliResult<TimestampFormat> {
    match s.to_lowercase().as_str() {
        "rfc3339" => Ok(TimestampFormat::Rfc3339),
        "epoch_ms" => Ok(TimestampFormat::EpochMs),
        "epoch_s" => Ok(TimestampFormat::EpochS),
        _ => Err(CliError::input(format!(
            "Invalid format '{}'. Expected: rfc3339, epoch_ms, epoch_s",
            s
        ))),
    }
}

/// Parse an instant flag, or read the system clock when it is absent.
///
/// This is the only place the clock is read; the engine always receives
/// "now" as a value.
pub fn instant_or_now(flag: &str, value: Option<&str>) -> CliResult<Instant> {
    match value {
        Some(raw) => Instant::parse(raw)
            .map_err(|e| CliError::input(format!("Invalid --{}: {}", flag, e))),
        None => {
            let now = Instant::try_from(Utc::now())
                .map_err(|e| CliError::runtime(format!("System clock unusable: {}", e)))?;
            debug!(%now, "Using system clock for --{}", flag);
            Ok(now)
        }
    }
}

/// Pick the posts file from the flag, then the config file.
pub fn resolve_posts_path(flag: Option<PathBuf>, config: &CliConfig) -> CliResult<PathBuf> {
    flag.or_else(|| config.posts.clone()).ok_or_else(|| {
        CliError::input("No posts file given. Pass --posts or set `posts` in the config file")
    })
}

/// Read and decode a posts file. Failing to read the file is a runtime
/// error; a file that is not a valid posts array is an input error.
pub fn load_posts(path: &Path) -> CliResult<Vec<Post>> {
    let content = read_posts_file(path).map_err(|e| CliError::runtime(format!("{e:#}")))?;
    let posts = decode_posts(path, &content).map_err(|e| CliError::input(format!("{e:#}")))?;
    debug!(path = %path.display(), count = posts.len(), "Loaded posts");
    Ok(posts)
}

fn read_posts_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read posts file '{}'", path.display()))
}

fn decode_posts(path: &Path, content: &str) -> anyhow::Result<Vec<Post>> {
    serde_json::from_str(content)
        .with_context(|| format!("Failed to parse posts file '{}'", path.display()))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}
