//! Command handlers
//!
//! Handlers write their user-facing output to the given writer; logging goes
//! through `tracing` to stderr.

use std::{io::Write, time::Duration};

use anyhow::Context;
use chrono::{DateTime, Local};
use flatcache::{CacheConfig, FlatFileCache, SweepReport};

use crate::cli::{Cli, Commands};

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The requested entry does not exist or has expired
    NotFound,
}

/// Build the effective configuration from `--config`, the environment and `--dir`
pub fn load_config(cli: &Cli) -> anyhow::Result<CacheConfig> {
    let mut config = CacheConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = &cli.dir {
        config.directory = Some(dir.clone());
    }
    Ok(config)
}

/// Execute the parsed command
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<CommandStatus> {
    let config = load_config(cli)?;
    let cache = FlatFileCache::new(config.clone());

    match &cli.command {
        Commands::Clear => {
            let report = cache.remove_all(None)?;
            print_report(out, "Cleared", &report)?;
        }
        Commands::ClearOld { max_age } => {
            let max_age = max_age.map_or(cache.sweep_max_age(), Duration::from_secs);
            let report = cache.remove_expired(None, max_age)?;
            print_report(out, "Removed expired", &report)?;
        }
        Commands::Get { name, ttl } => {
            let ttl = ttl.map_or(cache.default_ttl(), Duration::from_secs);
            match cache.get_with_ttl(name, ttl) {
                Some(value) => writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?,
                None => return Ok(CommandStatus::NotFound),
            }
        }
        Commands::Put { name, value } => {
            let value: serde_json::Value =
                serde_json::from_str(value).context("value is not valid JSON")?;
            cache.init()?;
            cache.put(name, &value)?;
            writeln!(out, "Stored {name}")?;
        }
        Commands::Delete { name } => {
            if cache.delete(name)? {
                writeln!(out, "Deleted {name}")?;
            } else {
                writeln!(out, "No entry named {name}")?;
                return Ok(CommandStatus::NotFound);
            }
        }
        Commands::List => {
            let entries = cache.entries(None)?;
            for entry in &entries {
                let modified: DateTime<Local> = entry.modified.into();
                writeln!(
                    out,
                    "{}\t{} B\t{}s\t{}",
                    entry.name,
                    entry.size_bytes,
                    entry.age.as_secs(),
                    modified.to_rfc3339()
                )?;
            }
            let stats = cache.stats(None)?;
            writeln!(out, "{} entries, {} bytes", stats.entries, stats.total_bytes)?;
        }
        Commands::Config => {
            write!(out, "{}", toml::to_string(&config)?)?;
            writeln!(out, "# resolved directory: {}", cache.directory().display())?;
        }
    }

    Ok(CommandStatus::Success)
}

fn print_report(out: &mut dyn Write, action: &str, report: &SweepReport) -> anyhow::Result<()> {
    writeln!(
        out,
        "{action} {} of {} entries ({} failed)",
        report.removed, report.scanned, report.failed
    )?;
    Ok(())
}
