//! Shared components for CLI commands
//!
//! Logging setup and snapshot reporting used by every subcommand.

use crate::app::services::fetcher::Snapshot;
use crate::cli::args::{Args, OutputArgs, OutputFormat};
use crate::{FetchOutcome, WeatherObservation};
use anyhow::{Context, Result};
use colored::*;
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_ingest={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Print a snapshot in the requested format
pub fn print_snapshot(snapshot: &Snapshot, output: &OutputArgs) -> Result<()> {
    if let Some(station_id) = &output.station {
        return print_station(snapshot, station_id, output.format);
    }

    match output.format {
        OutputFormat::Summary => print_summary(snapshot),
        OutputFormat::Table => print_table(snapshot.observations.iter()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(snapshot)
                .context("Failed to serialize snapshot")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn print_station(snapshot: &Snapshot, station_id: &str, format: OutputFormat) -> Result<()> {
    let observation = snapshot
        .station(station_id)
        .with_context(|| format!("Station {} is not in the snapshot", station_id))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(observation)
                .context("Failed to serialize observation")?;
            println!("{}", json);
        }
        OutputFormat::Summary | OutputFormat::Table => print_table(std::iter::once(observation)),
    }
    Ok(())
}

fn print_summary(snapshot: &Snapshot) {
    let stats = &snapshot.stats;

    println!("\n{}", "METAR Snapshot".bright_green().bold());
    println!(
        "  {} {}",
        "Cycle:".bright_cyan(),
        snapshot.cycle.to_string().bright_white()
    );
    if let Some(fetched_at) = snapshot.fetched_at {
        println!(
            "  {} {}",
            "Fetched at:".bright_cyan(),
            fetched_at.to_rfc3339().bright_white()
        );
    }
    println!(
        "  {} {}",
        "Observations:".bright_cyan(),
        snapshot.len().to_string().bright_white().bold()
    );

    println!("\n{}", "Flight categories".bright_green().bold());
    for (category, count) in snapshot.category_counts() {
        println!(
            "  {:<8} {}",
            category.as_str().bright_cyan(),
            count.to_string().bright_white()
        );
    }

    println!("\n{}", "Parse statistics".bright_green().bold());
    println!("  {} {}", "Data lines:".bright_cyan(), stats.total_lines);
    println!(
        "  {} {:.1}%",
        "Yield:".bright_cyan(),
        stats.yield_rate()
    );
    println!("  {} {}", "Filtered by prefix:".bright_cyan(), stats.filtered_prefix);
    if stats.skipped_short > 0 {
        println!(
            "  {} {}",
            "Too few fields:".bright_yellow(),
            stats.skipped_short.to_string().bright_yellow()
        );
    }
    if stats.coordinate_fallbacks > 0 {
        println!(
            "  {} {}",
            "Placed at 0.0:".bright_yellow(),
            stats.coordinate_fallbacks.to_string().bright_yellow()
        );
    }
    if stats.rejected_coordinates > 0 {
        println!(
            "  {} {}",
            "Bad coordinates:".bright_red(),
            stats.rejected_coordinates.to_string().bright_red().bold()
        );
    }
    println!();
}

fn print_table<'a>(observations: impl Iterator<Item = &'a WeatherObservation>) {
    println!(
        "{:<6} {:<22} {:>9} {:>10} {:>6} {:>6} {:>8} {:>6} {:<5}",
        "ID", "TIME", "LAT", "LON", "TEMP", "DEWP", "WIND", "VIS", "CAT"
    );
    for observation in observations {
        let wind = match (observation.wind_dir_degrees, observation.wind_speed_kt) {
            (Some(dir), Some(speed)) => format!("{:03}/{}", dir, speed),
            (None, Some(speed)) => format!("VRB/{}", speed),
            _ => "-".to_string(),
        };
        println!(
            "{:<6} {:<22} {:>9.4} {:>10.4} {:>6} {:>6} {:>8} {:>6} {:<5}",
            observation.station_id,
            observation.observation_time,
            observation.latitude,
            observation.longitude,
            format_optional(observation.temp_c),
            format_optional(observation.dewpoint_c),
            wind,
            observation.visibility,
            colour_category(observation),
        );
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

fn colour_category(observation: &WeatherObservation) -> ColoredString {
    use crate::FlightCategory::*;

    let label = observation.category().as_str();
    match observation.category() {
        Vfr => label.bright_green(),
        Mvfr => label.bright_blue(),
        Ifr => label.bright_red(),
        Lifr => label.bright_magenta(),
        Unknown => label.dimmed(),
    }
}

/// One-line report of a finished fetch cycle
pub fn describe_outcome(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Published {
            cycle,
            observations,
        } => format!("cycle {}: published {} observations", cycle, observations),
        FetchOutcome::TransportFailed { cycle, reason } => {
            format!("cycle {}: download failed: {}", cycle, reason)
        }
        FetchOutcome::DecompressionFailed { cycle, reason } => {
            format!("cycle {}: decompression failed: {}", cycle, reason)
        }
        FetchOutcome::HeaderRejected { cycle, reason } => {
            format!("cycle {}: header rejected: {}", cycle, reason)
        }
        FetchOutcome::Superseded { cycle, newer } => {
            format!("cycle {}: superseded by cycle {}", cycle, newer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_outcome() {
        let published = FetchOutcome::Published {
            cycle: 3,
            observations: 1200,
        };
        assert_eq!(
            describe_outcome(&published),
            "cycle 3: published 1200 observations"
        );

        let superseded = FetchOutcome::Superseded { cycle: 1, newer: 2 };
        assert_eq!(
            describe_outcome(&superseded),
            "cycle 1: superseded by cycle 2"
        );
    }

    #[test]
    fn test_unknown_station_is_an_error() {
        let output = OutputArgs {
            format: OutputFormat::Summary,
            station: Some("KXYZ".to_string()),
        };
        let error = print_snapshot(&Snapshot::default(), &output).unwrap_err();
        assert!(error.to_string().contains("KXYZ"));
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(8.3)), "8.3");
        assert_eq!(format_optional(None), "-");
    }
}
