//! Series Window CLI
//!
//! Builds a store in-process and runs window commands against it:
//! - Show the current window (optionally with samples)
//! - Apply a sequence of edge commands
//! - Run the HTTP API
//! - Generate a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use series_window::api::dto::{PointsResponse, WindowResponse};
use series_window::api::AppState;
use series_window::config::{generate_default_config, Config};
use series_window::series::{format_timestamp, parse_timestamp};
use series_window::store::{
    DispatchOutcome, StoreHandle, WindowAction, WindowSnapshot, WindowStore,
    DEFAULT_QUEUE_CAPACITY,
};

#[derive(Parser)]
#[command(name = "series-window")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Date-windowed time-series store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the initial window
    Show {
        /// Include samples
        #[arg(long)]
        points: bool,
        /// With --points, only samples inside the window
        #[arg(long)]
        visible: bool,
    },

    /// Apply edge commands in order, e.g. `start=2010-05-10 end="2010-05-12 18:00"`
    Apply {
        /// Commands as EDGE=TIME where EDGE is `start` or `end`
        #[arg(value_name = "EDGE=TIME", required = true)]
        commands: Vec<String>,
    },

    /// Run the HTTP API with the configured host and port
    Serve,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    series_window::logging::init(&config.logging);

    match cli.command {
        Commands::Show { points, visible } => {
            let store = WindowStore::new(config.store_config()?)?;
            print_window(&store, cli.format)?;

            if points {
                let snapshot = store.state();
                let samples = if visible {
                    snapshot.visible_points()
                } else {
                    &snapshot.points[..]
                };
                print_points(&PointsResponse::new(samples), cli.format)?;
            }
        }

        Commands::Apply { commands } => {
            let mut store = WindowStore::new(config.store_config()?)?;

            for raw in &commands {
                let action = parse_command(raw)?;
                let outcome = store.dispatch(action);
                print_outcome(action, outcome, store.state(), cli.format)?;
            }

            print_window(&store, cli.format)?;
        }

        Commands::Serve => {
            let store = WindowStore::new(config.store_config()?)?;
            let (handle, store_task) = StoreHandle::spawn(store, DEFAULT_QUEUE_CAPACITY);

            series_window::api::serve(AppState::new(handle), &config.api).await?;
            store_task.await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Parse `start=TIME` or `end=TIME`
fn parse_command(raw: &str) -> anyhow::Result<WindowAction> {
    let Some((edge, time)) = raw.split_once('=') else {
        bail!("invalid command '{}': expected EDGE=TIME", raw);
    };
    let time = parse_timestamp(time)?;

    match edge.trim().to_lowercase().as_str() {
        "start" | "from" => Ok(WindowAction::set_start(time)),
        "end" | "to" => Ok(WindowAction::set_end(time)),
        other => bail!("unknown edge '{}': expected start or end", other),
    }
}

fn print_window(store: &WindowStore, format: OutputFormat) -> anyhow::Result<()> {
    let window = WindowResponse::new(store.state(), store.valid_range());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&window)?),
        OutputFormat::Table => {
            println!("Window:  {} .. {}", window.date_from, window.date_to);
            println!("Range:   {} .. {}", window.range.min, window.range.max);
            println!(
                "Points:  {} total, {} visible{}",
                window.point_count,
                window.visible_count,
                if window.inverted { " (inverted window)" } else { "" }
            );
            println!("Stats:   {}", store.stats());
        }
    }
    Ok(())
}

fn print_outcome(
    action: WindowAction,
    outcome: DispatchOutcome,
    state: &WindowSnapshot,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let line = serde_json::json!({
                "action": action,
                "outcome": outcome,
                "date_from": format_timestamp(state.date_from),
                "date_to": format_timestamp(state.date_to),
            });
            println!("{}", serde_json::to_string(&line)?);
        }
        OutputFormat::Table => match outcome {
            DispatchOutcome::Accepted => println!(
                "{:<18} {}  accepted",
                action.name(),
                format_timestamp(action.candidate())
            ),
            DispatchOutcome::Rejected { rejection } => println!(
                "{:<18} {}  rejected: {}",
                action.name(),
                format_timestamp(action.candidate()),
                rejection
            ),
        },
    }
    Ok(())
}

fn print_points(points: &PointsResponse, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(points)?),
        OutputFormat::Table => {
            println!("{:<18} {:>8}", "TIME", "VALUE");
            for point in &points.points {
                println!("{:<18} {:>8.0}", point.time, point.value);
            }
            println!("{} samples", points.count);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use series_window::series::day_start;

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("start=2010-05-10").unwrap(),
            WindowAction::set_start(day_start(2010, 5, 10).unwrap())
        );
        assert_eq!(
            parse_command("END=2010-05-12").unwrap(),
            WindowAction::set_end(day_start(2010, 5, 12).unwrap())
        );
        assert!(parse_command("2010-05-10").is_err());
        assert!(parse_command("middle=2010-05-10").is_err());
        assert!(parse_command("start=later").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let args = ["series-window", "--format", "json", "apply", "start=2010-05-10"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.format == OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Apply { ref commands } if commands.len() == 1));

        assert!(Cli::try_parse_from(["series-window", "apply"]).is_err());
    }

    #[test]
    fn test_cli_parses_serve() {
        let cli = Cli::try_parse_from(["series-window", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve));

        let cli = Cli::try_parse_from(["series-window", "--config", "sw.toml", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve));
        assert_eq!(cli.config, Some(PathBuf::from("sw.toml")));

        assert!(Cli::try_parse_from(["series-window", "serve", "extra"]).is_err());
    }
}
