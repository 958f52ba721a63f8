use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::TRANSITION_PENALTY;

mod commands;

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor multi-floor wayfinding")]
struct Cli {
    /// Override the building description file or directory.
    #[arg(long, global = true)]
    building: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two locations.
    Route {
        /// Starting location id or name. Defaults to the building's kiosk.
        #[arg(long = "from")]
        from: Option<String>,
        /// Destination location id or name.
        #[arg(long = "to")]
        to: String,
        /// Cost charged for each elevator or stair transition.
        #[arg(long, default_value_t = TRANSITION_PENALTY)]
        transition_penalty: f64,
        /// Refuse to route when the building has validation errors.
        #[arg(long)]
        strict: bool,
    },
    /// List locations grouped by floor.
    Locations {
        /// Case-insensitive filter on location name or type.
        #[arg(long)]
        search: Option<String>,
    },
    /// Check the building description for broken or one-sided links.
    Validate,
    /// Print the content fingerprint used to key cached graphs.
    Fingerprint,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let building = cli.building.as_deref();

    match cli.command {
        Command::Route {
            from,
            to,
            transition_penalty,
            strict,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                transition_penalty,
                strict,
            };
            commands::route::handle_route_command(building, cli.format, &args)
        }
        Command::Locations { search } => {
            commands::locations::handle_locations_command(building, cli.format, search.as_deref())
        }
        Command::Validate => commands::validate::handle_validate_command(building, cli.format),
        Command::Fingerprint => {
            commands::fingerprint::handle_fingerprint_command(building, cli.format)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
