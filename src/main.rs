use anyhow::Result;
use clap::{Parser, Subcommand};

use covwalk::app::App;
use covwalk::bus::{NavigationData, NavigationEvent};
use covwalk::config::Config;
use covwalk::logging;
use covwalk::spool;
use covwalk::ui::install_panic_hook;
use covwalk::workflow::WorkflowStep;

#[derive(Parser)]
#[command(name = "covwalk")]
#[command(about = "Guided covenant-monitoring workflow walkthrough for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical step/route table
    Steps,

    /// Write a navigation event into the spool, as an external app would
    Emit {
        /// Target route (e.g. /dscr-trend)
        #[arg(long)]
        route: String,

        /// Source application id
        #[arg(long)]
        source: Option<String>,

        /// Referrer recorded in the event payload
        #[arg(long)]
        referrer: Option<String>,

        /// Action recorded in the event payload (e.g. JUMP)
        #[arg(long)]
        action: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let _logging = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        None => run_tui(config).await,
        Some(Commands::Steps) => {
            print_steps();
            Ok(())
        }
        Some(Commands::Emit {
            route,
            source,
            referrer,
            action,
        }) => emit_event(&config, route, source, referrer, action),
    }
}

async fn run_tui(config: Config) -> Result<()> {
    install_panic_hook();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "covwalk starting");

    let mut app = App::new(config)?;
    app.run().await
}

fn print_steps() {
    println!("{:<7} {:<26} {}", "index", "step", "route");
    for step in WorkflowStep::all() {
        println!("{:<7} {:<26} {}", step.index(), step.label(), step.path());
    }
}

fn emit_event(
    config: &Config,
    route: String,
    source: Option<String>,
    referrer: Option<String>,
    action: Option<String>,
) -> Result<()> {
    if WorkflowStep::from_path(&route).is_none() {
        // Not fatal: consumers filter by route, so an unknown route is
        // simply never accepted. Point it out anyway.
        eprintln!("warning: {route} does not match any workflow screen");
    }

    let event = NavigationEvent {
        source_app_id: source,
        route,
        timestamp: Some(chrono::Utc::now().timestamp_millis()),
        data: Some(NavigationData { referrer, action }),
    };

    let path = spool::write_event(&config.events_path(), &event)?;
    println!("event written to {}", path.display());
    Ok(())
}
