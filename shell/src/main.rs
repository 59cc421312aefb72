//! Vista Shell
//!
//! Builds a workspace over an in-memory navigator, replays a gesture script
//! against it and prints the tab strip after every step.

mod script;
mod terminal;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use vista_core::{Config, MemoryNavigator, Navigator, Workspace};

use crate::script::{Runner, Step};

#[derive(Debug, Parser)]
#[command(name = "vista", version, about = "Replay workspace gestures against the tab session")]
struct Cli {
    /// JSON configuration file (route table and home tab)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON gesture script; the built-in demo runs when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Path shown when the workspace mounts
    #[arg(long, default_value = "/dashboard")]
    start: String,

    /// Print session snapshots as JSON instead of a tab line
    #[arg(long)]
    json: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    vista_core::init_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let steps: Vec<Step> = match &cli.script {
        Some(path) => script::load(path)
            .with_context(|| format!("loading script from {}", path.display()))?,
        None => script::demo(),
    };

    let navigator = MemoryNavigator::new(cli.start.clone());
    let workspace = Workspace::new(config, Arc::new(navigator.clone()))?;
    workspace.initialize()?;

    print_state(&workspace, &navigator, "mount", cli.json)?;

    let mut runner = Runner::new(&workspace, navigator.clone())?;
    for step in &steps {
        match runner.apply(step) {
            Ok(lines) => {
                for line in lines {
                    println!("    {}", line);
                }
            }
            Err(e) => tracing::warn!(step = %step.describe(), error = %e, "Step failed"),
        }
        print_state(&workspace, &navigator, &step.describe(), cli.json)?;
    }

    tracing::info!(
        steps = steps.len(),
        revision = workspace.session().revision(),
        "Replay finished"
    );

    Ok(())
}

fn print_state(
    workspace: &Workspace,
    navigator: &MemoryNavigator,
    label: &str,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(&workspace.snapshot())?);
    } else {
        println!(
            "{:<24} {:<20} {}",
            label,
            navigator.current_path(),
            workspace.strip_view().render_line()
        );
    }
    Ok(())
}
