//! Behavior tree simulator.
//!
//! Loads a content directory, builds one tree through the factory registry and
//! ticks it, printing the root status of every tick and the final blackboard.
//!
//! ```bash
//! cargo run -p bt-sim -- --data-dir crates/behavior-content/data --tree guard --ticks 5
//! BT_DATA_DIR=crates/behavior-content/data cargo run -p bt-sim -- --list
//! ```

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use behavior_content::ContentFactory;
use behavior_tree::BehaviorTree;
use clap::Parser;
use tracing::info;

use crate::report::{OutputFormat, Report};

/// Tick a data-driven behavior tree
#[derive(Parser)]
#[command(name = "bt-sim")]
#[command(about = "Tick a data-driven behavior tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (config.toml, blackboard.ron, trees/, subtrees/)
    #[arg(short, long, value_name = "DIR", env = "BT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Tree to run, by file name under trees/ without extension
    #[arg(short, long, value_name = "NAME", required_unless_present = "list")]
    tree: Option<String>,

    /// Number of ticks to run
    #[arg(short = 'n', long, default_value_t = 10)]
    ticks: u64,

    /// Stop as soon as the root returns success or failure
    #[arg(long)]
    until_done: bool,

    /// Print the node outline before ticking
    #[arg(long)]
    outline: bool,

    /// List available trees and exit
    #[arg(long)]
    list: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().execute()
}

impl Cli {
    fn execute(self) -> Result<()> {
        let content = ContentFactory::new(&self.data_dir);

        if self.list {
            for name in content.tree_names()? {
                println!("{name}");
            }
            return Ok(());
        }

        let name = self.tree.context("No tree given (use --tree NAME)")?;
        let factories = content.build_factories()?;
        let conf = content.load_tree(&name)?;
        let mut tree = BehaviorTree::from_conf(&factories, &conf)
            .with_context(|| format!("Failed to build tree '{name}'"))?
            .with_blackboard(content.load_blackboard()?);

        info!(
            tree = %name,
            nodes = tree.node_count(),
            data_dir = %self.data_dir.display(),
            "tree ready"
        );

        if self.outline && self.format == OutputFormat::Summary {
            print!("{}", tree.outline());
        }

        let mut report = Report::new(&name, self.format);
        for _ in 0..self.ticks {
            let status = tree.tick();
            report.record(tree.tick_count(), status);
            if self.until_done && status.is_done() {
                break;
            }
        }

        report.finish(tree.blackboard())
    }
}
