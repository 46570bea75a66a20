//! Tick-by-tick output of a simulation run.

use anyhow::{Context, Result};
use behavior_tree::{Blackboard, Status, Value};
use console::style;

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per tick, then the final blackboard
    Summary,
    /// A single JSON document at the end
    Json,
}

/// Collects tick results and prints them in the chosen format.
pub struct Report {
    tree: String,
    format: OutputFormat,
    statuses: Vec<Status>,
}

impl Report {
    pub fn new(tree: &str, format: OutputFormat) -> Self {
        Self {
            tree: tree.to_owned(),
            format,
            statuses: Vec::new(),
        }
    }

    pub fn record(&mut self, tick: u64, status: Status) {
        if self.format == OutputFormat::Summary {
            println!("tick {:>4}  {}", tick, styled(status));
        }
        self.statuses.push(status);
    }

    pub fn finish(self, blackboard: &Blackboard) -> Result<()> {
        match self.format {
            OutputFormat::Summary => {
                println!();
                println!("{}", style("Blackboard").bold());
                if blackboard.is_empty() {
                    println!("  {}", style("(empty)").dim());
                }
                for (key, value) in blackboard.iter() {
                    println!("  {} = {}", style(key).cyan(), value);
                }
                Ok(())
            }
            OutputFormat::Json => {
                let entries: serde_json::Map<_, _> = blackboard
                    .iter()
                    .map(|(key, value)| (key.to_owned(), json_value(value)))
                    .collect();
                let report = serde_json::json!({
                    "tree": self.tree,
                    "ticks": self.statuses,
                    "final_status": self.statuses.last(),
                    "blackboard": entries,
                });
                let json = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize report to JSON")?;
                println!("{json}");
                Ok(())
            }
        }
    }
}

fn styled(status: Status) -> console::StyledObject<Status> {
    match status {
        Status::Success => style(status).green(),
        Status::Failure => style(status).red(),
        Status::Running => style(status).yellow(),
    }
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => (*b).into(),
        Value::Int(i) => (*i).into(),
        Value::Float(f) => (*f).into(),
        Value::Str(s) => s.as_str().into(),
    }
}
