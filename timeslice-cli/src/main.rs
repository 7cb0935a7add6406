use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use timeslice_core::simulate;
use timeslice_ingest::{load_registry, parse_trace_log};
use timeslice_trace::render_gantt;

mod check;

#[derive(Parser, Debug)]
#[command(
    name = "timeslice",
    version,
    about = "Preemptive dynamic-priority scheduler simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a task list and print the dispatch log
    Simulate {
        /// Task list file (defaults to stdin)
        input: Option<PathBuf>,

        /// Print a JSON array instead of `seq/id/start/end/priority` lines
        #[arg(long)]
        json: bool,
    },

    /// Render a task list and its dispatch log as mermaid gantt markup
    Gantt {
        /// Task list file (defaults to stdin)
        input: Option<PathBuf>,

        /// Render a previously saved dispatch log instead of simulating
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Simulate every `<case>.in` in a directory and compare with `<case>.out`
    Check {
        /// Directory of golden cases
        cases: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate { input, json } => {
            let registry = load_registry(&read_input(input.as_deref())?)?;
            let records = simulate(&registry);

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    println!("{record}");
                }
            }
        }

        Command::Gantt { input, trace } => {
            let registry = load_registry(&read_input(input.as_deref())?)?;
            let records = match trace {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    parse_trace_log(&text)?
                }
                None => simulate(&registry),
            };

            println!("{}", render_gantt(registry.tasks(), &records));
        }

        Command::Check { cases } => {
            check::run(&cases)?;
        }
    }

    Ok(())
}

/// Read the task list from a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}
