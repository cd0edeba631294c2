//! Task command - the ward-wide task queue

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use wardctl_core::{Database, NurseController};

use crate::ui;

#[derive(Parser, Debug)]
#[command(about = "Inspect the ward task queue")]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List open tasks, most urgent first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run_task(args: TaskArgs, db: &Database) -> Result<()> {
    match args.command {
        TaskCommands::List { json } => {
            let tasks = NurseController::new(db)
                .pending_tasks()
                .context("Failed to read tasks")?;
            if json {
                return ui::print_json(&tasks);
            }
            if tasks.is_empty() {
                println!("No open tasks.");
            }
            for task in &tasks {
                println!(
                    "#{} [{}] {} ({})",
                    task.task_id().unwrap_or_default(),
                    task.priority(),
                    task.description(),
                    task.patient_name()
                );
            }
            Ok(())
        }
    }
}
