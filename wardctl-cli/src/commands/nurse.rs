//! Nurse command - staff records, ward tasks and shifts

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use wardctl_core::models::{Department, Displayable, Identifiable, Nurse, Shift, ShiftType, Task};
use wardctl_core::{Database, NurseController};

use super::{parse_datetime, StaffArgs};
use crate::ui;

#[derive(Parser, Debug)]
#[command(about = "Manage nurses, ward tasks and shifts")]
pub struct NurseArgs {
    #[command(subcommand)]
    pub command: NurseCommands,
}

#[derive(Subcommand, Debug)]
pub enum NurseCommands {
    /// Add a nurse
    Add {
        #[command(flatten)]
        staff: StaffArgs,
    },
    /// Show a nurse with the open task queue
    Show {
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a nurse
    Remove { name: String },
    /// Queue a task against a registered patient
    AssignTask {
        /// Nurse's full name
        nurse: String,
        #[arg(long)]
        patient: String,
        /// 0 is most urgent
        #[arg(long, default_value_t = 1)]
        priority: i64,
        #[arg(long)]
        description: String,
    },
    /// Complete the most urgent open task
    PerformTask { nurse: String },
    /// Schedule a shift
    AddShift {
        /// Nurse's full name
        nurse: String,
        #[arg(long, value_parser = parse_datetime)]
        start: NaiveDateTime,
        #[arg(long, value_parser = parse_datetime)]
        end: NaiveDateTime,
        /// Night, Day or Special
        #[arg(long = "type", default_value = "Day")]
        shift_type: ShiftType,
    },
}

pub fn run_nurse(args: NurseArgs, db: &Database) -> Result<()> {
    let nurses = NurseController::new(db);

    match args.command {
        NurseCommands::Add { staff } => {
            let nurse = Nurse::new(staff.employee(Department::Nurse)?);
            ui::outcome(
                nurses.add_nurse(&nurse),
                format!("Added nurse {} ({})", nurse.full_name(), nurse.unique_identifier()),
                format!("add nurse '{}'", nurse.full_name()),
            )
        }
        NurseCommands::Show { name, json } => {
            let nurse = load(&nurses, &name)?;
            if json {
                return ui::print_json(&nurse);
            }
            println!("{}", nurse.display_info());
            for task in nurse.assigned_tasks() {
                println!("  - [{}] {} ({})", task.priority(), task.description(), task.patient_name());
            }
            Ok(())
        }
        NurseCommands::Remove { name } => {
            let nurse = load(&nurses, &name)?;
            ui::outcome(
                nurses.remove_nurse(&nurse),
                format!("Removed nurse {name}"),
                format!("remove nurse '{name}'"),
            )
        }
        NurseCommands::AssignTask {
            nurse,
            patient,
            priority,
            description,
        } => {
            let mut n = load(&nurses, &nurse)?;
            let task = Task::new(&description, &patient, priority)?;
            ui::outcome(
                nurses.assign_task(&mut n, task),
                format!("Queued '{description}' for {patient} (priority {priority})"),
                format!("assign task for '{patient}'"),
            )
        }
        NurseCommands::PerformTask { nurse } => {
            let mut n = load(&nurses, &nurse)?;
            let next = n
                .most_urgent_task()
                .map(|idx| n.assigned_tasks()[idx].description().to_string())
                .unwrap_or_default();
            ui::outcome(
                nurses.perform_task(&mut n),
                format!("{nurse} completed: {next}"),
                format!("perform task for '{nurse}'"),
            )
        }
        NurseCommands::AddShift {
            nurse,
            start,
            end,
            shift_type,
        } => {
            anyhow::ensure!(end > start, "Shift must end after it starts");
            let mut n = load(&nurses, &nurse)?;
            ui::outcome(
                nurses.add_shift(&mut n, Shift::new(start, end, shift_type)),
                format!("Scheduled {shift_type} shift for {nurse}: {start} - {end}"),
                format!("add shift for '{nurse}'"),
            )
        }
    }
}

fn load(nurses: &NurseController<'_>, name: &str) -> Result<Nurse> {
    nurses
        .find_nurse(name)
        .with_context(|| format!("Nurse '{name}' not found"))
}
