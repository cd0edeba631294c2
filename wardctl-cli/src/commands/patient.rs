//! Patient command - registration, admission and medical history

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use wardctl_core::models::{
    Condition, Displayable, Identifiable, Patient, PatientDetails, Person, Room, RoomType, MIN_DAILY_RATE,
};
use wardctl_core::{Database, PatientController, RoomController};

use crate::ui;

#[derive(Parser, Debug)]
#[command(about = "Manage patients")]
pub struct PatientArgs {
    #[command(subcommand)]
    pub command: PatientCommands,
}

#[derive(Subcommand, Debug)]
pub enum PatientCommands {
    /// Register a patient (inpatient when --room is given)
    Add(AddArgs),
    /// Show a patient with medical history
    Show {
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all patients
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Admit a patient (inpatients take a bed in their room)
    Admit { name: String },
    /// Discharge a patient, freeing the bed
    Discharge { name: String },
    /// Delete a patient (refused while clinical records reference them)
    Remove { name: String },
    /// Show medical history entries
    History {
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Append a medical history entry
    Note { name: String, entry: String },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Full name (must be unique)
    pub name: String,

    #[arg(long)]
    pub age: u32,

    #[arg(long, default_value = "")]
    pub gender: String,

    #[arg(long, default_value = "Stable")]
    pub condition: Condition,

    #[arg(long, default_value = "")]
    pub contact: String,

    #[arg(long, default_value = "")]
    pub personal_number: String,

    #[arg(long, default_value = "")]
    pub insurance: String,

    /// Room number; makes the patient an inpatient
    #[arg(long)]
    pub room: Option<i64>,

    /// Type for a room that does not exist yet
    #[arg(long = "room-type", default_value = "Single", requires = "room")]
    pub room_type: RoomType,

    /// Daily rate for a room that does not exist yet
    #[arg(long = "room-rate", default_value_t = MIN_DAILY_RATE, requires = "room")]
    pub room_rate: f64,
}

pub fn run_patient(args: PatientArgs, db: &Database) -> Result<()> {
    let patients = PatientController::new(db);

    match args.command {
        PatientCommands::Add(add) => run_add(add, db, &patients),
        PatientCommands::Show { name, json } => {
            let patient = load(&patients, &name)?;
            if json {
                ui::print_json(&patient)
            } else {
                println!("{}", patient.display_info());
                println!("ID: {}", patient.unique_identifier());
                Ok(())
            }
        }
        PatientCommands::List { json } => {
            let all = patients.list_patients().context("Failed to read patients")?;
            if json {
                return ui::print_json(&all);
            }
            if all.is_empty() {
                println!("No patients.");
            }
            for p in &all {
                let room = p.room_number.map(|n| format!(" | Room: {n}")).unwrap_or_default();
                println!(
                    "{} | {} | {} | {}{}",
                    p.full_name,
                    p.patient_type,
                    p.condition.map(|c| c.to_string()).unwrap_or_default(),
                    p.admission_status.map(|s| s.to_string()).unwrap_or_default(),
                    room
                );
            }
            Ok(())
        }
        PatientCommands::Admit { name } => {
            let mut patient = load(&patients, &name)?;
            ui::outcome(
                patients.admit_patient(&mut patient),
                format!("Admitted {name}"),
                format!("admit patient '{name}'"),
            )
        }
        PatientCommands::Discharge { name } => {
            let mut patient = load(&patients, &name)?;
            ui::outcome(
                patients.discharge_patient(&mut patient),
                format!("Discharged {name}"),
                format!("discharge patient '{name}'"),
            )
        }
        PatientCommands::Remove { name } => {
            let mut patient = load(&patients, &name)?;
            ui::outcome(
                patients.remove_patient(&mut patient),
                format!("Removed {name}"),
                format!("remove patient '{name}'"),
            )
        }
        PatientCommands::History { name, json } => {
            let entries = patients
                .medical_history(&name)
                .context("Failed to read medical history")?;
            if json {
                return ui::print_json(&entries);
            }
            for entry in &entries {
                println!("{}  {}", entry.date_added, entry.entry);
            }
            Ok(())
        }
        PatientCommands::Note { name, entry } => {
            let mut patient = load(&patients, &name)?;
            ui::outcome(
                patients.add_medical_history(&mut patient, &entry),
                format!("Recorded history for {name}"),
                format!("record history for '{name}'"),
            )
        }
    }
}

fn load(patients: &PatientController<'_>, name: &str) -> Result<Patient> {
    patients
        .find_patient(name)
        .with_context(|| format!("Patient '{name}' not found"))
}

fn run_add(add: AddArgs, db: &Database, patients: &PatientController<'_>) -> Result<()> {
    let person = Person::new(&add.name, add.age, &add.gender)?;
    let details = PatientDetails {
        contact_info: add.contact,
        personal_number: add.personal_number,
        insurance: add.insurance,
    };

    let patient = match add.room {
        Some(number) => {
            let existing = RoomController::new(db)
                .list_rooms()
                .context("Failed to read rooms")?
                .into_iter()
                .find(|room| room.room_number() == number);
            let room = match existing {
                Some(room) => room,
                None => Room::new(number, add.room_type, add.room_rate)?,
            };
            Patient::inpatient(person, details, add.condition, room)
        }
        None => Patient::outpatient(person, details, add.condition),
    };

    ui::outcome(
        patients.add_patient(&patient),
        format!("Added {} {} ({})", patient.patient_type(), patient.full_name(), patient.unique_identifier()),
        format!("add patient '{}'", patient.full_name()),
    )
}
