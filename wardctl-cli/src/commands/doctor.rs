//! Doctor command - staff records and appointments

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use wardctl_core::models::{Appointment, AppointmentType, Department, Displayable, Doctor, Identifiable};
use wardctl_core::{Database, DoctorController};

use super::{parse_datetime, StaffArgs};
use crate::ui;

#[derive(Parser, Debug)]
#[command(about = "Manage doctors and their appointments")]
pub struct DoctorArgs {
    #[command(subcommand)]
    pub command: DoctorCommands,
}

#[derive(Subcommand, Debug)]
pub enum DoctorCommands {
    /// Add a doctor
    Add {
        #[command(flatten)]
        staff: StaffArgs,
        #[arg(long)]
        specialization: String,
    },
    /// Show a doctor with open appointments
    Show {
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a doctor (refused while appointments reference them)
    Remove { name: String },
    /// Book an appointment with a registered patient
    Appoint {
        /// Doctor's full name
        doctor: String,
        #[arg(long)]
        patient: String,
        /// Date and time, e.g. "2026-05-04 09:30"
        #[arg(long, value_parser = parse_datetime)]
        at: NaiveDateTime,
        /// Surgery, Consultation, Visit or Procedure
        #[arg(long = "type", default_value = "Consultation")]
        appointment_type: AppointmentType,
        #[arg(long)]
        description: String,
    },
    /// Complete the most recently booked open appointment
    PerformDuty { doctor: String },
    /// List every appointment of a doctor
    Appointments {
        doctor: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run_doctor(args: DoctorArgs, db: &Database) -> Result<()> {
    let doctors = DoctorController::new(db);

    match args.command {
        DoctorCommands::Add { staff, specialization } => {
            let doctor = Doctor::new(staff.employee(Department::Doctor)?, &specialization)?;
            ui::outcome(
                doctors.add_doctor(&doctor),
                format!("Added doctor {} ({})", doctor.full_name(), doctor.unique_identifier()),
                format!("add doctor '{}'", doctor.full_name()),
            )
        }
        DoctorCommands::Show { name, json } => {
            let doctor = load(&doctors, &name)?;
            if json {
                return ui::print_json(&doctor);
            }
            println!("{}", doctor.display_info());
            for appt in doctor.appointments() {
                println!(
                    "  - {} {} with {}: {}",
                    appt.date_time(),
                    appt.appointment_type(),
                    appt.patient_name(),
                    appt.description()
                );
            }
            Ok(())
        }
        DoctorCommands::Remove { name } => {
            let doctor = load(&doctors, &name)?;
            ui::outcome(
                doctors.remove_doctor(&doctor),
                format!("Removed doctor {name}"),
                format!("remove doctor '{name}'"),
            )
        }
        DoctorCommands::Appoint {
            doctor,
            patient,
            at,
            appointment_type,
            description,
        } => {
            let mut doc = load(&doctors, &doctor)?;
            let appointment = Appointment::new(&description, at, appointment_type, &patient)?;
            ui::outcome(
                doctors.create_appointment(&mut doc, appointment),
                format!("Booked {appointment_type} for {patient} with {doctor} at {at}"),
                format!("book appointment for '{patient}'"),
            )
        }
        DoctorCommands::PerformDuty { doctor } => {
            let mut doc = load(&doctors, &doctor)?;
            let next = doc
                .appointments()
                .last()
                .map(|a| a.description().to_string())
                .unwrap_or_default();
            ui::outcome(
                doctors.perform_duty(&mut doc),
                format!("{doctor} completed: {next}"),
                format!("perform duty for '{doctor}'"),
            )
        }
        DoctorCommands::Appointments { doctor, json } => {
            let appts = doctors
                .appointments_for(&doctor)
                .context("Failed to read appointments")?;
            if json {
                return ui::print_json(&appts);
            }
            for appt in &appts {
                let mark = if appt.is_completed() { "x" } else { " " };
                println!(
                    "[{mark}] #{} {} {} with {}: {}",
                    appt.appointment_id().unwrap_or_default(),
                    appt.date_time(),
                    appt.appointment_type(),
                    appt.patient_name(),
                    appt.description()
                );
            }
            Ok(())
        }
    }
}

fn load(doctors: &DoctorController<'_>, name: &str) -> Result<Doctor> {
    doctors
        .find_doctor(name)
        .with_context(|| format!("Doctor '{name}' not found"))
}
