//! Command implementations for wardctl CLI

pub mod doctor;
pub mod nurse;
pub mod patient;
pub mod room;
pub mod task;

// Re-export main dispatcher functions for flat access from main.rs
pub use doctor::run_doctor;
pub use nurse::run_nurse;
pub use patient::run_patient;
pub use room::run_room;
pub use task::run_task;

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use wardctl_core::models::{Department, Employee, Person};

/// Accepts `2026-05-04 08:00`, `2026-05-04 08:00:00` or `2026-05-04T08:00:00`.
pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| format!("expected 'YYYY-MM-DD HH:MM', got '{raw}'"))
}

/// Fields shared by `doctor add` and `nurse add`.
#[derive(Args, Debug)]
pub struct StaffArgs {
    /// Full name
    pub name: String,

    #[arg(long)]
    pub age: u32,

    #[arg(long, default_value = "")]
    pub gender: String,

    /// Hospital work id
    #[arg(long)]
    pub work_id: i64,
}

impl StaffArgs {
    pub(crate) fn employee(&self, department: Department) -> Result<Employee> {
        let person = Person::new(&self.name, self.age, &self.gender)?;
        Ok(Employee::new(person, self.work_id, department))
    }
}
