//! Domain operations over the statement executors.
//!
//! Each controller borrows a [`Database`] and follows the same shape:
//! check the rows it depends on, write (in one transaction when several rows
//! change together), mirror the write onto the in-memory value, and report
//! the outcome as `bool` / `Option` after logging it.

pub mod doctor;
pub mod nurse;
pub mod patient;
pub mod room;

pub use doctor::DoctorController;
pub use nurse::NurseController;
pub use patient::{PatientController, PatientSummary};
pub use room::RoomController;

use rusqlite::types::ToSql;
use tracing::error;

use crate::db::Database;
use crate::models::Person;

/// First row of a lookup, if the query ran and matched anything.
fn first<T>(rows: Option<Vec<T>>) -> Option<T> {
    rows.and_then(|rows| rows.into_iter().next())
}

/// Single integer column lookup (ids, counts).
fn lookup_i64(db: &Database, sql: &str, params: &[&dyn ToSql]) -> Option<i64> {
    first(db.query_map(sql, params, |row| row.get(0)))
}

/// Rebuild a `Person` from stored columns. Rows that no longer validate are
/// logged and skipped.
fn person_from_columns(full_name: &str, age: Option<i64>, gender: Option<String>) -> Option<Person> {
    let age = match u32::try_from(age.unwrap_or_default()) {
        Ok(age) => age,
        Err(_) => {
            error!(full_name, ?age, "stored age out of range");
            return None;
        }
    };

    match Person::new(full_name, age, gender.as_deref().unwrap_or_default()) {
        Ok(person) => Some(person),
        Err(err) => {
            error!(full_name, error = %err, "stored person failed validation");
            None
        }
    }
}
