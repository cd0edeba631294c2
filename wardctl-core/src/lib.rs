pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;

pub use config::{DatabaseConfig, LoggingConfig, WardConfig};
pub use controllers::{DoctorController, NurseController, PatientController, PatientSummary, RoomController};
pub use db::{Database, SqlOperation};
pub use error::{Result, WardError};
