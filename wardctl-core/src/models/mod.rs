//! Domain values held in memory and mirrored into SQLite rows.

mod labels;

pub mod appointment;
pub mod medical_history;
pub mod patient;
pub mod payment;
pub mod person;
pub mod room;
pub mod shift;
pub mod staff;
pub mod task;
pub mod validation;

pub use appointment::{Appointment, AppointmentType};
pub use medical_history::{format_timestamp, parse_timestamp, MedicalHistoryEntry, TIMESTAMP_FORMAT};
pub use patient::{AdmissionStatus, Condition, Patient, PatientDetails, PatientKind, PatientType};
pub use payment::Card;
pub use person::{Displayable, Identifiable, Person};
pub use room::{Room, RoomType, MIN_DAILY_RATE};
pub use shift::{Shift, ShiftType};
pub use staff::{Department, Doctor, Employee, Nurse};
pub use task::Task;
pub use validation::ValidationError;
