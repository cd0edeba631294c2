//! Doctor appointments

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::validation::non_empty;
use super::ValidationError;

labelled_enum! {
    pub enum AppointmentType as "appointment type" {
        Surgery => "Surgery",
        Consultation => "Consultation",
        Visit => "Visit",
        Procedure => "Procedure",
    }
}

/// An appointment between a doctor and a patient, referenced by name.
///
/// `appointment_id` is `None` until the row has been inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    appointment_id: Option<i64>,
    description: String,
    date_time: NaiveDateTime,
    appointment_type: AppointmentType,
    patient_name: String,
    doctor_name: Option<String>,
    notes: Vec<String>,
    is_completed: bool,
}

impl Appointment {
    pub fn new(
        description: &str,
        date_time: NaiveDateTime,
        appointment_type: AppointmentType,
        patient_name: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            appointment_id: None,
            description: non_empty("description", description)?,
            date_time,
            appointment_type,
            patient_name: non_empty("patient name", patient_name)?,
            doctor_name: None,
            notes: Vec::new(),
            is_completed: false,
        })
    }

    pub(crate) fn from_row(
        appointment_id: i64,
        description: String,
        date_time: NaiveDateTime,
        appointment_type: AppointmentType,
        patient_name: String,
        doctor_name: String,
        is_completed: bool,
    ) -> Self {
        Self {
            appointment_id: Some(appointment_id),
            description,
            date_time,
            appointment_type,
            patient_name,
            doctor_name: Some(doctor_name),
            notes: Vec::new(),
            is_completed,
        }
    }

    pub fn appointment_id(&self) -> Option<i64> {
        self.appointment_id
    }

    pub(crate) fn set_appointment_id(&mut self, id: i64) {
        self.appointment_id = Some(id);
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    pub fn appointment_type(&self) -> AppointmentType {
        self.appointment_type
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn doctor_name(&self) -> Option<&str> {
        self.doctor_name.as_deref()
    }

    pub fn set_doctor(&mut self, doctor_name: &str) {
        self.doctor_name = Some(doctor_name.to_owned());
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn mark_completed(&mut self) {
        self.is_completed = true;
    }
}
