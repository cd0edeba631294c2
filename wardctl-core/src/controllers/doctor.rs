//! Doctors and their appointments

use rusqlite::{params, Row};
use tracing::{error, info, warn};

use super::{first, lookup_i64, person_from_columns, PatientController};
use crate::db::{timestamp_column, Database};
use crate::models::{format_timestamp, Appointment, Department, Doctor, Employee, Patient};

const APPOINTMENT_QUERY: &str = "
    SELECT a.appointment_id, a.description, a.date_time, a.appointment_type,
           p.full_name, d.full_name, a.is_completed
    FROM appointments a
    JOIN patients p ON p.id = a.patient_id
    JOIN doctors d ON d.id = a.doctor_id";

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment::from_row(
        row.get(0)?,
        row.get(1)?,
        timestamp_column(row, 2, "date_time")?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

pub struct DoctorController<'a> {
    db: &'a Database,
}

impl<'a> DoctorController<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn add_doctor(&self, doctor: &Doctor) -> bool {
        let name = doctor.full_name();
        if self.find_doctor_id_by_name(name).is_some() {
            warn!(doctor = name, "doctor already exists");
            return false;
        }

        let employee = doctor.employee();
        let person = employee.person();
        let inserted = self.db.insert(
            "INSERT INTO doctors (work_id, full_name, age, gender, department, specialization)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                employee.work_id(),
                name,
                person.age(),
                person.gender(),
                employee.department(),
                doctor.specialization()
            ],
        );

        if inserted.is_some() {
            info!(doctor = name, work_id = employee.work_id(), "doctor added");
        }
        inserted.is_some()
    }

    pub fn find_doctor_id_by_name(&self, full_name: &str) -> Option<i64> {
        lookup_i64(self.db, "SELECT id FROM doctors WHERE full_name = ?1", params![full_name])
    }

    /// Rebuild a doctor along with the appointments still open.
    pub fn find_doctor(&self, full_name: &str) -> Option<Doctor> {
        let row = first(self.db.query_map(
            "SELECT work_id, full_name, age, gender, department, specialization
             FROM doctors WHERE full_name = ?1",
            params![full_name],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<Department>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        ));
        let Some((work_id, name, age, gender, department, specialization)) = row else {
            warn!(doctor = full_name, "doctor not found");
            return None;
        };

        let person = person_from_columns(&name, age, gender)?;
        let employee = Employee::new(person, work_id, department.unwrap_or(Department::Doctor));
        let mut doctor = match Doctor::new(employee, &specialization) {
            Ok(doctor) => doctor,
            Err(err) => {
                error!(doctor = full_name, error = %err, "stored doctor failed validation");
                return None;
            }
        };

        let sql = format!("{APPOINTMENT_QUERY} WHERE d.full_name = ?1 AND a.is_completed = 0 ORDER BY a.appointment_id");
        for appointment in self.db.query_map(&sql, params![full_name], appointment_from_row)? {
            doctor.assign_appointment(appointment);
        }
        Some(doctor)
    }

    /// Delete the doctor row. Fails while appointments reference it.
    pub fn remove_doctor(&self, doctor: &Doctor) -> bool {
        let name = doctor.full_name();
        match self.db.execute("DELETE FROM doctors WHERE full_name = ?1", params![name]) {
            Some(0) => {
                warn!(doctor = name, "doctor not found");
                false
            }
            Some(_) => {
                info!(doctor = name, "doctor removed");
                true
            }
            None => false,
        }
    }

    /// Book an appointment for an existing doctor and patient.
    pub fn create_appointment(&self, doctor: &mut Doctor, mut appointment: Appointment) -> bool {
        let Some(doctor_id) = self.find_doctor_id_by_name(doctor.full_name()) else {
            warn!(doctor = doctor.full_name(), "doctor not found");
            return false;
        };
        let Some(patient_id) = PatientController::new(self.db).find_patient_id_by_name(appointment.patient_name()) else {
            warn!(patient = appointment.patient_name(), "patient not found");
            return false;
        };

        let inserted = self.db.insert(
            "INSERT INTO appointments (description, date_time, appointment_type, patient_id, doctor_id, is_completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                appointment.description(),
                format_timestamp(appointment.date_time()),
                appointment.appointment_type(),
                patient_id,
                doctor_id,
                appointment.is_completed()
            ],
        );
        let Some(id) = inserted else {
            return false;
        };

        appointment.set_appointment_id(id);
        appointment.set_doctor(doctor.full_name());
        info!(
            doctor = doctor.full_name(),
            patient = appointment.patient_name(),
            appointment_id = id,
            "appointment created"
        );
        doctor.assign_appointment(appointment);
        true
    }

    /// Complete the most recently booked open appointment. Appointments
    /// already completed elsewhere are dropped and the next one is tried.
    pub fn perform_duty(&self, doctor: &mut Doctor) -> bool {
        while let Some(appointment) = doctor.appointments().last() {
            let Some(id) = appointment.appointment_id() else {
                error!(doctor = doctor.full_name(), "appointment was never stored");
                return false;
            };

            match self.db.execute(
                "UPDATE appointments SET is_completed = 1 WHERE appointment_id = ?1 AND is_completed = 0",
                params![id],
            ) {
                Some(0) => {
                    warn!(appointment_id = id, "appointment not found or already completed, skipping");
                    doctor.perform_duty();
                }
                Some(_) => {
                    if let Some(mut done) = doctor.perform_duty() {
                        done.mark_completed();
                        info!(
                            doctor = doctor.full_name(),
                            appointment_id = id,
                            description = done.description(),
                            "appointment completed"
                        );
                    }
                    return true;
                }
                None => return false,
            }
        }

        warn!(doctor = doctor.full_name(), "no upcoming appointments");
        false
    }

    /// Record a prescription on a stored patient.
    pub fn prescribe(&self, patient: &mut Patient, entry: &str) -> bool {
        let patients = PatientController::new(self.db);
        if patients.find_patient_id_by_name(patient.full_name()).is_none() {
            warn!(patient = patient.full_name(), "patient not found");
            return false;
        }
        patients.provide_treatment(patient, entry)
    }

    /// Every appointment of the doctor, completed ones included.
    pub fn appointments_for(&self, full_name: &str) -> Option<Vec<Appointment>> {
        let sql = format!("{APPOINTMENT_QUERY} WHERE d.full_name = ?1 ORDER BY a.date_time, a.appointment_id");
        self.db.query_map(&sql, params![full_name], appointment_from_row)
    }
}
