//! Patient rows: the `patients` base row plus one `inpatients` or
//! `outpatients` row keyed by full name.

use chrono::{Local, NaiveDate};
use rusqlite::params;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::room::{room_from_row, RoomController};
use super::{first, lookup_i64, person_from_columns};
use crate::db::{timestamp_column, values, Database, SqlOperation};
use crate::models::{
    format_timestamp, AdmissionStatus, Card, Condition, Identifiable, MedicalHistoryEntry, Patient,
    PatientDetails, PatientType, MIN_DAILY_RATE,
};

/// Smallest amount accepted by `deposit` / `charge`.
pub const MIN_TRANSACTION: f64 = MIN_DAILY_RATE;

/// One line of the patient listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub id: i64,
    pub full_name: String,
    pub age: Option<i64>,
    pub patient_type: PatientType,
    pub condition: Option<Condition>,
    pub admission_status: Option<AdmissionStatus>,
    pub room_number: Option<i64>,
}

struct PatientRow {
    full_name: String,
    age: Option<i64>,
    gender: Option<String>,
    details: PatientDetails,
    condition: Option<Condition>,
    admission_status: Option<AdmissionStatus>,
    patient_type: PatientType,
}

pub struct PatientController<'a> {
    db: &'a Database,
}

impl<'a> PatientController<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a patient. Inpatients bring their room along: it is created
    /// if missing, in the same transaction as both patient rows.
    pub fn add_patient(&self, patient: &Patient) -> bool {
        let name = patient.full_name();
        if self.find_patient_id_by_name(name).is_some() {
            warn!(patient = name, "patient already exists");
            return false;
        }

        let person = patient.person();
        let details = patient.details();
        let patient_type = patient.patient_type();
        let mut ops = Vec::with_capacity(3);

        if let Some(room) = patient.room() {
            ops.push(SqlOperation::new(
                "INSERT OR IGNORE INTO rooms (room_number, room_type, daily_rate, capacity, is_occupied)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                values![
                    room.room_number(),
                    room.room_type(),
                    room.daily_rate(),
                    i64::from(room.capacity()),
                    room.is_occupied()
                ],
            ));
        }

        ops.push(SqlOperation::new(
            "INSERT INTO patients (full_name, age, gender, contact_info, personal_number, insurance,
                                   condition, admission_status, patient_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            values![
                name.to_owned(),
                i64::from(person.age()),
                person.gender().to_owned(),
                details.contact_info.clone(),
                details.personal_number.clone(),
                details.insurance.clone(),
                patient.condition(),
                patient.admission_status(),
                patient_type
            ],
        ));

        let mut subtype = values![
            patient.unique_identifier(),
            name.to_owned(),
            i64::from(person.age()),
            person.gender().to_owned(),
            details.contact_info.clone(),
            details.personal_number.clone(),
            details.insurance.clone(),
            patient.condition(),
            patient.admission_status()
        ];
        let subtype_sql = match patient.room() {
            Some(room) => {
                subtype.push(room.room_number().into());
                "INSERT INTO inpatients (unique_identifier, full_name, age, gender, contact_info,
                                         personal_number, insurance, condition, admission_status, room_number)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            }
            None => {
                "INSERT INTO outpatients (unique_identifier, full_name, age, gender, contact_info,
                                          personal_number, insurance, condition, admission_status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            }
        };
        ops.push(SqlOperation::new(subtype_sql, subtype));

        let added = self.db.run_transaction(&ops);
        if added {
            info!(patient = name, patient_type = %patient_type, "patient added");
        }
        added
    }

    pub fn find_patient_id_by_name(&self, full_name: &str) -> Option<i64> {
        let id = lookup_i64(
            self.db,
            "SELECT id FROM patients WHERE full_name = ?1",
            params![full_name],
        );
        if id.is_none() {
            debug!(patient = full_name, "no patient row");
        }
        id
    }

    /// Rebuild a patient from its rows, medical history included.
    pub fn find_patient(&self, full_name: &str) -> Option<Patient> {
        let row = first(self.db.query_map(
            "SELECT full_name, age, gender, contact_info, personal_number, insurance,
                    condition, admission_status, patient_type
             FROM patients WHERE full_name = ?1",
            params![full_name],
            |row| {
                Ok(PatientRow {
                    full_name: row.get(0)?,
                    age: row.get(1)?,
                    gender: row.get(2)?,
                    details: PatientDetails {
                        contact_info: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        personal_number: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                        insurance: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    },
                    condition: row.get(6)?,
                    admission_status: row.get(7)?,
                    patient_type: row.get(8)?,
                })
            },
        ));
        let Some(row) = row else {
            warn!(patient = full_name, "patient not found");
            return None;
        };

        let person = person_from_columns(&row.full_name, row.age, row.gender)?;
        let condition = row.condition.unwrap_or(Condition::Unknown);
        let mut patient = match row.patient_type {
            PatientType::Inpatient => {
                let room = first(self.db.query_map(
                    "SELECT r.room_number, r.room_type, r.daily_rate, r.is_occupied
                     FROM inpatients i JOIN rooms r ON r.room_number = i.room_number
                     WHERE i.full_name = ?1",
                    params![full_name],
                    room_from_row,
                ));
                let Some(room) = room else {
                    error!(patient = full_name, "inpatient has no room row");
                    return None;
                };
                Patient::inpatient(person, row.details, condition, room)
            }
            PatientType::Outpatient => Patient::outpatient(person, row.details, condition),
        };
        if let Some(status) = row.admission_status {
            patient.set_admission_status(status);
        }

        let history = self.medical_history(full_name)?;
        patient.set_medical_history(history.into_iter().map(|entry| entry.entry).collect());
        Some(patient)
    }

    pub fn list_patients(&self) -> Option<Vec<PatientSummary>> {
        self.db.query_map(
            "SELECT p.id, p.full_name, p.age, p.patient_type, p.condition, p.admission_status, i.room_number
             FROM patients p LEFT JOIN inpatients i ON i.full_name = p.full_name
             ORDER BY p.id",
            params![],
            |row| {
                Ok(PatientSummary {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    age: row.get(2)?,
                    patient_type: row.get(3)?,
                    condition: row.get(4)?,
                    admission_status: row.get(5)?,
                    room_number: row.get(6)?,
                })
            },
        )
    }

    /// Admit the patient. An inpatient is refused when the room already
    /// holds as many admitted inpatients as it has beds.
    pub fn admit_patient(&self, patient: &mut Patient) -> bool {
        let name = patient.full_name().to_owned();
        let Some(id) = self.stored_id(patient, "admit") else {
            return false;
        };

        let patient_type = patient.patient_type();
        let status = AdmissionStatus::Admitted;
        let mut ops = status_updates(id, &name, patient_type, status);

        if let Some(room) = patient.room() {
            let number = room.room_number();
            let beds = first(self.db.query_map(
                "SELECT r.capacity,
                        (SELECT COUNT(*) FROM inpatients i
                         WHERE i.room_number = r.room_number
                           AND i.admission_status = 'Admitted'
                           AND i.full_name <> ?2)
                 FROM rooms r WHERE r.room_number = ?1",
                params![number, name],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            ));
            let Some((capacity, admitted)) = beds else {
                warn!(patient = %name, room = number, "room not found");
                return false;
            };
            if admitted >= capacity {
                warn!(patient = %name, room = number, capacity, "room is full");
                return false;
            }

            ops.push(SqlOperation::new(
                "UPDATE rooms SET is_occupied = 1 WHERE room_number = ?1",
                values![number],
            ));
        }

        if !self.db.run_transaction(&ops) {
            return false;
        }

        patient.admit();
        if let Some(room) = patient.room_mut() {
            room.set_occupied(true);
        }
        info!(patient = %name, "patient admitted");
        true
    }

    /// Discharge the patient and recompute the room's occupied flag. Rows are
    /// kept.
    pub fn discharge_patient(&self, patient: &mut Patient) -> bool {
        let name = patient.full_name().to_owned();
        let Some(id) = self.stored_id(patient, "discharge") else {
            return false;
        };

        let mut ops = status_updates(id, &name, patient.patient_type(), AdmissionStatus::Discharged);
        let room_number = patient.room().map(|room| room.room_number());
        if let Some(number) = room_number {
            ops.push(recompute_occupancy(number));
        }

        if !self.db.run_transaction(&ops) {
            return false;
        }

        patient.discharge();
        self.refresh_room(patient, room_number);
        info!(patient = %name, "patient discharged");
        true
    }

    /// Delete both patient rows and free the room. Clinical rows that still
    /// reference the patient make the delete fail and nothing changes.
    pub fn remove_patient(&self, patient: &mut Patient) -> bool {
        let name = patient.full_name().to_owned();
        let Some(id) = self.stored_id(patient, "remove") else {
            return false;
        };

        let table = patient.patient_type().table();
        let mut ops = vec![SqlOperation::new(
            format!("DELETE FROM {table} WHERE full_name = ?1"),
            values![name.clone()],
        )];
        let room_number = patient.room().map(|room| room.room_number());
        if let Some(number) = room_number {
            ops.push(recompute_occupancy(number));
        }
        ops.push(SqlOperation::new("DELETE FROM patients WHERE id = ?1", values![id]));

        if !self.db.run_transaction(&ops) {
            error!(patient = %name, "patient still referenced, nothing removed");
            return false;
        }

        patient.discharge();
        self.refresh_room(patient, room_number);
        info!(patient = %name, "patient removed");
        true
    }

    /// Append a timestamped entry to the patient's history.
    pub fn add_medical_history(&self, patient: &mut Patient, entry: &str) -> bool {
        let entry = entry.trim();
        if entry.is_empty() {
            error!(patient = patient.full_name(), "empty medical history entry");
            return false;
        }
        let Some(id) = self.find_patient_id_by_name(patient.full_name()) else {
            warn!(patient = patient.full_name(), "cannot record history for unknown patient");
            return false;
        };

        let now = format_timestamp(Local::now().naive_local());
        let inserted = self.db.insert(
            "INSERT INTO medical_history (patient_id, entry, date_added) VALUES (?1, ?2, ?3)",
            params![id, entry, now],
        );
        if inserted.is_none() {
            return false;
        }

        patient.add_medical_history(entry);
        info!(patient = patient.full_name(), "medical history updated");
        true
    }

    /// History entries in insertion order.
    pub fn medical_history(&self, full_name: &str) -> Option<Vec<MedicalHistoryEntry>> {
        self.db.query_map(
            "SELECT h.id, h.patient_id, h.entry, h.date_added
             FROM medical_history h JOIN patients p ON p.id = h.patient_id
             WHERE p.full_name = ?1
             ORDER BY h.id",
            params![full_name],
            |row| {
                Ok(MedicalHistoryEntry {
                    id: row.get(0)?,
                    patient_id: row.get(1)?,
                    entry: row.get(2)?,
                    date_added: timestamp_column(row, 3, "date_added")?,
                })
            },
        )
    }

    pub fn provide_treatment(&self, patient: &mut Patient, treatment: &str) -> bool {
        let treatment = treatment.trim();
        if treatment.is_empty() {
            error!(patient = patient.full_name(), "empty treatment");
            return false;
        }
        patient.add_prescription(treatment);
        info!(patient = patient.full_name(), treatment, "treatment provided");
        true
    }

    pub fn add_card(
        &self,
        patient: &mut Patient,
        card_holder: &str,
        card_number: &str,
        expiration_date: NaiveDate,
        cvv: &str,
    ) -> bool {
        match Card::new(card_holder, card_number, expiration_date, cvv) {
            Ok(card) => {
                info!(patient = patient.full_name(), card = %card.masked_number(), "card added");
                patient.add_payment_method(card);
                true
            }
            Err(err) => {
                error!(patient = patient.full_name(), error = %err, "card rejected");
                false
            }
        }
    }

    /// Credit the balance. Needs a card on file.
    pub fn deposit(&self, patient: &mut Patient, amount: f64) -> bool {
        if !valid_amount(amount) {
            error!(patient = patient.full_name(), amount, "deposit below minimum");
            return false;
        }
        if patient.cards().is_empty() {
            error!(patient = patient.full_name(), "no payment method on file");
            return false;
        }
        patient.deposit(amount);
        info!(patient = patient.full_name(), amount, balance = patient.balance(), "deposit");
        true
    }

    pub fn charge(&self, patient: &mut Patient, amount: f64) -> bool {
        if !valid_amount(amount) {
            error!(patient = patient.full_name(), amount, "charge below minimum");
            return false;
        }
        patient.charge(amount);
        info!(patient = patient.full_name(), amount, balance = patient.balance(), "charge");
        true
    }

    /// Base-table id of `patient`, provided the stored row is of the same
    /// patient type as the in-memory value.
    fn stored_id(&self, patient: &Patient, action: &str) -> Option<i64> {
        let name = patient.full_name();
        let row = first(self.db.query_map(
            "SELECT id, patient_type FROM patients WHERE full_name = ?1",
            params![name],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, PatientType>(1)?)),
        ));
        let Some((id, stored)) = row else {
            warn!(patient = name, action, "unknown patient");
            return None;
        };
        if stored != patient.patient_type() {
            error!(
                patient = name,
                action,
                stored = %stored,
                expected = %patient.patient_type(),
                "patient type mismatch"
            );
            return None;
        }
        Some(id)
    }

    fn refresh_room(&self, patient: &mut Patient, room_number: Option<i64>) {
        let Some(number) = room_number else {
            return;
        };
        let occupied = RoomController::new(self.db)
            .get_room(number)
            .map(|room| room.is_occupied());
        if let (Some(room), Some(occupied)) = (patient.room_mut(), occupied) {
            room.set_occupied(occupied);
        }
    }
}

fn valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= MIN_TRANSACTION
}

/// Set the status on the base row and on the subtype row.
fn status_updates(id: i64, full_name: &str, patient_type: PatientType, status: AdmissionStatus) -> Vec<SqlOperation> {
    vec![
        SqlOperation::new(
            "UPDATE patients SET admission_status = ?1 WHERE id = ?2",
            values![status, id],
        ),
        SqlOperation::new(
            format!(
                "UPDATE {} SET admission_status = ?1 WHERE full_name = ?2",
                patient_type.table()
            ),
            values![status, full_name.to_owned()],
        ),
    ]
}

/// A room is occupied while at least one admitted inpatient remains in it.
fn recompute_occupancy(room_number: i64) -> SqlOperation {
    SqlOperation::new(
        "UPDATE rooms SET is_occupied = EXISTS(
             SELECT 1 FROM inpatients WHERE room_number = ?1 AND admission_status = 'Admitted'
         ) WHERE room_number = ?1",
        values![room_number],
    )
}
