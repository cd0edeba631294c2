//! Nurses, the ward task queue and shifts

use rusqlite::{params, Row};
use tracing::{error, info, warn};

use super::{first, lookup_i64, person_from_columns, PatientController};
use crate::db::{timestamp_column, Database};
use crate::models::{format_timestamp, Department, Employee, Nurse, Shift, Task};

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task::from_row(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn shift_from_row(row: &Row<'_>) -> rusqlite::Result<Shift> {
    let mut shift = Shift::new(
        timestamp_column(row, 1, "start_date_time")?,
        timestamp_column(row, 2, "end_date_time")?,
        row.get(3)?,
    );
    shift.set_shift_id(row.get(0)?);
    Ok(shift)
}

pub struct NurseController<'a> {
    db: &'a Database,
}

impl<'a> NurseController<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn add_nurse(&self, nurse: &Nurse) -> bool {
        let name = nurse.full_name();
        if self.find_nurse_id_by_name(name).is_some() {
            warn!(nurse = name, "nurse already exists");
            return false;
        }

        let employee = nurse.employee();
        let person = employee.person();
        let inserted = self.db.insert(
            "INSERT INTO nurses (work_id, full_name, age, gender, department) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                employee.work_id(),
                name,
                person.age(),
                person.gender(),
                employee.department()
            ],
        );

        if inserted.is_some() {
            info!(nurse = name, work_id = employee.work_id(), "nurse added");
        }
        inserted.is_some()
    }

    pub fn find_nurse_id_by_name(&self, full_name: &str) -> Option<i64> {
        lookup_i64(self.db, "SELECT id FROM nurses WHERE full_name = ?1", params![full_name])
    }

    /// Rebuild a nurse. Tasks have no owner column, so the nurse picks up the
    /// open ward queue.
    pub fn find_nurse(&self, full_name: &str) -> Option<Nurse> {
        let row = first(self.db.query_map(
            "SELECT work_id, full_name, age, gender, department FROM nurses WHERE full_name = ?1",
            params![full_name],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<Department>>(4)?,
                ))
            },
        ));
        let Some((work_id, name, age, gender, department)) = row else {
            warn!(nurse = full_name, "nurse not found");
            return None;
        };

        let person = person_from_columns(&name, age, gender)?;
        let mut nurse = Nurse::new(Employee::new(person, work_id, department.unwrap_or(Department::Nurse)));
        for task in self.pending_tasks()? {
            nurse.assign_task(task);
        }
        Some(nurse)
    }

    pub fn remove_nurse(&self, nurse: &Nurse) -> bool {
        let name = nurse.full_name();
        match self.db.execute("DELETE FROM nurses WHERE full_name = ?1", params![name]) {
            Some(0) => {
                warn!(nurse = name, "nurse not found");
                false
            }
            Some(_) => {
                info!(nurse = name, "nurse removed");
                true
            }
            None => false,
        }
    }

    /// Queue a task against an existing patient.
    pub fn assign_task(&self, nurse: &mut Nurse, mut task: Task) -> bool {
        let Some(patient_id) = PatientController::new(self.db).find_patient_id_by_name(task.patient_name()) else {
            warn!(patient = task.patient_name(), "patient not found");
            return false;
        };

        let inserted = self.db.insert(
            "INSERT INTO tasks (description, patient_id, priority, is_completed) VALUES (?1, ?2, ?3, ?4)",
            params![task.description(), patient_id, task.priority(), task.is_completed()],
        );
        let Some(id) = inserted else {
            return false;
        };

        task.set_task_id(id);
        info!(
            nurse = nurse.full_name(),
            task_id = id,
            priority = task.priority(),
            "task assigned"
        );
        nurse.assign_task(task);
        true
    }

    /// Complete the most urgent assigned task (lowest priority number).
    ///
    /// Tasks already completed through another handle are dropped from the
    /// nurse's list and the next one is tried.
    pub fn perform_task(&self, nurse: &mut Nurse) -> bool {
        while let Some(idx) = nurse.most_urgent_task() {
            let Some(id) = nurse.assigned_tasks()[idx].task_id() else {
                error!(nurse = nurse.full_name(), "task was never stored");
                return false;
            };

            match self.db.execute(
                "UPDATE tasks SET is_completed = 1 WHERE task_id = ?1 AND is_completed = 0",
                params![id],
            ) {
                Some(0) => {
                    warn!(task_id = id, "task not found or already completed, skipping");
                    nurse.discard_task(idx);
                }
                Some(_) => {
                    if let Some(done) = nurse.perform_duty() {
                        info!(
                            nurse = nurse.full_name(),
                            task_id = id,
                            description = done.description(),
                            "task completed"
                        );
                    }
                    return true;
                }
                None => return false,
            }
        }

        warn!(nurse = nurse.full_name(), "no assigned tasks");
        false
    }

    pub fn add_shift(&self, nurse: &mut Nurse, mut shift: Shift) -> bool {
        let inserted = self.db.insert(
            "INSERT INTO shifts (start_date_time, end_date_time, shift_type) VALUES (?1, ?2, ?3)",
            params![
                format_timestamp(shift.start_date_time()),
                format_timestamp(shift.end_date_time()),
                shift.shift_type()
            ],
        );
        let Some(id) = inserted else {
            return false;
        };

        shift.set_shift_id(id);
        info!(nurse = nurse.full_name(), shift_id = id, shift_type = %shift.shift_type(), "shift added");
        nurse.add_shift(shift);
        true
    }

    /// Open tasks, most urgent first.
    pub fn pending_tasks(&self) -> Option<Vec<Task>> {
        self.db.query_map(
            "SELECT t.task_id, t.description, p.full_name, t.priority, t.is_completed
             FROM tasks t JOIN patients p ON p.id = t.patient_id
             WHERE t.is_completed = 0
             ORDER BY t.priority, t.task_id",
            params![],
            task_from_row,
        )
    }

    pub fn list_shifts(&self) -> Option<Vec<Shift>> {
        self.db.query_map(
            "SELECT shift_id, start_date_time, end_date_time, shift_type FROM shifts ORDER BY start_date_time",
            params![],
            shift_from_row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use crate::models::{Condition, Patient, PatientDetails, Person, ShiftType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("hospital.db"));
        schema::initialize(&db);
        (dir, db)
    }

    fn oumaima() -> Nurse {
        let person = Person::new("Oumaima", 24, "Female").unwrap();
        Nurse::new(Employee::new(person, 24595, Department::Nurse))
    }

    #[test]
    fn task_for_unknown_patient_is_refused() {
        let (_dir, db) = setup();
        let nurses = NurseController::new(&db);
        let mut nurse = oumaima();

        assert!(!nurses.assign_task(&mut nurse, Task::new("Vitals", "Nobody", 1).unwrap()));
        assert!(!nurses.perform_task(&mut nurse));
        assert_eq!(nurses.pending_tasks(), Some(vec![]));
    }

    #[test]
    fn shifts_are_stored() {
        let (_dir, db) = setup();
        let nurses = NurseController::new(&db);
        let mut nurse = oumaima();
        assert!(nurses.add_nurse(&nurse));
        assert!(!nurses.add_nurse(&nurse));

        let day = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let shift = Shift::new(
            day.and_hms_opt(20, 0, 0).unwrap(),
            day.succ_opt().unwrap().and_hms_opt(6, 0, 0).unwrap(),
            ShiftType::Night,
        );
        assert!(nurses.add_shift(&mut nurse, shift));
        assert_eq!(nurse.upcoming_shifts().len(), 1);

        let stored = nurses.list_shifts().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].shift_type(), ShiftType::Night);
        assert_eq!(stored[0].shift_id(), nurse.upcoming_shifts()[0].shift_id());
    }

    #[test]
    fn found_nurse_carries_the_queue() {
        let (_dir, db) = setup();
        let nurses = NurseController::new(&db);
        let mut nurse = oumaima();
        nurses.add_nurse(&nurse);

        let patient = Patient::outpatient(
            Person::new("Queue Patient", 70, "Male").unwrap(),
            PatientDetails::default(),
            Condition::Recovering,
        );
        PatientController::new(&db).add_patient(&patient);
        nurses.assign_task(&mut nurse, Task::new("Walk", "Queue Patient", 4).unwrap());
        nurses.assign_task(&mut nurse, Task::new("Meds", "Queue Patient", 1).unwrap());

        let mut reloaded = nurses.find_nurse("Oumaima").unwrap();
        assert_eq!(reloaded.assigned_tasks().len(), 2);
        assert_eq!(reloaded.assigned_tasks()[0].description(), "Meds");

        assert!(nurses.perform_task(&mut reloaded));
        assert_eq!(nurses.pending_tasks().unwrap().len(), 1);
    }

    #[test]
    fn stale_nurse_skips_tasks_done_elsewhere() {
        let (_dir, db) = setup();
        let nurses = NurseController::new(&db);
        let mut nurse = oumaima();
        nurses.add_nurse(&nurse);

        let patient = Patient::outpatient(
            Person::new("Queue Patient", 70, "Male").unwrap(),
            PatientDetails::default(),
            Condition::Recovering,
        );
        PatientController::new(&db).add_patient(&patient);
        nurses.assign_task(&mut nurse, Task::new("Walk", "Queue Patient", 4).unwrap());
        nurses.assign_task(&mut nurse, Task::new("Meds", "Queue Patient", 1).unwrap());

        let mut other = nurses.find_nurse("Oumaima").unwrap();
        assert!(nurses.perform_task(&mut other));
        assert_eq!(other.completed_tasks()[0].description(), "Meds");

        // "Meds" is already done, so the stale value moves on to "Walk".
        assert!(nurses.perform_task(&mut nurse));
        assert_eq!(nurse.completed_tasks().len(), 1);
        assert_eq!(nurse.completed_tasks()[0].description(), "Walk");
        assert!(nurse.assigned_tasks().is_empty());
        assert_eq!(nurses.pending_tasks(), Some(vec![]));

        assert!(!nurses.perform_task(&mut nurse));
    }
}
