//! Hospital staff: doctors and nurses share an `Employee` core.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::person::{Displayable, Identifiable, Person};
use super::validation::non_empty;
use super::{Appointment, Patient, Shift, Task, ValidationError};

labelled_enum! {
    pub enum Department as "department" {
        Doctor => "Doctor",
        Nurse => "Nurse",
    }
}

/// Fields every member of staff carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    person: Person,
    work_id: i64,
    department: Department,
}

impl Employee {
    pub fn new(person: Person, work_id: i64, department: Department) -> Self {
        Self {
            person,
            work_id,
            department,
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn full_name(&self) -> &str {
        self.person.full_name()
    }

    pub fn work_id(&self) -> i64 {
        self.work_id
    }

    pub fn set_work_id(&mut self, work_id: i64) {
        self.work_id = work_id;
    }

    pub fn department(&self) -> Department {
        self.department
    }

    fn info_lines(&self, id: String) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.person.full_name().to_owned()),
            ("Age", self.person.age().to_string()),
            ("Department", self.department.to_string()),
            ("ID", id),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(flatten)]
    employee: Employee,
    specialization: String,
    upcoming_appointments: Vec<Appointment>,
}

impl Doctor {
    pub fn new(employee: Employee, specialization: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            employee,
            specialization: non_empty("specialization", specialization)?,
            upcoming_appointments: Vec::new(),
        })
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn full_name(&self) -> &str {
        self.employee.full_name()
    }

    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.upcoming_appointments
    }

    pub fn assign_appointment(&mut self, appointment: Appointment) {
        self.upcoming_appointments.push(appointment);
    }

    /// Take the most recently scheduled upcoming appointment.
    pub fn perform_duty(&mut self) -> Option<Appointment> {
        self.upcoming_appointments.pop()
    }

    pub fn prescribe(patient: &mut Patient, entry: impl Into<String>) {
        patient.add_prescription(entry);
    }
}

impl Identifiable for Doctor {
    fn unique_identifier(&self) -> String {
        format!("D_{}", self.employee.work_id)
    }
}

impl Displayable for Doctor {
    fn info_lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = self.employee.info_lines(self.unique_identifier());
        lines.push(("Specialization", self.specialization.clone()));
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nurse {
    #[serde(flatten)]
    employee: Employee,
    upcoming_shifts: Vec<Shift>,
    active_shift: Option<Shift>,
    completed_shifts: Vec<Shift>,
    assigned_tasks: Vec<Task>,
    completed_tasks: Vec<Task>,
}

impl Nurse {
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            upcoming_shifts: Vec::new(),
            active_shift: None,
            completed_shifts: Vec::new(),
            assigned_tasks: Vec::new(),
            completed_tasks: Vec::new(),
        }
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn full_name(&self) -> &str {
        self.employee.full_name()
    }

    pub fn assigned_tasks(&self) -> &[Task] {
        &self.assigned_tasks
    }

    pub fn completed_tasks(&self) -> &[Task] {
        &self.completed_tasks
    }

    pub fn assign_task(&mut self, task: Task) {
        self.assigned_tasks.push(task);
    }

    /// Index of the most urgent assigned task (lowest priority number,
    /// earliest assigned on ties).
    pub fn most_urgent_task(&self) -> Option<usize> {
        self.assigned_tasks
            .iter()
            .enumerate()
            .min_by_key(|(_, task)| task.priority())
            .map(|(idx, _)| idx)
    }

    /// Drop an assigned task without completing it.
    pub(crate) fn discard_task(&mut self, idx: usize) -> Option<Task> {
        (idx < self.assigned_tasks.len()).then(|| self.assigned_tasks.remove(idx))
    }

    /// Complete the most urgent task in memory and return a copy of it.
    pub fn perform_duty(&mut self) -> Option<Task> {
        let idx = self.most_urgent_task()?;
        let mut task = self.assigned_tasks.remove(idx);
        task.mark_completed();
        self.completed_tasks.push(task.clone());
        Some(task)
    }

    pub fn upcoming_shifts(&self) -> &[Shift] {
        &self.upcoming_shifts
    }

    pub fn active_shift(&self) -> Option<&Shift> {
        self.active_shift.as_ref()
    }

    pub fn completed_shifts(&self) -> &[Shift] {
        &self.completed_shifts
    }

    pub fn add_shift(&mut self, shift: Shift) {
        self.upcoming_shifts.push(shift);
    }

    /// Start the next upcoming shift at `now`. Returns `None` when nothing is
    /// scheduled or a shift is already running.
    pub fn start_shift(&mut self, now: NaiveDateTime) -> Option<&Shift> {
        if self.active_shift.is_some() || self.upcoming_shifts.is_empty() {
            return None;
        }
        let mut shift = self.upcoming_shifts.remove(0);
        shift.set_start(now);
        self.active_shift = Some(shift);
        self.active_shift.as_ref()
    }

    /// End the running shift at `now`.
    pub fn end_shift(&mut self, now: NaiveDateTime) -> Option<&Shift> {
        let mut shift = self.active_shift.take()?;
        shift.set_end(now);
        self.completed_shifts.push(shift);
        self.completed_shifts.last()
    }
}

impl Identifiable for Nurse {
    fn unique_identifier(&self) -> String {
        format!("N_{}", self.employee.work_id)
    }
}

impl Displayable for Nurse {
    fn info_lines(&self) -> Vec<(&'static str, String)> {
        self.employee.info_lines(self.unique_identifier())
    }
}
