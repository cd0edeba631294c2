use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use wardctl_core::db::schema;
use wardctl_core::models::{
    Appointment, AppointmentType, Condition, Department, Doctor, Employee, Nurse, Patient, PatientDetails, Person,
    Task,
};
use wardctl_core::{Database, DoctorController, NurseController, PatientController};

fn setup() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("hospital.db"));
    schema::initialize(&db);

    let patient = Patient::outpatient(
        Person::new("Vlad Mandache", 21, "Male").unwrap(),
        PatientDetails::default(),
        Condition::Observation,
    );
    assert!(PatientController::new(&db).add_patient(&patient));
    (dir, db)
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 11, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[test]
fn doctor_works_through_appointments() {
    let (_dir, db) = setup();
    let doctors = DoctorController::new(&db);
    let person = Person::new("Meredith Grey", 38, "Female").unwrap();
    let mut doctor = Doctor::new(Employee::new(person, 31, Department::Doctor), "General surgery").unwrap();
    assert!(doctors.add_doctor(&doctor));

    let consult = Appointment::new("Pre-op consult", at(2, 9), AppointmentType::Consultation, "Vlad Mandache").unwrap();
    let surgery = Appointment::new("Appendectomy", at(3, 8), AppointmentType::Surgery, "Vlad Mandache").unwrap();
    assert!(doctors.create_appointment(&mut doctor, consult));
    assert!(doctors.create_appointment(&mut doctor, surgery));
    assert!(doctor.appointments().iter().all(|a| a.appointment_id().is_some()));

    // The latest booking is handled first.
    assert!(doctors.perform_duty(&mut doctor));
    assert_eq!(doctor.appointments().len(), 1);
    assert_eq!(doctor.appointments()[0].description(), "Pre-op consult");

    let all = doctors.appointments_for("Meredith Grey").unwrap();
    assert_eq!(all.len(), 2);
    let surgery = all.iter().find(|a| a.description() == "Appendectomy").unwrap();
    assert!(surgery.is_completed());
    assert_eq!(surgery.date_time(), at(3, 8));
    assert_eq!(surgery.doctor_name(), Some("Meredith Grey"));

    let reloaded = doctors.find_doctor("Meredith Grey").unwrap();
    assert_eq!(reloaded.appointments().len(), 1);

    assert!(doctors.perform_duty(&mut doctor));
    assert!(!doctors.perform_duty(&mut doctor));
}

#[test]
fn nurse_takes_most_urgent_task_first() {
    let (_dir, db) = setup();
    let nurses = NurseController::new(&db);
    let person = Person::new("Oumaima", 24, "Female").unwrap();
    let mut nurse = Nurse::new(Employee::new(person, 24595, Department::Nurse));
    assert!(nurses.add_nurse(&nurse));

    for (description, priority) in [("Change bedding", 5), ("Insulin", 0), ("Vitals", 2)] {
        let task = Task::new(description, "Vlad Mandache", priority).unwrap();
        assert!(nurses.assign_task(&mut nurse, task));
    }

    assert!(nurses.perform_task(&mut nurse));
    assert_eq!(nurse.completed_tasks()[0].description(), "Insulin");

    let pending: Vec<_> = nurses
        .pending_tasks()
        .unwrap()
        .into_iter()
        .map(|t| t.description().to_string())
        .collect();
    assert_eq!(pending, ["Vitals", "Change bedding"]);

    assert!(nurses.perform_task(&mut nurse));
    assert!(nurses.perform_task(&mut nurse));
    assert!(!nurses.perform_task(&mut nurse));
    assert_eq!(nurses.pending_tasks(), Some(vec![]));
}

#[test]
fn removing_a_patient_with_tasks_is_refused() {
    let (_dir, db) = setup();
    let nurses = NurseController::new(&db);
    let patients = PatientController::new(&db);
    let person = Person::new("Oumaima", 24, "Female").unwrap();
    let mut nurse = Nurse::new(Employee::new(person, 24595, Department::Nurse));

    assert!(nurses.assign_task(&mut nurse, Task::new("Vitals", "Vlad Mandache", 1).unwrap()));

    let mut patient = patients.find_patient("Vlad Mandache").unwrap();
    assert!(!patients.remove_patient(&mut patient));
    assert!(patients.find_patient_id_by_name("Vlad Mandache").is_some());
}
