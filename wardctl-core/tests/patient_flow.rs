use rusqlite::params;
use rusqlite::types::Value;
use tempfile::TempDir;
use wardctl_core::db::schema;
use wardctl_core::models::{AdmissionStatus, Condition, Patient, PatientDetails, Person, Room, RoomType};
use wardctl_core::{Database, PatientController, RoomController, SqlOperation};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("wardctl_core=debug")
        .with_test_writer()
        .try_init();
}

fn setup() -> (TempDir, Database) {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("hospital.db"));
    schema::initialize(&db);
    (dir, db)
}

fn inpatient(name: &str, room: Room) -> Patient {
    let person = Person::new(name, 33, "Female").unwrap();
    Patient::inpatient(person, PatientDetails::default(), Condition::Stable, room)
}

fn count(db: &Database, sql: &str) -> i64 {
    db.query_map(sql, params![], |row| row.get(0)).unwrap()[0]
}

fn stored_status(db: &Database, table: &str, name: &str) -> String {
    let sql = format!("SELECT admission_status FROM {table} WHERE full_name = ?1");
    db.query_map(&sql, params![name], |row| row.get::<_, String>(0)).unwrap()[0].clone()
}

#[test]
fn admit_then_discharge_frees_the_room() {
    let (_dir, db) = setup();
    let patients = PatientController::new(&db);
    let rooms = RoomController::new(&db);

    let room = Room::new(101, RoomType::Single, 50.0).unwrap();
    assert!(rooms.add_room(&room));

    let mut patient = inpatient("A B", room);
    assert!(patients.add_patient(&patient));
    assert_eq!(count(&db, "SELECT COUNT(*) FROM inpatients"), 1);

    assert!(patients.admit_patient(&mut patient));
    assert_eq!(stored_status(&db, "inpatients", "A B"), "Admitted");
    assert_eq!(stored_status(&db, "patients", "A B"), "Admitted");
    assert!(rooms.get_room(101).unwrap().is_occupied());

    assert!(patients.discharge_patient(&mut patient));
    assert_eq!(patient.admission_status(), AdmissionStatus::Discharged);
    assert_eq!(stored_status(&db, "inpatients", "A B"), "Discharged");
    assert_eq!(stored_status(&db, "patients", "A B"), "Discharged");
    assert_eq!(count(&db, "SELECT is_occupied FROM rooms WHERE room_number = 101"), 0);
    assert!(!patient.room().unwrap().is_occupied());
    assert_eq!(count(&db, "SELECT COUNT(*) FROM inpatients"), 1);
}

#[test]
fn adding_twice_keeps_one_row() {
    let (_dir, db) = setup();
    let patients = PatientController::new(&db);
    let patient = inpatient("Twice Added", Room::new(7, RoomType::Double, 80.0).unwrap());

    assert!(patients.add_patient(&patient));
    assert!(!patients.add_patient(&patient));

    assert_eq!(count(&db, "SELECT COUNT(*) FROM patients"), 1);
    assert_eq!(count(&db, "SELECT COUNT(*) FROM inpatients"), 1);
    // The room was created on the fly.
    assert_eq!(RoomController::new(&db).get_room(7).unwrap().capacity(), 2);
}

#[test]
fn failed_room_update_keeps_patient_admitted() {
    let (_dir, db) = setup();
    let patients = PatientController::new(&db);

    let mut patient = inpatient("Stays In", Room::new(202, RoomType::Icu, 500.0).unwrap());
    patients.add_patient(&patient);
    assert!(patients.admit_patient(&mut patient));

    db.create_table(
        "CREATE TRIGGER rooms_locked BEFORE UPDATE ON rooms
         BEGIN SELECT RAISE(ABORT, 'rooms are locked'); END;",
    );

    assert!(!patients.discharge_patient(&mut patient));
    assert_eq!(patient.admission_status(), AdmissionStatus::Admitted);
    assert_eq!(stored_status(&db, "patients", "Stays In"), "Admitted");
    assert_eq!(stored_status(&db, "inpatients", "Stays In"), "Admitted");
    assert_eq!(count(&db, "SELECT is_occupied FROM rooms WHERE room_number = 202"), 1);
}

#[test]
fn transaction_with_one_bad_statement_changes_nothing() {
    let (_dir, db) = setup();
    let ops = vec![
        SqlOperation::new(
            "INSERT INTO rooms (room_number, room_type, daily_rate, capacity) VALUES (?1, ?2, ?3, ?4)",
            vec![Value::Integer(1), Value::Text("Single".into()), Value::Real(20.0), Value::Integer(1)],
        ),
        SqlOperation::new(
            "INSERT INTO rooms (room_number, room_type, daily_rate, capacity) VALUES (?1, ?2, ?3, ?4)",
            vec![Value::Integer(2), Value::Text("Single".into()), Value::Real(0.5), Value::Integer(1)],
        ),
    ];

    assert!(!db.run_transaction(&ops));
    assert_eq!(db.query("SELECT * FROM rooms", params![]), Some(vec![]));
}

#[test]
fn query_reports_storage_errors_as_none() {
    let (_dir, db) = setup();
    assert_eq!(db.query("SELECT * FROM patients", params![]), Some(vec![]));
    assert_eq!(db.query("SELECT * FROM wards", params![]), None);
}
