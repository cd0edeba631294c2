//! Table definitions. Every statement is `CREATE TABLE IF NOT EXISTS`, so
//! [`initialize`] runs on every start.

use tracing::info;

use super::Database;

pub const ROOMS: &str = "
CREATE TABLE IF NOT EXISTS rooms (
    room_number INTEGER PRIMARY KEY,
    room_type TEXT NOT NULL,
    daily_rate REAL NOT NULL,
    capacity INTEGER NOT NULL,
    is_occupied INTEGER NOT NULL DEFAULT 0,
    CHECK (room_number >= 1),
    CHECK (room_type IN ('Single', 'Double', 'ICU')),
    CHECK (daily_rate >= 1),
    CHECK (capacity BETWEEN 1 AND 2),
    CHECK ((room_type = 'Double' AND capacity = 2) OR (room_type <> 'Double' AND capacity = 1)),
    CHECK (is_occupied IN (0, 1))
);";

pub const PATIENTS: &str = "
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL UNIQUE,
    age INTEGER,
    gender TEXT,
    contact_info TEXT,
    personal_number TEXT,
    insurance TEXT,
    condition TEXT,
    admission_status TEXT,
    patient_type TEXT NOT NULL,
    CHECK (patient_type IN ('Inpatient', 'Outpatient'))
);";

pub const INPATIENTS: &str = "
CREATE TABLE IF NOT EXISTS inpatients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    unique_identifier TEXT NOT NULL UNIQUE,
    full_name TEXT NOT NULL UNIQUE,
    age INTEGER,
    gender TEXT,
    contact_info TEXT,
    personal_number TEXT,
    insurance TEXT,
    condition TEXT,
    room_number INTEGER,
    admission_status TEXT,
    FOREIGN KEY (room_number) REFERENCES rooms(room_number),
    FOREIGN KEY (full_name) REFERENCES patients(full_name)
);";

pub const OUTPATIENTS: &str = "
CREATE TABLE IF NOT EXISTS outpatients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    unique_identifier TEXT NOT NULL UNIQUE,
    full_name TEXT NOT NULL UNIQUE,
    age INTEGER,
    gender TEXT,
    contact_info TEXT,
    personal_number TEXT,
    insurance TEXT,
    condition TEXT,
    admission_status TEXT,
    FOREIGN KEY (full_name) REFERENCES patients(full_name)
);";

pub const DOCTORS: &str = "
CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_id INTEGER NOT NULL,
    full_name TEXT NOT NULL,
    age INTEGER,
    gender TEXT,
    department TEXT,
    specialization TEXT NOT NULL
);";

pub const NURSES: &str = "
CREATE TABLE IF NOT EXISTS nurses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_id INTEGER NOT NULL,
    full_name TEXT NOT NULL,
    age INTEGER,
    gender TEXT,
    department TEXT
);";

pub const APPOINTMENTS: &str = "
CREATE TABLE IF NOT EXISTS appointments (
    appointment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    date_time DATETIME NOT NULL,
    appointment_type TEXT NOT NULL,
    patient_id INTEGER NOT NULL,
    doctor_id INTEGER NOT NULL,
    is_completed INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (patient_id) REFERENCES patients(id),
    FOREIGN KEY (doctor_id) REFERENCES doctors(id),
    CHECK (appointment_type IN ('Surgery', 'Consultation', 'Visit', 'Procedure')),
    CHECK (is_completed IN (0, 1))
);";

pub const TASKS: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    task_id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    patient_id INTEGER NOT NULL,
    priority INTEGER NOT NULL,
    is_completed INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (patient_id) REFERENCES patients(id),
    CHECK (priority >= 0),
    CHECK (is_completed IN (0, 1))
);";

pub const SHIFTS: &str = "
CREATE TABLE IF NOT EXISTS shifts (
    shift_id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_date_time TEXT NOT NULL,
    end_date_time TEXT NOT NULL,
    shift_type TEXT NOT NULL,
    CHECK (shift_type IN ('Night', 'Day', 'Special'))
);";

pub const MEDICAL_HISTORY: &str = "
CREATE TABLE IF NOT EXISTS medical_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL,
    entry TEXT NOT NULL,
    date_added TEXT NOT NULL,
    FOREIGN KEY (patient_id) REFERENCES patients(id)
);";

/// `(table, DDL)` in creation order: referenced tables first.
const TABLES: &[(&str, &str)] = &[
    ("rooms", ROOMS),
    ("patients", PATIENTS),
    ("inpatients", INPATIENTS),
    ("outpatients", OUTPATIENTS),
    ("doctors", DOCTORS),
    ("nurses", NURSES),
    ("appointments", APPOINTMENTS),
    ("tasks", TASKS),
    ("shifts", SHIFTS),
    ("medical_history", MEDICAL_HISTORY),
];

pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}

/// Create any missing table. A failing table is logged and skipped.
pub fn initialize(db: &Database) {
    for (_, ddl) in TABLES {
        db.create_table(ddl);
    }
    info!(tables = TABLES.len(), "schema initialized");
}
