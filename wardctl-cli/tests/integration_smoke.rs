//! Smoke tests to verify command wiring and an end-to-end ward session

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `wardctl` pinned to a scratch database, log file and config.
fn wardctl(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wardctl").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("WARDCTL_DB")
        .env("WARDCTL_LOG_FILE", dir.join("ward.log"))
        .arg("--db")
        .arg(dir.join("hospital.db"))
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}

// === Help Tests ===

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("wardctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("patient"))
        .stdout(predicate::str::contains("nurse"));
}

#[test]
fn test_patient_add_help() {
    let mut cmd = Command::cargo_bin("wardctl").unwrap();
    cmd.arg("patient").arg("add").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("makes the patient an inpatient"));
}

#[test]
fn test_doctor_appoint_help() {
    let mut cmd = Command::cargo_bin("wardctl").unwrap();
    cmd.arg("doctor").arg("appoint").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Date and time"));
}

#[test]
fn test_room_type_is_validated() {
    let dir = TempDir::new().unwrap();
    wardctl(dir.path())
        .args(["room", "add", "5", "--type", "Suite", "--rate", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Suite"));
}

// === End-to-end ===

#[test]
fn test_admit_and_discharge_session() {
    let dir = TempDir::new().unwrap();
    let d = dir.path();

    wardctl(d)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("medical_history"));

    wardctl(d)
        .args(["room", "add", "101", "--type", "Single", "--rate", "50"])
        .assert()
        .success();

    wardctl(d)
        .args(["patient", "add", "A B", "--age", "30", "--room", "101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IP_AB_30"));

    // Second registration of the same name is refused.
    wardctl(d)
        .args(["patient", "add", "A B", "--age", "30", "--room", "101"])
        .assert()
        .failure();

    wardctl(d).args(["patient", "admit", "A B"]).assert().success();

    wardctl(d)
        .args(["room", "show", "101", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_occupied\": true"));

    wardctl(d).args(["patient", "discharge", "A B"]).assert().success();

    wardctl(d)
        .args(["patient", "show", "A B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Admission status: Discharged"));

    wardctl(d)
        .args(["room", "show", "101", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_occupied\": false"));

    assert!(d.join("ward.log").exists());
}

#[test]
fn test_log_file_tags_events_with_command() {
    let dir = TempDir::new().unwrap();
    let d = dir.path();

    wardctl(d)
        .args(["room", "add", "7", "--type", "ICU", "--rate", "300"])
        .assert()
        .success();

    let log = std::fs::read_to_string(d.join("ward.log")).unwrap();
    assert!(log.contains("command=\"room\""), "log was:\n{log}");
    assert!(log.contains("room saved"));
}

#[test]
fn test_nurse_task_queue() {
    let dir = TempDir::new().unwrap();
    let d = dir.path();

    wardctl(d)
        .args(["patient", "add", "Vlad Mandache", "--age", "21"])
        .assert()
        .success();
    wardctl(d)
        .args(["nurse", "add", "Oumaima", "--age", "24", "--work-id", "24595"])
        .assert()
        .success();

    for (description, priority) in [("Vitals", "2"), ("Insulin", "0")] {
        wardctl(d)
            .args([
                "nurse",
                "assign-task",
                "Oumaima",
                "--patient",
                "Vlad Mandache",
                "--priority",
                priority,
                "--description",
                description,
            ])
            .assert()
            .success();
    }

    wardctl(d)
        .args(["nurse", "perform-task", "Oumaima"])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed: Insulin"));

    wardctl(d)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vitals"))
        .stdout(predicate::str::contains("Insulin").not());
}

#[test]
fn test_config_show_reflects_db_flag() {
    let dir = TempDir::new().unwrap();
    wardctl(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hospital.db"))
        .stdout(predicate::str::contains("foreign_keys = true"));
}
