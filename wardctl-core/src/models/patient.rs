//! Patients: one record type, tagged by whether they occupy a room.

use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;
use super::person::{Displayable, Identifiable, Person};
use super::{Card, Room};

labelled_enum! {
    pub enum AdmissionStatus as "admission status" {
        Admitted => "Admitted",
        Discharged => "Discharged",
        Pending => "Pending",
        Refused => "Refused",
        Transferred => "Transferred",
    }
}

labelled_enum! {
    pub enum Condition as "condition" {
        Stable => "Stable",
        Critical => "Critical",
        Observation => "Observation",
        Recovering => "Recovering",
        UnderTreatment => "Under treatment",
        Deceased => "Deceased",
        AwaitingSurgery => "Awaiting surgery",
        Quarantine => "Quarantine",
        PalliativeCare => "Palliative care",
        Unknown => "Unknown",
    }
}

labelled_enum! {
    /// Discriminant stored in `patients.patient_type`.
    pub enum PatientType as "patient type" {
        Inpatient => "Inpatient",
        Outpatient => "Outpatient",
    }
}

impl PatientType {
    /// Subtype table holding the full row for this kind of patient.
    pub fn table(self) -> &'static str {
        match self {
            PatientType::Inpatient => "inpatients",
            PatientType::Outpatient => "outpatients",
        }
    }

    fn identifier_prefix(self) -> &'static str {
        match self {
            PatientType::Inpatient => "IP",
            PatientType::Outpatient => "OP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PatientKind {
    Inpatient { room: Room },
    Outpatient,
}

/// Contact and insurance details supplied at registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientDetails {
    pub contact_info: String,
    pub personal_number: String,
    pub insurance: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(flatten)]
    person: Person,
    #[serde(flatten)]
    details: PatientDetails,
    condition: Condition,
    admission_status: AdmissionStatus,
    kind: PatientKind,
    balance: f64,
    prescriptions: Vec<String>,
    medical_history: Vec<String>,
    #[serde(skip)]
    cards: Vec<Card>,
}

impl Patient {
    pub fn inpatient(person: Person, details: PatientDetails, condition: Condition, room: Room) -> Self {
        Self::with_kind(person, details, condition, PatientKind::Inpatient { room })
    }

    pub fn outpatient(person: Person, details: PatientDetails, condition: Condition) -> Self {
        Self::with_kind(person, details, condition, PatientKind::Outpatient)
    }

    fn with_kind(person: Person, details: PatientDetails, condition: Condition, kind: PatientKind) -> Self {
        Self {
            person,
            details,
            condition,
            admission_status: AdmissionStatus::Pending,
            kind,
            balance: 0.0,
            prescriptions: Vec::new(),
            medical_history: Vec::new(),
            cards: Vec::new(),
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    pub fn full_name(&self) -> &str {
        self.person.full_name()
    }

    pub fn details(&self) -> &PatientDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut PatientDetails {
        &mut self.details
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn set_condition(&mut self, condition: Condition) {
        self.condition = condition;
    }

    pub fn admission_status(&self) -> AdmissionStatus {
        self.admission_status
    }

    pub fn set_admission_status(&mut self, status: AdmissionStatus) {
        self.admission_status = status;
    }

    pub fn admit(&mut self) {
        self.admission_status = AdmissionStatus::Admitted;
    }

    pub fn discharge(&mut self) {
        self.admission_status = AdmissionStatus::Discharged;
    }

    pub fn kind(&self) -> &PatientKind {
        &self.kind
    }

    pub fn patient_type(&self) -> PatientType {
        match self.kind {
            PatientKind::Inpatient { .. } => PatientType::Inpatient,
            PatientKind::Outpatient => PatientType::Outpatient,
        }
    }

    pub fn room(&self) -> Option<&Room> {
        match &self.kind {
            PatientKind::Inpatient { room } => Some(room),
            PatientKind::Outpatient => None,
        }
    }

    pub fn room_mut(&mut self) -> Option<&mut Room> {
        match &mut self.kind {
            PatientKind::Inpatient { room } => Some(room),
            PatientKind::Outpatient => None,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn deposit(&mut self, amount: f64) {
        self.balance += amount;
    }

    pub fn charge(&mut self, amount: f64) {
        self.balance -= amount;
    }

    pub fn clear_balance(&mut self) {
        self.balance = 0.0;
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn add_payment_method(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn prescriptions(&self) -> &[String] {
        &self.prescriptions
    }

    pub fn add_prescription(&mut self, entry: impl Into<String>) {
        self.prescriptions.push(entry.into());
    }

    pub fn medical_history(&self) -> &[String] {
        &self.medical_history
    }

    pub fn add_medical_history(&mut self, entry: impl Into<String>) {
        self.medical_history.push(entry.into());
    }

    pub(crate) fn set_medical_history(&mut self, entries: Vec<String>) {
        self.medical_history = entries;
    }
}

impl Identifiable for Patient {
    /// `IP_<initials>_<age>` / `OP_<initials>_<age>`
    fn unique_identifier(&self) -> String {
        format!(
            "{}_{}_{}",
            self.patient_type().identifier_prefix(),
            self.person.initials(),
            self.person.age()
        )
    }
}

impl Displayable for Patient {
    fn info_lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("Name", self.full_name().to_owned()),
            ("Age", self.person.age().to_string()),
            ("Type", self.patient_type().to_string()),
            ("Medical History", self.medical_history.join("; ")),
            ("Condition", self.condition.to_string()),
            ("Admission status", self.admission_status.to_string()),
        ];
        if let Some(room) = self.room() {
            lines.push(("Room", room.to_string()));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomType;

    fn person() -> Person {
        Person::new("Vlad Mandache", 21, "Male").unwrap()
    }

    #[test]
    fn starts_pending() {
        let patient = Patient::outpatient(person(), PatientDetails::default(), Condition::Stable);
        assert_eq!(patient.admission_status(), AdmissionStatus::Pending);
        assert_eq!(patient.admission_status().as_str(), "Pending");
    }

    #[test]
    fn identifiers_by_kind() {
        let room = Room::new(19191, RoomType::Single, 50.0).unwrap();
        let inpatient = Patient::inpatient(person(), PatientDetails::default(), Condition::Stable, room);
        let outpatient = Patient::outpatient(person(), PatientDetails::default(), Condition::Stable);

        assert_eq!(inpatient.unique_identifier(), "IP_VM_21");
        assert_eq!(outpatient.unique_identifier(), "OP_VM_21");
        assert_eq!(inpatient.patient_type().table(), "inpatients");
        assert!(outpatient.room().is_none());
    }

    #[test]
    fn admit_and_discharge() {
        let mut patient = Patient::outpatient(person(), PatientDetails::default(), Condition::Critical);
        patient.admit();
        assert_eq!(patient.admission_status(), AdmissionStatus::Admitted);
        patient.discharge();
        assert_eq!(patient.admission_status(), AdmissionStatus::Discharged);
    }

    #[test]
    fn condition_labels() {
        assert_eq!(Condition::UnderTreatment.as_str(), "Under treatment");
        assert_eq!(
            "awaiting-surgery".parse::<Condition>().unwrap(),
            Condition::AwaitingSurgery
        );
        assert!("Refused".parse::<Condition>().is_err());
    }

    #[test]
    fn display_includes_room() {
        let room = Room::new(7, RoomType::Icu, 400.0).unwrap();
        let patient = Patient::inpatient(person(), PatientDetails::default(), Condition::Critical, room);
        let info = patient.display_info();
        assert!(info.contains("Name: Vlad Mandache"));
        assert!(info.contains("Room: Room: 7 | Type: ICU"));
    }
}
