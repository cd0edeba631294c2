//! Nurse shifts

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::labels::labelled_enum;

labelled_enum! {
    pub enum ShiftType as "shift type" {
        Night => "Night",
        Day => "Day",
        Special => "Special",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    shift_id: Option<i64>,
    start_date_time: NaiveDateTime,
    end_date_time: NaiveDateTime,
    shift_type: ShiftType,
}

impl Shift {
    pub fn new(start_date_time: NaiveDateTime, end_date_time: NaiveDateTime, shift_type: ShiftType) -> Self {
        Self {
            shift_id: None,
            start_date_time,
            end_date_time,
            shift_type,
        }
    }

    pub fn shift_id(&self) -> Option<i64> {
        self.shift_id
    }

    pub(crate) fn set_shift_id(&mut self, id: i64) {
        self.shift_id = Some(id);
    }

    pub fn start_date_time(&self) -> NaiveDateTime {
        self.start_date_time
    }

    pub fn end_date_time(&self) -> NaiveDateTime {
        self.end_date_time
    }

    pub fn shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_start(&mut self, at: NaiveDateTime) {
        self.start_date_time = at;
    }

    pub(crate) fn set_end(&mut self, at: NaiveDateTime) {
        self.end_date_time = at;
    }
}
