//! Nursing tasks

use serde::{Deserialize, Serialize};

use super::validation::non_empty;
use super::ValidationError;

/// A task against a patient. Lower `priority` numbers are more urgent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    task_id: Option<i64>,
    description: String,
    patient_name: String,
    priority: i64,
    is_completed: bool,
}

impl Task {
    pub fn new(description: &str, patient_name: &str, priority: i64) -> Result<Self, ValidationError> {
        if priority < 0 {
            return Err(ValidationError::OutOfRange {
                field: "priority",
                min: 0,
                max: i64::MAX,
                value: priority,
            });
        }

        Ok(Self {
            task_id: None,
            description: non_empty("description", description)?,
            patient_name: non_empty("patient name", patient_name)?,
            priority,
            is_completed: false,
        })
    }

    pub(crate) fn from_row(
        task_id: i64,
        description: String,
        patient_name: String,
        priority: i64,
        is_completed: bool,
    ) -> Self {
        Self {
            task_id: Some(task_id),
            description,
            patient_name,
            priority,
            is_completed,
        }
    }

    pub fn task_id(&self) -> Option<i64> {
        self.task_id
    }

    pub(crate) fn set_task_id(&mut self, id: i64) {
        self.task_id = Some(id);
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn mark_completed(&mut self) {
        self.is_completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_priority_is_rejected() {
        let err = Task::new("Change dressing", "A B", -1).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "priority", .. }));
    }

    #[test]
    fn zero_priority_is_allowed() {
        let task = Task::new("Change dressing", "A B", 0).unwrap();
        assert_eq!(task.priority(), 0);
        assert!(task.task_id().is_none());
    }
}
