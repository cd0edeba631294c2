//! Shared person fields and the capability traits every record implements.

use serde::{Deserialize, Serialize};

use super::validation::non_empty;
use super::ValidationError;

/// Anything that can produce the identifier stored in its `unique_identifier`
/// column (or shown as its ID).
pub trait Identifiable {
    fn unique_identifier(&self) -> String;
}

/// Anything that can render a human-readable detail block.
pub trait Displayable {
    /// `(label, value)` pairs in display order.
    fn info_lines(&self) -> Vec<(&'static str, String)>;

    fn display_info(&self) -> String {
        self.info_lines()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Name, age and gender common to patients and staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    full_name: String,
    age: u32,
    gender: String,
}

impl Person {
    pub fn new(full_name: &str, age: u32, gender: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            full_name: non_empty("full name", full_name)?,
            age,
            gender: gender.trim().to_owned(),
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn set_full_name(&mut self, full_name: &str) -> Result<(), ValidationError> {
        self.full_name = non_empty("full name", full_name)?;
        Ok(())
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub fn set_gender(&mut self, gender: &str) {
        self.gender = gender.trim().to_owned();
    }

    /// Upper-cased first letter of every name word: "Ada King Lovelace" -> "AKL".
    pub fn initials(&self) -> String {
        self.full_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}
