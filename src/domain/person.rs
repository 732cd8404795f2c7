use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Dated, ymd};

/// A person who writes books or works for a publisher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
        }
    }

    /// `"{first} {last}"`, the form used to match book authors by name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn short_string(&self) -> String {
        self.full_name()
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new("DefaultFirstName", "DefaultLastName", ymd(2001, 1, 1))
    }
}

impl Dated for Person {
    fn date(&self) -> NaiveDate {
        self.birth_date
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, born on {}",
            self.first_name, self.last_name, self.birth_date
        )
    }
}
