//! Student record type.
//!
//! `grades` and `average` are private so that they can only change together:
//! [`Student::new`] and [`Student::set_grades`] validate the grades first and
//! then recompute the average.

use serde::Serialize;

use crate::config::RosterConfig;
use crate::error::RosterError;
use crate::statistics::mean;

/// Unique student identifier.
pub type StudentId = i64;

/// A single subject grade.
pub type Grade = i32;

/// One student's stored data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    id: StudentId,
    name: String,
    grades: Vec<Grade>,
    average: f64,
}

impl Student {
    /// Build a record, rejecting grades that do not fit `config`.
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        grades: Vec<Grade>,
        config: &RosterConfig,
    ) -> Result<Self, RosterError> {
        config.check_grades(&grades)?;
        let average = mean(&grades);
        Ok(Self {
            id,
            name: name.into(),
            grades,
            average,
        })
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Arithmetic mean of [`grades`](Self::grades).
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Replace all grades. On error the record is left as it was.
    pub fn set_grades(
        &mut self,
        grades: Vec<Grade>,
        config: &RosterConfig,
    ) -> Result<(), RosterError> {
        config.check_grades(&grades)?;
        self.average = mean(&grades);
        self.grades = grades;
        Ok(())
    }
}
