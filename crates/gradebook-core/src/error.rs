//! Roster error types.
//!
//! Every variant is an expected, recoverable condition. The shell turns them
//! into user-facing messages; none of them end the process.

use thiserror::Error;

use crate::model::{Grade, StudentId};

/// Errors returned by [`RosterStore`](crate::store::RosterStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A student with this ID is already on the roster.
    #[error("student with ID {0} already exists")]
    DuplicateId(StudentId),

    /// No student with this ID is on the roster.
    #[error("student with ID {0} not found")]
    NotFound(StudentId),

    /// A grade fell outside the configured inclusive range.
    #[error("invalid grade {grade} for subject {subject} (expected {min}-{max})")]
    InvalidGrade {
        /// 1-based subject number.
        subject: usize,
        grade: Grade,
        min: Grade,
        max: Grade,
    },

    /// The grade list does not have one entry per subject.
    #[error("expected {expected} grades, got {actual}")]
    GradeCount { expected: usize, actual: usize },

    /// The operation needs at least one student.
    #[error("no students on the roster")]
    EmptyStore,

    /// The roster configuration cannot describe a valid record.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RosterError {
    /// Returns `true` if the error was caused by bad grade input rather than
    /// by the state of the roster.
    pub fn is_grade_error(&self) -> bool {
        matches!(
            self,
            RosterError::InvalidGrade { .. } | RosterError::GradeCount { .. }
        )
    }
}
