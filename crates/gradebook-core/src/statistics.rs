//! Averages and class-wide aggregate statistics.

use serde::Serialize;

use crate::model::{Grade, Student};

/// Arithmetic mean of `grades`, or 0.0 for an empty slice.
pub fn mean(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let total: i64 = grades.iter().map(|&g| i64::from(g)).sum();
    total as f64 / grades.len() as f64
}

/// Aggregate view over a whole roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassStatistics<'a> {
    /// Number of students.
    pub count: usize,
    /// Mean of the per-student averages.
    pub class_average: f64,
    /// Student with the highest average (first in roster order on ties).
    pub highest: &'a Student,
    /// Student with the lowest average (first in roster order on ties).
    pub lowest: &'a Student,
}

/// Compute class statistics, or `None` for an empty roster.
///
/// The class average is the mean of each student's average, not a mean over
/// every raw grade.
pub fn compute_class_statistics(students: &[Student]) -> Option<ClassStatistics<'_>> {
    let (first, rest) = students.split_first()?;

    let mut total = first.average();
    let mut highest = first;
    let mut lowest = first;
    for s in rest {
        total += s.average();
        if s.average() > highest.average() {
            highest = s;
        }
        if s.average() < lowest.average() {
            lowest = s;
        }
    }

    Some(ClassStatistics {
        count: students.len(),
        class_average: total / students.len() as f64,
        highest,
        lowest,
    })
}
