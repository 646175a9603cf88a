//! Turning roster data into printable text.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};

use gradebook_core::{ClassStatistics, Grade, Student};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Formats students and statistics in the chosen [`OutputFormat`].
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
    precision: usize,
}

impl Renderer {
    pub fn new(format: OutputFormat, precision: usize) -> Self {
        Self { format, precision }
    }

    /// The whole roster, one row per student.
    pub fn students(&self, students: &[Student]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(students)?);
        }

        let mut table = Table::new();
        table.set_header(vec!["ID", "Name", "Grades", "Average"]);
        for s in students {
            table.add_row(vec![
                Cell::new(s.id()).set_alignment(CellAlignment::Right),
                Cell::new(s.name()),
                Cell::new(format!("[{}]", join_grades(s.grades(), ","))),
                Cell::new(format!("{:.*}", self.precision, s.average()))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        Ok(table.to_string())
    }

    /// A single search hit.
    pub fn student(&self, s: &Student) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(s)?);
        }
        Ok(format!(
            "Student Found: {} (ID: {})\nGrades: {}\nAverage: {:.*}",
            s.name(),
            s.id(),
            join_grades(s.grades(), ", "),
            self.precision,
            s.average()
        ))
    }

    pub fn statistics(&self, stats: &ClassStatistics<'_>) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(stats)?);
        }
        let p = self.precision;
        Ok(format!(
            "=== CLASS STATISTICS ===\n\
             Total Students: {}\n\
             Class Average: {:.*}\n\
             Highest Average: {:.*} ({})\n\
             Lowest Average: {:.*} ({})",
            stats.count,
            p,
            stats.class_average,
            p,
            stats.highest.average(),
            stats.highest.name(),
            p,
            stats.lowest.average(),
            stats.lowest.name(),
        ))
    }
}

fn join_grades(grades: &[Grade], sep: &str) -> String {
    grades
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}
