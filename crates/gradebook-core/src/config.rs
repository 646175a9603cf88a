//! Roster configuration and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::model::Grade;

/// Number of grade slots per student when nothing else is configured.
pub const DEFAULT_SUBJECT_COUNT: usize = 5;
/// Upper bound on grade slots per student.
pub const MAX_SUBJECT_COUNT: usize = 64;
/// Lowest accepted grade (inclusive).
pub const DEFAULT_MIN_GRADE: Grade = 0;
/// Highest accepted grade (inclusive).
pub const DEFAULT_MAX_GRADE: Grade = 100;

/// Shape of every record on a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Fixed number of grades each student carries.
    #[serde(default = "default_subject_count")]
    pub subject_count: usize,
    /// Lowest accepted grade (inclusive).
    #[serde(default = "default_min_grade")]
    pub min_grade: Grade,
    /// Highest accepted grade (inclusive).
    #[serde(default = "default_max_grade")]
    pub max_grade: Grade,
}

fn default_subject_count() -> usize {
    DEFAULT_SUBJECT_COUNT
}
fn default_min_grade() -> Grade {
    DEFAULT_MIN_GRADE
}
fn default_max_grade() -> Grade {
    DEFAULT_MAX_GRADE
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            subject_count: DEFAULT_SUBJECT_COUNT,
            min_grade: DEFAULT_MIN_GRADE,
            max_grade: DEFAULT_MAX_GRADE,
        }
    }
}

impl RosterConfig {
    /// Config with a custom subject count and the default grade range.
    pub fn with_subjects(subject_count: usize) -> Self {
        Self {
            subject_count,
            ..Self::default()
        }
    }

    /// Reject configurations no record could satisfy.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.subject_count == 0 {
            return Err(RosterError::InvalidConfig(
                "subject_count must be at least 1".into(),
            ));
        }
        if self.subject_count > MAX_SUBJECT_COUNT {
            return Err(RosterError::InvalidConfig(format!(
                "subject_count ({}) exceeds the maximum of {MAX_SUBJECT_COUNT}",
                self.subject_count
            )));
        }
        if self.min_grade > self.max_grade {
            return Err(RosterError::InvalidConfig(format!(
                "min_grade ({}) is greater than max_grade ({})",
                self.min_grade, self.max_grade
            )));
        }
        Ok(())
    }

    /// Whether `grade` lies in the inclusive range.
    pub fn contains(&self, grade: Grade) -> bool {
        (self.min_grade..=self.max_grade).contains(&grade)
    }

    /// Check a full grade list against the subject count and range.
    pub fn check_grades(&self, grades: &[Grade]) -> Result<(), RosterError> {
        if grades.len() != self.subject_count {
            return Err(RosterError::GradeCount {
                expected: self.subject_count,
                actual: grades.len(),
            });
        }
        match grades.iter().position(|&g| !self.contains(g)) {
            Some(i) => Err(RosterError::InvalidGrade {
                subject: i + 1,
                grade: grades[i],
                min: self.min_grade,
                max: self.max_grade,
            }),
            None => Ok(()),
        }
    }
}

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Record shape.
    #[serde(default)]
    pub roster: RosterConfig,
    /// Decimal places used when printing averages.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_precision() -> usize {
    2
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            roster: RosterConfig::default(),
            precision: default_precision(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// The subject count is taken from `subjects` if given, otherwise from
/// `GRADEBOOK_SUBJECTS`, otherwise from the file. Validation runs once all
/// overrides are applied.
pub fn load_config_from(
    path: Option<&Path>,
    subjects: Option<usize>,
) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Some(n) = subjects {
        config.roster.subject_count = n;
    } else if let Ok(raw) = std::env::var("GRADEBOOK_SUBJECTS") {
        config.roster.subject_count = raw
            .trim()
            .parse()
            .with_context(|| format!("GRADEBOOK_SUBJECTS is not a number: '{raw}'"))?;
    }

    config.roster.validate()?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Parse a TOML string into a `GradebookConfig` (useful for testing).
pub fn parse_config_str(content: &str) -> Result<GradebookConfig> {
    let config: GradebookConfig = toml::from_str(content).context("invalid TOML")?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
