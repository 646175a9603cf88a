//! The in-memory roster.
//!
//! `RosterStore` owns the ordered list of students. Each operation either
//! fully applies or leaves the roster untouched.

use crate::config::RosterConfig;
use crate::error::RosterError;
use crate::model::{Grade, Student, StudentId};
use crate::statistics::{compute_class_statistics, ClassStatistics};

/// Ordered, in-memory collection of students keyed by a unique ID.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    config: RosterConfig,
    students: Vec<Student>,
}

impl RosterStore {
    /// Create an empty roster for records shaped by `config`.
    pub fn new(config: RosterConfig) -> Result<Self, RosterError> {
        config.validate()?;
        Ok(Self {
            config,
            students: Vec::new(),
        })
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// All students in stored order. Empty when the roster is empty.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.students.iter().position(|s| s.id() == id)
    }

    /// Append a new student.
    pub fn add_student(
        &mut self,
        id: StudentId,
        name: impl Into<String>,
        grades: Vec<Grade>,
    ) -> Result<&Student, RosterError> {
        if self.position(id).is_some() {
            tracing::warn!(id, "rejected add: duplicate id");
            return Err(RosterError::DuplicateId(id));
        }
        let student = Student::new(id, name, grades, &self.config).inspect_err(|e| {
            tracing::warn!(id, "rejected add: {e}");
        })?;
        tracing::debug!(id, average = student.average(), "added student");
        self.students.push(student);
        Ok(&self.students[self.students.len() - 1])
    }

    pub fn find_by_id(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    /// Every student in stored order, or [`RosterError::EmptyStore`].
    pub fn list_all(&self) -> Result<&[Student], RosterError> {
        if self.students.is_empty() {
            return Err(RosterError::EmptyStore);
        }
        Ok(&self.students)
    }

    /// Replace a student's grades and recompute their average.
    pub fn update_grades(
        &mut self,
        id: StudentId,
        grades: Vec<Grade>,
    ) -> Result<&Student, RosterError> {
        let index = self.position(id).ok_or(RosterError::NotFound(id))?;
        let student = &mut self.students[index];
        student.set_grades(grades, &self.config).inspect_err(|e| {
            tracing::warn!(id, "rejected grade update: {e}");
        })?;
        tracing::debug!(id, average = student.average(), "updated grades");
        Ok(student)
    }

    /// Remove a student, keeping the relative order of everyone else.
    pub fn remove_by_id(&mut self, id: StudentId) -> Result<Student, RosterError> {
        let index = self.position(id).ok_or(RosterError::NotFound(id))?;
        let removed = self.students.remove(index);
        tracing::debug!(id, remaining = self.students.len(), "removed student");
        Ok(removed)
    }

    /// Reorder the roster from highest to lowest average.
    ///
    /// The sort is stable: students with equal averages keep their relative
    /// order from before the call.
    pub fn sort_by_average_descending(&mut self) -> Result<(), RosterError> {
        if self.students.is_empty() {
            return Err(RosterError::EmptyStore);
        }
        self.students
            .sort_by(|a, b| b.average().total_cmp(&a.average()));
        tracing::debug!(count = self.students.len(), "sorted roster by average");
        Ok(())
    }

    pub fn class_statistics(&self) -> Result<ClassStatistics<'_>, RosterError> {
        compute_class_statistics(&self.students).ok_or(RosterError::EmptyStore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> RosterStore {
        RosterStore::new(RosterConfig::default()).unwrap()
    }

    fn ids(store: &RosterStore) -> Vec<StudentId> {
        store.students().iter().map(|s| s.id()).collect()
    }

    /// Roster with ids 1..=n whose averages follow `averages`.
    fn roster_with(averages: &[Grade]) -> RosterStore {
        let mut store = roster();
        for (i, &avg) in averages.iter().enumerate() {
            store
                .add_student(i as StudentId + 1, format!("S{}", i + 1), vec![avg; 5])
                .unwrap();
        }
        store
    }

    #[test]
    fn new_rejects_invalid_config() {
        assert!(RosterStore::new(RosterConfig::with_subjects(0)).is_err());
        assert!(RosterStore::new(RosterConfig::with_subjects(usize::MAX)).is_err());
    }

    #[test]
    fn count_matches_distinct_adds() {
        let store = roster_with(&[10, 20, 30, 40]);
        assert_eq!(store.len(), 4);
        assert_eq!(store.list_all().unwrap().len(), 4);
        assert_eq!(ids(&store), vec![1, 2, 3, 4]);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut store = roster();
        store.add_student(1, "Alice", vec![90, 80, 70, 100, 60]).unwrap();
        let err = store.add_student(1, "Again", vec![0; 5]).unwrap_err();
        assert_eq!(err, RosterError::DuplicateId(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(1).unwrap().name(), "Alice");
    }

    #[test]
    fn add_rejects_bad_grades_without_inserting() {
        let mut store = roster();
        assert!(matches!(
            store.add_student(1, "A", vec![0, 0, 0, 0, -1]),
            Err(RosterError::InvalidGrade { .. })
        ));
        assert!(matches!(
            store.add_student(1, "A", vec![0; 4]),
            Err(RosterError::GradeCount {
                expected: 5,
                actual: 4
            })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn add_returns_record_with_average() {
        let mut store = roster();
        let s = store.add_student(1, "Alice", vec![90, 80, 70, 100, 60]).unwrap();
        assert!((s.average() - 80.0).abs() < f64::EPSILON);
        let s = store.add_student(2, "Bob", vec![50; 5]).unwrap();
        assert!((s.average() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn find_by_id_absent_is_none() {
        let store = roster_with(&[10]);
        assert!(store.find_by_id(1).is_some());
        assert!(store.find_by_id(2).is_none());
    }

    #[test]
    fn list_all_on_empty_signals_empty() {
        assert_eq!(roster().list_all(), Err(RosterError::EmptyStore));
        assert!(roster().students().is_empty());
    }

    #[test]
    fn update_recomputes_average() {
        let mut store = roster_with(&[50]);
        let s = store.update_grades(1, vec![100, 90, 80, 70, 60]).unwrap();
        assert_eq!(s.grades(), &[100, 90, 80, 70, 60]);
        assert!((s.average() - 80.0).abs() < f64::EPSILON);
        let s = store.find_by_id(1).unwrap();
        assert!((s.average() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_out_of_range_leaves_record_unchanged() {
        let mut store = roster();
        store.add_student(1, "Alice", vec![90, 80, 70, 100, 60]).unwrap();
        let before = store.find_by_id(1).unwrap().clone();

        let err = store.update_grades(1, vec![101, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, RosterError::InvalidGrade { grade: 101, .. }));
        assert_eq!(store.find_by_id(1).unwrap(), &before);
    }

    #[test]
    fn update_missing_id() {
        let mut store = roster_with(&[50]);
        assert_eq!(
            store.update_grades(42, vec![0; 5]).unwrap_err(),
            RosterError::NotFound(42)
        );
    }

    #[test]
    fn remove_preserves_order_of_others() {
        let mut store = roster_with(&[10, 20, 30, 40, 50]);
        let removed = store.remove_by_id(3).unwrap();
        assert_eq!(removed.name(), "S3");
        assert_eq!(store.len(), 4);
        assert_eq!(ids(&store), vec![1, 2, 4, 5]);
    }

    #[test]
    fn remove_missing_id_leaves_roster_unchanged() {
        let mut store = roster_with(&[10, 20, 30]);
        let before = store.students().to_vec();
        assert_eq!(store.remove_by_id(99), Err(RosterError::NotFound(99)));
        assert_eq!(store.students(), before.as_slice());
    }

    #[test]
    fn sort_orders_by_descending_average() {
        let mut store = roster_with(&[40, 95, 10, 70, 70, 100, 0]);
        store.sort_by_average_descending().unwrap();
        let students = store.students();
        for pair in students.windows(2) {
            assert!(pair[0].average() >= pair[1].average());
        }
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn sort_is_stable_for_equal_averages() {
        let mut store = roster_with(&[60, 80, 60, 80, 60]);
        store.sort_by_average_descending().unwrap();
        assert_eq!(ids(&store), vec![2, 4, 1, 3, 5]);

        // Deterministic across repeated runs from the same input order.
        let mut again = roster_with(&[60, 80, 60, 80, 60]);
        again.sort_by_average_descending().unwrap();
        assert_eq!(ids(&again), ids(&store));
    }

    #[test]
    fn sort_does_not_touch_records() {
        let mut store = roster_with(&[30, 90]);
        let alice = store.find_by_id(1).unwrap().clone();
        store.sort_by_average_descending().unwrap();
        assert_eq!(store.find_by_id(1).unwrap(), &alice);
    }

    #[test]
    fn sort_empty_roster() {
        assert_eq!(
            roster().sort_by_average_descending(),
            Err(RosterError::EmptyStore)
        );
    }

    #[test]
    fn statistics_scenario() {
        let mut store = roster();
        store.add_student(1, "Alice", vec![90, 80, 70, 100, 60]).unwrap();
        store.add_student(2, "Bob", vec![50, 50, 50, 50, 50]).unwrap();

        let stats = store.class_statistics().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(format!("{:.2}", stats.class_average), "65.00");
        assert_eq!(stats.highest.name(), "Alice");
        assert_eq!(format!("{:.2}", stats.highest.average()), "80.00");
        assert_eq!(stats.lowest.name(), "Bob");
        assert_eq!(format!("{:.2}", stats.lowest.average()), "50.00");
    }

    #[test]
    fn statistics_bounds_hold() {
        let store = roster_with(&[12, 99, 47, 47, 3, 88]);
        let stats = store.class_statistics().unwrap();
        assert!(stats.highest.average() >= stats.class_average);
        assert!(stats.class_average >= stats.lowest.average());
        for s in store.students() {
            assert!(stats.highest.average() >= s.average());
            assert!(stats.lowest.average() <= s.average());
        }
    }

    #[test]
    fn statistics_empty_roster() {
        assert_eq!(
            roster().class_statistics().unwrap_err(),
            RosterError::EmptyStore
        );
    }

    #[test]
    fn custom_subject_count() {
        let mut store = RosterStore::new(RosterConfig::with_subjects(3)).unwrap();
        store.add_student(1, "Trio", vec![60, 70, 80]).unwrap();
        assert!(store.add_student(2, "Five", vec![0; 5]).is_err());
        assert!((store.find_by_id(1).unwrap().average() - 70.0).abs() < f64::EPSILON);
    }
}
