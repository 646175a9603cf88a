//! The interactive menu loop.
//!
//! Input is read token by token like a terminal user would type it: several
//! grades may share a line, while a student's name always takes a whole line.
//! End of input ends the session the same way the Exit command does.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use gradebook_core::{Grade, RosterError, RosterStore, StudentId};

use crate::render::Renderer;

const MENU: &str = "\n=== STUDENT GRADE MANAGEMENT SYSTEM ===\n\
1. Add Student\n\
2. Display All Students\n\
3. Search Student\n\
4. Sort Students by Average\n\
5. Calculate Class Statistics\n\
6. Remove Student\n\
7. Update Student Grades\n\
8. Exit\n";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    DisplayAll,
    Search,
    Sort,
    Statistics,
    Remove,
    UpdateGrades,
    Exit,
}

impl TryFrom<u32> for MenuChoice {
    type Error = u32;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(MenuChoice::Add),
            2 => Ok(MenuChoice::DisplayAll),
            3 => Ok(MenuChoice::Search),
            4 => Ok(MenuChoice::Sort),
            5 => Ok(MenuChoice::Statistics),
            6 => Ok(MenuChoice::Remove),
            7 => Ok(MenuChoice::UpdateGrades),
            8 => Ok(MenuChoice::Exit),
            other => Err(other),
        }
    }
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive session over a single [`RosterStore`].
pub struct Shell<R, W> {
    store: RosterStore,
    renderer: Renderer,
    input: R,
    out: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: RosterStore, renderer: Renderer, input: R, out: W) -> Self {
        Self {
            store,
            renderer,
            input,
            out,
            pending: VecDeque::new(),
        }
    }

    /// Run until Exit or end of input. Returns the final number of students.
    pub fn run(&mut self) -> Result<usize> {
        writeln!(self.out, "Welcome to the Student Grade Management System!")?;

        loop {
            write!(self.out, "{MENU}")?;
            self.prompt("Enter your choice: ")?;

            let Some(choice) = self.read_choice()? else {
                break;
            };
            tracing::debug!(?choice, "menu selection");

            let flow = match choice {
                MenuChoice::Add => self.add_student()?,
                MenuChoice::DisplayAll => self.display_all()?,
                MenuChoice::Search => self.search()?,
                MenuChoice::Sort => self.sort()?,
                MenuChoice::Statistics => self.statistics()?,
                MenuChoice::Remove => self.remove()?,
                MenuChoice::UpdateGrades => self.update_grades()?,
                MenuChoice::Exit => Flow::Quit,
            };
            if flow == Flow::Quit {
                break;
            }
        }

        let count = self.store.len();
        writeln!(self.out, "Thank you for using the system!")?;
        writeln!(self.out, "Total students managed: {count}")?;
        self.out.flush()?;
        Ok(count)
    }

    /// Give back the roster to inspect it after a scripted session.
    #[cfg(test)]
    pub fn into_store(self) -> RosterStore {
        self.store
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    fn add_student(&mut self) -> Result<Flow> {
        let Some(id) = self.read_id("Enter student ID: ")? else {
            return Ok(Flow::Quit);
        };
        if self.store.find_by_id(id).is_some() {
            return self.say(&format!("Student with ID {id} already exists!"));
        }

        self.prompt("Enter student name: ")?;
        let Some(name) = self.read_line()? else {
            return Ok(Flow::Quit);
        };

        let subjects = self.store.config().subject_count;
        writeln!(self.out, "Enter grades for {subjects} subjects:")?;
        let Some(grades) = self.read_grades()? else {
            return Ok(Flow::Quit);
        };

        let message = match self.store.add_student(id, name, grades) {
            Ok(_) => "Student added successfully!".to_string(),
            Err(e) => describe(&e),
        };
        self.say(&message)
    }

    fn display_all(&mut self) -> Result<Flow> {
        let text = match self.store.list_all() {
            Ok(students) => self.renderer.students(students)?,
            Err(e) => describe(&e),
        };
        self.say(&text)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(id) = self.read_id("Enter student ID to search: ")? else {
            return Ok(Flow::Quit);
        };
        let text = match self.store.find_by_id(id) {
            Some(s) => self.renderer.student(s)?,
            None => describe(&RosterError::NotFound(id)),
        };
        self.say(&text)
    }

    fn sort(&mut self) -> Result<Flow> {
        match self.store.sort_by_average_descending() {
            Ok(()) => self.say("Students sorted by average grade!"),
            Err(RosterError::EmptyStore) => self.say("No students to sort!"),
            Err(e) => self.say(&describe(&e)),
        }
    }

    fn statistics(&mut self) -> Result<Flow> {
        let text = match self.store.class_statistics() {
            Ok(stats) => self.renderer.statistics(&stats)?,
            Err(e) => describe(&e),
        };
        self.say(&text)
    }

    fn remove(&mut self) -> Result<Flow> {
        let Some(id) = self.read_id("Enter student ID to remove: ")? else {
            return Ok(Flow::Quit);
        };
        match self.store.remove_by_id(id) {
            Ok(removed) => {
                writeln!(self.out, "Removing student: {}", removed.name())?;
                self.say("Student removed successfully!")
            }
            Err(e) => self.say(&describe(&e)),
        }
    }

    fn update_grades(&mut self) -> Result<Flow> {
        let Some(id) = self.read_id("Enter student ID to update: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(name) = self.store.find_by_id(id).map(|s| s.name().to_string()) else {
            return self.say(&describe(&RosterError::NotFound(id)));
        };

        writeln!(self.out, "Enter new grades for {name}:")?;
        let Some(grades) = self.read_grades()? else {
            return Ok(Flow::Quit);
        };

        let message = match self.store.update_grades(id, grades) {
            Ok(_) => "Grades updated successfully!".to_string(),
            Err(e) => describe(&e),
        };
        self.say(&message)
    }

    // -----------------------------------------------------------------------
    // Input helpers
    // -----------------------------------------------------------------------

    fn say(&mut self, text: &str) -> Result<Flow> {
        writeln!(self.out, "{text}")?;
        Ok(Flow::Continue)
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush().context("failed to flush output")
    }

    /// Next raw line, without its line ending. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.pending.clear();
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Next whitespace-separated token, skipping blank lines.
    fn read_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    /// Read the next integer, re-prompting with `retry` until one parses.
    fn read_number<T: std::str::FromStr>(&mut self, retry: &str) -> Result<Option<T>> {
        loop {
            let Some(token) = self.read_token()? else {
                return Ok(None);
            };
            match token.parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => {
                    // Drop the rest of a garbled line.
                    self.pending.clear();
                    self.prompt(retry)?;
                }
            }
        }
    }

    fn read_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            let Some(n) = self.read_number::<u32>("Invalid choice! Enter 1-8: ")? else {
                return Ok(None);
            };
            match MenuChoice::try_from(n) {
                Ok(choice) => return Ok(Some(choice)),
                Err(_) => {
                    self.pending.clear();
                    self.prompt("Invalid choice! Enter 1-8: ")?;
                }
            }
        }
    }

    fn read_id(&mut self, text: &str) -> Result<Option<StudentId>> {
        self.prompt(text)?;
        self.read_number("Invalid ID, enter a whole number: ")
    }

    /// One grade per configured subject, re-prompting on out-of-range values.
    fn read_grades(&mut self) -> Result<Option<Vec<Grade>>> {
        let config = *self.store.config();
        let retry = format!("Invalid grade ({}-{}): ", config.min_grade, config.max_grade);

        let mut grades = Vec::new();
        for subject in 1..=config.subject_count {
            self.prompt(&format!("Subject {subject}: "))?;
            let grade = loop {
                let Some(g) = self.read_number::<Grade>(&retry)? else {
                    return Ok(None);
                };
                if config.contains(g) {
                    break g;
                }
                self.prompt(&retry)?;
            };
            grades.push(grade);
        }
        Ok(Some(grades))
    }
}

/// User-facing wording for a roster error.
fn describe(err: &RosterError) -> String {
    match err {
        RosterError::DuplicateId(id) => format!("Student with ID {id} already exists!"),
        RosterError::NotFound(_) => "Student not found!".to_string(),
        RosterError::EmptyStore => "No students found!".to_string(),
        other => format!("Error: {other}"),
    }
}
