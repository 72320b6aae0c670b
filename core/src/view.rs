//! What the controller asks the rendering surface to draw.
//!
//! # Design
//! The controller never touches presentation directly. It hands the
//! `Surface` ready-made view models (`Grid`, `FormView`) and plain message
//! strings. `TextSurface` is a line-oriented surface over any `io::Write`.

use std::io::Write;

use crate::controller::FormMode;
use crate::types::{Student, StudentDraft, StudentId};

/// Shown in a grid cell whose field is absent from the server record.
pub const MISSING_FIELD: &str = "N/A";
pub const LOADING_MESSAGE: &str = "Loading students...";
pub const NO_STUDENTS_MESSAGE: &str = "No students registered.";
pub const LOAD_FAILED_MESSAGE: &str = "Students could not be loaded.";

const CREATE_LABEL: &str = "Add student";
const UPDATE_LABEL: &str = "Update student";

/// One grid row, every cell already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Target of the row's edit and delete actions.
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub age: String,
    pub grade: String,
}

impl GridRow {
    /// Absent fields show as `N/A`; an empty string stays empty.
    pub fn from_student(student: &Student) -> Self {
        Self {
            id: cell(student.id().map(StudentId::to_string)),
            name: cell(student.name.clone()),
            lastname: cell(student.lastname.clone()),
            age: cell(student.age.map(|age| age.to_string())),
            grade: cell(student.grade.clone()),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [&self.id, &self.name, &self.lastname, &self.age, &self.grade]
    }
}

fn cell(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING_FIELD.to_string())
}

/// Content of the student grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grid {
    Rows(Vec<GridRow>),
    /// The collection is empty.
    Empty,
    /// The last load failed.
    Unavailable,
}

impl Grid {
    pub fn from_students(students: &[Student]) -> Self {
        if students.is_empty() {
            return Grid::Empty;
        }
        Grid::Rows(students.iter().map(GridRow::from_student).collect())
    }

    pub fn rows(&self) -> &[GridRow] {
        match self {
            Grid::Rows(rows) => rows,
            Grid::Empty | Grid::Unavailable => &[],
        }
    }

    /// Placeholder text for grids without rows.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Grid::Rows(_) => None,
            Grid::Empty => Some(NO_STUDENTS_MESSAGE),
            Grid::Unavailable => Some(LOAD_FAILED_MESSAGE),
        }
    }
}

/// Everything needed to draw the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub cancel_visible: bool,
    /// Hidden id field; `None` while creating.
    pub editing: Option<StudentId>,
    pub draft: StudentDraft,
}

impl FormView {
    pub fn new(mode: &FormMode, draft: &StudentDraft) -> Self {
        match mode {
            FormMode::Creating => Self {
                title: CREATE_LABEL,
                submit_label: CREATE_LABEL,
                cancel_visible: false,
                editing: None,
                draft: draft.clone(),
            },
            FormMode::Editing(id) => Self {
                title: UPDATE_LABEL,
                submit_label: UPDATE_LABEL,
                cancel_visible: true,
                editing: Some(id.clone()),
                draft: draft.clone(),
            },
        }
    }
}

/// The presentation layer the controller drives.
pub trait Surface {
    /// Replace the whole grid.
    fn render_grid(&mut self, grid: &Grid);
    fn render_form(&mut self, form: &FormView);
    fn show_loading(&mut self, message: &str);
    fn hide_loading(&mut self);
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

const HEADERS: [&str; 5] = ["ID", "Name", "Lastname", "Age", "Grade"];

/// Line-oriented surface writing to `out`.
///
/// Write failures are logged and otherwise ignored: the surface has no way
/// to report them back through the controller.
#[derive(Debug)]
pub struct TextSurface<W> {
    out: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "text surface write failed");
        }
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn render_grid(&mut self, grid: &Grid) {
        if let Some(placeholder) = grid.placeholder() {
            self.line(placeholder);
            return;
        }

        let rows = grid.rows();
        let mut widths = HEADERS.map(str::len);
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = format_row(HEADERS, &widths);
        let rule = widths.map(|w| "-".repeat(w)).join("-+-");
        self.line(&header);
        self.line(&rule);
        for row in rows {
            let text = format_row(row.cells(), &widths);
            self.line(&text);
        }
    }

    fn render_form(&mut self, form: &FormView) {
        self.line(&format!("== {} ==", form.title));
        if let Some(id) = &form.editing {
            self.line(&format!("id: {id}"));
        }
        let draft = &form.draft;
        self.line(&format!("name: {}", draft.name));
        self.line(&format!("lastname: {}", draft.lastname));
        self.line(&format!("age: {}", draft.age));
        self.line(&format!("grade: {}", draft.grade));
        let actions = if form.cancel_visible {
            format!("[{}] [Cancel]", form.submit_label)
        } else {
            format!("[{}]", form.submit_label)
        };
        self.line(&actions);
    }

    fn show_loading(&mut self, message: &str) {
        self.line(message);
    }

    fn hide_loading(&mut self) {}

    fn show_error(&mut self, message: &str) {
        self.line(&format!("error: {message}"));
    }

    fn clear_error(&mut self) {}
}

fn format_row(cells: [&str; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
