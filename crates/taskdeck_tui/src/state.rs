//! Presentation state: current screen, list cursor, add-task form draft and
//! transient warnings.
//!
//! Everything here is process-lifetime UI state; the task snapshot itself
//! arrives from the coordinator and is only ever replaced wholesale.

use std::time::{Duration, Instant};

use taskdeck_core::{Task, TaskDraft, UiState};

/// Transient warnings disappear after this long, toast-style.
pub const WARNING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    AddForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Category,
}

/// Validation failure on form submit; recovered locally, never submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    EmptyTitle,
    NoCategory,
}

impl FormError {
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyTitle => "Заголовок пуст",
            Self::NoCategory => "Категория не выбрана",
        }
    }
}

/// Draft fields for the modal add form.
///
/// Lives only while the form is open; submit or dismiss discards it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskForm {
    pub title: String,
    pub description: String,
    /// Index into the recognized category list; defaults to the first entry.
    pub category_index: usize,
    pub focus: FormField,
}

impl AddTaskForm {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category_index: 0,
            focus: FormField::Title,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Category,
            FormField::Category => FormField::Title,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Category,
            FormField::Description => FormField::Title,
            FormField::Category => FormField::Description,
        };
    }

    pub fn input(&mut self, c: char) {
        match self.focus {
            FormField::Title => self.title.push(c),
            FormField::Description => self.description.push(c),
            FormField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Category => {}
        }
    }

    pub fn category_next(&mut self, category_count: usize) {
        if category_count > 0 {
            self.category_index = (self.category_index + 1) % category_count;
        }
    }

    pub fn category_prev(&mut self, category_count: usize) {
        if category_count > 0 {
            self.category_index = (self.category_index + category_count - 1) % category_count;
        }
    }

    /// Validates the draft against the recognized categories.
    ///
    /// A blank title or an out-of-range category selection fails without
    /// producing a draft; the caller surfaces the warning and keeps the form
    /// open.
    pub fn submit(&self, categories: &[String]) -> Result<TaskDraft, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let category = categories
            .get(self.category_index)
            .ok_or(FormError::NoCategory)?;

        Ok(TaskDraft::new(
            self.title.trim(),
            Some(self.description.trim().to_string()),
            category.clone(),
        ))
    }
}

impl Default for AddTaskForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the render loop needs between frames.
pub struct AppState {
    /// Last snapshot received from the coordinator.
    pub ui: UiState,
    pub screen: Screen,
    /// Present exactly while `screen == Screen::AddForm`.
    pub form: Option<AddTaskForm>,
    /// Cursor over visible task rows (category headers are skipped).
    pub cursor: usize,
    pub warning: Option<(String, Instant)>,
    pub needs_redraw: bool,
}

impl AppState {
    pub fn new(ui: UiState) -> Self {
        Self {
            ui,
            screen: Screen::List,
            form: None,
            cursor: 0,
            warning: None,
            needs_redraw: true,
        }
    }

    /// Replaces the task snapshot, keeping the cursor on a valid row.
    pub fn apply_snapshot(&mut self, ui: UiState) {
        self.ui = ui;
        let count = self.visible_tasks().len();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
        self.needs_redraw = true;
    }

    /// Tasks in render order: fixed category order, store order within a
    /// category. Matches the rows the list view draws.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        crate::view::group_by_category(&self.ui)
            .into_iter()
            .flat_map(|group| group.tasks)
            .collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.cursor).copied()
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.needs_redraw = true;
        }
    }

    pub fn cursor_down(&mut self) {
        let count = self.visible_tasks().len();
        if count > 0 && self.cursor + 1 < count {
            self.cursor += 1;
            self.needs_redraw = true;
        }
    }

    pub fn open_form(&mut self) {
        self.screen = Screen::AddForm;
        self.form = Some(AddTaskForm::new());
        self.needs_redraw = true;
    }

    /// Closes the form, discarding any draft fields.
    pub fn close_form(&mut self) {
        self.screen = Screen::List;
        self.form = None;
        self.needs_redraw = true;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warning = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clears the warning once its timeout elapses.
    pub fn expire_warning(&mut self) {
        let expired = self
            .warning
            .as_ref()
            .is_some_and(|(_, shown_at)| shown_at.elapsed() > WARNING_TIMEOUT);
        if expired {
            self.warning = None;
            self.needs_redraw = true;
        }
    }
}
