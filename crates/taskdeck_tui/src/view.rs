//! List rendering: grouped task list, empty state, add-form modal.
//!
//! Pure projection of [`AppState`]; nothing here talks to the coordinator or
//! the store.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use taskdeck_core::{Task, UiState};

use crate::state::{AppState, FormField, Screen};

pub const TITLE: &str = "Список дел";
pub const EMPTY_MESSAGE: &str = "Никаких задач нет :)";
const SHORTCUTS: &str = "a добавить · пробел отметить · d удалить · ↑↓ выбор · q выход";
const FORM_TITLE: &str = "Добавить задачу";
const FORM_SHORTCUTS: &str = "Enter добавить · Tab поле · Esc отмена";

/// One rendered list section: a recognized category and its tasks in store
/// order.
#[derive(Debug, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub tasks: Vec<&'a Task>,
}

/// Partitions the snapshot by category.
///
/// Preserves the fixed category order and within-category store order;
/// categories with zero tasks are omitted entirely.
pub fn group_by_category(ui: &UiState) -> Vec<CategoryGroup<'_>> {
    ui.categories
        .iter()
        .filter_map(|category| {
            let tasks: Vec<&Task> = ui
                .tasks
                .iter()
                .filter(|task| &task.category == category)
                .collect();
            if tasks.is_empty() {
                None
            } else {
                Some(CategoryGroup {
                    category: category.as_str(),
                    tasks,
                })
            }
        })
        .collect()
}

/// Draws the whole screen: header, grouped list or empty state, footer, and
/// the add-form modal on top when open.
pub fn draw(frame: &mut Frame, app: &AppState) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, app, header_area);
    if app.ui.tasks.is_empty() {
        draw_empty_state(frame, body_area);
    } else {
        draw_list(frame, app, body_area);
    }
    draw_footer(frame, app, footer_area);

    if app.screen == Screen::AddForm {
        draw_add_form(frame, app, frame.area());
    }
}

fn draw_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let count = app.ui.tasks.len();
    let line = Line::from(vec![
        Span::styled(
            format!(" {TITLE} "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("задач: {count}"),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_empty_state(frame: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(EMPTY_MESSAGE).alignment(Alignment::Center),
        middle,
    );
}

fn draw_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    let mut task_row = 0usize;

    for group in group_by_category(&app.ui) {
        lines.push(Line::from(Span::styled(
            format!(" {}", group.category),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for task in group.tasks {
            if task_row == app.cursor {
                selected_line = lines.len();
            }
            lines.push(task_line(task, task_row == app.cursor));
            task_row += 1;
        }
    }

    // Keep the selected row inside the viewport.
    let viewport = area.height as usize;
    let offset = selected_line.saturating_sub(viewport.saturating_sub(1));
    let visible: Vec<Line> = lines.into_iter().skip(offset).collect();
    frame.render_widget(Paragraph::new(visible), area);
}

fn task_line(task: &Task, selected: bool) -> Line<'_> {
    let marker = if task.is_completed { "[x]" } else { "[ ]" };
    let mut title_style = Style::default();
    if task.is_completed {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT | Modifier::DIM);
    }

    let mut spans = vec![
        Span::raw(format!("   {marker} ")),
        Span::styled(task.title.as_str(), title_style),
    ];
    if let Some(description) = task.description.as_deref().filter(|text| !text.is_empty()) {
        spans.push(Span::styled(
            format!(" — {description}"),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    spans.push(Span::styled(
        format!("  ({})", task.category),
        Style::default().add_modifier(Modifier::DIM),
    ));

    let mut line = Line::from(spans);
    if selected {
        line = line.style(Style::default().add_modifier(Modifier::REVERSED));
    }
    line
}

fn draw_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.warning {
        Some((message, _)) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            format!(" {SHORTCUTS}"),
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_add_form(frame: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let modal = centered_rect(area, 70, 8);
    frame.render_widget(Clear, modal);
    let block = Block::default().title(format!(" {FORM_TITLE} ")).borders(Borders::ALL);
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let category = app
        .ui
        .categories
        .get(form.category_index)
        .map(String::as_str)
        .unwrap_or("");
    let lines = vec![
        field_line(
            "Заголовок",
            &form.title,
            form.focus == FormField::Title,
            true,
        ),
        field_line(
            "Описание",
            &form.description,
            form.focus == FormField::Description,
            true,
        ),
        field_line(
            "Категория",
            &format!("← {category} →"),
            form.focus == FormField::Category,
            false,
        ),
        Line::default(),
        Line::from(Span::styled(
            FORM_SHORTCUTS,
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool, editable: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut value = value.to_string();
    if focused && editable {
        value.push('_');
    }
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::raw(value),
    ])
}

fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

#[cfg(test)]
mod tests {
    use super::{group_by_category, EMPTY_MESSAGE};
    use crate::state::AppState;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use taskdeck_core::{Task, UiState};

    fn task(id: i64, title: &str, category: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            category: category.to_string(),
            is_completed: false,
        }
    }

    #[test]
    fn grouping_omits_empty_categories() {
        let ui = UiState {
            tasks: vec![task(1, "Buy milk", "Личные")],
            ..UiState::default()
        };

        let groups = group_by_category(&ui);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Личные");
        assert_eq!(groups[0].tasks[0].title, "Buy milk");
    }

    #[test]
    fn grouping_preserves_fixed_category_and_insertion_order() {
        let ui = UiState {
            tasks: vec![
                task(1, "third", "Личные"),
                task(2, "first", "Важные"),
                task(3, "second", "Важные"),
            ],
            ..UiState::default()
        };

        let groups = group_by_category(&ui);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Важные");
        let titles: Vec<&str> = groups[0].tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
        assert_eq!(groups[1].category, "Личные");
    }

    #[test]
    fn grouping_of_empty_snapshot_is_empty() {
        assert!(group_by_category(&UiState::default()).is_empty());
    }

    #[test]
    fn empty_snapshot_renders_empty_state_message() {
        let backend = TestBackend::new(50, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = AppState::new(UiState::default());

        terminal.draw(|frame| super::draw(frame, &app)).unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn list_renders_group_header_and_task_row() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = AppState::new(UiState {
            tasks: vec![task(1, "Buy milk", "Личные")],
            ..UiState::default()
        });

        terminal.draw(|frame| super::draw(frame, &app)).unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Личные"));
        assert!(rendered.contains("Buy milk"));
        assert!(!rendered.contains(EMPTY_MESSAGE));
    }
}
