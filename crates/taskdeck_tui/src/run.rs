//! TUI run loop: terminal setup, event handling, draw.
//!
//! Key events are read in a dedicated thread so the render loop never blocks
//! on terminal input; coordinator state arrives through a `watch` receiver
//! and is drained once per pass.

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use taskdeck_core::{TaskCoordinator, TaskStore};

use crate::state::{AppState, FormField, Screen};
use crate::view;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Runs the TUI until the user quits: alternate screen, raw mode, event
/// loop. Dropping the coordinator on the way out cancels its in-flight work.
pub fn run<S: TaskStore>(mut coordinator: TaskCoordinator<S>) -> anyhow::Result<()> {
    info!("event=ui_start module=tui status=ok");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut coordinator);

    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    disable_raw_mode()?;

    info!("event=ui_stop module=tui status=ok");
    result
}

fn run_loop<S: TaskStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    coordinator: &mut TaskCoordinator<S>,
) -> anyhow::Result<()> {
    let mut state_rx = coordinator.state();
    let mut app = AppState::new(state_rx.borrow_and_update().clone());

    let (key_tx, key_rx) = mpsc::channel();
    std::thread::spawn(move || loop {
        if event::poll(INPUT_POLL).unwrap_or(false) {
            if let Ok(ev) = event::read() {
                if key_tx.send(ev).is_err() {
                    return;
                }
            }
        }
    });

    loop {
        if state_rx.has_changed().unwrap_or(false) {
            app.apply_snapshot(state_rx.borrow_and_update().clone());
        }
        app.expire_warning();

        if app.needs_redraw {
            terminal.draw(|frame| view::draw(frame, &app))?;
            app.needs_redraw = false;
        }

        match key_rx.recv_timeout(INPUT_POLL) {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut app, coordinator, key) {
                    return Ok(());
                }
            }
            Ok(Event::Resize(_, _)) => app.needs_redraw = true,
            Ok(_) => {}
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

/// Applies one key press. Returns `true` when the app should exit.
fn handle_key<S: TaskStore>(
    app: &mut AppState,
    coordinator: &mut TaskCoordinator<S>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.screen {
        Screen::List => handle_list_key(app, coordinator, key),
        Screen::AddForm => {
            handle_form_key(app, coordinator, key);
            false
        }
    }
}

fn handle_list_key<S: TaskStore>(
    app: &mut AppState,
    coordinator: &mut TaskCoordinator<S>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('a') => app.open_form(),
        KeyCode::Up => app.cursor_up(),
        KeyCode::Down => app.cursor_down(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            // Full-record update with only the flag inverted; the list
            // refreshes when the store publishes the new snapshot.
            if let Some(task) = app.selected_task() {
                coordinator.update_task(task.toggled());
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            // No confirmation step, as in the original.
            if let Some(task) = app.selected_task() {
                coordinator.delete_task(task.clone());
            }
        }
        _ => {}
    }
    false
}

fn handle_form_key<S: TaskStore>(
    app: &mut AppState,
    coordinator: &mut TaskCoordinator<S>,
    key: KeyEvent,
) {
    let category_count = app.ui.categories.len();

    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => {
            let submitted = app
                .form
                .as_ref()
                .map(|form| form.submit(&app.ui.categories));
            match submitted {
                Some(Ok(draft)) => {
                    coordinator.add_task(draft);
                    app.close_form();
                }
                Some(Err(err)) => app.warn(err.message()),
                None => {}
            }
        }
        other => {
            if let Some(form) = app.form.as_mut() {
                match other {
                    KeyCode::Tab | KeyCode::Down => form.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
                    KeyCode::Left if form.focus == FormField::Category => {
                        form.category_prev(category_count)
                    }
                    KeyCode::Right if form.focus == FormField::Category => {
                        form.category_next(category_count)
                    }
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Char(c) => form.input(c),
                    _ => {}
                }
            }
        }
    }
    app.needs_redraw = true;
}
