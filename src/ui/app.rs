use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::calendar::MonthRef;
use crate::error::{Error, Result};
use crate::query::{self, Filter, Stats};
use crate::task::{Applied, Task, TaskStore};

use super::editor::{EditorAction, EditorState};
use super::view;

const EVENT_POLL_MS: u64 = 120;
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewMode {
    List,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

/// Single transient message slot. A new message replaces the current one
/// and restarts the dismissal clock.
pub(crate) struct Notification {
    pub(crate) message: String,
    pub(crate) kind: StatusKind,
    expires_at: Instant,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: i64,
    pub(crate) text: String,
}

pub struct AppState {
    store: TaskStore,
    pub(crate) view: ViewMode,
    pub(crate) filter: Filter,
    pub(crate) month: MonthRef,
    pub(crate) today: NaiveDate,
    pub(crate) selected: usize,
    pub(crate) cell_tasks: usize,
    pub(crate) editor: Option<EditorState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    notification: Option<Notification>,
}

impl AppState {
    fn new(store: TaskStore, cell_tasks: usize, load_warning: Option<String>) -> Self {
        let today = Local::now().date_naive();
        let mut app = Self {
            store,
            view: ViewMode::List,
            filter: Filter::All,
            month: MonthRef::containing(today),
            today,
            selected: 0,
            cell_tasks,
            editor: None,
            delete_confirm: None,
            notification: None,
        };
        if let Some(warning) = load_warning {
            app.notify(warning, StatusKind::Error);
        }
        app
    }

    pub(crate) fn tasks(&self) -> &[Task] {
        self.store.all()
    }

    /// The list view's rows under the active filter, insertion order.
    pub(crate) fn visible(&self) -> Vec<&Task> {
        query::filtered(self.store.all(), self.filter)
    }

    pub(crate) fn stats(&self) -> Stats {
        query::stats(self.store.all())
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        self.visible().get(self.selected).copied()
    }

    pub(crate) fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    fn notify(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.notification = Some(Notification {
            message: message.into(),
            kind,
            expires_at: Instant::now() + NOTIFICATION_TTL,
        });
    }

    /// Drop the notification once its deadline passes. Returns true when
    /// the frame needs a redraw.
    fn tick(&mut self) -> bool {
        match self.notification.as_ref() {
            Some(active) if Instant::now() >= active.expires_at => {
                self.notification = None;
                true
            }
            _ => false,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let max = len as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, max) as usize;
    }

    /// Report the outcome of a store mutation: the success message when the
    /// change landed, the save error when the write-through failed.
    fn report(&mut self, applied: Applied<Task>, success: String) {
        match applied.save_error {
            None => self.notify(success, StatusKind::Info),
            Some(err) => self.notify(
                format!("saving failed: {err}; the change was not persisted"),
                StatusKind::Error,
            ),
        }
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.delete_confirm.is_some() {
            return "y confirm delete  esc cancel".to_string();
        }
        if self.editor.is_some() {
            return "tab next field  enter save  esc cancel".to_string();
        }
        match self.view {
            ViewMode::List => {
                "j/k move  a add  enter edit  space done  d delete  f filter  v calendar  q quit"
                    .to_string()
            }
            ViewMode::Calendar => {
                "h/l month  t today  a add  f filter  v list  q quit".to_string()
            }
        }
    }
}

/// Entry point for `tuido ui`.
pub fn run(data: Option<PathBuf>) -> Result<()> {
    let (store, config, load_warning) = crate::cli::open_store(data.as_deref())?;
    let mut app = AppState::new(store, config.calendar.cell_tasks, load_warning);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode().map_err(terminal_error)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;

    result
}

/// Failures while entering or leaving the terminal's raw/alternate mode.
fn terminal_error(err: io::Error) -> Error {
    Error::Terminal(err.to_string())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut dirty = true;
    loop {
        if app.tick() {
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Returns true when the app should quit.
fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if app.editor.is_some() {
        handle_editor_key(app, key);
        return false;
    }
    if app.delete_confirm.is_some() {
        handle_delete_confirm_key(app, key);
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('a') => {
            app.editor = Some(EditorState::new_task(app.today));
        }
        KeyCode::Char('f') | KeyCode::Tab => {
            app.filter = app.filter.next();
            app.clamp_selection();
        }
        KeyCode::Char('v') => {
            app.view = match app.view {
                ViewMode::List => ViewMode::Calendar,
                ViewMode::Calendar => ViewMode::List,
            };
        }
        _ => match app.view {
            ViewMode::List => handle_list_key(app, key),
            ViewMode::Calendar => handle_calendar_key(app, key),
        },
    }
    false
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            let Some(id) = app.selected_task().map(|task| task.id) else {
                return;
            };
            match app.store.toggle(id) {
                Ok(applied) => {
                    let state = if applied.value.completed {
                        "completed"
                    } else {
                        "pending"
                    };
                    let message = format!("Task {} is now {}", applied.value.id, state);
                    app.report(applied, message);
                    app.clamp_selection();
                }
                Err(err) => app.notify(err.to_string(), StatusKind::Error),
            }
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(task) = app.selected_task() {
                app.editor = Some(EditorState::edit_task(task));
            }
        }
        KeyCode::Char('d') => {
            if let Some(task) = app.selected_task() {
                app.delete_confirm = Some(DeleteConfirmState {
                    task_id: task.id,
                    text: task.text.clone(),
                });
            }
        }
        _ => {}
    }
}

fn handle_calendar_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.month = app.month.prev(),
        KeyCode::Right | KeyCode::Char('l') => app.month = app.month.next(),
        KeyCode::Char('t') => app.month = MonthRef::containing(app.today),
        _ => {}
    }
}

fn handle_editor_key(app: &mut AppState, key: KeyEvent) {
    let Some(editor) = app.editor.as_mut() else {
        return;
    };
    match editor.handle_key(key) {
        EditorAction::None => {}
        EditorAction::Cancel => app.editor = None,
        EditorAction::Submit => {
            let draft = match editor.build_draft() {
                Ok(draft) => draft,
                Err(message) => {
                    editor.set_error(message);
                    return;
                }
            };
            let result = match editor.task_id() {
                Some(id) => app.store.update(id, &draft),
                None => app.store.add(&draft),
            };
            match result {
                Ok(applied) => {
                    let message = format!("Saved task {}", applied.value.id);
                    app.editor = None;
                    app.report(applied, message);
                    app.clamp_selection();
                }
                Err(err) => {
                    let message = err.to_string();
                    if let Some(editor) = app.editor.as_mut() {
                        editor.set_error(message);
                    }
                }
            }
        }
    }
}

fn handle_delete_confirm_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let Some(state) = app.delete_confirm.take() else {
                return;
            };
            match app.store.remove(state.task_id) {
                Ok(applied) => {
                    let message = format!("Deleted task {}", applied.value.id);
                    app.report(applied, message);
                    app.clamp_selection();
                }
                Err(err) => app.notify(err.to_string(), StatusKind::Error),
            }
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => {
            app.delete_confirm = None;
        }
        _ => {}
    }
}
