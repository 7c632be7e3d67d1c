use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::TaskStore;
use crate::task::{Priority, Status, Task};

use super::editor::{
    EditorAction, EditorKind, EditorState, PriorityAction, PriorityPicker, TaskForm,
};
use super::model;
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: u64,
    pub(crate) name: String,
}

#[derive(Default, Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

pub struct AppState {
    pub(crate) filtered: Vec<usize>,
    pub(crate) selected: Option<usize>,
    pub(crate) filter: String,
    pub(crate) filter_active: bool,
    pub(crate) editor: Option<EditorState>,
    pub(crate) priority_picker: Option<PriorityPicker>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) show_help: bool,
    info_message: Option<String>,
    status_message: Option<String>,
    viewport: Viewport,
    default_status: Status,
    default_priority: Priority,
    store: TaskStore,
}

impl AppState {
    fn new(store: TaskStore, default_status: Status, default_priority: Priority) -> Self {
        let mut app = Self {
            filtered: Vec::new(),
            selected: None,
            filter: String::new(),
            filter_active: false,
            editor: None,
            priority_picker: None,
            delete_confirm: None,
            show_help: false,
            info_message: None,
            status_message: None,
            viewport: Viewport::default(),
            default_status,
            default_priority,
            store,
        };
        app.apply_filter(None);
        app
    }

    pub(crate) fn tasks(&self) -> &[Task] {
        self.store.list()
    }

    fn update_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|idx| self.store.list().get(idx))
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(message) = self.status_message.as_ref() {
            return Some((message.clone(), StatusKind::Error));
        }
        if let Some(info) = self.info_message.as_ref() {
            return Some((info.clone(), StatusKind::Info));
        }
        if !self.filter.is_empty() {
            return Some((format!("search: {}", self.filter), StatusKind::Info));
        }
        None
    }

    pub(crate) fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.delete_confirm.is_some() {
            return "y/enter confirm delete  esc cancel".to_string();
        }
        if self.priority_picker.is_some() {
            return "j/k move  enter apply  esc cancel".to_string();
        }
        if let Some(editor) = self.editor.as_ref() {
            if editor.confirming() {
                return "y/enter confirm  e edit  esc cancel".to_string();
            }
            return "enter next field  tab move  esc cancel".to_string();
        }
        if self.filter_active {
            return "type to search  backspace delete  enter done  esc clear".to_string();
        }
        "j/k move  / search  n new  e edit  d delete  p priority  ? help  q quit".to_string()
    }

    pub(crate) fn task_count_summary(&self) -> String {
        let total = self.store.list().len();
        let shown = self.filtered.len();
        if shown == total {
            format!("{total} task(s)")
        } else {
            format!("{shown} of {total} task(s)")
        }
    }

    fn apply_filter(&mut self, previous_id: Option<u64>) {
        self.filtered = model::filter_task_indices(self.store.list(), &self.filter);
        self.selected = model::select_by_id(self.store.list(), &self.filtered, previous_id);
    }

    fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.selected = None;
            return;
        }
        let current_pos = self
            .selected
            .and_then(|idx| self.filtered.iter().position(|candidate| *candidate == idx))
            .unwrap_or(0);
        let max = self.filtered.len().saturating_sub(1);
        let next = (current_pos as isize + delta).clamp(0, max as isize) as usize;
        self.selected = Some(self.filtered[next]);
    }

    fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.info_message = None;
    }

    fn set_info(&mut self, message: String) {
        self.info_message = Some(message);
        self.status_message = None;
    }

    fn list_jump(&self) -> isize {
        let height = self.viewport.height.saturating_sub(5);
        (height / 2).max(1) as isize
    }

    fn apply_form(&mut self, editor: &EditorState, form: TaskForm) -> Result<String> {
        match editor.kind() {
            EditorKind::NewTask => {
                let task = Task {
                    id: self.store.next_id(),
                    name: form.name,
                    description: form.description,
                    due_date: form.due_date,
                    status: form.status,
                    priority: form.priority,
                };
                let id = task.id;
                self.store.add(task)?;
                self.apply_filter(Some(id));
                Ok(format!("added task #{id}"))
            }
            EditorKind::EditTask => {
                let Some(id) = editor.task_id() else {
                    return Err(Error::OperationFailed("missing task id for edit".to_string()));
                };
                let task = Task {
                    id,
                    name: form.name,
                    description: form.description,
                    due_date: form.due_date,
                    status: form.status,
                    priority: form.priority,
                };
                let changed = self.store.edit(task)?;
                self.apply_filter(Some(id));
                if changed {
                    Ok(format!("updated task #{id}"))
                } else {
                    Ok(format!("task #{id} no longer exists"))
                }
            }
        }
    }
}

pub fn run(store: TaskStore, config: &Config) -> Result<()> {
    let mut app = AppState::new(
        store,
        config.defaults.status(),
        config.defaults.priority(),
    );
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.update_viewport(size.width, size.height);

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| {
                app.update_viewport(frame.size().width, frame.size().height);
                view::render(frame, app);
            })?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(width, height) => {
                    app.update_viewport(width, height);
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if let Some(confirm) = app.delete_confirm.take() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let previous = app.selected_task().map(|task| task.id);
                match app.store.delete(confirm.task_id) {
                    Ok(true) => {
                        app.apply_filter(previous);
                        app.set_info(format!("deleted task #{}", confirm.task_id));
                    }
                    Ok(false) => {
                        app.apply_filter(previous);
                        app.set_info(format!("task #{} was already gone", confirm.task_id));
                    }
                    Err(err) => app.set_error(err.to_string()),
                }
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                app.set_info("cancelled".to_string());
            }
            _ => {
                app.delete_confirm = Some(confirm);
            }
        }
        return false;
    }

    if let Some(mut picker) = app.priority_picker.take() {
        match picker.handle_key(key) {
            PriorityAction::None => {
                app.priority_picker = Some(picker);
            }
            PriorityAction::Cancel => {}
            PriorityAction::Confirm => {
                let Some(task_id) = app.selected_task().map(|task| task.id) else {
                    app.set_error("no task selected".to_string());
                    return false;
                };
                match app.store.set_priority(task_id, picker.selected_priority()) {
                    Ok(true) => {
                        app.apply_filter(Some(task_id));
                        app.set_info(format!(
                            "task #{task_id} priority set to {}",
                            picker.selected_priority()
                        ));
                    }
                    Ok(false) => app.set_info(format!("task #{task_id} no longer exists")),
                    Err(err) => app.set_error(err.to_string()),
                }
            }
        }
        return false;
    }

    if key.code == KeyCode::Char('?') && !app.filter_active && app.editor.is_none() {
        app.toggle_help();
        return false;
    }

    if let Some(mut editor) = app.editor.take() {
        match editor.handle_key(key) {
            EditorAction::None => {
                app.editor = Some(editor);
            }
            EditorAction::Cancel => {
                app.set_info("cancelled".to_string());
            }
            EditorAction::Submit => match editor.build_submit() {
                Ok(form) => match app.apply_form(&editor, form) {
                    Ok(message) => app.set_info(message),
                    Err(err) => {
                        editor.set_error(err.to_string());
                        app.editor = Some(editor);
                    }
                },
                Err(err) => {
                    editor.set_error(err);
                    app.editor = Some(editor);
                }
            },
        }
        return false;
    }

    if app.filter_active {
        match key.code {
            KeyCode::Esc => {
                app.filter.clear();
                app.filter_active = false;
            }
            KeyCode::Enter => app.filter_active = false,
            KeyCode::Backspace => {
                app.filter.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                if !ch.is_control() {
                    app.filter.push(ch);
                }
            }
            _ => {}
        }
        let previous = app.selected_task().map(|task| task.id);
        app.apply_filter(previous);
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_selection(app.list_jump());
            false
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.move_selection(-app.list_jump());
            false
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(1);
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(-1);
            false
        }
        KeyCode::Char('/') => {
            app.filter_active = true;
            false
        }
        KeyCode::Char('n') => {
            app.editor = Some(EditorState::new_task(
                app.default_status,
                app.default_priority,
            ));
            false
        }
        KeyCode::Char('e') => {
            let Some(task) = app.selected_task() else {
                app.set_error("no task selected".to_string());
                return false;
            };
            app.editor = Some(EditorState::edit_task(task));
            false
        }
        KeyCode::Char('d') => {
            let Some(task) = app.selected_task() else {
                app.set_error("no task selected".to_string());
                return false;
            };
            app.delete_confirm = Some(DeleteConfirmState {
                task_id: task.id,
                name: task.name.clone(),
            });
            false
        }
        KeyCode::Char('p') => {
            let Some(task) = app.selected_task() else {
                app.set_error("no task selected".to_string());
                return false;
            };
            app.priority_picker = Some(PriorityPicker::new(task.priority));
            false
        }
        // Reserved keys: sort and column filters are not implemented yet.
        KeyCode::Char('s') => {
            app.set_info("sort is not available yet".to_string());
            false
        }
        KeyCode::Char('f') => {
            app.set_info("column filters are not available yet; use / to search".to_string());
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_tasks(names: &[&str]) -> (AppState, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let storage = Storage::new(dir.path().join("tasks.json"));
        let tasks = names
            .iter()
            .enumerate()
            .map(|(idx, name)| Task {
                id: idx as u64 + 1,
                name: name.to_string(),
                description: String::new(),
                due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                status: Status::Pending,
                priority: Priority::Low,
            })
            .collect();
        let store = TaskStore::with_tasks(storage, tasks);
        (
            AppState::new(store, Status::Pending, Priority::Low),
            dir,
        )
    }

    #[test]
    fn search_narrows_and_esc_clears() {
        let (mut app, _dir) = app_with_tasks(&["Alpha", "Beta", "Alpine"]);
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert!(app.filter_active);
        handle_key(&mut app, key(KeyCode::Char('a')));
        handle_key(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.filtered, vec![0, 2]);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.filter_active);
        assert!(app.filter.is_empty());
        assert_eq!(app.filtered.len(), 3);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut app, _dir) = app_with_tasks(&["Alpha", "Beta"]);
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert!(app.delete_confirm.is_some());
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.delete_confirm.is_none());
        assert_eq!(app.tasks().len(), 2);

        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks()[0].name, "Beta");
    }

    #[test]
    fn priority_picker_updates_selected_task() {
        let (mut app, _dir) = app_with_tasks(&["Alpha"]);
        handle_key(&mut app, key(KeyCode::Char('p')));
        assert!(app.priority_picker.is_some());
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.priority_picker.is_none());
        assert_eq!(app.tasks()[0].priority, Priority::Medium);
    }

    #[test]
    fn new_task_flow_appends_row() {
        let (mut app, _dir) = app_with_tasks(&["Alpha"]);
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert!(app.editor.is_some());
        for ch in "Next".chars() {
            handle_key(&mut app, key(KeyCode::Char(ch)));
        }
        handle_key(&mut app, key(KeyCode::Enter));
        for ch in "details".chars() {
            handle_key(&mut app, key(KeyCode::Char(ch)));
        }
        handle_key(&mut app, key(KeyCode::Enter));
        for ch in "2026-09-15".chars() {
            handle_key(&mut app, key(KeyCode::Char(ch)));
        }
        handle_key(&mut app, key(KeyCode::Enter)); // status
        handle_key(&mut app, key(KeyCode::Enter)); // priority
        handle_key(&mut app, key(KeyCode::Enter)); // to confirm screen
        handle_key(&mut app, key(KeyCode::Enter)); // submit
        assert!(app.editor.is_none());
        assert_eq!(app.tasks().len(), 2);
        assert_eq!(app.tasks()[1].id, 2);
        assert_eq!(app.tasks()[1].name, "Next");
    }

    #[test]
    fn sort_and_filter_keys_only_set_info() {
        let (mut app, _dir) = app_with_tasks(&["Alpha", "Beta"]);
        handle_key(&mut app, key(KeyCode::Char('s')));
        assert!(app.status_line().is_some());
        assert_eq!(app.tasks()[0].name, "Alpha");
        handle_key(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.filtered.len(), 2);
    }

    #[test]
    fn ctrl_c_quits() {
        let (mut app, _dir) = app_with_tasks(&[]);
        let quit = handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(quit);
    }
}
