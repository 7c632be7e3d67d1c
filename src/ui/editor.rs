use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::{parse_due_date, Priority, Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    NewTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFieldId {
    Name,
    Description,
    Due,
    Status,
    Priority,
}

#[derive(Debug, Clone)]
pub struct EditorField {
    pub id: EditorFieldId,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

/// Validated editor output, ready to become a [`Task`].
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: Status,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    kind: EditorKind,
    fields: Vec<EditorField>,
    active: usize,
    confirming: bool,
    error: Option<String>,
    default_status: Status,
    default_priority: Priority,
    task_id: Option<u64>,
}

impl EditorState {
    pub fn new_task(default_status: Status, default_priority: Priority) -> Self {
        Self {
            kind: EditorKind::NewTask,
            fields: field_set(None),
            active: 0,
            confirming: false,
            error: None,
            default_status,
            default_priority,
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        Self {
            kind: EditorKind::EditTask,
            fields: field_set(Some(task)),
            active: 0,
            confirming: false,
            error: None,
            default_status: task.status,
            default_priority: task.priority,
            task_id: Some(task.id),
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn task_id(&self) -> Option<u64> {
        self.task_id
    }

    pub fn fields(&self) -> &[EditorField] {
        &self.fields
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn confirming(&self) -> bool {
        self.confirming
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn default_status(&self) -> Status {
        self.default_status
    }

    pub fn default_priority(&self) -> Priority {
        self.default_priority
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.confirming = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if self.confirming {
            return self.handle_confirm_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.current_field_mut() {
                field.value.clear();
            }
            self.error = None;
            return EditorAction::None;
        }

        match key.code {
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.move_active(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_active(-1);
            }
            KeyCode::Enter => {
                if self.active + 1 >= self.fields.len() {
                    return self.attempt_confirm();
                }
                self.move_active(1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return EditorAction::None;
                }
                if !ch.is_control() {
                    if let Some(field) = self.current_field_mut() {
                        field.value.push(ch);
                    }
                }
            }
            _ => {}
        }

        self.error = None;
        EditorAction::None
    }

    pub fn build_submit(&self) -> Result<TaskForm, String> {
        let name = self.field_value(EditorFieldId::Name).trim().to_string();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        let description = self
            .field_value(EditorFieldId::Description)
            .trim()
            .to_string();
        if description.is_empty() {
            return Err("description is required".to_string());
        }
        let due_raw = self.field_value(EditorFieldId::Due).trim();
        if due_raw.is_empty() {
            return Err("due date is required".to_string());
        }
        let due_date =
            parse_due_date(due_raw).map_err(|_| "due date must be YYYY-MM-DD".to_string())?;

        let status = match non_empty(self.field_value(EditorFieldId::Status)) {
            Some(raw) => raw
                .parse::<Status>()
                .map_err(|_| "status must be Pending, In Progress, or Completed".to_string())?,
            None => self.default_status,
        };
        let priority = match non_empty(self.field_value(EditorFieldId::Priority)) {
            Some(raw) => raw
                .parse::<Priority>()
                .map_err(|_| "priority must be Low, Medium, or High".to_string())?,
            None => self.default_priority,
        };

        Ok(TaskForm {
            name,
            description,
            due_date,
            status,
            priority,
        })
    }

    fn attempt_confirm(&mut self) -> EditorAction {
        match self.build_submit() {
            Ok(_) => {
                self.confirming = true;
                EditorAction::None
            }
            Err(err) => {
                self.error = Some(err);
                self.confirming = false;
                EditorAction::None
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> EditorAction {
        match key.code {
            KeyCode::Esc => EditorAction::Cancel,
            KeyCode::Backspace | KeyCode::Char('e') => {
                self.confirming = false;
                self.error = None;
                EditorAction::None
            }
            KeyCode::Char('y') | KeyCode::Enter => EditorAction::Submit,
            _ => EditorAction::None,
        }
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.fields.len() as isize;
        if len == 0 {
            self.active = 0;
            return;
        }
        let next = (self.active as isize + delta).rem_euclid(len);
        self.active = next as usize;
    }

    fn current_field_mut(&mut self) -> Option<&mut EditorField> {
        self.fields.get_mut(self.active)
    }

    pub(crate) fn field_value(&self, id: EditorFieldId) -> &str {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }
}

fn field_set(task: Option<&Task>) -> Vec<EditorField> {
    vec![
        EditorField {
            id: EditorFieldId::Name,
            label: "Name",
            value: task.map(|t| t.name.clone()).unwrap_or_default(),
            required: true,
        },
        EditorField {
            id: EditorFieldId::Description,
            label: "Description",
            value: task.map(|t| t.description.clone()).unwrap_or_default(),
            required: true,
        },
        EditorField {
            id: EditorFieldId::Due,
            label: "Due date",
            value: task.map(|t| t.due_date.to_string()).unwrap_or_default(),
            required: true,
        },
        EditorField {
            id: EditorFieldId::Status,
            label: "Status",
            value: task.map(|t| t.status.label().to_string()).unwrap_or_default(),
            required: false,
        },
        EditorField {
            id: EditorFieldId::Priority,
            label: "Priority",
            value: task
                .map(|t| t.priority.label().to_string())
                .unwrap_or_default(),
            required: false,
        },
    ]
}

#[derive(Debug, Clone)]
pub struct PriorityPicker {
    selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityAction {
    None,
    Cancel,
    Confirm,
}

impl PriorityPicker {
    pub fn new(current: Priority) -> Self {
        let selected = Priority::ALL
            .iter()
            .position(|candidate| *candidate == current)
            .unwrap_or(0);
        Self { selected }
    }

    pub fn options(&self) -> &'static [Priority] {
        &Priority::ALL
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_priority(&self) -> Priority {
        Priority::ALL[self.selected.min(Priority::ALL.len() - 1)]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PriorityAction {
        match key.code {
            KeyCode::Esc => return PriorityAction::Cancel,
            KeyCode::Enter => return PriorityAction::Confirm,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                let idx = ch.to_digit(10).unwrap_or(0) as usize;
                if idx >= 1 && idx <= Priority::ALL.len() {
                    self.selected = idx - 1;
                }
            }
            _ => {}
        }
        PriorityAction::None
    }

    fn move_selection(&mut self, delta: isize) {
        let len = Priority::ALL.len() as isize;
        let next = (self.selected as isize + delta).rem_euclid(len);
        self.selected = next as usize;
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(editor: &mut EditorState, text: &str) {
        for ch in text.chars() {
            editor.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
    }

    fn press_enter(editor: &mut EditorState) -> EditorAction {
        editor.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn editor_requires_name() {
        let mut editor = EditorState::new_task(Status::Pending, Priority::Low);
        for _ in 0..editor.fields().len() {
            let action = press_enter(&mut editor);
            assert_eq!(action, EditorAction::None);
        }
        assert_eq!(editor.error(), Some("name is required"));
    }

    #[test]
    fn editor_rejects_bad_due_date() {
        let mut editor = EditorState::new_task(Status::Pending, Priority::Low);
        type_text(&mut editor, "Write notes");
        press_enter(&mut editor);
        type_text(&mut editor, "something");
        press_enter(&mut editor);
        type_text(&mut editor, "tomorrow");
        for _ in 0..editor.fields().len() {
            press_enter(&mut editor);
        }
        assert_eq!(editor.error(), Some("due date must be YYYY-MM-DD"));
    }

    #[test]
    fn editor_submits_with_defaults() {
        let mut editor = EditorState::new_task(Status::Pending, Priority::Medium);
        type_text(&mut editor, "Write notes");
        press_enter(&mut editor);
        type_text(&mut editor, "meeting follow-up");
        press_enter(&mut editor);
        type_text(&mut editor, "2026-09-30");
        press_enter(&mut editor); // status (left empty)
        press_enter(&mut editor); // priority (left empty)
        press_enter(&mut editor); // confirm screen
        assert!(editor.confirming());
        let action = press_enter(&mut editor);
        assert_eq!(action, EditorAction::Submit);

        let form = editor.build_submit().expect("valid form");
        assert_eq!(form.name, "Write notes");
        assert_eq!(form.status, Status::Pending);
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.due_date.to_string(), "2026-09-30");
    }

    #[test]
    fn edit_prefills_existing_values() {
        let task = Task {
            id: 7,
            name: "Existing".to_string(),
            description: "desc".to_string(),
            due_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            status: Status::InProgress,
            priority: Priority::High,
        };
        let editor = EditorState::edit_task(&task);
        assert_eq!(editor.task_id(), Some(7));
        assert_eq!(editor.field_value(EditorFieldId::Name), "Existing");
        assert_eq!(editor.field_value(EditorFieldId::Status), "In Progress");
        assert_eq!(editor.field_value(EditorFieldId::Priority), "High");
        let form = editor.build_submit().expect("valid form");
        assert_eq!(form.status, Status::InProgress);
    }

    #[test]
    fn priority_picker_selects_current() {
        let picker = PriorityPicker::new(Priority::High);
        assert_eq!(picker.selected_priority(), Priority::High);

        let mut picker = PriorityPicker::new(Priority::Low);
        picker.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
        assert_eq!(picker.selected_priority(), Priority::Medium);
    }
}
