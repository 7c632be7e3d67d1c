use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::task::{Priority, Status, Task};

use super::app::{AppState, DeleteConfirmState, StatusKind};
use super::editor::{EditorFieldId, EditorKind, EditorState, PriorityPicker};

const ROW_WIDTH: usize = 4;
const DATE_WIDTH: usize = 10;
const STATUS_WIDTH: usize = 11;
const PRIORITY_WIDTH: usize = 6;
const HELP_KEY_WIDTH: usize = 10;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(area);
    let main = chunks[0];
    let footer = chunks[1];

    render_table(frame, app, main);
    render_footer(frame, app, footer);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, editor);
    }
    if let Some(picker) = app.priority_picker.as_ref() {
        render_priority_modal(frame, area, picker);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
}

fn render_table(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();
    let content_width = area.width.saturating_sub(2) as usize;
    let help_lines = if app.show_help {
        build_help_lines(content_width)
    } else {
        Vec::new()
    };
    let help_reserved = if help_lines.is_empty() {
        0
    } else {
        help_lines.len() + 1
    };

    if app.filter_active || !app.filter.is_empty() {
        let filter_label = if app.filter_active && app.filter.is_empty() {
            "search: _".to_string()
        } else {
            format!("search: {}", app.filter)
        };
        lines.push(Line::from(Span::styled(
            filter_label,
            Style::default().fg(COLOR_INFO),
        )));
        lines.push(Line::from(""));
    }

    lines.push(header_row(content_width));

    if app.filtered.is_empty() {
        if app.filter.is_empty() {
            lines.push(Line::from("No tasks"));
        } else {
            lines.push(Line::from("No matches"));
        }
    } else {
        let list_height = area
            .height
            .saturating_sub(3)
            .saturating_sub(lines.len() as u16)
            .saturating_sub(help_reserved as u16) as usize;
        let selected_pos = app
            .selected
            .and_then(|idx| app.filtered.iter().position(|candidate| *candidate == idx));
        let (start, end) = list_window(app.filtered.len(), selected_pos, list_height.max(1));
        for pos in start..end {
            let idx = app.filtered[pos];
            if let Some(task) = app.tasks().get(idx) {
                let selected = app.selected == Some(idx);
                lines.push(render_table_row(task, pos + 1, selected, content_width));
            }
        }
    }

    if !help_lines.is_empty() {
        lines.push(Line::from(""));
        lines.extend(help_lines);
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tasks")
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint = app.footer_hint();
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let counts_line = Line::from(Span::styled(
        app.task_count_summary(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn header_row(width: usize) -> Line<'static> {
    let (name_width, desc_width) = text_column_widths(width);
    let text = format!(
        "{} {} {} {} {} {}",
        pad_text("#", ROW_WIDTH),
        pad_text("Name", name_width),
        pad_text("Description", desc_width),
        pad_text("Due", DATE_WIDTH),
        pad_text_center("Status", STATUS_WIDTH),
        pad_text("Prio", PRIORITY_WIDTH),
    );
    Line::from(Span::styled(
        truncate_text(&text, width),
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn render_table_row(task: &Task, row: usize, selected: bool, width: usize) -> Line<'static> {
    let (name_width, desc_width) = text_column_widths(width);
    let row_text = pad_text(&row.to_string(), ROW_WIDTH);
    let name_text = pad_text(&task.name, name_width);
    let desc_text = pad_text(&task.description, desc_width);
    let due_text = pad_text(&task.due_date.to_string(), DATE_WIDTH);
    let status_text = pad_text_center(task.status.label(), STATUS_WIDTH);
    let priority_text = pad_text(task.priority.label(), PRIORITY_WIDTH);

    let mut spans = vec![
        Span::styled(row_text, Style::default().fg(COLOR_MUTED_DARK)),
        Span::raw(" "),
        Span::styled(name_text, Style::default().fg(COLOR_TEXT)),
        Span::raw(" "),
        Span::styled(desc_text, Style::default().fg(COLOR_MUTED)),
        Span::raw(" "),
        Span::styled(due_text, Style::default().fg(COLOR_WARNING)),
        Span::raw(" "),
        Span::styled(
            status_text,
            status_style(task.status).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            priority_text,
            Style::default()
                .fg(priority_color(task.priority))
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }

    Line::from(spans)
}

fn text_column_widths(width: usize) -> (usize, usize) {
    let fixed = ROW_WIDTH + DATE_WIDTH + STATUS_WIDTH + PRIORITY_WIDTH + 5;
    let remaining = width.saturating_sub(fixed);
    let name_width = (remaining * 2 / 5).max(8);
    let desc_width = remaining.saturating_sub(name_width);
    (name_width, desc_width)
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let content_width = area.width.saturating_sub(8).min(64);
    let height = (editor.fields().len() as u16 + 8).min(area.height.saturating_sub(4));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let title = match editor.kind() {
        EditorKind::NewTask => "New Task",
        EditorKind::EditTask => "Edit Task",
    };
    let inner_width = modal.width.saturating_sub(2) as usize;
    let lines = if editor.confirming() {
        build_confirm_lines(editor, inner_width)
    } else {
        build_editor_lines(editor, inner_width)
    };

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, modal);
}

fn build_editor_lines(editor: &EditorState, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, field) in editor.fields().iter().enumerate() {
        let is_active = idx == editor.active_index();
        let label = format!("{:<12}", field.label);
        let mut value = field.value.clone();
        let placeholder = if value.trim().is_empty() {
            if field.required {
                Some("<required>".to_string())
            } else if field.id == EditorFieldId::Status {
                Some(format!("(default {})", editor.default_status()))
            } else if field.id == EditorFieldId::Priority {
                Some(format!("(default {})", editor.default_priority()))
            } else {
                Some("(optional)".to_string())
            }
        } else {
            None
        };
        let value_style = if placeholder.is_some() {
            Style::default().fg(COLOR_MUTED)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        if let Some(place) = placeholder {
            value = place;
        }
        let value = truncate_text(&value, width.saturating_sub(14));
        let mut spans = vec![
            Span::styled(label, Style::default().fg(COLOR_TEXT)),
            Span::raw(" "),
            Span::styled(value, value_style),
        ];
        if is_active {
            for span in &mut spans {
                span.style = span.style.add_modifier(Modifier::REVERSED);
            }
        }
        lines.push(Line::from(spans));
    }

    if let Some(error) = editor.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "enter next field  tab/shift+tab move  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));
    lines
}

fn build_confirm_lines(editor: &EditorState, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Confirm task details",
        Style::default()
            .fg(COLOR_WARNING)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    if let Ok(form) = editor.build_submit() {
        lines.push(Line::from(vec![
            label_span("Name: "),
            Span::styled(
                truncate_text(&form.name, width.saturating_sub(7)),
                Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            label_span("Description: "),
            Span::styled(
                truncate_text(&form.description, width.saturating_sub(14)),
                Style::default().fg(COLOR_TEXT),
            ),
        ]));
        lines.push(Line::from(vec![
            label_span("Due: "),
            Span::styled(form.due_date.to_string(), Style::default().fg(COLOR_WARNING)),
        ]));
        lines.push(Line::from(vec![
            label_span("Status: "),
            Span::styled(
                form.status.label().to_string(),
                status_style(form.status).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            label_span("Priority: "),
            Span::styled(
                form.priority.label().to_string(),
                Style::default()
                    .fg(priority_color(form.priority))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    if let Some(error) = editor.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "y/enter confirm  e edit  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));
    lines
}

fn render_priority_modal(frame: &mut Frame, area: Rect, picker: &PriorityPicker) {
    let content_width = 22u16.min(area.width.saturating_sub(6));
    let height = (picker.options().len() as u16 + 4).min(area.height.saturating_sub(4));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, option) in picker.options().iter().enumerate() {
        let mut span = Span::styled(
            option.label().to_string(),
            Style::default()
                .fg(priority_color(*option))
                .add_modifier(Modifier::BOLD),
        );
        if idx == picker.selected_index() {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(span));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "enter apply  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Priority"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let content_width = area.width.saturating_sub(8).min(56);
    let height = 8u16.min(area.height.saturating_sub(6).max(8));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let name_width = (content_width as usize).saturating_sub(8);
    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Delete task?",
        Style::default()
            .fg(COLOR_ERROR)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        label_span("ID: "),
        Span::styled(
            format!("#{}", state.task_id),
            Style::default().fg(COLOR_MUTED).add_modifier(Modifier::BOLD),
        ),
    ]));
    if !state.name.trim().is_empty() {
        lines.push(Line::from(vec![
            label_span("Name: "),
            Span::styled(
                truncate_text(&state.name, name_width),
                Style::default().fg(COLOR_TEXT),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "y/enter confirm  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Delete Task"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn build_help_lines(width: usize) -> Vec<Line<'static>> {
    vec![
        help_header("More commands"),
        help_line("j/k", "move selection", width),
        help_line("n", "new task", width),
        help_line("e", "edit task", width),
        help_line("d", "delete task", width),
        help_line("p", "change priority", width),
        help_line("/", "search by name", width),
        help_line("ctrl+d/u", "page down/up", width),
        help_line("q/esc", "quit", width),
        help_line("?", "hide help", width),
    ]
}

fn help_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD),
    ))
}

fn help_line(keys: &str, desc: &str, width: usize) -> Line<'static> {
    let key_text = pad_text(keys, HELP_KEY_WIDTH.min(width));
    let desc_width = width.saturating_sub(HELP_KEY_WIDTH + 1);
    let desc_text = truncate_text(desc, desc_width);
    Line::from(vec![
        Span::styled(
            key_text,
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(desc_text, Style::default().fg(COLOR_MUTED)),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn status_style(status: Status) -> Style {
    let (fg, bg) = match status {
        Status::Pending => (Color::Rgb(244, 200, 98), Color::Rgb(61, 52, 26)),
        Status::InProgress => (Color::Rgb(139, 233, 253), Color::Rgb(26, 51, 68)),
        Status::Completed => (Color::Rgb(80, 250, 123), Color::Rgb(26, 61, 42)),
    };
    Style::default().fg(fg).bg(bg)
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => COLOR_SUCCESS,
        Priority::Medium => COLOR_WARNING,
        Priority::High => COLOR_ERROR,
    }
}

fn pad_text(value: &str, width: usize) -> String {
    let mut text = value.to_string();
    if text.chars().count() > width {
        text = truncate_text(&text, width);
    }
    format!("{text:width$}")
}

fn pad_text_center(value: &str, width: usize) -> String {
    let mut text = value.to_string();
    if text.chars().count() > width {
        text = truncate_text(&text, width);
    }
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let total_pad = width - len;
    let left = total_pad / 2;
    let right = total_pad - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}

fn label_span(label: &str) -> Span<'static> {
    Span::styled(label.to_string(), Style::default().fg(COLOR_MUTED_DARK))
}
