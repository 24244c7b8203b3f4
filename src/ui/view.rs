use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::calendar::{CalendarCell, CalendarGrid, WEEKDAY_HEADERS};
use crate::query::Filter;
use crate::render::{self, EMPTY_PLACEHOLDER};

use super::app::{AppState, DeleteConfirmState, StatusKind, ViewMode};
use super::editor::{EditorKind, EditorState};

const DATE_WIDTH: usize = 7;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER: Color = Color::Rgb(92, 126, 166);

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_tabs(frame, app, chunks[0]);
    match app.view {
        ViewMode::List => render_list(frame, app, chunks[1]),
        ViewMode::Calendar => render_calendar(frame, app, chunks[1]),
    }
    render_footer(frame, app, chunks[2]);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, editor);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
}

fn render_tabs(frame: &mut Frame, app: &AppState, area: Rect) {
    let tabs = [
        ("List", app.view == ViewMode::List, COLOR_INFO),
        ("Calendar", app.view == ViewMode::Calendar, COLOR_ACCENT),
    ];

    let mut spans = Vec::new();
    for (idx, (label, selected, color)) in tabs.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let style = if selected {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(label, style));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!("filter: {}", app.filter),
        filter_style(app.filter),
    ));

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_BG_MUTED)),
    );
    frame.render_widget(widget, area);
}

fn filter_style(filter: Filter) -> Style {
    match filter {
        Filter::All => Style::default().fg(COLOR_MUTED),
        Filter::Completed => Style::default().fg(COLOR_SUCCESS),
        Filter::Pending => Style::default().fg(COLOR_WARNING),
    }
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let visible = app.visible();
    let content_width = area.width.saturating_sub(2) as usize;

    let mut lines = Vec::new();
    if visible.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            EMPTY_PLACEHOLDER,
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    } else {
        for (idx, task) in visible.iter().enumerate() {
            let selected = idx == app.selected;
            let mark = if task.completed { "[x]" } else { "[ ]" };
            let date_text = pad_text(&render::date_label(task.date), DATE_WIDTH);
            let text_width = content_width.saturating_sub(3 + 1 + DATE_WIDTH + 2);
            let text = truncate_text(&render::sanitize_text(&task.text), text_width);

            let mark_style = if task.completed {
                Style::default().fg(COLOR_SUCCESS)
            } else {
                Style::default().fg(COLOR_MUTED)
            };
            let mut text_style = Style::default().fg(COLOR_TEXT);
            if task.completed {
                text_style = Style::default()
                    .fg(COLOR_MUTED)
                    .add_modifier(Modifier::CROSSED_OUT);
            }
            let mut spans = vec![
                Span::styled(mark, mark_style),
                Span::raw(" "),
                Span::styled(date_text, Style::default().fg(COLOR_INFO)),
                Span::raw("  "),
                Span::styled(text, text_style),
            ];
            if selected {
                for span in &mut spans {
                    span.style = span.style.add_modifier(Modifier::REVERSED);
                }
            }
            lines.push(Line::from(spans));
        }
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title("Tasks"),
    );
    frame.render_widget(widget, area);
}

fn render_calendar(frame: &mut Frame, app: &AppState, area: Rect) {
    let grid = CalendarGrid::for_month(app.month, app.today, app.tasks(), app.cell_tasks);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        app.month.label(),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let header_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(week_constraints())
        .split(chunks[1]);
    for (idx, name) in WEEKDAY_HEADERS.iter().enumerate() {
        let widget = Paragraph::new(Span::styled(*name, Style::default().fg(COLOR_MUTED)))
            .alignment(Alignment::Center);
        frame.render_widget(widget, header_cells[idx]);
    }

    let week_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(chunks[2]);
    for (row, row_area) in week_rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(week_constraints())
            .split(*row_area);
        for (col, cell) in grid.week(row).iter().enumerate() {
            render_calendar_cell(frame, cell, cells[col]);
        }
    }
}

fn week_constraints() -> [Constraint; 7] {
    [Constraint::Ratio(1, 7); 7]
}

fn render_calendar_cell(frame: &mut Frame, cell: &CalendarCell<'_>, area: Rect) {
    use chrono::Datelike;

    let day_style = if cell.today {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if cell.in_month {
        Style::default().fg(COLOR_TEXT)
    } else {
        Style::default().fg(COLOR_MUTED_DARK)
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("{:>2}", cell.date.day()),
        day_style,
    ))];

    let text_width = area.width.saturating_sub(2) as usize;
    for task in &cell.shown {
        let style = if task.completed {
            Style::default()
                .fg(COLOR_MUTED)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        lines.push(Line::from(Span::styled(
            truncate_text(&render::sanitize_text(&task.text), text_width),
            style,
        )));
    }
    if cell.overflow > 0 {
        lines.push(Line::from(Span::styled(
            format!("+{}", cell.overflow),
            Style::default().fg(COLOR_WARNING),
        )));
    }

    let border_style = if cell.in_month {
        Style::default().fg(COLOR_BORDER)
    } else {
        Style::default().fg(COLOR_BG_MUTED)
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint_span = Span::styled(app.footer_hint(), Style::default().fg(COLOR_INFO));
    let line = if let Some(note) = app.notification() {
        let style = match note.kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(note.message.clone(), style),
        ])
    } else {
        Line::from(hint_span)
    };

    let stats = app.stats();
    let counts_line = Line::from(Span::styled(
        format!(
            "total: {}  completed: {}  pending: {}",
            stats.total, stats.completed, stats.pending
        ),
        Style::default().fg(COLOR_ACCENT),
    ));

    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER)),
        );
    frame.render_widget(widget, area);
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let content_width = area.width.saturating_sub(8).min(56);
    let height = (editor.fields().len() as u16 + 5).min(area.height.saturating_sub(4));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let value_width = (content_width as usize).saturating_sub(10);
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, field) in editor.fields().iter().enumerate() {
        let active = idx == editor.active_index();
        let label_style = if active {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_MUTED_DARK)
        };
        let mut value = truncate_text(&field.value, value_width);
        if active {
            value.push('_');
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{:>5}: ", field.label), label_style),
            Span::styled(value, Style::default().fg(COLOR_TEXT)),
        ]));
    }
    lines.push(Line::from(""));
    if let Some(error) = editor.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(COLOR_ERROR),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "enter save  tab next  esc cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    }

    let title = match editor.kind() {
        EditorKind::NewTask => "New Task",
        EditorKind::EditTask => "Edit Task",
    };
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, modal);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let content_width = area.width.saturating_sub(8).min(56);
    let height = 8u16.min(area.height.saturating_sub(4));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let text_width = (content_width as usize).saturating_sub(4);
    let lines = vec![
        Line::from(Span::styled(
            "Delete this task?",
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate_text(&render::sanitize_text(&state.text), text_width),
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(Span::styled(
            format!("id {}", state.task_id),
            Style::default().fg(COLOR_MUTED_DARK),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y confirm  esc cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Delete Task"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn pad_text(value: &str, width: usize) -> String {
    let mut text = value.to_string();
    if text.chars().count() > width {
        text = truncate_text(&text, width);
    }
    format!("{text:width$}")
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
