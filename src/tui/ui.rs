use crate::tui::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Editor
            Constraint::Min(0),    // History panels
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    draw_editor(frame, chunks[1], app);
    draw_history(frame, chunks[2], app);
    draw_footer(frame, chunks[3], app);

    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_text = format!(
        "Undo: {} | Redo: {} | Capacity: {}",
        app.history.undo_amount(),
        app.history.redo_amount(),
        app.history.capacity()
    );
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("Edit History"))
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(header, area);
}

fn draw_editor(frame: &mut Frame, area: Rect, app: &App) {
    let (before_cursor, after_cursor) = app.buffer.split_at(app.cursor_position);
    let line = Line::from(vec![
        Span::raw(before_cursor),
        Span::styled("█", Style::default().fg(Color::Yellow)),
        Span::raw(after_cursor),
    ]);

    let editor = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title("Current"))
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    frame.render_widget(editor, area);
}

fn draw_history(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Newest first in both panels, so the next undo/redo target is on top.
    let past: Vec<ListItem> = app
        .history
        .past()
        .rev()
        .map(|entry| ListItem::new(entry_line(entry, Color::Green)))
        .collect();
    let future: Vec<ListItem> = app
        .history
        .future()
        .rev()
        .map(|entry| ListItem::new(entry_line(entry, Color::Magenta)))
        .collect();

    let past_list = List::new(past).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Past (Ctrl+Z)"),
    );
    let future_list = List::new(future).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Future (Ctrl+Y)"),
    );

    frame.render_widget(past_list, columns[0]);
    frame.render_widget(future_list, columns[1]);
}

fn entry_line(entry: &str, color: Color) -> Line<'_> {
    if entry.is_empty() {
        Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(entry, Style::default().fg(color)))
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer_text = match &app.status_message {
        Some(message) => message.clone(),
        None => "Enter: commit | Ctrl+Z: undo | Ctrl+Y: redo | F1: help | Esc: quit".to_string(),
    };

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = vec![
        "Edit History - Keyboard Commands",
        "",
        "EDITING:",
        "  Type              Revise the current entry",
        "  Enter             Commit; the next change starts a new entry",
        "  ←→ / Home/End     Move cursor",
        "  Backspace/Delete  Remove characters",
        "",
        "HISTORY:",
        "  Ctrl+Z / Ctrl+U   Undo",
        "  Ctrl+Y / Ctrl+R   Redo",
        "",
        "Editing after an undo discards everything that could be redone.",
        "Once the past is full the oldest entry is dropped.",
        "",
        "OTHER:",
        "  F1                Show this help (press F1 or Esc to close)",
        "  Esc / Ctrl+C      Quit application",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow))
        )
        .style(Style::default().fg(Color::White))
        .wrap(ratatui::widgets::Wrap { trim: true });

    let area = centered_rect(80, 70, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
