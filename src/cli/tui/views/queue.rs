//! Queue view: counters, To Do / Done tables, input form, dialogs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
};

use crate::cli::tui::app::{App, Focus, InputMode};
use crate::cli::tui::utils::centered_rect;
use crate::domain::Task;

const HINTS: &str = "[Tab] field  [\u{2191}\u{2193}] choose  [Enter] enqueue  [Ctrl-D] dequeue  [Esc] quit";

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let [header, tables, form, status] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(6),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_header(frame, app, header);

    let [todo, done] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(tables);
    draw_todo_table(frame, app, todo);
    draw_done_table(frame, app, done);

    draw_form(frame, app, form);
    draw_status_bar(frame, app, status);

    match app.input_mode() {
        InputMode::Alert(message) => draw_alert(frame, message),
        InputMode::ConfirmQuit => draw_confirm_quit(frame, app),
        InputMode::Normal => {}
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let counts = app.store().counts();
    let lines = vec![
        Line::from("To Do List".bold().underlined()).centered(),
        Line::default(),
        Line::from(format!(
            "Tasks Remaining: {}          Tasks Completed: {}",
            counts.remaining, counts.completed
        ))
        .centered(),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_todo_table(frame: &mut Frame, app: &App, area: Rect) {
    let config = app.config();
    let rows = app.store().pending().iter().map(|task| {
        Row::new(vec![
            task.name.clone(),
            task.task_type.clone(),
            config.format_time(task.due_at),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ],
    )
    .header(header_row(&["Task", "Task Type", "Due Date"]))
    .block(
        Block::default()
            .title("To Do")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(table, area);
}

fn draw_done_table(frame: &mut Frame, app: &App, area: Rect) {
    let config = app.config();
    let rows = app.store().completed().iter().map(|task| {
        Row::new(vec![
            task.name.clone(),
            task.task_type.clone(),
            config.format_time(task.due_at),
            completed_time(app, task),
        ])
        .style(Style::default().fg(Color::DarkGray))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(header_row(&["Task", "Task Type", "Due Date", "Time Completed"]))
    .block(
        Block::default()
            .title("Done")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(table, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.to_vec()).style(Style::default().add_modifier(Modifier::BOLD))
}

fn completed_time(app: &App, task: &Task) -> String {
    task.completed_at
        .map(|at| app.config().format_time(at))
        .unwrap_or_default()
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let [name, task_type, length] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ])
    .areas(area);

    let name_text = if app.name().is_empty() && app.focus() != Focus::Name {
        Span::styled("Task Name", Style::default().fg(Color::DarkGray))
    } else if app.focus() == Focus::Name {
        Span::raw(format!("{}_", app.name()))
    } else {
        Span::raw(app.name().to_string())
    };
    draw_field(frame, name, "Name", name_text, app.focus() == Focus::Name);

    let type_text = match app.selected_type() {
        Some(t) => Span::raw(t.to_string()),
        None => Span::styled("Type", Style::default().fg(Color::DarkGray)),
    };
    draw_field(frame, task_type, "Type", type_text, app.focus() == Focus::Type);

    let length_text = match app.selected_length() {
        Some(1) => Span::raw("1 hour"),
        Some(h) => Span::raw(format!("{} hours", h)),
        None => Span::styled("Length", Style::default().fg(Color::DarkGray)),
    };
    draw_field(frame, length, "Length", length_text, app.focus() == Focus::Length);
}

fn draw_field(frame: &mut Frame, area: Rect, title: &str, content: Span, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.status_message().unwrap_or(HINTS);

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn draw_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(44, 7, frame.area());

    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::default(),
        Line::from("[Enter] OK".dark_gray()),
    ])
    .centered()
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn draw_confirm_quit(frame: &mut Frame, app: &App) {
    let counts = app.store().counts();
    let area = centered_rect(44, 7, frame.area());

    let paragraph = Paragraph::new(vec![
        Line::from(format!(
            "Discard {} pending and {} completed tasks?",
            counts.remaining, counts.completed
        )),
        Line::default(),
        Line::from("[y] quit  [any key] stay".dark_gray()),
    ])
    .centered()
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title("Quit")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
