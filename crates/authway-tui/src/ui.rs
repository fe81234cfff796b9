//! Rendering for the demo screen.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Focus, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => render_login(frame, app),
        Screen::Session => render_session(frame, app),
    }
}

fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(horizontal[1]);
    vertical[1]
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_login(frame: &mut Frame, app: &App) {
    let area = centered_box(frame.area(), 48, 12);
    let outer = Block::default().borders(Borders::ALL).title(" Sign in ");
    frame.render_widget(outer.clone(), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    let email = Paragraph::new(app.email.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Email")
            .border_style(field_style(app.focus == Focus::Email)),
    );
    frame.render_widget(email, rows[0]);

    let masked = "*".repeat(app.password.chars().count());
    let password = Paragraph::new(masked).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Password")
            .border_style(field_style(app.focus == Focus::Password)),
    );
    frame.render_widget(password, rows[1]);

    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(status, rows[2]);

    let hints = Paragraph::new("Tab: switch  Enter: sign in  Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, rows[3]);
}

fn render_session(frame: &mut Frame, app: &App) {
    let area = centered_box(frame.area(), 56, 12);
    let outer = Block::default().borders(Borders::ALL).title(" Session ");
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut lines = Vec::new();
    if let Some(session) = &app.session {
        let label = Style::default().add_modifier(Modifier::BOLD);
        lines.push(Line::from(vec![
            Span::styled("User:    ", label),
            Span::raw(session.user.name.as_deref().unwrap_or("-")),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Email:   ", label),
            Span::raw(session.user.email.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Session: ", label),
            Span::raw(session.id.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Expires: ", label),
            Span::raw(session.expires_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]));
        if session.is_expired() {
            lines.push(Line::from(Span::styled(
                "(expired)",
                Style::default().fg(Color::Red),
            )));
        }
    }
    if !app.status.is_empty() {
        lines.push(Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(lines), rows[0]);

    let hints = Paragraph::new("o: sign out  q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, rows[1]);
}
