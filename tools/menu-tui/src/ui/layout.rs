//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  MENU  Categories › Desayuno          ● ana@…  [?]Help [Q]uit   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  screen body                                                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  12:03:44 Added to favorites: dish 10                           │
//! │  [↑↓] Navigate  [Enter] Open  [B] Back  [F] Favorite  ...       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};

use super::{forms, home, users, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Body
            Constraint::Length(4), // Status + keybinds
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    match app.screen {
        Screen::Home => home::render(frame, chunks[1], app),
        Screen::Users => users::render(frame, chunks[1], app),
        Screen::Login => forms::render(frame, chunks[1], &app.login, "Sign in"),
        Screen::Register => forms::render(frame, chunks[1], &app.register, "Sign up"),
    }
    render_footer(frame, chunks[2], app);

    if app.show_help {
        widgets::render_help_overlay(frame);
    }
    if let Some(message) = &app.alert {
        widgets::render_alert(frame, message);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let location = match app.screen {
        Screen::Home => app.breadcrumb(),
        other => other.name().to_string(),
    };

    let title = vec![
        Span::styled(
            " MENU ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {location} "), Style::default().fg(Color::White)),
    ];

    let session = if app.authenticated {
        Span::styled(" ● signed in ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ guest ", Style::default().fg(Color::DarkGray))
    };
    let server = Span::styled(
        format!(" {} ", app.base_url),
        Style::default().fg(Color::DarkGray),
    );

    let hints = vec![
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::raw("Help "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit "),
    ];

    let used: usize = title
        .iter()
        .chain(hints.iter())
        .chain([&session, &server])
        .map(|s| s.content.chars().count())
        .sum();
    let padding = (area.width as usize).saturating_sub(used + 2);

    let mut spans = title;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(server);
    spans.push(session);
    spans.extend(hints);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.status {
        Some(status) => {
            let color = if status.is_error { Color::Red } else { Color::Green };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", status.at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(status.message.clone(), Style::default().fg(color)),
            ])
        }
        None => Line::from(Span::styled(" Ready", Style::default().fg(Color::DarkGray))),
    };

    let footer = Paragraph::new(vec![status, Line::from(keybinds(app.screen))]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(footer, area);
}

fn keybinds(screen: Screen) -> Vec<Span<'static>> {
    let pairs: &[(&str, &str)] = match screen {
        Screen::Home => &[
            ("[↑↓]", " Navigate  "),
            ("[Enter]", " Open  "),
            ("[B]", " Back  "),
            ("[F]", " Favorite  "),
            ("[R]", " Reload  "),
            ("[U]", " Users  "),
            ("[L]", " Sign in  "),
            ("[G]", " Sign up  "),
            ("[O]", " Sign out  "),
        ],
        Screen::Users => &[
            ("[↑↓]", " Navigate  "),
            ("[R]", " Reload  "),
            ("[Esc]", " Home  "),
        ],
        Screen::Login | Screen::Register => &[
            ("[Tab]", " Next field  "),
            ("[Enter]", " Submit  "),
            ("[Esc]", " Cancel  "),
        ],
    };

    pairs
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(Color::Yellow)),
                Span::raw(*label),
            ]
        })
        .collect()
}
