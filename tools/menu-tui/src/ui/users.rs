//! Users listing.

use menu_core::{Role, UsersView};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Users ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let (text, color) = match &app.users {
        UsersView::Listed(users) => {
            let rows: Vec<Row> = users
                .iter()
                .map(|user| {
                    let role_color = match user.role {
                        Role::Admin => Color::Magenta,
                        Role::User => Color::White,
                        Role::Unknown => Color::DarkGray,
                    };
                    Row::new(vec![
                        Span::raw(user.id.to_string()),
                        Span::raw(user.email.clone()),
                        Span::styled(user.role.label(), Style::default().fg(role_color)),
                    ])
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Length(6),
                    Constraint::Min(24),
                    Constraint::Length(10),
                ],
            )
            .header(
                Row::new(vec!["ID", "Email", "Role"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");

            let selected = (!users.is_empty()).then_some(app.users_cursor);
            let mut state = TableState::default().with_selected(selected);
            frame.render_stateful_widget(table, area, &mut state);
            return;
        }
        UsersView::SignInRequired => ("Sign in to see the users list.".to_string(), Color::Yellow),
        UsersView::Loading => ("Loading users…".to_string(), Color::DarkGray),
        UsersView::Unauthorized => ("Not authorized to list users.".to_string(), Color::Red),
        UsersView::Error(message) => (format!("Could not load users: {message}"), Color::Red),
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color)))).block(block);
    frame.render_widget(paragraph, area);
}
