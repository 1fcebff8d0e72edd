//! Overlay widgets.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(description),
    ])
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "MENU HELP",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        section("Browsing"),
        key_line("  ↑/↓        ", "Move selection"),
        key_line("  Enter/→    ", "Open category or dish"),
        key_line("  B/←/Esc    ", "Back one level"),
        key_line("  F          ", "Toggle favorite on the selected dish"),
        key_line("  R          ", "Reload categories and favorites"),
        Line::raw(""),
        section("Screens"),
        key_line("  H          ", "Menu"),
        key_line("  U          ", "Users"),
        key_line("  L          ", "Sign in"),
        key_line("  G          ", "Sign up"),
        key_line("  O          ", "Sign out"),
        key_line("  Q          ", "Quit"),
        Line::raw(""),
        section("Calorie bands"),
        Line::from(vec![
            Span::styled("  ■ P1       ", Style::default().fg(Color::Red)),
            Span::raw("Dish ≥ 500 kcal, ingredient ≥ 150 kcal"),
        ]),
        Line::from(vec![
            Span::styled("  ■ P2       ", Style::default().fg(Color::Yellow)),
            Span::raw("Dish ≥ 251 kcal, ingredient ≥ 50 kcal"),
        ]),
        Line::from(vec![
            Span::styled("  ■ P3       ", Style::default().fg(Color::Green)),
            Span::raw("Everything lighter"),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}

/// Blocking message box, dismissed by any key.
pub fn render_alert(frame: &mut Frame, message: &str) {
    let popup_area = centered_rect(50, 30, frame.area());
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .centered()
        .block(
            Block::default()
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 10);
    }
}
