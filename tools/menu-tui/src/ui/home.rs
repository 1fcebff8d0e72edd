//! Home screen: category, dish and ingredient tables.

use menu_core::{Band, HomeView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(area);

    render_favorites_line(frame, chunks[0], app);

    match app.home_view() {
        HomeView::Loading => message(frame, chunks[1], "Loading categories…", Color::DarkGray),
        HomeView::SignInRequired => message(
            frame,
            chunks[1],
            "Sign in to browse the menu. Press [L] to sign in or [G] to create an account.",
            Color::Yellow,
        ),
        HomeView::Error(error) => message(
            frame,
            chunks[1],
            &format!("Could not load categories: {error}. Press [R] to retry."),
            Color::Red,
        ),
        HomeView::Categories(rows) => {
            let rows = rows.into_iter().map(|row| {
                Row::new(vec![
                    row.name,
                    format!("{} dishes", row.dish_count),
                ])
            });
            table(
                frame,
                chunks[1],
                app.cursor,
                " Categories ",
                Row::new(vec!["Category", "Dishes"]),
                rows.collect(),
                &[Constraint::Min(20), Constraint::Length(12)],
            );
        }
        HomeView::Dishes { category, rows } => {
            let rows = rows.into_iter().map(|row| {
                let star = if row.is_favorite { "★" } else { "☆" };
                Row::new(vec![
                    star.to_string(),
                    row.name,
                    format!("{:.0} kcal", row.kcal_total),
                    format!("P{}", row.priority.rank()),
                ])
                .style(Style::default().fg(band_color(row.band)))
            });
            table(
                frame,
                chunks[1],
                app.cursor,
                &format!(" {category} "),
                Row::new(vec!["", "Dish", "Calories", "Priority"]),
                rows.collect(),
                &[
                    Constraint::Length(2),
                    Constraint::Min(20),
                    Constraint::Length(12),
                    Constraint::Length(9),
                ],
            );
        }
        HomeView::Ingredients {
            category,
            dish,
            rows,
        } => {
            let star = if dish.is_favorite { "★" } else { "☆" };
            let rows = rows.into_iter().map(|row| {
                Row::new(vec![
                    row.name,
                    format!("{:.0} kcal", row.kcal),
                    format!("{:.0} g", row.quantity_grams),
                    format!("P{}", row.priority.rank()),
                ])
                .style(Style::default().fg(band_color(row.band)))
            });
            table(
                frame,
                chunks[1],
                app.cursor,
                &format!(
                    " {category} › {star} {} ({:.0} kcal) ",
                    dish.name, dish.kcal_total
                ),
                Row::new(vec!["Ingredient", "Calories", "Quantity", "Priority"]),
                rows.collect(),
                &[
                    Constraint::Min(20),
                    Constraint::Length(12),
                    Constraint::Length(10),
                    Constraint::Length(9),
                ],
            );
        }
    }
}

/// Favorites progress, independent of the catalog fetch.
fn render_favorites_line(frame: &mut Frame, area: Rect, app: &App) {
    let span = if !app.authenticated {
        Span::styled(" Favorites: sign in to manage", Style::default().fg(Color::DarkGray))
    } else if let Some(error) = &app.favorites_error {
        Span::styled(
            format!(" Favorites unavailable: {error}"),
            Style::default().fg(Color::Red),
        )
    } else if app.favorites_loading || app.toggles_in_flight > 0 {
        Span::styled(" Favorites: updating…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!(" Favorites: {}", app.favorites.len()),
            Style::default().fg(Color::Magenta),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(span)), area);
}

fn table(
    frame: &mut Frame,
    area: Rect,
    cursor: usize,
    title: &str,
    header: Row<'static>,
    rows: Vec<Row<'static>>,
    widths: &[Constraint],
) {
    let empty = rows.is_empty();
    let table = Table::new(rows, widths.to_vec())
        .header(header.style(Style::default().add_modifier(Modifier::BOLD)))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected((!empty).then_some(cursor));
    frame.render_stateful_widget(table, area, &mut state);
}

fn message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn band_color(band: Band) -> Color {
    match band {
        Band::Red => Color::Red,
        Band::Yellow => Color::Yellow,
        Band::Green => Color::Green,
    }
}
