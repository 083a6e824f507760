use folio_core::content::NAV_ITEMS;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        // Transparent until the page has scrolled past the hero edge
        let bg = if app.nav.is_scrolled() { theme.bg1 } else { theme.bg0 };
        let base = Style::default().bg(bg).fg(theme.fg0);

        let logo = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                app.portfolio.personal.first_name().to_string(),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ),
            Span::styled(".", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        ]);

        let active = app.nav.active_section_id();
        let (items, hint) = if app.is_compact(area.width) {
            let label = app.nav.active_section().label.clone();
            (
                Line::from(Span::styled(label, Style::default().fg(theme.accent))),
                Line::from(vec![
                    Span::styled("[m]", Style::default().fg(theme.muted)),
                    Span::raw(" Menu "),
                ]),
            )
        } else {
            let mut spans = Vec::with_capacity(NAV_ITEMS.len() * 3);
            for (i, (id, label)) in NAV_ITEMS.iter().enumerate() {
                let style = if *id == active {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(theme.fg0)
                };
                spans.push(Span::styled(format!("{} ", i + 1), Style::default().fg(theme.muted)));
                spans.push(Span::styled(label.to_string(), style));
                spans.push(Span::raw("   "));
            }
            (
                Line::from(spans),
                Line::from(vec![
                    Span::styled(
                        " Hire me ",
                        Style::default()
                            .fg(theme.bg0)
                            .bg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" [H] ", Style::default().fg(theme.muted)),
                ]),
            )
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(logo.width() as u16 + 2),
                Constraint::Min(0),
                Constraint::Length(hint.width() as u16),
            ])
            .split(area);

        frame.render_widget(Paragraph::new(logo).style(base), chunks[0]);
        frame.render_widget(
            Paragraph::new(items).style(base).alignment(Alignment::Center),
            chunks[1],
        );
        frame.render_widget(Paragraph::new(hint).style(base), chunks[2]);
    }
}
