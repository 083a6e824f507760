use folio_core::contact::FormField;
use folio_core::content::NAV_ITEMS;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Section menu shown in compact mode (or on `m`)
    pub fn render_menu(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let height = NAV_ITEMS.len() as u16 + 4;
        let inner = modal(frame, theme, " Menu ", 32, height);

        let active = app.nav.active_section_id();
        let mut lines: Vec<Line> = NAV_ITEMS
            .iter()
            .enumerate()
            .map(|(i, (id, label))| {
                let marker = if *id == active { "● " } else { "  " };
                let style = if i == app.menu_selected {
                    Style::default()
                        .fg(theme.bg0)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg0)
                };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(format!("{} {}", i + 1, label), style),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "  H  Hire me",
            Style::default().fg(theme.muted),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    pub fn render_project_picker(frame: &mut Frame, app: &App, selected: usize) {
        let theme = &app.theme;
        let projects = app.picker_projects();
        let height = (projects.len() as u16 + 4).min(frame.area().height.saturating_sub(2));
        let inner = modal(frame, theme, " Projects ", 60, height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let width = chunks[0].width as usize;
        let items: Vec<ListItem> = projects
            .iter()
            .map(|project| {
                let star = if project.featured { "★ " } else { "  " };
                let tags = project.tags.join(", ");
                let title_width = project.title.chars().count() + 2;
                let tags = truncate_str(&tags, width.saturating_sub(title_width + 3));
                ListItem::new(Line::from(vec![
                    Span::styled(star, Style::default().fg(theme.warning)),
                    Span::styled(project.title.clone(), Style::default().fg(theme.fg1)),
                    Span::styled(format!("  {}", tags), Style::default().fg(theme.muted)),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        frame.render_widget(hint_line(theme, &[("Enter", "open"), ("Esc", "back")]), chunks[1]);
    }

    pub fn render_project_detail(frame: &mut Frame, app: &App, index: usize) {
        let theme = &app.theme;
        let Some(project) = app.picker_projects().get(index).copied() else {
            return;
        };

        let area = frame.area();
        let width = 76u16.min(area.width.saturating_sub(4));
        let height = area.height.saturating_sub(4).min(30);
        let inner = modal(frame, theme, &format!(" {} ", project.title), width, height);

        let heading = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        let body = Style::default().fg(theme.fg0);
        let muted = Style::default().fg(theme.muted);

        let mut lines = vec![
            Line::from(
                project
                    .tags
                    .iter()
                    .flat_map(|tag| {
                        [
                            Span::styled(format!(" {} ", tag), Style::default().fg(theme.secondary).bg(theme.bg2)),
                            Span::raw(" "),
                        ]
                    })
                    .collect::<Vec<_>>(),
            ),
            Line::default(),
            Line::from(Span::styled(project.description.clone(), body)),
        ];

        for (title, text) in [
            ("Methodology", &project.methodology),
            ("Results", &project.results),
        ] {
            if let Some(text) = text.as_deref().filter(|t| !t.trim().is_empty()) {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(title, heading)));
                lines.push(Line::from(Span::styled(text.to_string(), body)));
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Preview  ", muted),
            Span::styled(project.preview_url().to_string(), Style::default().fg(theme.info)),
        ]));
        if let Some(url) = project.github_link() {
            lines.push(Line::from(vec![
                Span::styled("Code     ", muted),
                Span::styled(url.to_string(), Style::default().fg(theme.info)),
            ]));
        }
        if let Some(url) = project.live_link() {
            lines.push(Line::from(vec![
                Span::styled("Live     ", muted),
                Span::styled(url.to_string(), Style::default().fg(theme.info)),
            ]));
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

        let mut hints = Vec::with_capacity(3);
        if project.github_link().is_some() {
            hints.push(("o", "code"));
        }
        if project.live_link().is_some() {
            hints.push(("b", "live"));
        }
        hints.push(("Esc", "back"));
        frame.render_widget(hint_line(theme, &hints), chunks[1]);
    }

    pub fn render_contact_form(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let state = &app.contact;
        let inner = modal(frame, theme, " Send me a message ", 64, 20);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Email
                Constraint::Min(3),    // Message
                Constraint::Length(1), // Error / sending
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        for (field, area) in [
            (FormField::Name, chunks[0]),
            (FormField::Email, chunks[1]),
            (FormField::Message, chunks[2]),
        ] {
            let focused = field == state.focus && !state.sending;
            let border = if focused { theme.accent } else { theme.muted };
            let mut text = state.form.field(field).to_string();
            if focused {
                text.push('▏');
            }
            let input = Paragraph::new(text)
                .style(Style::default().fg(theme.fg0))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .title(format!(" {} ", field.label()))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border)),
                );
            frame.render_widget(input, area);
        }

        let status = if state.sending {
            Line::from(Span::styled("Sending...", Style::default().fg(theme.info)))
        } else if let Some(error) = &state.error {
            Line::from(Span::styled(error.clone(), Style::default().fg(theme.error)))
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(status), chunks[3]);

        frame.render_widget(
            hint_line(theme, &[("Tab", "next field"), ("Ctrl-s", "send"), ("Esc", "close")]),
            chunks[4],
        );
    }

    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let bindings = [
            ("j / k", "Scroll down / up"),
            ("Ctrl-d / Ctrl-u", "Half page down / up"),
            ("Space / PgDn", "Page down"),
            ("gg / G", "Top / bottom"),
            ("1-5", "Jump to section"),
            ("m", "Section menu"),
            ("H", "Hire me (jump to contact)"),
            ("p", "Browse projects"),
            ("c", "Send a message"),
            ("?", "This help"),
            ("q", "Quit"),
        ];

        let height = bindings.len() as u16 + 4;
        let inner = modal(frame, theme, " Keys ", 48, height);

        let mut lines: Vec<Line> = bindings
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<18}", key),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*desc, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled("Press any key to close", Style::default().fg(theme.muted)))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Clear a centered box, draw its border and return the inner area
fn modal(frame: &mut Frame, theme: &Theme, title: &str, width: u16, height: u16) -> Rect {
    let area = frame.area();
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(title.to_string())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg1));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    inner
}

fn hint_line<'a>(theme: &Theme, hints: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(theme.muted)));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        String::new()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
