use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode, ToastKind};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        if let Some(toast) = &app.toast {
            let (icon, color) = match toast.kind {
                ToastKind::Success => ("✓", theme.success),
                ToastKind::Error => ("✗", theme.error),
            };
            let line = Line::from(vec![
                Span::styled(
                    format!(" {} {} ", icon, toast.title),
                    Style::default().fg(theme.bg0).bg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}", toast.description), Style::default().fg(color)),
            ]);
            frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg1)), area);
            return;
        }

        let mode_str = match app.mode {
            Mode::Normal if app.is_menu_open() => "MENU",
            Mode::Normal => "NORMAL",
            Mode::ProjectPicker { .. } => "PROJECTS",
            Mode::ProjectDetail { .. } => "PROJECT",
            Mode::Contact => "CONTACT",
            Mode::Help => "HELP",
        };

        let percent = match app.layout() {
            Some(layout) if layout.max_scroll() > 0 => {
                (app.scroll_offset() * 100 / layout.max_scroll()).clamp(0, 100)
            }
            _ => 100,
        };

        let hint = match app.mode {
            Mode::Contact => "Tab: next field | Ctrl-s: send | Esc: close",
            Mode::ProjectPicker { .. } => "j/k: move | Enter: open | Esc: back",
            Mode::ProjectDetail { .. } => "o: code | b: live | Esc: back",
            _ => "j/k: scroll | 1-5: jump | p: projects | c: contact | ?: help | q: quit",
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", mode_str),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", app.nav.active_section().label),
                Style::default().fg(theme.fg1),
            ),
            Span::styled(format!("| {}% ", percent), Style::default().fg(theme.muted)),
            Span::styled(format!("| {}", hint), Style::default().fg(theme.muted)),
        ]);

        frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg1)), area);
    }
}
