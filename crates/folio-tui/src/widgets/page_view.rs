use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::page::{PageLine, Role};
use crate::theme::{blend, Theme};

/// The scrolling page: layout rows under the current scroll offset
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let theme = &app.theme;
        let Some(layout) = app.layout() else {
            return;
        };

        let offset = app.scroll_offset();
        let lines: Vec<Line> = (0..area.height as i64)
            .map(|row| {
                usize::try_from(offset + row)
                    .ok()
                    .and_then(|i| layout.lines().get(i))
                    .map(|line| render_line(line, app, layout.margin(), now))
                    .unwrap_or_default()
            })
            .collect();

        let paragraph = Paragraph::new(lines).style(Style::default().fg(theme.fg0).bg(theme.bg0));
        frame.render_widget(paragraph, area);
    }
}

fn render_line(line: &PageLine, app: &App, margin: u16, now: Instant) -> Line<'static> {
    let theme = &app.theme;
    let transition = app.transition();
    // Ungated lines (footer) are always fully shown
    let revealed_at = line.section.map(|s| app.revealed_at(s));
    let progress = |delay_ms: u64| match revealed_at {
        None => 1.0,
        Some(at) => transition.progress(at, delay_ms, now),
    };

    let first_delay = line.segments.first().map(|s| s.delay_ms).unwrap_or(0);
    let slide = transition.offset(progress(first_delay));

    let mut spans = Vec::with_capacity(line.segments.len() + 1);
    spans.push(Span::raw(" ".repeat((margin + line.indent + slide) as usize)));

    for segment in &line.segments {
        let text = match segment.role {
            Role::StatValue(index) => app
                .stat_display(index, now)
                .map(|value| pad_to(&value, segment.width()))
                .unwrap_or_else(|| segment.text.clone()),
            _ => segment.text.clone(),
        };
        let style = fade(role_style(segment.role, theme), theme, progress(segment.delay_ms));
        spans.push(Span::styled(text, style));
    }

    Line::from(spans)
}

pub(crate) fn role_style(role: Role, theme: &Theme) -> Style {
    let base = Style::default();
    match role {
        Role::Text => base.fg(theme.fg0),
        Role::Muted => base.fg(theme.muted),
        Role::Strong => base.fg(theme.fg1).add_modifier(Modifier::BOLD),
        Role::Accent => base.fg(theme.accent),
        Role::Heading => base.fg(theme.fg1).add_modifier(Modifier::BOLD),
        Role::Subheading => base.fg(theme.fg0).add_modifier(Modifier::BOLD),
        Role::Eyebrow => base.fg(theme.accent).add_modifier(Modifier::BOLD),
        Role::Tag => base.fg(theme.secondary),
        Role::Chip => base.fg(theme.fg1).bg(theme.bg2),
        Role::Link => base.fg(theme.info).add_modifier(Modifier::UNDERLINED),
        Role::Key => base.fg(theme.accent).add_modifier(Modifier::BOLD),
        Role::StatValue(_) => base.fg(theme.accent).add_modifier(Modifier::BOLD),
    }
}

/// Blend a style toward the page background; `progress` 0.0 is invisible
fn fade(style: Style, theme: &Theme, progress: f64) -> Style {
    if progress >= 1.0 {
        return style;
    }
    let fg = blend(style.fg.unwrap_or(theme.fg0), theme.bg0, progress);
    let faded = style.fg(fg);
    match style.bg {
        Some(bg) => faded.bg(blend(bg, theme.bg0, progress)),
        None => faded,
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - used))
    }
}
