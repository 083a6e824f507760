//! Page layout: the portfolio flattened into terminal rows.
//!
//! The layout depends only on content and terminal size. Anything that
//! changes per frame (counter values, entrance transitions, the active nav
//! item) is applied by the renderer through each segment's [`Role`], so the
//! anchor geometry handed to the viewport engine stays stable while the page
//! animates.

use folio_core::content::{self, Portfolio, Project};
use folio_core::viewport::{Bounds, ViewportSnapshot};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CONTENT_WIDTH: u16 = 96;
const STAT_TILE_WIDTH: usize = 22;

/// Semantic style of a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Text,
    Muted,
    Strong,
    Accent,
    Heading,
    Subheading,
    /// Small uppercase label above a heading
    Eyebrow,
    Tag,
    Chip,
    Link,
    /// Key hint such as `[c]`
    Key,
    /// Value of the About stat with this index, filled in at render time
    StatValue(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub role: Role,
    /// Entrance delay after the owning section is revealed
    pub delay_ms: u64,
}

impl Segment {
    pub fn new(text: impl Into<String>, role: Role) -> Self {
        Self {
            text: text.into(),
            role,
            delay_ms: 0,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn width(&self) -> usize {
        self.text.width()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLine {
    pub segments: Vec<Segment>,
    /// Index into the nav sections whose reveal gates this line; `None` is always shown
    pub section: Option<usize>,
    pub indent: u16,
}

impl PageLine {
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| s.text.trim().is_empty())
    }

    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Element that gates a section's entrance: its first screenful.
///
/// A section several screens tall can never reach a fractional visibility
/// threshold, so reveals watch this clipped block instead of the section.
pub fn reveal_element(section: &str) -> String {
    format!("{}-reveal", section)
}

/// Element id registered for the About stat tile at `index`
pub fn stat_element(index: usize) -> String {
    format!("stat-{}", index)
}

#[derive(Debug, Clone)]
pub struct PageLayout {
    lines: Vec<PageLine>,
    anchors: Vec<(String, Bounds)>,
    width: u16,
    viewport_height: u16,
    margin: u16,
}

impl PageLayout {
    /// Lay out `portfolio` for a page viewport of `width` x `viewport_height` rows
    pub fn build(portfolio: &Portfolio, width: u16, viewport_height: u16, year: i32) -> Self {
        let margin = if width > MAX_CONTENT_WIDTH + 4 {
            (width - MAX_CONTENT_WIDTH) / 2
        } else {
            2.min(width / 8)
        };
        let content_width = width.saturating_sub(margin * 2).max(1) as usize;

        let mut b = Builder::new(content_width);
        b.viewport_height = viewport_height;
        hero(&mut b, portfolio, viewport_height);
        about(&mut b, portfolio);
        projects(&mut b, portfolio);
        skills(&mut b, portfolio);
        contact(&mut b, portfolio);
        footer(&mut b, portfolio, year);

        Self {
            lines: b.lines,
            anchors: b.anchors,
            width,
            viewport_height,
            margin,
        }
    }

    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    pub fn height(&self) -> i64 {
        self.lines.len() as i64
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn margin(&self) -> u16 {
        self.margin
    }

    pub fn max_scroll(&self) -> i64 {
        (self.height() - self.viewport_height as i64).max(0)
    }

    pub fn anchor(&self, id: &str) -> Option<Bounds> {
        self.anchors
            .iter()
            .find(|(anchor, _)| anchor == id)
            .map(|(_, bounds)| *bounds)
    }

    pub fn anchors(&self) -> &[(String, Bounds)] {
        &self.anchors
    }

    /// Whether the layout was built for this viewport size
    pub fn fits(&self, width: u16, viewport_height: u16) -> bool {
        self.width == width && self.viewport_height == viewport_height
    }

    /// Geometry of every anchored element at `scroll`
    pub fn snapshot(&self, scroll: i64) -> ViewportSnapshot {
        self.anchors.iter().fold(
            ViewportSnapshot::new(scroll, self.viewport_height as u32),
            |snapshot, (id, bounds)| snapshot.with_element(id.clone(), *bounds),
        )
    }
}

struct Builder {
    width: usize,
    viewport_height: u16,
    lines: Vec<PageLine>,
    anchors: Vec<(String, Bounds)>,
    section: Option<usize>,
}

impl Builder {
    fn new(width: usize) -> Self {
        Self {
            width,
            viewport_height: 0,
            lines: Vec::new(),
            anchors: Vec::new(),
            section: None,
        }
    }

    fn row(&self) -> i64 {
        self.lines.len() as i64
    }

    fn anchor(&mut self, id: impl Into<String>, top: i64) {
        let height = (self.row() - top).max(0) as u32;
        self.anchors.push((id.into(), Bounds::new(top, height)));
    }

    /// Close a section: its anchor plus the clipped reveal block
    fn section_anchor(&mut self, id: &str, top: i64) {
        self.anchor(id, top);
        let height = ((self.row() - top).max(0) as u32).min(self.viewport_height.max(1) as u32);
        self.anchors.push((reveal_element(id), Bounds::new(top, height)));
    }

    fn push(&mut self, segments: Vec<Segment>) {
        self.push_indented(segments, 0);
    }

    fn push_indented(&mut self, segments: Vec<Segment>, indent: u16) {
        self.lines.push(PageLine {
            segments,
            section: self.section,
            indent,
        });
    }

    fn blank(&mut self) {
        self.push(Vec::new());
    }

    fn paragraph(&mut self, text: &str, role: Role, delay_ms: u64, indent: u16) {
        let width = self.width.saturating_sub(indent as usize).max(1);
        for line in wrap(text, width) {
            self.push_indented(vec![Segment::new(line, role).delayed(delay_ms)], indent);
        }
    }

    /// Lay segments out left to right, breaking before any that would overflow
    fn flow(&mut self, items: Vec<Segment>, gap: usize, indent: u16) {
        let width = self.width.saturating_sub(indent as usize).max(1);
        let mut current: Vec<Segment> = Vec::new();
        let mut used = 0;

        for item in items.into_iter().flat_map(|item| split_wide(item, width)) {
            let needed = if current.is_empty() { item.width() } else { gap + item.width() };
            if !current.is_empty() && used + needed > width {
                self.push_indented(std::mem::take(&mut current), indent);
                used = 0;
            }
            if !current.is_empty() && gap > 0 {
                current.push(Segment::new(" ".repeat(gap), Role::Text).delayed(item.delay_ms));
                used += gap;
            }
            used += item.width();
            current.push(item);
        }
        if !current.is_empty() {
            self.push_indented(current, indent);
        }
    }

    fn section_heading(&mut self, eyebrow: &str, title: &str, blurb: Option<&str>) {
        self.paragraph(&eyebrow.to_uppercase(), Role::Eyebrow, 0, 0);
        self.paragraph(title, Role::Heading, 0, 0);
        self.push(vec![Segment::new("────", Role::Accent)]);
        if let Some(blurb) = blurb {
            self.blank();
            self.paragraph(blurb, Role::Muted, 100, 0);
        }
        self.blank();
    }
}

fn hero(b: &mut Builder, portfolio: &Portfolio, viewport_height: u16) {
    let personal = &portfolio.personal;
    b.section = Some(0);
    let top = b.row();

    let mut body = Builder::new(b.width);
    body.section = b.section;
    body.flow(
        vec![
            Segment::new("Hi, I'm", Role::Strong),
            Segment::new(personal.name.as_str(), Role::Heading),
        ],
        1,
        0,
    );
    body.blank();
    body.paragraph(&personal.title, Role::Accent, 200, 0);
    body.paragraph(&personal.tagline, Role::Muted, 400, 0);
    body.blank();
    body.flow(
        vec![
            Segment::new("[p] View Projects", Role::Key).delayed(600),
            Segment::new("[c] Contact Me", Role::Key).delayed(600),
        ],
        4,
        0,
    );

    // Fill the first screen, content centred vertically
    let content = body.lines.len();
    let screen = (viewport_height as usize).max(content + 2);
    let above = (screen - content - 1) / 2;
    let below = screen - content - 1 - above;

    for _ in 0..above {
        b.blank();
    }
    b.lines.extend(body.lines);
    for _ in 0..below {
        b.blank();
    }
    b.push(vec![Segment::new("↓ scroll", Role::Muted).delayed(800)]);

    b.section_anchor(content::HERO, top);
}

fn about(b: &mut Builder, portfolio: &Portfolio) {
    let about = &portfolio.about;
    b.section = Some(1);
    let top = b.row();

    b.blank();
    b.section_heading("About Me", "Let me introduce myself", None);

    for (i, paragraph) in about.bio.iter().enumerate() {
        if i > 0 {
            b.blank();
        }
        b.paragraph(paragraph, Role::Text, 200, 0);
    }
    b.blank();

    let stats = about.stats();
    let per_row = (b.width / STAT_TILE_WIDTH).clamp(1, 4);
    for (row, chunk) in stats.chunks(per_row).enumerate() {
        let row_top = b.row();
        let mut values = Vec::new();
        let mut labels = Vec::new();

        for (col, stat) in chunk.iter().enumerate() {
            let index = row * per_row + col;
            let delay = 300 + 100 * index as u64;
            values.push(Segment::new(pad(&stat.display(None), STAT_TILE_WIDTH), Role::StatValue(index)).delayed(delay));
            labels.push(Segment::new(pad(&stat.label, STAT_TILE_WIDTH), Role::Muted).delayed(delay));
        }
        b.push(values);
        b.push(labels);

        for col in 0..chunk.len() {
            b.anchor(stat_element(row * per_row + col), row_top);
        }
        b.blank();
    }

    b.flow(
        vec![
            Segment::new(format!("Location: {}", portfolio.personal.location), Role::Muted).delayed(500),
            Segment::new(format!("Email: {}", portfolio.personal.email), Role::Muted).delayed(500),
        ],
        4,
        0,
    );
    b.blank();

    b.section_anchor(content::ABOUT, top);
}

fn project_card(b: &mut Builder, project: &Project, delay_ms: u64, compact: bool) {
    b.flow(
        vec![
            Segment::new("▸ ", Role::Accent).delayed(delay_ms),
            Segment::new(project.title.as_str(), Role::Strong).delayed(delay_ms),
        ],
        0,
        0,
    );
    b.paragraph(&project.description, Role::Text, delay_ms, 2);

    if !compact && !project.tags.is_empty() {
        let tags = project
            .tags
            .iter()
            .map(|t| Segment::new(format!("#{}", t), Role::Tag).delayed(delay_ms))
            .collect();
        b.flow(tags, 1, 2);
    }

    // Full URLs are in the detail popup
    let mut links = Vec::new();
    if project.github_link().is_some() {
        links.push(Segment::new("code ↗", Role::Link).delayed(delay_ms));
    }
    if project.live_link().is_some() {
        links.push(Segment::new("live ↗", Role::Link).delayed(delay_ms));
    }
    if !links.is_empty() && !compact {
        b.flow(links, 3, 2);
    }
    b.blank();
}

fn projects(b: &mut Builder, portfolio: &Portfolio) {
    b.section = Some(2);
    let top = b.row();

    b.blank();
    b.section_heading(
        "Portfolio",
        "Featured Projects",
        Some(
            "Data Science and Analytics projects showcasing my expertise in machine learning, \
             ETL pipelines, and business intelligence solutions.",
        ),
    );

    let featured = portfolio.featured_projects();
    if !featured.is_empty() {
        b.flow(
            vec![
                Segment::new("● ", Role::Accent),
                Segment::new("Featured Projects", Role::Subheading),
            ],
            0,
            0,
        );
        b.blank();
        for (i, project) in featured.iter().enumerate() {
            project_card(b, project, 150 + 100 * i as u64, false);
        }
    }

    let others = portfolio.other_projects();
    if !others.is_empty() {
        b.flow(
            vec![
                Segment::new("● ", Role::Tag),
                Segment::new("More Projects", Role::Subheading),
            ],
            0,
            0,
        );
        b.blank();
        for (i, project) in others.iter().enumerate() {
            project_card(b, project, 150 + 100 * i as u64, true);
        }
    }

    b.flow(
        vec![
            Segment::new("[p]", Role::Key),
            Segment::new("browse projects and case studies", Role::Muted),
        ],
        1,
        0,
    );
    b.blank();

    b.section_anchor(content::PROJECTS, top);
}

fn skills(b: &mut Builder, portfolio: &Portfolio) {
    b.section = Some(3);
    let top = b.row();

    b.blank();
    b.section_heading(
        "Skills",
        "Technologies & Expertise",
        Some(
            "A comprehensive toolkit for data science, analytics, and business intelligence. \
             From data pipelines to machine learning models.",
        ),
    );

    for (ci, (category, skills)) in portfolio.skills_by_category().into_iter().enumerate() {
        let delay = 150 * ci as u64;
        b.flow(
            vec![
                Segment::new(category, Role::Subheading).delayed(delay),
                Segment::new(format!("{} technologies", skills.len()), Role::Muted).delayed(delay),
            ],
            2,
            0,
        );

        let chips = skills
            .iter()
            .enumerate()
            .map(|(j, skill)| {
                Segment::new(format!("[ {} ]", skill.name), Role::Chip).delayed(delay + 60 * j as u64)
            })
            .collect();
        b.flow(chips, 1, 2);
        b.blank();
    }

    b.section_anchor(content::SKILLS, top);
}

fn contact(b: &mut Builder, portfolio: &Portfolio) {
    let personal = &portfolio.personal;
    b.section = Some(4);
    let top = b.row();

    b.blank();
    b.section_heading(
        "Contact",
        "Let's Work Together",
        Some(
            "Looking for a data systems and analytics specialist who delivers measurable impact \
             in complex operational environments? I'm open to senior roles in analytics, MEL \
             systems, and decision-support reporting. Let's connect.",
        ),
    );

    b.paragraph("Contact Information", Role::Subheading, 200, 0);
    b.paragraph(
        "Feel free to reach out through any of these channels. I'll get back to you as soon as possible.",
        Role::Muted,
        200,
        0,
    );
    b.blank();
    b.flow(
        vec![
            Segment::new("Email   ", Role::Muted).delayed(300),
            Segment::new(personal.email.as_str(), Role::Link).delayed(300),
        ],
        0,
        0,
    );
    b.flow(
        vec![
            Segment::new("Location", Role::Muted).delayed(300),
            Segment::new(personal.location.as_str(), Role::Text).delayed(300),
        ],
        1,
        0,
    );
    b.blank();

    if !portfolio.social.is_empty() {
        b.paragraph("Connect with me", Role::Subheading, 400, 0);
        for link in &portfolio.social {
            b.flow(
                vec![
                    Segment::new(format!("{:<10}", link.platform), Role::Muted).delayed(400),
                    Segment::new(link.url.as_str(), Role::Link).delayed(400),
                ],
                0,
                2,
            );
        }
        b.blank();
    }

    b.flow(
        vec![
            Segment::new("[c]", Role::Key).delayed(500),
            Segment::new("Send me a message", Role::Strong).delayed(500),
        ],
        1,
        0,
    );
    b.blank();

    b.section_anchor(content::CONTACT, top);
}

fn footer(b: &mut Builder, portfolio: &Portfolio, year: i32) {
    b.section = None;
    let personal = &portfolio.personal;

    b.push(vec![Segment::new("─".repeat(b.width), Role::Muted)]);
    b.flow(
        vec![
            Segment::new(personal.first_name(), Role::Strong),
            Segment::new(".", Role::Accent),
        ],
        0,
        0,
    );
    b.paragraph(
        &format!("© {} {}. All rights reserved.", year, personal.name),
        Role::Muted,
        0,
        0,
    );

    let links = content::NAV_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (_, label))| Segment::new(format!("{} {}", i + 1, label), Role::Link))
        .collect();
    b.flow(links, 3, 0);
    b.paragraph("Made with ♥ using Rust & Ratatui", Role::Muted, 0, 0);
}

/// Break a segment wider than `width` into wrapped pieces of the same role
fn split_wide(item: Segment, width: usize) -> Vec<Segment> {
    if item.width() <= width {
        return vec![item];
    }
    wrap(&item.text, width)
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .map(|piece| Segment::new(piece, item.role).delayed(item.delay_ms))
        .collect()
}

fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - used))
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if used + w > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    used = 0;
                }
                current.push(ch);
                used += w;
            }
            continue;
        }

        let needed = if current.is_empty() { word_width } else { word_width + 1 };
        if used + needed > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            used += 1;
        }
        current.push_str(word);
        used += word_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::content::ContentStore;
    use folio_core::viewport::ViewportMetrics;

    fn layout(width: u16, height: u16) -> PageLayout {
        let portfolio = ContentStore::builtin().unwrap();
        PageLayout::build(&portfolio, width, height, 2026)
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("", 10), vec![String::new()]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("  spaced   out  ", 20), vec!["spaced out"]);
    }

    #[test]
    fn test_wrap_respects_display_width() {
        for line in wrap("数据 分析 系统 可视化 报告", 6) {
            assert!(line.width() <= 6, "{:?} too wide", line);
        }
    }

    #[test]
    fn test_sections_anchored_in_order() {
        let page = layout(100, 30);
        let tops: Vec<i64> = content::NAV_ITEMS
            .iter()
            .map(|(id, _)| page.anchor(id).unwrap().top)
            .collect();

        assert_eq!(tops[0], 0);
        assert!(tops.windows(2).all(|w| w[0] < w[1]), "{:?}", tops);

        // Sections tile the page without overlap
        for pair in content::NAV_ITEMS.windows(2) {
            let a = page.anchor(pair[0].0).unwrap();
            let b = page.anchor(pair[1].0).unwrap();
            assert_eq!(a.bottom(), b.top);
        }
    }

    #[test]
    fn test_reveal_blocks_fit_one_screen() {
        let page = layout(40, 12);
        for (id, _) in content::NAV_ITEMS {
            let section = page.anchor(id).unwrap();
            let block = page.anchor(&reveal_element(id)).unwrap();
            assert_eq!(block.top, section.top);
            assert_eq!(block.height, section.height.min(12));
        }
    }

    #[test]
    fn test_hero_fills_first_screen() {
        let page = layout(100, 40);
        assert_eq!(page.anchor(content::HERO).unwrap().height, 40);
        assert!(page.height() > 40);
    }

    #[test]
    fn test_stat_tiles_anchored_inside_about() {
        let page = layout(100, 30);
        let about = page.anchor(content::ABOUT).unwrap();

        for i in 0..4 {
            let tile = page.anchor(&stat_element(i)).unwrap();
            assert_eq!(tile.height, 2);
            assert!(tile.top >= about.top && tile.bottom() <= about.bottom());
        }
        assert!(page.anchor(&stat_element(4)).is_none());
    }

    #[test]
    fn test_lines_fit_content_width() {
        for width in [30u16, 60, 140] {
            let page = layout(width, 20);
            let content_width = (width - page.margin() * 2) as usize;
            for line in page.lines() {
                if line.segments.iter().any(|s| matches!(s.role, Role::StatValue(_))) {
                    continue;
                }
                let used: usize = line.segments.iter().map(Segment::width).sum::<usize>()
                    + line.indent as usize;
                assert!(used <= content_width, "{:?} exceeds {}", line.text(), content_width);
            }
        }
    }

    #[test]
    fn test_snapshot_and_scroll_range() {
        let page = layout(80, 24);
        assert_eq!(page.max_scroll(), page.height() - 24);

        let snapshot = page.snapshot(12);
        assert_eq!(snapshot.scroll_offset(), 12);
        assert_eq!(snapshot.viewport_height(), 24);
        assert_eq!(
            snapshot.element_bounds(content::SKILLS),
            page.anchor(content::SKILLS)
        );
    }

    #[test]
    fn test_footer_carries_year_and_is_ungated() {
        let page = layout(80, 24);
        let footer = page
            .lines()
            .iter()
            .find(|l| l.text().contains("All rights reserved"))
            .unwrap();
        assert!(footer.text().contains("2026"));
        assert_eq!(footer.section, None);
    }
}
