use super::metrics::ViewportMetrics;
use super::spy::{ActiveSectionResolver, Section};
use crate::Result;

/// Animates the viewport to a document offset
pub trait SmoothScroll {
    fn scroll_to(&mut self, offset: i64);
}

/// Scroll-spy output plus programmatic navigation for the nav bar
#[derive(Debug, Clone)]
pub struct NavigationController {
    resolver: ActiveSectionResolver,
    scrolled_offset: i64,
    scroll_y: i64,
    menu_open: bool,
}

impl NavigationController {
    pub fn new(sections: Vec<Section>, spy_threshold: i64, scrolled_offset: i64) -> Result<Self> {
        Ok(Self {
            resolver: ActiveSectionResolver::new(sections, spy_threshold)?,
            scrolled_offset,
            scroll_y: 0,
            menu_open: false,
        })
    }

    pub fn sections(&self) -> &[Section] {
        self.resolver.sections()
    }

    pub fn active_section_id(&self) -> &str {
        self.resolver.active_section_id()
    }

    pub fn active_section(&self) -> &Section {
        self.resolver.active_section()
    }

    /// Scroll offset as of the last scroll event
    pub fn scroll_y(&self) -> i64 {
        self.scroll_y
    }

    /// Whether the page is scrolled past the top band
    pub fn is_scrolled(&self) -> bool {
        self.scroll_y > self.scrolled_offset
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Handle a scroll event
    pub fn on_scroll<M: ViewportMetrics + ?Sized>(&mut self, metrics: &M) -> &str {
        self.scroll_y = metrics.scroll_offset();
        self.resolver.on_scroll(metrics)
    }

    /// Smooth-scroll to a section and close the menu overlay.
    ///
    /// Unknown ids and unmounted sections are ignored. Returns whether a
    /// scroll was requested.
    pub fn go_to<M, S>(&mut self, section_id: &str, metrics: &M, scroller: &mut S) -> bool
    where
        M: ViewportMetrics + ?Sized,
        S: SmoothScroll + ?Sized,
    {
        if !self.resolver.contains(section_id) {
            tracing::debug!(section = %section_id, "go_to: unknown section");
            return false;
        }
        let Some(bounds) = metrics.element_bounds(section_id) else {
            tracing::debug!(section = %section_id, "go_to: section not mounted");
            return false;
        };

        scroller.scroll_to(bounds.top);
        self.close_menu();
        true
    }
}
