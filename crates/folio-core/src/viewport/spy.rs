//! Scroll-spy: which section the navigation highlights

use std::collections::HashSet;

use super::metrics::ViewportMetrics;
use crate::{Error, Result};

/// A page region that can be navigated to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Anchor id; also the element key used for geometry lookups
    pub id: String,
    pub label: String,
    pub order: usize,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            order,
        }
    }
}

/// Maps the scroll position to the active section.
///
/// Sections are scanned bottom-up and the first whose top is at or above
/// the threshold wins, so when several qualify the lowest one is chosen.
#[derive(Debug, Clone)]
pub struct ActiveSectionResolver {
    sections: Vec<Section>,
    threshold: i64,
    active: usize,
}

impl ActiveSectionResolver {
    /// Sections are sorted by `order`; the first one starts active
    pub fn new(mut sections: Vec<Section>, threshold: i64) -> Result<Self> {
        if sections.is_empty() {
            return Err(Error::Other("scroll-spy needs at least one section".to_string()));
        }

        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(Error::DuplicateSection(section.id.clone()));
            }
        }

        sections.sort_by_key(|s| s.order);
        Ok(Self {
            sections,
            threshold,
            active: 0,
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn active_section_id(&self) -> &str {
        &self.sections[self.active].id
    }

    pub fn active_section(&self) -> &Section {
        &self.sections[self.active]
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    /// Recompute on a scroll event. Unchanged when no section qualifies.
    pub fn on_scroll<M: ViewportMetrics + ?Sized>(&mut self, metrics: &M) -> &str {
        let scroll = metrics.scroll_offset();

        let found = self.sections.iter().enumerate().rev().find(|(_, section)| {
            metrics
                .element_bounds(&section.id)
                .is_some_and(|b| b.viewport_top(scroll) <= self.threshold)
        });

        if let Some((index, section)) = found {
            if index != self.active {
                tracing::debug!(section = %section.id, "active section changed");
                self.active = index;
            }
        }

        self.active_section_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::metrics::{Bounds, ViewportSnapshot};

    fn abc() -> Vec<Section> {
        vec![
            Section::new("a", "A", 0),
            Section::new("b", "B", 1),
            Section::new("c", "C", 2),
        ]
    }

    /// Geometry whose viewport-relative tops are the given values at scroll 0
    fn tops(a: i64, b: i64, c: i64) -> ViewportSnapshot {
        ViewportSnapshot::new(0, 800)
            .with_element("a", Bounds::new(a, 100))
            .with_element("b", Bounds::new(b, 100))
            .with_element("c", Bounds::new(c, 100))
    }

    #[test]
    fn test_defaults_to_first_section() {
        let resolver = ActiveSectionResolver::new(abc(), 100).unwrap();
        assert_eq!(resolver.active_section_id(), "a");
    }

    #[test]
    fn test_middle_section_qualifies() {
        let mut resolver = ActiveSectionResolver::new(abc(), 100).unwrap();
        assert_eq!(resolver.on_scroll(&tops(-50, 40, 310)), "b");
    }

    #[test]
    fn test_lowest_qualifying_section_wins() {
        let mut resolver = ActiveSectionResolver::new(abc(), 100).unwrap();
        assert_eq!(resolver.on_scroll(&tops(-200, -50, 40)), "c");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut resolver = ActiveSectionResolver::new(abc(), 100).unwrap();
        assert_eq!(resolver.on_scroll(&tops(-300, 100, 101)), "b");
    }

    #[test]
    fn test_unchanged_when_nothing_qualifies() {
        let mut resolver = ActiveSectionResolver::new(abc(), 100).unwrap();
        resolver.on_scroll(&tops(-200, 40, 310));
        assert_eq!(resolver.active_section_id(), "b");

        assert_eq!(resolver.on_scroll(&tops(150, 300, 450)), "b");
    }

    #[test]
    fn test_document_scroll_is_applied() {
        let mut resolver = ActiveSectionResolver::new(abc(), 100).unwrap();
        let mut page = ViewportSnapshot::new(0, 800)
            .with_element("a", Bounds::new(0, 150))
            .with_element("b", Bounds::new(150, 150))
            .with_element("c", Bounds::new(300, 150));

        page.set_scroll(50);
        assert_eq!(resolver.on_scroll(&page), "b");
        page.set_scroll(200);
        assert_eq!(resolver.on_scroll(&page), "c");
        page.set_scroll(0);
        assert_eq!(resolver.on_scroll(&page), "a");
    }

    #[test]
    fn test_absent_sections_are_skipped() {
        let mut resolver = ActiveSectionResolver::new(abc(), 100).unwrap();
        let mut page = tops(-200, -50, 40);
        page.remove("c");
        assert_eq!(resolver.on_scroll(&page), "b");
    }

    #[test]
    fn test_sections_sorted_by_order() {
        let sections = vec![Section::new("c", "C", 2), Section::new("a", "A", 0)];
        let resolver = ActiveSectionResolver::new(sections, 100).unwrap();
        assert_eq!(resolver.sections()[0].id, "a");
        assert_eq!(resolver.active_section_id(), "a");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let sections = vec![Section::new("a", "A", 0), Section::new("a", "Again", 1)];
        let err = ActiveSectionResolver::new(sections, 100).unwrap_err();
        assert!(matches!(err, Error::DuplicateSection(id) if id == "a"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(ActiveSectionResolver::new(Vec::new(), 100).is_err());
    }
}
