//! Viewport geometry provider
//!
//! The engine never reads global scroll state. Everything it needs comes
//! through [`ViewportMetrics`], which the front end implements from its
//! layout and tests implement with synthetic values.

use std::collections::HashMap;

/// Vertical extent of an element in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Top edge, measured from the start of the document
    pub top: i64,
    pub height: u32,
}

impl Bounds {
    pub fn new(top: i64, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> i64 {
        self.top + self.height as i64
    }

    /// Top edge relative to the viewport for a given scroll offset
    pub fn viewport_top(&self, scroll_offset: i64) -> i64 {
        self.top - scroll_offset
    }

    /// Fraction of the element inside `[scroll_offset, scroll_offset + viewport_height)`
    pub fn visible_ratio(&self, scroll_offset: i64, viewport_height: u32) -> f64 {
        let view_top = scroll_offset;
        let view_bottom = scroll_offset + viewport_height as i64;
        let visible = (self.bottom().min(view_bottom) - self.top.max(view_top)).max(0);

        if self.height == 0 {
            // Zero-height elements count as fully visible while inside the viewport
            return if self.top >= view_top && self.top < view_bottom { 1.0 } else { 0.0 };
        }
        visible as f64 / self.height as f64
    }
}

/// Source of scroll offset, viewport size and element geometry
pub trait ViewportMetrics {
    /// Current scroll offset of the document
    fn scroll_offset(&self) -> i64;

    /// Height of the visible area
    fn viewport_height(&self) -> u32;

    /// Bounds of an element, or `None` if it is not mounted
    fn element_bounds(&self, element: &str) -> Option<Bounds>;
}

/// Plain-value metrics: one frame's worth of geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportSnapshot {
    pub scroll_offset: i64,
    pub viewport_height: u32,
    elements: HashMap<String, Bounds>,
}

impl ViewportSnapshot {
    pub fn new(scroll_offset: i64, viewport_height: u32) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            elements: HashMap::new(),
        }
    }

    /// Builder-style element registration
    pub fn with_element(mut self, element: impl Into<String>, bounds: Bounds) -> Self {
        self.insert(element, bounds);
        self
    }

    pub fn insert(&mut self, element: impl Into<String>, bounds: Bounds) {
        self.elements.insert(element.into(), bounds);
    }

    pub fn remove(&mut self, element: &str) -> Option<Bounds> {
        self.elements.remove(element)
    }

    pub fn set_scroll(&mut self, scroll_offset: i64) {
        self.scroll_offset = scroll_offset;
    }

    /// Largest scroll offset that keeps the viewport filled
    pub fn max_scroll(&self) -> i64 {
        let bottom = self.elements.values().map(Bounds::bottom).max().unwrap_or(0);
        (bottom - self.viewport_height as i64).max(0)
    }
}

impl ViewportMetrics for ViewportSnapshot {
    fn scroll_offset(&self) -> i64 {
        self.scroll_offset
    }

    fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    fn element_bounds(&self, element: &str) -> Option<Bounds> {
        self.elements.get(element).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_ratio() {
        let b = Bounds::new(100, 50);
        assert_eq!(b.visible_ratio(0, 100), 0.0);
        assert!((b.visible_ratio(0, 110) - 0.2).abs() < 1e-9);
        assert_eq!(b.visible_ratio(100, 100), 1.0);
        assert!((b.visible_ratio(125, 100) - 0.5).abs() < 1e-9);
        assert_eq!(b.visible_ratio(150, 100), 0.0);
    }

    #[test]
    fn test_tall_element_ratio_is_capped_by_viewport() {
        let b = Bounds::new(0, 400);
        assert!((b.visible_ratio(0, 100) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_top() {
        assert_eq!(Bounds::new(150, 10).viewport_top(110), 40);
        assert_eq!(Bounds::new(0, 10).viewport_top(50), -50);
    }

    #[test]
    fn test_snapshot_max_scroll() {
        let snap = ViewportSnapshot::new(0, 20)
            .with_element("a", Bounds::new(0, 30))
            .with_element("b", Bounds::new(30, 15));
        assert_eq!(snap.max_scroll(), 25);
        assert_eq!(ViewportSnapshot::new(0, 20).max_scroll(), 0);
    }
}
