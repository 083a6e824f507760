//! Visibility-crossing observer
//!
//! Each watch remembers whether its element was last seen intersecting.
//! `poll` compares against fresh geometry and reports only the watches whose
//! state flipped, plus an initial report for watches never evaluated before.

use super::metrics::ViewportMetrics;

/// Handle to a registered watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

/// A visibility crossing delivered by [`ViewportObserver::poll`]
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing<K> {
    pub watch: WatchId,
    pub key: K,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
struct Watch<K> {
    id: WatchId,
    key: K,
    element: String,
    threshold: f64,
    last: Option<bool>,
}

/// Watches elements and reports threshold crossings.
///
/// `K` is an owner-chosen key returned with each crossing so the owner can
/// route it without a lookup.
#[derive(Debug, Clone)]
pub struct ViewportObserver<K> {
    watches: Vec<Watch<K>>,
    next_id: u64,
}

impl<K> Default for ViewportObserver<K> {
    fn default() -> Self {
        Self {
            watches: Vec::new(),
            next_id: 0,
        }
    }
}

/// Whether a visible fraction counts as intersecting for a threshold
pub fn is_intersecting(ratio: f64, threshold: f64) -> bool {
    ratio > 0.0 && ratio >= threshold
}

impl<K: Clone> ViewportObserver<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a watch on `element`; `threshold` is clamped to `[0, 1]`
    pub fn observe(&mut self, key: K, element: impl Into<String>, threshold: f64) -> WatchId {
        let id = WatchId(self.next_id);
        self.next_id += 1;

        let element = element.into();
        tracing::trace!(element = %element, threshold, "observe");

        self.watches.push(Watch {
            id,
            key,
            element,
            threshold: threshold.clamp(0.0, 1.0),
            last: None,
        });
        id
    }

    /// Release one watch. Returns false if it was not registered.
    pub fn unobserve(&mut self, id: WatchId) -> bool {
        let before = self.watches.len();
        self.watches.retain(|w| w.id != id);
        self.watches.len() != before
    }

    /// Release every watch
    pub fn dispose(&mut self) {
        self.watches.clear();
    }

    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }

    pub fn is_active(&self) -> bool {
        !self.watches.is_empty()
    }

    /// Evaluate all watches against `metrics` and return the crossings.
    ///
    /// Elements missing from `metrics` are skipped and keep their last state.
    pub fn poll<M: ViewportMetrics + ?Sized>(&mut self, metrics: &M) -> Vec<Crossing<K>> {
        let scroll = metrics.scroll_offset();
        let height = metrics.viewport_height();
        let mut crossings = Vec::new();

        for watch in &mut self.watches {
            let Some(bounds) = metrics.element_bounds(&watch.element) else {
                continue;
            };

            let now = is_intersecting(bounds.visible_ratio(scroll, height), watch.threshold);
            if watch.last != Some(now) {
                watch.last = Some(now);
                crossings.push(Crossing {
                    watch: watch.id,
                    key: watch.key.clone(),
                    is_intersecting: now,
                });
            }
        }

        crossings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::metrics::{Bounds, ViewportSnapshot};

    fn page(scroll: i64) -> ViewportSnapshot {
        ViewportSnapshot::new(scroll, 150)
            .with_element("a", Bounds::new(0, 100))
            .with_element("b", Bounds::new(200, 100))
    }

    #[test]
    fn test_initial_notification_then_only_crossings() {
        let mut observer = ViewportObserver::new();
        observer.observe("a", "a", 0.2);
        observer.observe("b", "b", 0.2);

        let first = observer.poll(&page(0));
        assert_eq!(first.len(), 2);
        assert!(first.iter().any(|c| c.key == "a" && c.is_intersecting));
        assert!(first.iter().any(|c| c.key == "b" && !c.is_intersecting));

        // Nothing moved: no notifications
        assert!(observer.poll(&page(0)).is_empty());

        // b reaches 20% visible at scroll 70; a is still 30% visible
        let crossings = observer.poll(&page(70));
        assert_eq!(crossings.len(), 1);
        assert_eq!(crossings[0].key, "b");
        assert!(crossings[0].is_intersecting);
    }

    #[test]
    fn test_crossing_back_out_is_reported() {
        let mut observer = ViewportObserver::new();
        observer.observe((), "b", 0.5);

        observer.poll(&page(200));
        let out = observer.poll(&page(0));
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_intersecting);
    }

    #[test]
    fn test_missing_element_is_skipped() {
        let mut observer = ViewportObserver::new();
        observer.observe((), "ghost", 0.2);
        assert!(observer.poll(&page(0)).is_empty());

        let later = page(0).with_element("ghost", Bounds::new(10, 10));
        assert_eq!(observer.poll(&later).len(), 1);
    }

    #[test]
    fn test_dispose_releases_watches() {
        let mut observer = ViewportObserver::new();
        let id = observer.observe((), "a", 0.2);
        observer.observe((), "b", 0.2);
        assert_eq!(observer.watch_count(), 2);

        assert!(observer.unobserve(id));
        assert!(!observer.unobserve(id));
        assert_eq!(observer.watch_count(), 1);

        observer.dispose();
        assert!(!observer.is_active());
        assert!(observer.poll(&page(200)).is_empty());
    }

    #[test]
    fn test_zero_threshold_needs_a_visible_row() {
        assert!(!is_intersecting(0.0, 0.0));
        assert!(is_intersecting(0.01, 0.0));
        assert!(is_intersecting(0.2, 0.2));
        assert!(!is_intersecting(0.19, 0.2));
    }
}
