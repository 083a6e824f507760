//! One-shot entrance reveal
//!
//! `Unseen -> Revealed` is the only transition; `Revealed` is terminal.

use std::time::Instant;

use super::metrics::ViewportMetrics;
use super::observer::ViewportObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Unseen,
    /// Revealed at the given instant
    Revealed(Instant),
}

impl RevealState {
    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealState::Revealed(_))
    }

    /// Apply a visibility notification. Returns true if this caused the reveal.
    pub fn on_visibility(&mut self, is_intersecting: bool, now: Instant) -> bool {
        match self {
            RevealState::Unseen if is_intersecting => {
                *self = RevealState::Revealed(now);
                true
            }
            _ => false,
        }
    }
}

/// Flips a permanent "revealed" flag the first time an element is visible enough
#[derive(Debug, Clone)]
pub struct RevealController {
    element: String,
    threshold: f64,
    state: RevealState,
    observer: ViewportObserver<()>,
}

impl RevealController {
    /// Create an unmounted controller for `element`
    pub fn new(element: impl Into<String>, threshold: f64) -> Self {
        Self {
            element: element.into(),
            threshold,
            state: RevealState::Unseen,
            observer: ViewportObserver::new(),
        }
    }

    /// Create and mount in one step
    pub fn mounted(element: impl Into<String>, threshold: f64) -> Self {
        let mut controller = Self::new(element, threshold);
        controller.mount();
        controller
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    /// Start watching the element. Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if !self.observer.is_active() {
            self.observer.observe((), self.element.clone(), self.threshold);
        }
    }

    /// Stop watching. Later visibility changes no longer affect the state.
    pub fn unmount(&mut self) {
        self.observer.dispose();
    }

    pub fn is_mounted(&self) -> bool {
        self.observer.is_active()
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    /// Instant of the reveal, if it happened
    pub fn revealed_at(&self) -> Option<Instant> {
        match self.state {
            RevealState::Revealed(at) => Some(at),
            RevealState::Unseen => None,
        }
    }

    /// Deliver pending visibility notifications. Returns true on the reveal itself.
    pub fn update<M: ViewportMetrics + ?Sized>(&mut self, metrics: &M, now: Instant) -> bool {
        if self.state.is_revealed() {
            // Terminal state: stop listening entirely
            self.observer.dispose();
            return false;
        }

        let mut fired = false;
        for crossing in self.observer.poll(metrics) {
            if self.state.on_visibility(crossing.is_intersecting, now) {
                tracing::debug!(element = %self.element, "revealed");
                fired = true;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::metrics::{Bounds, ViewportSnapshot};
    use std::time::Duration;

    fn at(scroll: i64) -> ViewportSnapshot {
        ViewportSnapshot::new(scroll, 100).with_element("about", Bounds::new(200, 100))
    }

    #[test]
    fn test_state_machine_is_one_shot() {
        let t0 = Instant::now();
        let mut state = RevealState::Unseen;

        assert!(!state.on_visibility(false, t0));
        assert_eq!(state, RevealState::Unseen);

        assert!(state.on_visibility(true, t0));
        assert!(!state.on_visibility(false, t0 + Duration::from_secs(1)));
        assert!(!state.on_visibility(true, t0 + Duration::from_secs(2)));
        assert_eq!(state, RevealState::Revealed(t0));
    }

    #[test]
    fn test_reveals_at_threshold_and_stays_revealed() {
        let t0 = Instant::now();
        let mut reveal = RevealController::mounted("about", 0.2);

        assert!(!reveal.update(&at(0), t0));
        assert!(!reveal.is_revealed());

        // 19% visible
        assert!(!reveal.update(&at(119), t0));
        // 20% visible
        assert!(reveal.update(&at(120), t0));
        assert!(reveal.is_revealed());

        // Scrolling away does not hide it again
        assert!(!reveal.update(&at(0), t0 + Duration::from_secs(1)));
        assert!(reveal.is_revealed());
        assert_eq!(reveal.revealed_at(), Some(t0));
    }

    #[test]
    fn test_revealed_controller_releases_its_observer() {
        let t0 = Instant::now();
        let mut reveal = RevealController::mounted("about", 0.2);
        reveal.update(&at(200), t0);
        reveal.update(&at(200), t0);
        assert!(!reveal.is_mounted());
        assert!(reveal.is_revealed());
    }

    #[test]
    fn test_no_state_change_after_unmount() {
        let t0 = Instant::now();
        let mut reveal = RevealController::mounted("about", 0.2);
        reveal.update(&at(0), t0);

        reveal.unmount();
        assert!(!reveal.is_mounted());

        // Fully visible after teardown: must be ignored
        assert!(!reveal.update(&at(200), t0));
        assert_eq!(reveal.state(), RevealState::Unseen);
    }

    #[test]
    fn test_missing_element_never_reveals() {
        let t0 = Instant::now();
        let mut reveal = RevealController::mounted("skills", 0.2);
        assert!(!reveal.update(&at(200), t0));
        assert!(!reveal.is_revealed());
        assert!(reveal.is_mounted());
    }
}
