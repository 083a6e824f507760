//! Entrance transitions for revealed content
//!
//! Progress is derived from the reveal instant, so the renderer needs no
//! per-element animation state.

use std::time::{Duration, Instant};

use folio_core::EasingType;

use crate::scroll::easing::EasingTypeExt;
use crate::scroll::timing::progress;

/// Columns a line travels while sliding in
pub const SLIDE_COLUMNS: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub struct Transition {
    duration: Duration,
    easing: EasingType,
}

impl Transition {
    pub fn new(duration_ms: u64, easing: EasingType) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            easing,
        }
    }

    /// 0.0 is hidden, 1.0 is settled
    pub fn progress(&self, revealed_at: Option<Instant>, delay_ms: u64, now: Instant) -> f64 {
        let Some(revealed_at) = revealed_at else {
            return 0.0;
        };
        let start = revealed_at + Duration::from_millis(delay_ms);
        if now < start {
            return 0.0;
        }
        self.easing.apply(progress(start, self.duration, now))
    }

    /// Remaining slide offset in columns
    pub fn offset(&self, progress: f64) -> u16 {
        ((1.0 - progress.clamp(0.0, 1.0)) * SLIDE_COLUMNS as f64).round() as u16
    }

    /// Whether everything revealed at `revealed_at` with up to `max_delay_ms` has settled
    pub fn is_settled(&self, revealed_at: Instant, max_delay_ms: u64, now: Instant) -> bool {
        now >= revealed_at + Duration::from_millis(max_delay_ms) + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_hidden_until_revealed() {
        let t = Transition::new(700, EasingType::Linear);
        assert_eq!(t.progress(None, 0, Instant::now()), 0.0);
        assert_eq!(t.offset(0.0), SLIDE_COLUMNS);
    }

    #[test]
    fn test_stagger_delays_start() {
        let t = Transition::new(100, EasingType::Linear);
        let at = Instant::now();

        assert_eq!(t.progress(Some(at), 200, at + ms(150)), 0.0);
        assert!((t.progress(Some(at), 200, at + ms(250)) - 0.5).abs() < 1e-9);
        assert_eq!(t.progress(Some(at), 200, at + ms(300)), 1.0);
        assert_eq!(t.offset(1.0), 0);
    }

    #[test]
    fn test_settled() {
        let t = Transition::new(700, EasingType::Cubic);
        let at = Instant::now();
        assert!(!t.is_settled(at, 400, at + ms(1099)));
        assert!(t.is_settled(at, 400, at + ms(1100)));
    }
}
