//! Scroll animation controller for the page viewport

use std::time::{Duration, Instant};

use folio_core::viewport::SmoothScroll;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_offset, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: i64,
    to: i64,
    duration: Duration,
    easing: EasingType,
}

/// Eased scrolling over a document of known height.
///
/// Key presses accumulate into a pending delta that `update` folds into a
/// single animation, so rapid presses chain instead of restarting.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current: i64,
    pending_delta: i64,
    max_scroll: i64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0,
            pending_delta: 0,
            max_scroll: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the next frame will move the viewport
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    #[inline]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Where the viewport ends up once the running animation finishes
    pub fn target(&self) -> i64 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    pub fn max_scroll(&self) -> i64 {
        self.max_scroll
    }

    /// Update the scroll range after a layout change
    pub fn set_max_scroll(&mut self, max_scroll: i64) {
        self.max_scroll = max_scroll.max(0);
        self.current = self.clamp(self.current);
        if let Some(anim) = self.animation.as_mut() {
            anim.to = anim.to.clamp(0, self.max_scroll);
        }
    }

    /// Move immediately, dropping any animation
    pub fn jump_to(&mut self, offset: i64) {
        self.animation = None;
        self.pending_delta = 0;
        self.current = self.clamp(offset);
    }

    /// Animate from the current position to `offset`
    pub fn animate_to(&mut self, offset: i64, now: Instant) {
        let target = self.clamp(offset);
        self.pending_delta = 0;

        if !self.config.is_smooth() {
            self.jump_to(target);
            return;
        }
        if target == self.current {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll by `delta` rows (positive is down)
    pub fn scroll_by(&mut self, delta: i64) {
        if self.config.is_smooth() {
            self.pending_delta += delta;
        } else {
            let target = self.current + delta;
            self.jump_to(target);
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll_by(self.line_step());
    }

    pub fn scroll_up(&mut self) {
        self.scroll_by(-self.line_step());
    }

    pub fn half_page_down(&mut self, viewport_height: u16) {
        self.scroll_by((viewport_height / 2).max(1) as i64);
    }

    pub fn half_page_up(&mut self, viewport_height: u16) {
        self.scroll_by(-((viewport_height / 2).max(1) as i64));
    }

    pub fn page_down(&mut self, viewport_height: u16) {
        self.scroll_by(viewport_height.max(1) as i64);
    }

    pub fn page_up(&mut self, viewport_height: u16) {
        self.scroll_by(-(viewport_height.max(1) as i64));
    }

    /// Advance to `now` and return the offset to render
    pub fn update(&mut self, now: Instant) -> i64 {
        if self.pending_delta != 0 {
            let to = self.clamp(self.target() + self.pending_delta);
            self.pending_delta = 0;
            if to != self.current {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current,
                    to,
                    duration: self.config.animation_duration(),
                    easing: self.config.easing,
                });
            }
        }

        if let Some(anim) = &self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current = self.clamp(anim.to);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration, now));
                self.current = self.clamp(lerp_offset(anim.from, anim.to, t));
            }
        }

        self.current
    }

    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }

    fn line_step(&self) -> i64 {
        if self.config.is_smooth() {
            1
        } else {
            self.config.scroll_lines.max(1) as i64
        }
    }

    fn clamp(&self, offset: i64) -> i64 {
        offset.clamp(0, self.max_scroll)
    }
}

impl SmoothScroll for ScrollAnimator {
    fn scroll_to(&mut self, offset: i64) {
        self.animate_to(offset, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(ms: u64) -> ScrollAnimator {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: ms,
            easing: EasingType::Linear,
            ..Default::default()
        });
        animator.set_max_scroll(200);
        animator
    }

    #[test]
    fn test_instant_when_disabled() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            scroll_lines: 3,
            ..Default::default()
        });
        animator.set_max_scroll(50);

        animator.animate_to(40, Instant::now());
        assert_eq!(animator.current(), 40);
        assert!(!animator.is_animating());

        animator.scroll_down();
        assert_eq!(animator.current(), 43);

        animator.page_down(30);
        assert_eq!(animator.current(), 50);
    }

    #[test]
    fn test_animation_interpolates() {
        let mut animator = smooth(100);
        let start = Instant::now();
        animator.animate_to(100, start);
        assert!(animator.is_animating());
        assert_eq!(animator.target(), 100);

        assert_eq!(animator.update(start + Duration::from_millis(50)), 50);
        assert_eq!(animator.update(start + Duration::from_millis(100)), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_pending_deltas_batch() {
        let mut animator = smooth(100);
        animator.scroll_by(10);
        animator.scroll_by(10);
        animator.scroll_by(10);
        assert!(animator.needs_update());

        let now = Instant::now();
        animator.update(now);
        assert_eq!(animator.target(), 30);
        assert_eq!(animator.update(now + Duration::from_millis(150)), 30);
    }

    #[test]
    fn test_targets_clamped_to_range() {
        let mut animator = smooth(100);
        let now = Instant::now();
        animator.animate_to(500, now);
        assert_eq!(animator.target(), 200);

        animator.set_max_scroll(80);
        assert_eq!(animator.target(), 80);

        animator.jump_to(-5);
        assert_eq!(animator.current(), 0);
    }

    #[test]
    fn test_smooth_scroll_trait_targets_offset() {
        let mut animator = smooth(100);
        SmoothScroll::scroll_to(&mut animator, 120);
        assert_eq!(animator.target(), 120);
    }
}
