//! Count-up animation for numeric stats
//!
//! The displayed value is a pure function of the time elapsed since the
//! trigger, quantised into a fixed number of steps. Sampling late never
//! accumulates drift and the last step lands exactly on the target.

use std::time::{Duration, Instant};

use crate::content::Stat;

use super::metrics::ViewportMetrics;
use super::reveal::RevealController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { started_at: Instant },
    Done,
    /// Torn down; the value is frozen
    Cancelled { value: u64 },
}

/// Snapshot of a counter for display or inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    pub target: u64,
    pub current: u64,
    pub started_at: Option<Instant>,
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct CounterAnimator {
    target: u64,
    duration: Duration,
    steps: u32,
    phase: Phase,
}

impl CounterAnimator {
    pub fn new(target: u64, duration: Duration, steps: u32) -> Self {
        Self {
            target,
            duration,
            steps: steps.max(1),
            phase: Phase::Idle,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Start counting. Only the first trigger has any effect.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = if self.duration.is_zero() {
            Phase::Done
        } else {
            Phase::Running { started_at: now }
        };
        true
    }

    /// Freeze the counter at its current value; later triggers are ignored
    pub fn cancel(&mut self, now: Instant) {
        let value = self.value_at(now);
        self.phase = Phase::Cancelled { value };
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Number of completed steps at `now`
    fn step_at(&self, started_at: Instant, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(started_at).as_nanos();
        let total = self.duration.as_nanos();
        // step = floor(elapsed / (duration / steps)), kept in integers
        let step = elapsed * self.steps as u128 / total;
        step.min(self.steps as u128) as u32
    }

    /// Value that should be displayed at `now`
    pub fn value_at(&self, now: Instant) -> u64 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Done => self.target,
            Phase::Cancelled { value } => value,
            Phase::Running { started_at } => {
                let step = self.step_at(started_at, now);
                if step >= self.steps {
                    self.target
                } else {
                    (self.target as u128 * step as u128 / self.steps as u128) as u64
                }
            }
        }
    }

    /// Advance the phase and return the current value
    pub fn update(&mut self, now: Instant) -> u64 {
        let value = self.value_at(now);
        if let Phase::Running { started_at } = self.phase {
            if self.step_at(started_at, now) >= self.steps {
                self.phase = Phase::Done;
            }
        }
        value
    }

    pub fn state(&self, now: Instant) -> CounterState {
        CounterState {
            target: self.target,
            current: self.value_at(now),
            started_at: match self.phase {
                Phase::Running { started_at } => Some(started_at),
                _ => None,
            },
            done: self.is_done(),
        }
    }
}

/// A stat tile: reveal-gated counter, or a raw value when not animatable
#[derive(Debug, Clone)]
pub struct StatCounter {
    stat: Stat,
    reveal: RevealController,
    animator: Option<CounterAnimator>,
}

impl StatCounter {
    /// Mount a counter for `stat` watching `element`
    pub fn mount(
        stat: Stat,
        element: impl Into<String>,
        threshold: f64,
        duration: Duration,
        steps: u32,
    ) -> Self {
        let animator = stat
            .counter_target()
            .map(|target| CounterAnimator::new(target, duration, steps));
        Self {
            stat,
            reveal: RevealController::mounted(element, threshold),
            animator,
        }
    }

    pub fn stat(&self) -> &Stat {
        &self.stat
    }

    pub fn element(&self) -> &str {
        self.reveal.element()
    }

    pub fn is_animated(&self) -> bool {
        self.animator.is_some()
    }

    /// Deliver visibility and advance the animation
    pub fn update<M: ViewportMetrics + ?Sized>(&mut self, metrics: &M, now: Instant) {
        if self.reveal.update(metrics, now) {
            if let Some(animator) = self.animator.as_mut() {
                animator.trigger(now);
            }
        }
        if let Some(animator) = self.animator.as_mut() {
            animator.update(now);
        }
    }

    /// True while the value is still changing
    pub fn is_animating(&self) -> bool {
        self.animator.as_ref().is_some_and(CounterAnimator::is_running)
    }

    pub fn current(&self, now: Instant) -> Option<u64> {
        self.animator.as_ref().map(|a| a.value_at(now))
    }

    pub fn display(&self, now: Instant) -> String {
        self.stat.display(self.current(now))
    }

    /// Release the observer and stop the animation
    pub fn unmount(&mut self, now: Instant) {
        self.reveal.unmount();
        if let Some(animator) = self.animator.as_mut() {
            animator.cancel(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StatValue;
    use crate::viewport::metrics::{Bounds, ViewportSnapshot};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_idle_until_triggered() {
        let t0 = Instant::now();
        let counter = CounterAnimator::new(25, ms(2000), 60);
        assert_eq!(counter.value_at(t0 + ms(5000)), 0);
        assert!(!counter.state(t0).done);
    }

    #[test]
    fn test_converges_exactly_to_target() {
        let t0 = Instant::now();
        for target in [0u64, 1, 7, 10, 25, 59, 60, 61, 1000, 123_457] {
            let mut counter = CounterAnimator::new(target, ms(2000), 60);
            counter.trigger(t0);
            assert_eq!(counter.update(t0 + ms(2000)), target);
            assert!(counter.is_done());
            assert_eq!(counter.value_at(t0 + ms(10_000)), target);
        }
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let t0 = Instant::now();
        let mut counter = CounterAnimator::new(25, ms(2000), 60);
        counter.trigger(t0);

        let mut prev = 0;
        for i in 0..=250 {
            let v = counter.update(t0 + ms(i * 10));
            assert!(v >= prev, "went backwards at {}ms", i * 10);
            assert!(v <= 25);
            prev = v;
        }
        assert_eq!(prev, 25);
    }

    #[test]
    fn test_intermediate_values_follow_steps() {
        let t0 = Instant::now();
        let mut counter = CounterAnimator::new(60, ms(600), 60);
        counter.trigger(t0);
        // 10ms per step, one unit per step
        assert_eq!(counter.value_at(t0 + ms(9)), 0);
        assert_eq!(counter.value_at(t0 + ms(10)), 1);
        assert_eq!(counter.value_at(t0 + ms(305)), 30);
        assert_eq!(counter.value_at(t0 + ms(599)), 59);
        assert_eq!(counter.value_at(t0 + ms(600)), 60);
    }

    #[test]
    fn test_retrigger_is_ignored() {
        let t0 = Instant::now();
        let mut counter = CounterAnimator::new(10, ms(1000), 10);
        assert!(counter.trigger(t0));
        assert!(!counter.trigger(t0 + ms(500)));
        assert_eq!(counter.state(t0).started_at, Some(t0));

        counter.update(t0 + ms(1000));
        assert!(!counter.trigger(t0 + ms(2000)));
        assert_eq!(counter.value_at(t0 + ms(2000)), 10);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let t0 = Instant::now();
        let mut counter = CounterAnimator::new(42, Duration::ZERO, 60);
        counter.trigger(t0);
        assert!(counter.is_done());
        assert_eq!(counter.value_at(t0), 42);
    }

    #[test]
    fn test_cancel_freezes_value() {
        let t0 = Instant::now();
        let mut counter = CounterAnimator::new(60, ms(600), 60);
        counter.trigger(t0);
        counter.cancel(t0 + ms(100));
        assert_eq!(counter.value_at(t0 + ms(5000)), 10);
        assert!(!counter.trigger(t0 + ms(6000)));
    }

    fn snapshot(scroll: i64) -> ViewportSnapshot {
        ViewportSnapshot::new(scroll, 10).with_element("stat", Bounds::new(20, 4))
    }

    #[test]
    fn test_stat_counter_starts_when_half_visible() {
        let t0 = Instant::now();
        let mut stat = StatCounter::mount(Stat::number("Years", 10), "stat", 0.5, ms(1000), 10);

        stat.update(&snapshot(0), t0);
        assert_eq!(stat.display(t0 + ms(5000)), "0+");

        // 2 of 4 rows visible
        stat.update(&snapshot(12), t0);
        assert!(stat.is_animating());
        stat.update(&snapshot(0), t0 + ms(1000));
        assert_eq!(stat.display(t0 + ms(1000)), "10+");
        assert!(!stat.is_animating());
    }

    #[test]
    fn test_raw_stat_is_never_animated() {
        let t0 = Instant::now();
        let raw = Stat {
            label: "Portfolio".into(),
            value: StatValue::Text("$60M+".into()),
            animated: false,
        };
        let mut stat = StatCounter::mount(raw, "stat", 0.5, ms(1000), 10);
        assert!(!stat.is_animated());
        stat.update(&snapshot(20), t0);
        assert_eq!(stat.display(t0), "$60M+");
    }

    #[test]
    fn test_stat_counter_ignores_visibility_after_unmount() {
        let t0 = Instant::now();
        let mut stat = StatCounter::mount(Stat::number("Years", 10), "stat", 0.5, ms(1000), 10);
        stat.update(&snapshot(0), t0);
        stat.unmount(t0);

        stat.update(&snapshot(20), t0 + ms(100));
        assert_eq!(stat.current(t0 + ms(2000)), Some(0));
        assert!(!stat.is_animating());
    }
}
