use std::time::{Duration, Instant};

/// Fraction of `duration` elapsed between `start` and `now`, clamped to [0, 1]
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Interpolate between two scroll offsets
#[inline]
pub fn lerp_offset(from: i64, to: i64, t: f64) -> i64 {
    lerp(from as f64, to as f64, t).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_offset() {
        assert_eq!(lerp_offset(0, 100, 0.0), 0);
        assert_eq!(lerp_offset(0, 100, 0.5), 50);
        assert_eq!(lerp_offset(40, 10, 0.5), 25);
        assert_eq!(lerp_offset(0, 100, 1.0), 100);
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let d = Duration::from_millis(200);
        assert_eq!(progress(start, d, start), 0.0);
        assert!((progress(start, d, start + Duration::from_millis(50)) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, d, start + Duration::from_secs(5)), 1.0);
        assert_eq!(progress(start, Duration::ZERO, start), 1.0);
        assert!(is_complete(start, d, start + d));
        assert!(!is_complete(start, d, start + Duration::from_millis(199)));
    }
}
