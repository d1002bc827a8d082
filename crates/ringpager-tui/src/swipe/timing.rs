//! Time helpers for swipe animations
//!
//! All functions take an explicit `now` so the animation can be driven by a
//! synthetic clock in headless runs and tests.

use std::time::{Duration, Instant};

/// Animation progress in [0.0, 1.0] at `now`
#[inline]
pub fn progress_at(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete_at(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Scale a full-page duration by the distance actually travelled
pub fn scaled_duration(full: Duration, distance: f64) -> Duration {
    full.mul_f64(distance.abs().clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(1.0, 2.0, 0.0) - 1.0).abs() < 0.001);
        assert!((lerp(1.0, 2.0, 0.5) - 1.5).abs() < 0.001);
        assert!((lerp(1.0, 0.0, 1.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_at() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        assert!((progress_at(start, start, duration) - 0.0).abs() < 0.001);
        assert!((progress_at(start, start + Duration::from_millis(50), duration) - 0.25).abs() < 0.001);
        assert!((progress_at(start, start + Duration::from_secs(1), duration) - 1.0).abs() < 0.001);
        assert!(is_complete_at(start, start + duration, duration));
        assert!(!is_complete_at(start, start + Duration::from_millis(199), duration));
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress_at(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_scaled_duration() {
        let full = Duration::from_millis(200);
        assert_eq!(scaled_duration(full, 0.5), Duration::from_millis(100));
        assert_eq!(scaled_duration(full, -1.0), full);
    }
}
