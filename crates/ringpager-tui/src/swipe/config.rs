//! Swipe configuration helpers; the config type itself lives in ringpager-core.

use std::time::Duration;

pub use ringpager_core::SwipeConfig;

pub trait SwipeConfigExt {
    /// Duration of a full one-page swipe
    fn animation_duration(&self) -> Duration;

    /// Frame interval while a swipe is animating
    fn animation_tick_duration(&self) -> Duration;

    /// Whether swipes are animated at all
    fn is_smooth(&self) -> bool;
}

impl SwipeConfigExt for SwipeConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        if self.is_smooth() {
            Duration::from_millis(self.animation_duration_ms)
        } else {
            Duration::ZERO
        }
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_swipe_has_no_duration() {
        let config = SwipeConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        assert!(!config.is_smooth());
        assert_eq!(config.animation_duration(), Duration::ZERO);
    }

    #[test]
    fn test_tick_duration() {
        let mut config = SwipeConfig::default();
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));
        config.animation_fps = 0;
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));
        config.animation_fps = 30;
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(33));
    }
}
