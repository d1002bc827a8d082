use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::snapshot::SnapshotMode;
use crate::window::{RotatingWindow, WindowStrategy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pager: PagerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for transient snapshot files and logs
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            cache_dir: default_cache_dir(),
        }
    }
}

/// Windowing behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Slot-filling strategy: "indexed" or "rotating"
    #[serde(default)]
    pub strategy: WindowStrategy,
    /// When dummies are captured: "on_demand" or "prefetch"
    #[serde(default)]
    pub snapshot_mode: SnapshotMode,
    /// JPEG quality (1-100) for persisted snapshots
    #[serde(default = "default_snapshot_quality")]
    pub snapshot_quality: u8,
    /// Rotation steps allowed per settle before rebuilding
    #[serde(default = "default_max_rotation_steps")]
    pub max_rotation_steps: usize,
    /// Start on the middle page instead of the first
    #[serde(default)]
    pub start_at_middle: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            strategy: WindowStrategy::default(),
            snapshot_mode: SnapshotMode::default(),
            snapshot_quality: default_snapshot_quality(),
            max_rotation_steps: default_max_rotation_steps(),
            start_at_middle: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Number of demo pages
    #[serde(default = "default_page_count")]
    pub page_count: usize,
    /// Swipe animation
    #[serde(default)]
    pub swipe: SwipeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            page_count: default_page_count(),
            swipe: SwipeConfig::default(),
        }
    }
}

/// Easing curve for swipe animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end
    None,
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeConfig {
    /// Animate swipes; when false a swipe completes on the next frame
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ringpager")
}

fn default_snapshot_quality() -> u8 {
    50
}

fn default_max_rotation_steps() -> usize {
    RotatingWindow::DEFAULT_MAX_STEPS
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_page_count() -> usize {
    5
}

fn default_animation_duration() -> u64 {
    220
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/ringpager/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("ringpager")
            .join("config.toml")
    }

    /// Get the cache directory (with tilde expansion)
    pub fn cache_dir(&self) -> PathBuf {
        expand_tilde(&self.general.cache_dir)
    }

    /// Log file for the interactive strip
    pub fn log_path(&self) -> PathBuf {
        self.cache_dir().join("ringpager.log")
    }
}
