use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub spy: SpyConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub to_top: ToTopConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Page description to load instead of the built-in sample
    #[serde(default)]
    pub page: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            page: None,
        }
    }
}

/// Easing curve used by the host's animated scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
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

/// In-page navigation and animated scroll settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Visual buffer kept above a navigation target
    #[serde(default = "default_scroll_margin")]
    pub margin: f64,
    /// Height of a fixed header to compensate for (0 in the split layout)
    #[serde(default)]
    pub header_offset: f64,
    /// Animate scrolls instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of an animated scroll
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines moved per wheel notch or j/k press
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate of the animation clock
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            margin: default_scroll_margin(),
            header_offset: 0.0,
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

impl ScrollConfig {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Smooth scrolling needs both the switch and a non-zero duration
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

/// How a batch reporting several sections in the decision zone is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Every entry re-derives the link set; the last one processed wins
    LastEntry,
    /// The section whose centre is closest to the viewport centre wins
    #[default]
    NearestCenter,
}

/// Scroll-spy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpyConfig {
    /// Fraction of the viewport height cut from the top of the decision zone
    #[serde(default = "default_zone_top")]
    pub zone_top: f64,
    /// Fraction of the viewport height cut from the bottom of the decision zone
    #[serde(default = "default_zone_bottom")]
    pub zone_bottom: f64,
    /// Minimum visible ratio of a section before it counts as intersecting
    #[serde(default = "default_spy_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            zone_top: default_zone_top(),
            zone_bottom: default_zone_bottom(),
            threshold: default_spy_threshold(),
            tie_break: TieBreak::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Minimum visible ratio that triggers the reveal
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
        }
    }
}

/// Cursor-following light settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Fraction of the remaining distance closed per frame (higher = faster follow)
    #[serde(default = "default_ease")]
    pub ease: f64,
    /// Per-axis distance under which the light snaps onto the pointer
    #[serde(default = "default_snap_distance")]
    pub snap_distance: f64,
    /// Opacity while the pointer is inside the window
    #[serde(default = "default_visible_opacity")]
    pub visible_opacity: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            ease: default_ease(),
            snap_distance: default_snap_distance(),
            visible_opacity: default_visible_opacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToTopConfig {
    /// Scroll offset the page must exceed before the back-to-top control shows
    #[serde(default = "default_to_top_threshold")]
    pub threshold: f64,
}

impl Default for ToTopConfig {
    fn default() -> Self {
        Self {
            threshold: default_to_top_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Input poll timeout in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Width of a terminal cell in layout units
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    /// Height of a terminal cell in layout units
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
    /// Width of the navigation column in cells
    #[serde(default = "default_nav_width")]
    pub nav_width: u16,
    /// Theme name (e.g., "gruvbox-dark", "nord")
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            nav_width: default_nav_width(),
            theme: default_theme_name(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lumen")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_scroll_margin() -> f64 {
    10.0
}

fn default_animation_duration() -> u64 {
    300
}

fn default_scroll_lines() -> u16 {
    3
}

/// Highest frame rate the frame clock accepts
pub const MAX_ANIMATION_FPS: u32 = 1000;

fn default_animation_fps() -> u32 {
    60
}

fn default_zone_top() -> f64 {
    0.4
}

fn default_zone_bottom() -> f64 {
    0.5
}

fn default_spy_threshold() -> f64 {
    0.1
}

fn default_reveal_threshold() -> f64 {
    0.2
}

fn default_ease() -> f64 {
    0.4
}

fn default_snap_distance() -> f64 {
    0.3
}

fn default_visible_opacity() -> f64 {
    0.7
}

fn default_to_top_threshold() -> f64 {
    300.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width() -> f64 {
    8.0
}

fn default_cell_height() -> f64 {
    16.0
}

fn default_nav_width() -> u16 {
    24
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
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
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/lumen/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("lumen")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used by the terminal host
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("lumen.log")
    }

    /// Page description path (with tilde expansion)
    pub fn page_path(&self) -> Option<PathBuf> {
        self.general.page.as_deref().map(expand_tilde)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let fail = |msg: String| -> crate::Result<()> { Err(crate::Error::Config(msg)) };

        if !(self.pointer.ease > 0.0 && self.pointer.ease <= 1.0) {
            return fail(format!("pointer.ease must be in (0, 1], got {}", self.pointer.ease));
        }
        if self.pointer.snap_distance < 0.0 {
            return fail(format!(
                "pointer.snap_distance must not be negative, got {}",
                self.pointer.snap_distance
            ));
        }
        if !(0.0..=1.0).contains(&self.pointer.visible_opacity) {
            return fail(format!(
                "pointer.visible_opacity must be in [0, 1], got {}",
                self.pointer.visible_opacity
            ));
        }
        for (name, value) in [
            ("spy.threshold", self.spy.threshold),
            ("reveal.threshold", self.reveal.threshold),
            ("spy.zone_top", self.spy.zone_top),
            ("spy.zone_bottom", self.spy.zone_bottom),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return fail(format!("{} must be in [0, 1], got {}", name, value));
            }
        }
        if self.spy.zone_top + self.spy.zone_bottom >= 1.0 {
            return fail("spy.zone_top + spy.zone_bottom must leave a non-empty decision zone".to_string());
        }
        if self.scroll.margin < 0.0 || self.scroll.header_offset < 0.0 {
            return fail("scroll.margin and scroll.header_offset must not be negative".to_string());
        }
        if !(1..=MAX_ANIMATION_FPS).contains(&self.scroll.animation_fps) {
            return fail(format!(
                "scroll.animation_fps must be in [1, {}], got {}",
                MAX_ANIMATION_FPS, self.scroll.animation_fps
            ));
        }
        if self.ui.cell_width <= 0.0 || self.ui.cell_height <= 0.0 {
            return fail("ui.cell_width and ui.cell_height must be positive".to_string());
        }
        Ok(())
    }
}
