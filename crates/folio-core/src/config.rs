use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Optional TOML file replacing the built-in portfolio content
    #[serde(default)]
    pub content_path: Option<PathBuf>,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            content_path: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Below this terminal width the nav bar collapses into the menu overlay
    #[serde(default = "default_compact_width")]
    pub compact_width: u16,
    /// Duration of the entrance transition once a section is revealed
    #[serde(default = "default_reveal_transition")]
    pub reveal_transition_ms: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Smooth scrolling configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            compact_width: default_compact_width(),
            reveal_transition_ms: default_reveal_transition(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accepts either `theme = "nord"` or `[ui.theme] name = ... colors = ...`
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub bg2: Option<String>,
    pub fg0: Option<String>,
    pub fg1: Option<String>,
    /// Accent color (logo dot, active nav item, headings)
    pub accent: Option<String>,
    pub selection: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub info: Option<String>,
}

/// Easing curve for smooth scrolling and entrance transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per j/k press when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Thresholds and timings of the viewport state engine.
///
/// Offsets are in the units of the metrics provider: terminal rows for the
/// TUI, CSS pixels when driven by a browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// A section becomes active once its top is at or above this offset
    #[serde(default = "default_spy_threshold")]
    pub spy_threshold: i64,
    /// Scroll offset above which the nav bar switches to its solid style
    #[serde(default = "default_scrolled_offset")]
    pub scrolled_offset: i64,
    /// Visible fraction that reveals a section
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,
    /// Visible fraction that starts a stat counter
    #[serde(default = "default_counter_threshold")]
    pub counter_threshold: f64,
    #[serde(default = "default_counter_duration")]
    pub counter_duration_ms: u64,
    #[serde(default = "default_counter_steps")]
    pub counter_steps: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            spy_threshold: default_spy_threshold(),
            scrolled_offset: default_scrolled_offset(),
            reveal_threshold: default_reveal_threshold(),
            counter_threshold: default_counter_threshold(),
            counter_duration_ms: default_counter_duration(),
            counter_steps: default_counter_steps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// EmailJS service id
    #[serde(default = "default_service_id")]
    pub service_id: String,
    /// EmailJS template id (required to send)
    #[serde(default)]
    pub template_id: Option<String>,
    /// EmailJS public key (required to send)
    #[serde(default)]
    pub public_key: Option<String>,
    /// Send endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            service_id: default_service_id(),
            template_id: None,
            public_key: None,
            endpoint: default_endpoint(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl ContactConfig {
    /// Template id and public key, when both are present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let template = self.template_id.as_deref().filter(|s| !s.trim().is_empty())?;
        let key = self.public_key.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((template, key))
    }

    /// Overlay `FOLIO_EMAILJS_*` variables from a lookup function
    fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(service) = non_empty(ENV_SERVICE_ID) {
            self.service_id = service;
        }
        if let Some(template) = non_empty(ENV_TEMPLATE_ID) {
            self.template_id = Some(template);
        }
        if let Some(key) = non_empty(ENV_PUBLIC_KEY) {
            self.public_key = Some(key);
        }
    }
}

pub const ENV_SERVICE_ID: &str = "FOLIO_EMAILJS_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "FOLIO_EMAILJS_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "FOLIO_EMAILJS_PUBLIC_KEY";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_compact_width() -> u16 {
    80
}

fn default_reveal_transition() -> u64 {
    700
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_spy_threshold() -> i64 {
    3 // rows below the nav bar
}

fn default_scrolled_offset() -> i64 {
    1
}

fn default_reveal_threshold() -> f64 {
    0.2
}

fn default_counter_threshold() -> f64 {
    0.5
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_counter_steps() -> u32 {
    60
}

fn default_service_id() -> String {
    "portfolio_contact_me".to_string()
}

fn default_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

fn default_timeout() -> u64 {
    30
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
    /// Load configuration from file (or defaults), then apply environment overrides
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        config.contact.apply_env_with(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the content file path (with tilde expansion), if configured
    pub fn content_path(&self) -> Option<PathBuf> {
        self.general.content_path.as_deref().map(expand_tilde)
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_log_path_lives_in_data_dir() {
        let config = AppConfig::from_toml("[general]\ndata_dir = \"/tmp/folio-data\"").unwrap();
        let log_path = config.log_path();
        assert_eq!(log_path.parent(), Some(std::path::Path::new("/tmp/folio-data")));
        assert_eq!(log_path.file_name().and_then(|n| n.to_str()), Some("folio.log"));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.viewport.counter_steps, 60);
        assert_eq!(config.viewport.counter_duration_ms, 2000);
        assert!((config.viewport.reveal_threshold - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.contact.service_id, "portfolio_contact_me");
        assert!(config.contact.credentials().is_none());
    }

    #[test]
    fn test_theme_as_string() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "nord");
    }

    #[test]
    fn test_theme_as_table() {
        let toml = "[ui.theme]\nname = \"dracula\"\n[ui.theme.colors]\naccent = \"#ff0000\"\n";
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.ui.theme.name, "dracula");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_easing_snake_case() {
        let config = AppConfig::from_toml("[ui.scroll]\neasing = \"ease_out\"\n").unwrap();
        assert_eq!(config.ui.scroll.easing, EasingType::EaseOut);
    }

    #[test]
    fn test_credentials_require_both_values() {
        let mut contact = ContactConfig {
            template_id: Some("template".into()),
            ..Default::default()
        };
        assert!(contact.credentials().is_none());

        contact.public_key = Some("   ".into());
        assert!(contact.credentials().is_none());

        contact.public_key = Some("key".into());
        assert_eq!(contact.credentials(), Some(("template", "key")));
    }

    #[test]
    fn test_env_overrides_ignore_empty_values() {
        let vars: HashMap<&str, &str> = [
            (ENV_SERVICE_ID, ""),
            (ENV_TEMPLATE_ID, "tpl_env"),
            (ENV_PUBLIC_KEY, "key_env"),
        ]
        .into_iter()
        .collect();

        let mut contact = ContactConfig::default();
        contact.apply_env_with(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(contact.service_id, "portfolio_contact_me");
        assert_eq!(contact.credentials(), Some(("tpl_env", "key_env")));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[viewport]\ncounter_steps = \"many\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
