use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scroll::ScrollerOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Labels of the items on the track, in initial order
    #[serde(default = "default_items")]
    pub items: Vec<String>,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroller: ScrollerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            items: default_items(),
            general: GeneralConfig::default(),
            scroller: ScrollerConfig::default(),
            ui: UiConfig::default(),
            keymap: KeymapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for the log file written while the TUI is running
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

/// Options of the scroller itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollerConfig {
    /// Seconds it takes to scroll `num_to_scroll` items
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Number of items moved per navigation action
    #[serde(default = "default_num_to_scroll")]
    pub num_to_scroll: u32,
    /// Identifier of the element that masks the track
    #[serde(default = "default_mask")]
    pub mask: String,
    /// Identifier of the element that is actually scrolled
    #[serde(default = "default_scroller")]
    pub scroller: String,
    /// Identifier of the "previous" control
    #[serde(default = "default_prev_btn")]
    pub prev_btn: String,
    /// Identifier of the "next" control
    #[serde(default = "default_next_btn")]
    pub next_btn: String,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            num_to_scroll: default_num_to_scroll(),
            mask: default_mask(),
            scroller: default_scroller(),
            prev_btn: default_prev_btn(),
            next_btn: default_next_btn(),
        }
    }
}

impl ScrollerConfig {
    /// Engine options derived from this table. Validation happens when the
    /// engine is built.
    pub fn options(&self) -> ScrollerOptions {
        ScrollerOptions {
            duration: self.duration,
            num_to_scroll: self.num_to_scroll,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Width of a single item in terminal columns
    #[serde(default = "default_item_width")]
    pub item_width: u32,
    /// Left margin of each item in terminal columns
    #[serde(default = "default_item_margin")]
    pub item_margin: u32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            item_width: default_item_width(),
            item_margin: default_item_margin(),
            theme: ThemeConfig::default(),
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

// Accept either a string or a table
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

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Primary background
    pub bg0: Option<String>,
    /// Secondary background (item cells)
    pub bg1: Option<String>,
    /// Status bar background
    pub bg2: Option<String>,
    /// Primary foreground
    pub fg0: Option<String>,
    /// Accent color (borders of live controls)
    pub accent: Option<String>,
    /// Disabled control color
    pub disabled: Option<String>,
    /// Warning color
    pub warning: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "h", "<Left>", "<C-c>", "<S-Tab>", "<CR>", "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Scroll backward (previous items)
    #[serde(default = "default_key_prev")]
    pub prev: String,
    /// Scroll forward (next items)
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Abort a stuck session and re-enable navigation
    #[serde(default = "default_key_reset")]
    pub reset: String,
    /// Toggle the help popup
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            prev: default_key_prev(),
            next: default_key_next(),
            reset: default_key_reset(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_prev() -> String { "h".to_string() }
fn default_key_next() -> String { "l".to_string() }
fn default_key_reset() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sidescroll")
}

fn default_duration() -> f64 {
    0.5
}

fn default_num_to_scroll() -> u32 {
    1
}

fn default_mask() -> String {
    "scrollerMask".to_string()
}

fn default_scroller() -> String {
    "scroller".to_string()
}

fn default_prev_btn() -> String {
    "prev".to_string()
}

fn default_next_btn() -> String {
    "next".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_item_width() -> u32 {
    16
}

fn default_item_margin() -> u32 {
    2
}

fn default_items() -> Vec<String> {
    ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf"]
        .into_iter()
        .map(String::from)
        .collect()
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
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults
    /// when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let path = expand_tilde(path);
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        let path = expand_tilde(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/sidescroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("sidescroll")
            .join("config.toml")
    }

    /// Get the log directory (with tilde expansion)
    pub fn log_dir(&self) -> PathBuf {
        expand_tilde(&self.general.log_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scroller_surface() {
        let config = AppConfig::default();
        assert_eq!(config.scroller.duration, 0.5);
        assert_eq!(config.scroller.num_to_scroll, 1);
        assert_eq!(config.scroller.mask, "scrollerMask");
        assert_eq!(config.scroller.scroller, "scroller");
        assert!(!config.items.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            items = ["A", "B", "C"]

            [scroller]
            num_to_scroll = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.items, vec!["A", "B", "C"]);
        assert_eq!(config.scroller.num_to_scroll, 2);
        assert_eq!(config.scroller.duration, 0.5);
        assert_eq!(config.keymap.next, "l");
    }

    #[test]
    fn test_theme_accepts_string_or_table() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "nord");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"one-dark\"\n[ui.theme.colors]\naccent = \"#ff0000\"\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "one-dark");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[scroller]\nduration = \"fast\"\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.items, config.items);
        assert_eq!(parsed.ui.item_width, config.ui.item_width);
    }

    #[test]
    fn test_options_from_scroller_table() {
        let scroller = ScrollerConfig {
            duration: 1.5,
            num_to_scroll: 3,
            ..Default::default()
        };
        let options = scroller.options();
        assert_eq!(options.duration, 1.5);
        assert_eq!(options.num_to_scroll, 3);
    }
}
