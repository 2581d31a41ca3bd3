use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use ratatui::style::Color;

use crate::spy::{ScrollPolicy, Thresholds};
use crate::spy::geometry::{DEFAULT_DOWN_THRESHOLD, DEFAULT_UP_THRESHOLD};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Rows moved per mouse wheel notch
    pub scroll_lines: u16,
    /// Width of the navigation menu column
    pub menu_width: u16,
    pub spy: SpyConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SpyConfig {
    pub down_threshold: f64,
    pub up_threshold: f64,
    /// Animate the menu when the current link moves out of view
    pub smooth_menu: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub heading_fg: Option<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            scroll_lines: 3,
            menu_width: 28,
            spy: SpyConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for SpyConfig {
    fn default() -> Self {
        SpyConfig {
            down_threshold: DEFAULT_DOWN_THRESHOLD,
            up_threshold: DEFAULT_UP_THRESHOLD,
            smooth_menu: true,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            heading_fg: None,
        }
    }
}

impl SpyConfig {
    /// Thresholds from config, falling back to the defaults when invalid
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.down_threshold, self.up_threshold).unwrap_or_else(|e| {
            tracing::warn!("Invalid spy thresholds ({}), using defaults", e);
            Thresholds::default()
        })
    }

    /// Policy for bringing the current menu link into view
    pub fn menu_policy(&self) -> ScrollPolicy {
        if self.smooth_menu {
            ScrollPolicy::NEAREST_SMOOTH
        } else {
            ScrollPolicy::NEAREST_INSTANT
        }
    }
}

impl ThemeConfig {
    /// Heading color, defaulting to the selection color
    pub fn heading_fg(&self) -> Color {
        self.heading_fg.unwrap_or(self.selection_fg)
    }
}

/// Deserialize a color from a string (supports named colors, RGB hex, or RGB tuple)
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Deserialize an optional color from a string
fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(color_str) => {
            let color = parse_color(&color_str)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))?;
            Ok(Some(color))
        }
        None => Ok(None),
    }
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    let named = match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        "orange" => Some(Color::Rgb(255, 165, 0)),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        return match hex.len() {
            6 => Some(Color::Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => Some(Color::Rgb(
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
            )),
            _ => None,
        };
    }

    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() == 3 {
        let r = parts[0].trim().parse::<u8>().ok()?;
        let g = parts[1].trim().parse::<u8>().ok()?;
        let b = parts[2].trim().parse::<u8>().ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            return Config::default();
        }
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Invalid config {}: {}", config_path.display(), e);
        Config::default()
    })
}
