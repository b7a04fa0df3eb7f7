//! User settings and preferences for Markview
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence. Only preferences live
//! here; the document itself is never persisted.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// Get a display label for the theme.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// Serialized to JSON in the user's config directory. Every field has a
/// default, so partial or older files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Font size for the markdown input (in points)
    pub font_size: f32,

    /// Base font size for the rendered preview (in points)
    pub preview_font_size: f32,

    /// Whether the input pane wraps long lines
    pub word_wrap: bool,

    /// Share of the window width given to the input pane (0.0 to 1.0)
    pub split_ratio: f32,

    /// Window size and position
    pub window_size: WindowSize,

    /// Whether to show the status bar
    pub show_status_bar: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: 14.0,
            preview_font_size: 16.0,
            word_wrap: true,
            split_ratio: 0.5,
            window_size: WindowSize::default(),
            show_status_bar: true,
        }
    }
}

impl Settings {
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Step used by the zoom shortcuts.
    pub const FONT_SIZE_STEP: f32 = 1.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    /// Neither pane may shrink below this share of the window.
    pub const MIN_SPLIT_RATIO: f32 = 0.1;
    /// Upper bound matching `MIN_SPLIT_RATIO`.
    pub const MAX_SPLIT_RATIO: f32 = 0.9;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// Useful after loading a file that might have been edited by hand.
    pub fn sanitize(&mut self) {
        self.font_size = clamp_or(self.font_size, Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE, 14.0);
        self.preview_font_size = clamp_or(
            self.preview_font_size,
            Self::MIN_FONT_SIZE,
            Self::MAX_FONT_SIZE,
            16.0,
        );

        self.window_size.width = clamp_or(
            self.window_size.width,
            Self::MIN_WINDOW_SIZE,
            Self::MAX_WINDOW_SIZE,
            1200.0,
        );
        self.window_size.height = clamp_or(
            self.window_size.height,
            Self::MIN_WINDOW_SIZE,
            Self::MAX_WINDOW_SIZE,
            800.0,
        );

        self.split_ratio = clamp_or(
            self.split_ratio,
            Self::MIN_SPLIT_RATIO,
            Self::MAX_SPLIT_RATIO,
            0.5,
        );
    }

    /// Deserialize settings and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Grow both font sizes by one step. Returns `true` if anything changed.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(Self::FONT_SIZE_STEP)
    }

    /// Shrink both font sizes by one step. Returns `true` if anything changed.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(-Self::FONT_SIZE_STEP)
    }

    fn zoom_by(&mut self, delta: f32) -> bool {
        let before = (self.font_size, self.preview_font_size);
        self.font_size = (self.font_size + delta).clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
        self.preview_font_size =
            (self.preview_font_size + delta).clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
        before != (self.font_size, self.preview_font_size)
    }
}

/// Clamp `value` into `[min, max]`, replacing NaN with `fallback`.
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.font_size, 14.0);
        assert_eq!(settings.preview_font_size, 16.0);
        assert!(settings.word_wrap);
        assert_eq!(settings.split_ratio, 0.5);
        assert_eq!(settings.window_size.width, 1200.0);
        assert!(settings.show_status_bar);
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<Theme>("\"system\"").unwrap(),
            Theme::System
        );
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.font_size, 14.0);
        assert!(settings.word_wrap);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = Settings {
            theme: Theme::System,
            font_size: 18.0,
            split_ratio: 0.3,
            ..Settings::default()
        };
        let json = serde_json::to_string_pretty(&original).unwrap();
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_window_position_omitted_when_unset() {
        let json = serde_json::to_string(&WindowSize::default()).unwrap();
        assert!(!json.contains("\"x\""));
        assert!(!json.contains("\"y\""));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sanitization tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_sanitize_font_sizes() {
        let mut settings = Settings {
            font_size: 2.0,
            preview_font_size: 500.0,
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);
        assert_eq!(settings.preview_font_size, Settings::MAX_FONT_SIZE);
    }

    #[test]
    fn test_sanitize_split_ratio() {
        let mut settings = Settings::default();
        settings.split_ratio = -0.5;
        settings.sanitize();
        assert_eq!(settings.split_ratio, Settings::MIN_SPLIT_RATIO);

        settings.split_ratio = 1.5;
        settings.sanitize();
        assert_eq!(settings.split_ratio, Settings::MAX_SPLIT_RATIO);

        settings.split_ratio = f32::NAN;
        settings.sanitize();
        assert_eq!(settings.split_ratio, 0.5);
    }

    #[test]
    fn test_sanitize_window_size() {
        let mut settings = Settings::default();
        settings.window_size.width = 10.0;
        settings.window_size.height = 1e9;
        settings.sanitize();
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_from_json_sanitized() {
        let settings = Settings::from_json_sanitized(r#"{"font_size": 4.0, "split_ratio": 2.0}"#)
            .unwrap();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);
        assert_eq!(settings.split_ratio, Settings::MAX_SPLIT_RATIO);
    }

    #[test]
    fn test_zoom_clamps_and_reports_change() {
        let mut settings = Settings::default();
        assert!(settings.zoom_in());
        assert_eq!(settings.font_size, 15.0);
        assert_eq!(settings.preview_font_size, 17.0);

        settings.font_size = Settings::MAX_FONT_SIZE;
        settings.preview_font_size = Settings::MAX_FONT_SIZE;
        assert!(!settings.zoom_in());

        settings.font_size = Settings::MIN_FONT_SIZE;
        settings.preview_font_size = Settings::MIN_FONT_SIZE;
        assert!(!settings.zoom_out());
        assert!(settings.zoom_in());
    }
}
