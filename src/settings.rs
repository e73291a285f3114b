//! Prompt settings and presentation copy
//!
//! Loaded from LocalStorage on web, optional JSON file on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::AssetRegistry;
use crate::consts::*;
use crate::sim::Size;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-facing text. Cosmetic only; the core picks lines by band index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wording {
    /// One line per status band (invite, pleading, insistent, urgent)
    pub status: [String; 4],
    pub question: String,
    pub accepted_headline: String,
    pub accepted_subline: String,
    pub reset_label: String,
}

impl Default for Wording {
    fn default() -> Self {
        Self {
            status: [
                "I have a special place in my heart for you... \u{1F449}\u{1F448}".into(),
                "Are you sure? Look at my poor heart... \u{1F62D}".into(),
                "Hey! Come back here and click Yes! \u{1F97A}".into(),
                "The 'Yes' button is taking over! Give in! \u{1F624}".into(),
            ],
            question: "Will you be my Valentine?".into(),
            accepted_headline: "Yay! \u{1F496}".into(),
            accepted_subline: "I KNEW IT! \u{1F389}".into(),
            reset_label: "Reset for more memes? \u{2728}".into(),
        }
    }
}

impl Wording {
    /// Status line for a band index, clamped to the last band
    pub fn status_line(&self, band: usize) -> &str {
        &self.status[band.min(self.status.len() - 1)]
    }
}

/// Prompt settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Placement ===
    /// Gap kept between the decline control and the area edge (pixels)
    pub padding: f32,
    /// Decline control size used when the host can't measure it
    pub decline_control: Size,

    // === Particles ===
    /// Hearts spawned on accept
    pub celebration_burst: usize,
    pub celebration_glyph: String,
    /// Pool a protest particle draws from
    pub protest_glyphs: Vec<String>,

    // === Presentation ===
    pub wording: Wording,
    pub assets: AssetRegistry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            padding: PLACEMENT_PADDING,
            decline_control: Size::new(DECLINE_CONTROL_SIZE.0, DECLINE_CONTROL_SIZE.1),

            celebration_burst: CELEBRATION_BURST,
            celebration_glyph: "\u{2764}\u{FE0F}".into(),
            protest_glyphs: default_protest_glyphs(),

            wording: Wording::default(),
            assets: AssetRegistry::default(),
        }
    }
}

fn default_protest_glyphs() -> Vec<String> {
    [
        "\u{1F622}", // crying
        "\u{1F62D}", // sobbing
        "\u{1F494}", // broken heart
        "\u{1F97A}", // pleading
        "\u{274C}",  // cross
        "Nooo",
        "Rude!",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Settings {
    /// Parse from JSON, repairing out-of-range values
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace values the core can't use with defaults
    pub fn sanitize(&mut self) {
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            log::warn!("Invalid padding {}, using {}", self.padding, PLACEMENT_PADDING);
            self.padding = PLACEMENT_PADDING;
        }
        let ctl = self.decline_control;
        if !(ctl.width.is_finite() && ctl.width >= 0.0 && ctl.height.is_finite() && ctl.height >= 0.0)
        {
            log::warn!("Invalid decline control size {:?}, using default", ctl);
            self.decline_control = Size::new(DECLINE_CONTROL_SIZE.0, DECLINE_CONTROL_SIZE.1);
        }
        if self.celebration_burst > MAX_CELEBRATION_BURST {
            log::warn!(
                "Celebration burst {} too large, clamping to {}",
                self.celebration_burst,
                MAX_CELEBRATION_BURST
            );
            self.celebration_burst = MAX_CELEBRATION_BURST;
        }
        if self.protest_glyphs.is_empty() {
            log::warn!("Empty protest glyph pool, using defaults");
            self.protest_glyphs = default_protest_glyphs();
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "valentine_prompt_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.padding, 20.0);
        assert_eq!(s.decline_control, Size::new(100.0, 44.0));
        assert_eq!(s.celebration_burst, 70);
        assert_eq!(s.protest_glyphs.len(), 7);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"padding": 8.0}"#).unwrap();
        assert_eq!(s.padding, 8.0);
        assert_eq!(s.celebration_burst, 70);
        assert_eq!(s.wording, Wording::default());
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let s = Settings::from_json(r#"{"padding": -3.0, "protest_glyphs": []}"#).unwrap();
        assert_eq!(s.padding, PLACEMENT_PADDING);
        assert_eq!(s.protest_glyphs.len(), 7);
    }

    #[test]
    fn test_sanitize_clamps_celebration_burst() {
        let s = Settings::from_json(r#"{"celebration_burst": 18446744073709551615}"#).unwrap();
        assert_eq!(s.celebration_burst, MAX_CELEBRATION_BURST);
    }

    #[test]
    fn test_invalid_registry_is_an_error() {
        let json = r#"{"assets": {"default": "d", "celebration": [], "protest": ["p"]}}"#;
        assert!(matches!(Settings::from_json(json), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_json_round_trip_keeps_wording() {
        let mut s = Settings::default();
        s.wording.question = "Pizza tonight?".into();
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back.wording.question, "Pizza tonight?");
    }

    #[test]
    fn test_status_line_clamps() {
        let w = Wording::default();
        assert_eq!(w.status_line(9), w.status_line(3));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_falls_back() {
        let s = Settings::load_or_default(Some(std::path::Path::new("/nonexistent/valentine.json")));
        assert_eq!(s, Settings::default());
    }
}
