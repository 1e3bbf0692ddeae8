//! Game settings and preferences
//!
//! Player-facing knobs, kept apart from gameplay tuning. Not persisted.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Whether to draw mountains and trees behind the road
    pub fn scenery_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }

    /// Triangle fan segments for coins and wheels
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Whether background music starts enabled
    pub music_enabled: bool,

    // === Behaviour ===
    /// Pause the run when the window loses focus
    pub auto_pause_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no coin spin)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 1.0,
            music_enabled: true,

            auto_pause_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective coin spin (respects reduced_motion)
    pub fn effective_coin_spin(&self) -> bool {
        !self.reduced_motion
    }

    /// Final gain applied to sound effects
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Final gain applied to the music loop
    pub fn music_gain(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        let preset: QualityPreset = serde_json::from_str(r#""High""#).unwrap();
        assert_eq!(preset, QualityPreset::High);
        assert!(serde_json::from_str::<QualityPreset>(r#""Ultra""#).is_err());
        assert_eq!(QualityPreset::default(), QualityPreset::Medium);
    }

    #[test]
    fn test_preset_detail() {
        assert!(!QualityPreset::Low.scenery_enabled());
        assert!(QualityPreset::High.scenery_enabled());
        assert!(QualityPreset::Low.circle_segments() < QualityPreset::High.circle_segments());
    }

    #[test]
    fn test_gains_are_clamped() {
        let settings = Settings {
            master_volume: 2.0,
            sfx_volume: 1.0,
            music_volume: 0.25,
            ..Settings::default()
        };
        assert_eq!(settings.sfx_gain(), 1.0);
        assert!((settings.music_gain() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings =
            serde_json::from_str(r#"{ "quality": "Low", "reduced_motion": true }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(!settings.effective_coin_spin());
        assert!(settings.music_enabled);
        assert_eq!(Settings::from_preset(QualityPreset::High).quality, QualityPreset::High);
    }
}
