//! Application settings
//!
//! Typed view over the `"config"` record. Every field carries a serde
//! default so payloads written by older versions gain new keys silently on
//! the next save, and a missing record falls back to the full defaults.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::records::CONFIG;
use crate::error::StoreError;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // Auto-save
    #[serde(default = "default_auto_save_enabled")]
    pub auto_save_enabled: bool,
    /// Seconds between auto-saves
    #[serde(default = "default_auto_save_interval")]
    pub auto_save_interval: u32,

    // K-means color extraction
    #[serde(default = "default_kmeans_max_colors")]
    pub kmeans_max_colors: u8,
    #[serde(default = "default_kmeans_filter_background")]
    pub kmeans_filter_background: bool,
    #[serde(default = "default_kmeans_max_iterations")]
    pub kmeans_max_iterations: u32,

    // UI
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_theme")]
    pub theme: String,

    // Background detection during extraction
    #[serde(default = "default_background_luminance_high")]
    pub background_luminance_high: u8,
    #[serde(default = "default_background_luminance_low")]
    pub background_luminance_low: u8,
    #[serde(default = "default_saturation_threshold")]
    pub saturation_threshold: f32,

    // Files
    #[serde(default = "default_max_recent_files")]
    pub max_recent_files: usize,

    // Export
    #[serde(default = "default_export_format")]
    pub default_export_format: String,

    // Screen picker
    #[serde(default = "default_screen_picker_size")]
    pub screen_picker_size: u32,
}

fn default_auto_save_enabled() -> bool {
    true
}

fn default_auto_save_interval() -> u32 {
    300
}

fn default_kmeans_max_colors() -> u8 {
    5
}

fn default_kmeans_filter_background() -> bool {
    true
}

fn default_kmeans_max_iterations() -> u32 {
    12
}

fn default_window_width() -> u32 {
    700
}

fn default_window_height() -> u32 {
    520
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_background_luminance_high() -> u8 {
    240
}

fn default_background_luminance_low() -> u8 {
    15
}

fn default_saturation_threshold() -> f32 {
    0.15
}

fn default_max_recent_files() -> usize {
    10
}

fn default_export_format() -> String {
    "png".to_string()
}

fn default_screen_picker_size() -> u32 {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save_enabled: default_auto_save_enabled(),
            auto_save_interval: default_auto_save_interval(),
            kmeans_max_colors: default_kmeans_max_colors(),
            kmeans_filter_background: default_kmeans_filter_background(),
            kmeans_max_iterations: default_kmeans_max_iterations(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            theme: default_theme(),
            background_luminance_high: default_background_luminance_high(),
            background_luminance_low: default_background_luminance_low(),
            saturation_threshold: default_saturation_threshold(),
            max_recent_files: default_max_recent_files(),
            default_export_format: default_export_format(),
            screen_picker_size: default_screen_picker_size(),
        }
    }
}

impl Settings {
    /// Load from the store, substituting full defaults when no record exists
    ///
    /// Corruption is surfaced, never papered over: the caller decides whether
    /// to reset or abort.
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        match store.load(CONFIG) {
            Ok(payload) => Ok(serde_json::from_value(payload)?),
            Err(StoreError::RecordNotFound(_)) => {
                info!("No settings record found, using defaults");
                Ok(Self::default())
            }
            Err(other) => Err(other),
        }
    }

    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        store.save(CONFIG, &serde_json::to_value(self)?)
    }

    /// Reset the persisted settings to defaults
    pub fn reset(store: &Store) -> Result<Self, StoreError> {
        let settings = Self::default();
        settings.save(store)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> Store {
        Store::open(dir.path().join("data"), &dir.path().join("vault.key")).unwrap()
    }

    #[test]
    fn test_missing_record_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let settings = Settings::load(&store).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_recent_files, 10);
        assert_eq!(settings.theme, "default");
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let mut settings = Settings::default();
        settings.theme = "dark".to_string();
        settings.window_width = 1024;
        settings.save(&store).unwrap();

        assert_eq!(Settings::load(&store).unwrap(), settings);
    }

    #[test]
    fn test_older_payload_backfills_new_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        // A payload from a version that only knew two keys
        store
            .save(CONFIG, &serde_json::json!({ "theme": "dark", "window_width": 800 }))
            .unwrap();

        let settings = Settings::load(&store).unwrap();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.window_width, 800);
        // Unknown-at-write-time fields get their defaults
        assert_eq!(settings.auto_save_interval, 300);
        assert_eq!(settings.default_export_format, "png");
    }

    #[test]
    fn test_reset_overwrites_persisted_settings() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let mut settings = Settings::default();
        settings.theme = "dark".to_string();
        settings.save(&store).unwrap();

        Settings::reset(&store).unwrap();
        assert_eq!(Settings::load(&store).unwrap(), Settings::default());
    }
}
