//! User-defined color harmony rules
//!
//! A harmony is a named list of rules applied to a base color to produce a
//! combination. Rules operate in HSV: hue offsets and complements wrap
//! around the wheel, saturation and brightness offsets are clamped. The full
//! list persists as the `"custom_harmonies"` record.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::records::CUSTOM_HARMONIES;
use crate::error::StoreError;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HarmonyRule {
    /// The base color unchanged
    Base,
    /// Rotate hue by `value` degrees
    HueOffset { value: f32 },
    /// Rotate hue by `angle` degrees (180 = classic complement)
    Complementary {
        #[serde(default = "default_complement_angle")]
        angle: f32,
    },
    /// Shift saturation by `value` percent, clamped to [0, 100]
    Saturation { value: f32 },
    /// Shift brightness by `value` percent, clamped to [0, 100]
    Brightness { value: f32 },
    /// A fixed color regardless of the base
    Fixed { color: Rgb },
}

fn default_complement_angle() -> f32 {
    180.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Harmony {
    pub name: String,
    pub rules: Vec<HarmonyRule>,
}

impl Harmony {
    /// Apply every rule to `base`, producing one color per rule in rule order
    pub fn apply(&self, base: Rgb) -> Vec<Rgb> {
        let (h, s, v) = base.to_hsv();
        self.rules
            .iter()
            .map(|rule| match rule {
                HarmonyRule::Base => base,
                HarmonyRule::HueOffset { value } => Rgb::from_hsv(h + value / 360.0, s, v),
                HarmonyRule::Complementary { angle } => Rgb::from_hsv(h + angle / 360.0, s, v),
                HarmonyRule::Saturation { value } => {
                    Rgb::from_hsv(h, (s + value / 100.0).clamp(0.0, 1.0), v)
                }
                HarmonyRule::Brightness { value } => {
                    Rgb::from_hsv(h, s, (v + value / 100.0).clamp(0.0, 1.0))
                }
                HarmonyRule::Fixed { color } => *color,
            })
            .collect()
    }
}

/// The persisted collection of custom harmonies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HarmonyBook {
    harmonies: Vec<Harmony>,
}

impl HarmonyBook {
    /// Load the book, treating a missing record as empty
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        match store.load(CUSTOM_HARMONIES) {
            Ok(payload) => Ok(serde_json::from_value(payload)?),
            Err(StoreError::RecordNotFound(_)) => Ok(Self::default()),
            Err(other) => Err(other),
        }
    }

    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        store.save(CUSTOM_HARMONIES, &serde_json::to_value(self)?)
    }

    pub fn harmonies(&self) -> &[Harmony] {
        &self.harmonies
    }

    pub fn add(&mut self, harmony: Harmony) {
        self.harmonies.push(harmony);
    }

    /// Replace the harmony at `index`; false if out of range
    pub fn update(&mut self, index: usize, harmony: Harmony) -> bool {
        match self.harmonies.get_mut(index) {
            Some(slot) => {
                *slot = harmony;
                true
            }
            None => false,
        }
    }

    /// Remove the harmony at `index`; false if out of range
    pub fn delete(&mut self, index: usize) -> bool {
        if index < self.harmonies.len() {
            self.harmonies.remove(index);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> Store {
        Store::open(dir.path().join("data"), &dir.path().join("vault.key")).unwrap()
    }

    fn sample_harmony() -> Harmony {
        Harmony {
            name: "Split Accent".to_string(),
            rules: vec![
                HarmonyRule::Base,
                HarmonyRule::HueOffset { value: 30.0 },
                HarmonyRule::Complementary { angle: 180.0 },
                HarmonyRule::Brightness { value: -20.0 },
                HarmonyRule::Fixed {
                    color: Rgb::new(255, 255, 255),
                },
            ],
        }
    }

    #[test]
    fn test_apply_produces_one_color_per_rule() {
        let base = Rgb::parse("#3498DB").unwrap();
        let colors = sample_harmony().apply(base);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], base);
        assert_eq!(colors[4], Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_complementary_of_red_is_cyan() {
        let harmony = Harmony {
            name: "Complement".to_string(),
            rules: vec![HarmonyRule::Complementary { angle: 180.0 }],
        };
        let colors = harmony.apply(Rgb::new(255, 0, 0));
        assert_eq!(colors, vec![Rgb::new(0, 255, 255)]);
    }

    #[test]
    fn test_brightness_clamps_at_bounds() {
        let darker = Harmony {
            name: "Darker".to_string(),
            rules: vec![HarmonyRule::Brightness { value: -200.0 }],
        };
        assert_eq!(darker.apply(Rgb::new(10, 200, 30)), vec![Rgb::new(0, 0, 0)]);

        let brighter = Harmony {
            name: "Brighter".to_string(),
            rules: vec![HarmonyRule::Brightness { value: 200.0 }],
        };
        let out = brighter.apply(Rgb::new(128, 0, 0));
        assert_eq!(out, vec![Rgb::new(255, 0, 0)]);
    }

    #[test]
    fn test_rule_serde_uses_type_tags() {
        let rule = HarmonyRule::HueOffset { value: 120.0 };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "hue_offset", "value": 120.0 }));

        // Complementary angle defaults to 180 when absent
        let parsed: HarmonyRule =
            serde_json::from_value(serde_json::json!({ "type": "complementary" })).unwrap();
        assert_eq!(parsed, HarmonyRule::Complementary { angle: 180.0 });
    }

    #[test]
    fn test_book_add_update_delete() {
        let mut book = HarmonyBook::default();
        book.add(sample_harmony());
        assert_eq!(book.harmonies().len(), 1);

        let mut replacement = sample_harmony();
        replacement.name = "Renamed".to_string();
        assert!(book.update(0, replacement.clone()));
        assert_eq!(book.harmonies()[0].name, "Renamed");
        assert!(!book.update(5, replacement));

        assert!(book.delete(0));
        assert!(book.harmonies().is_empty());
        assert!(!book.delete(0));
    }

    #[test]
    fn test_book_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let mut book = HarmonyBook::default();
        book.add(sample_harmony());
        book.save(&store).unwrap();

        assert_eq!(HarmonyBook::load(&store).unwrap(), book);
    }

    #[test]
    fn test_load_missing_is_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);
        assert!(HarmonyBook::load(&store).unwrap().harmonies().is_empty());
    }
}
