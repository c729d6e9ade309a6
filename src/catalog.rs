//! Preset palette catalog
//!
//! The catalog is generated deterministically: hand-curated family palettes
//! first (design-system color families, a flat/web set, seasonal and purpose
//! themes), then harmonic derivations over a fixed hue wheel, then seeded
//! randomized combinations until the target count is reached. Regeneration
//! replaces the catalog wholesale and always yields identical output.
//!
//! Once built or loaded the catalog is an immutable snapshot; the search
//! module only reads it.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::Rgb;
use crate::constants::catalog::{GENERATION_SEED, PALETTE_SIZE};
use crate::constants::records::PRESET_PALETTES;
use crate::error::StoreError;
use crate::store::Store;

/// One curated or generated color set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Unique within a catalog snapshot, stable across regenerations
    pub id: u32,
    pub name: String,
    /// Ordered darkest-to-lightest or hue-ordered; order is meaningful
    pub colors: Vec<Rgb>,
    pub tags: BTreeSet<String>,
}

/// Immutable-once-built collection of palette entries
///
/// Only constructible through [`Catalog::generate`] and [`Catalog::load`],
/// so every value handed to the search engine is a valid catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<PaletteEntry>,
}

impl Catalog {
    /// Generate the full catalog and persist it as one record, replacing any
    /// prior catalog wholesale
    ///
    /// Curated and harmonic sets are always emitted; seeded randomized
    /// combinations are appended until `target_count` entries exist. Ids are
    /// `1..=len` in generation order.
    pub fn generate(store: &Store, target_count: usize) -> Result<Self, StoreError> {
        let mut entries = curated_entries();
        entries.extend(harmonic_entries());

        let mut rng = Pcg64Mcg::seed_from_u64(GENERATION_SEED);
        let mut mix_index = 0u32;
        while entries.len() < target_count {
            mix_index += 1;
            entries.push(random_entry(&mut rng, mix_index));
        }

        for (i, entry) in entries.iter_mut().enumerate() {
            entry.id = (i + 1) as u32;
        }

        let catalog = Self { entries };
        let payload = serde_json::to_value(&catalog.entries)?;
        store.save(PRESET_PALETTES, &payload)?;
        info!(count = catalog.len(), "Generated preset palette catalog");
        Ok(catalog)
    }

    /// Load the persisted catalog
    ///
    /// An absent or corrupt record, or a payload without the catalog shape,
    /// is `CatalogUnavailable`; the caller triggers [`Catalog::generate`] to
    /// rebuild.
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        let payload = match store.load(PRESET_PALETTES) {
            Ok(payload) => payload,
            Err(StoreError::RecordNotFound(_) | StoreError::CorruptRecord { .. }) => {
                return Err(StoreError::CatalogUnavailable);
            }
            Err(other) => return Err(other),
        };
        let entries: Vec<PaletteEntry> =
            serde_json::from_value(payload).map_err(|_| StoreError::CatalogUnavailable)?;
        let catalog = Self { entries };
        if !catalog.is_well_formed() {
            return Err(StoreError::CatalogUnavailable);
        }
        Ok(catalog)
    }

    /// Entries in catalog order (ascending id)
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_well_formed(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .all(|e| !e.colors.is_empty() && seen.insert(e.id))
    }
}

fn tag_set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

fn entry(name: &str, hexes: &[&str], tags: &[&str]) -> PaletteEntry {
    let colors = hexes
        .iter()
        .filter_map(|h| Rgb::parse(h))
        .collect::<Vec<_>>();
    debug_assert_eq!(colors.len(), hexes.len(), "bad curated hex in {name}");
    PaletteEntry {
        id: 0, // assigned after assembly
        name: name.to_string(),
        colors,
        tags: tag_set(tags),
    }
}

/// Design-system color families, darkest to lightest
const DESIGN_FAMILIES: &[(&str, &str, [&str; 5])] = &[
    ("Red", "red", ["#B71C1C", "#D32F2F", "#F44336", "#E57373", "#FFCDD2"]),
    ("Pink", "pink", ["#880E4F", "#C2185B", "#E91E63", "#F06292", "#F8BBD0"]),
    ("Purple", "purple", ["#4A148C", "#7B1FA2", "#9C27B0", "#BA68C8", "#E1BEE7"]),
    ("Deep Purple", "purple", ["#311B92", "#512DA8", "#673AB7", "#9575CD", "#D1C4E9"]),
    ("Indigo", "indigo", ["#1A237E", "#303F9F", "#3F51B5", "#7986CB", "#C5CAE9"]),
    ("Blue", "blue", ["#0D47A1", "#1976D2", "#2196F3", "#64B5F6", "#BBDEFB"]),
    ("Cyan", "cyan", ["#006064", "#0097A7", "#00BCD4", "#4DD0E1", "#B2EBF2"]),
    ("Teal", "teal", ["#004D40", "#00796B", "#009688", "#4DB6AC", "#B2DFDB"]),
    ("Green", "green", ["#1B5E20", "#388E3C", "#4CAF50", "#81C784", "#C8E6C9"]),
    ("Light Green", "green", ["#33691E", "#689F38", "#8BC34A", "#AED581", "#DCEDC8"]),
    ("Lime", "lime", ["#827717", "#AFB42B", "#CDDC39", "#DCE775", "#F0F4C3"]),
    ("Yellow", "yellow", ["#F57F17", "#FBC02D", "#FFEB3B", "#FFF176", "#FFF9C4"]),
    ("Amber", "amber", ["#FF6F00", "#FFA000", "#FFC107", "#FFD54F", "#FFECB3"]),
    ("Orange", "orange", ["#E65100", "#F57C00", "#FF9800", "#FFB74D", "#FFE0B2"]),
    ("Deep Orange", "orange", ["#BF360C", "#E64A19", "#FF5722", "#FF8A65", "#FFCCBC"]),
    ("Brown", "brown", ["#3E2723", "#5D4037", "#795548", "#A1887F", "#D7CCC8"]),
    ("Grey", "grey", ["#212121", "#616161", "#9E9E9E", "#E0E0E0", "#F5F5F5"]),
    ("Blue Grey", "grey", ["#263238", "#455A64", "#607D8B", "#90A4AE", "#CFD8DC"]),
];

/// Flat/web palette set
const FLAT_SETS: &[(&str, [&str; 5])] = &[
    ("Flat Ocean", ["#1ABC9C", "#16A085", "#2ECC71", "#27AE60", "#3498DB"]),
    ("Flat Midnight", ["#2C3E50", "#34495E", "#7F8C8D", "#95A5A6", "#BDC3C7"]),
    ("Flat Sunset", ["#C0392B", "#E74C3C", "#D35400", "#E67E22", "#F39C12"]),
    ("Flat Royal", ["#1F618D", "#2980B9", "#8E44AD", "#9B59B6", "#3498DB"]),
    ("Flat Citrus", ["#D35400", "#E67E22", "#F39C12", "#F1C40F", "#F7DC6F"]),
    ("Web Classic", ["#000080", "#008080", "#008000", "#808000", "#800000"]),
];

/// Seasonal themes
const SEASONAL_SETS: &[(&str, &str, [&str; 5])] = &[
    ("Spring Blossom", "spring", ["#98FB98", "#C1E1C1", "#FFB7C5", "#FFDDE1", "#F0FFF0"]),
    ("Spring Meadow", "spring", ["#4F7942", "#7BB661", "#A8D5BA", "#D9F2D0", "#F4FFF0"]),
    ("Summer Beach", "summer", ["#27496D", "#0C7B93", "#00A8CC", "#FFC93C", "#F9F7F7"]),
    ("Summer Tropics", "summer", ["#007F5F", "#2B9348", "#80B918", "#EEEF20", "#FFFF3F"]),
    ("Autumn Harvest", "autumn", ["#8B4513", "#CD853F", "#D2691E", "#DAA520", "#F4A460"]),
    ("Autumn Leaves", "autumn", ["#582F0E", "#7F4F24", "#A68A64", "#C2C5AA", "#E9EDC9"]),
    ("Winter Frost", "winter", ["#274472", "#41729F", "#5885AF", "#C3E0E5", "#F2F9FF"]),
    ("Winter Night", "winter", ["#0B132B", "#1C2541", "#3A506B", "#5BC0BE", "#6FFFE9"]),
];

/// Purpose-driven themes
const PURPOSE_SETS: &[(&str, &str, [&str; 5])] = &[
    ("Pastel Dream", "pastel", ["#CDB4DB", "#FFC8DD", "#FFAFCC", "#BDE0FE", "#A2D2FF"]),
    ("Neon Nights", "neon", ["#FF006E", "#FB5607", "#FFBE0B", "#8338EC", "#3A86FF"]),
    ("Earth Tones", "earth", ["#283618", "#606C38", "#FEFAE0", "#DDA15E", "#BC6C25"]),
    ("Corporate Calm", "corporate", ["#14213D", "#1D3557", "#457B9D", "#A8DADC", "#F1FAEE"]),
    ("Vintage Rose", "vintage", ["#6D2E46", "#A26769", "#D5B9B2", "#ECE2D0", "#BFB5AF"]),
    ("Monochrome Ink", "monochrome", ["#0D0D0D", "#404040", "#737373", "#A6A6A6", "#D9D9D9"]),
    ("Coffee House", "warm", ["#3C2A21", "#967259", "#D5A87C", "#E8D5C4", "#F8EDE3"]),
    ("Forest Walk", "cool", ["#1A4314", "#2C5E1A", "#4F7942", "#86A789", "#D2E3C8"]),
];

fn curated_entries() -> Vec<PaletteEntry> {
    let mut entries = Vec::new();
    for &(name, family, ref hexes) in DESIGN_FAMILIES {
        entries.push(entry(&format!("{name} Family"), hexes, &["design", family]));
    }
    for &(name, ref hexes) in FLAT_SETS {
        entries.push(entry(name, hexes, &["flat", "web"]));
    }
    for &(name, season, ref hexes) in SEASONAL_SETS {
        entries.push(entry(name, hexes, &["seasonal", season]));
    }
    for &(name, purpose, ref hexes) in PURPOSE_SETS {
        entries.push(entry(name, hexes, &["theme", purpose]));
    }
    entries
}

/// Five analogous hues centered on `hue`, constant saturation and value
fn analogous(hue: f32, s: f32, v: f32) -> Vec<Rgb> {
    [-2.0f32, -1.0, 0.0, 1.0, 2.0]
        .iter()
        .map(|step| Rgb::from_hsv(hue + step * (15.0 / 360.0), s, v))
        .collect()
}

/// Base hue in three values plus the complement in two
fn complementary(hue: f32, s: f32, v: f32) -> Vec<Rgb> {
    vec![
        Rgb::from_hsv(hue, s, (v - 0.25).max(0.2)),
        Rgb::from_hsv(hue, s, v),
        Rgb::from_hsv(hue, (s - 0.3).max(0.1), v),
        Rgb::from_hsv(hue + 0.5, s, v),
        Rgb::from_hsv(hue + 0.5, (s - 0.3).max(0.1), v),
    ]
}

/// Three hues a third of the wheel apart plus two lighter variants
fn triadic(hue: f32, s: f32, v: f32) -> Vec<Rgb> {
    vec![
        Rgb::from_hsv(hue, s, v),
        Rgb::from_hsv(hue + 1.0 / 3.0, s, v),
        Rgb::from_hsv(hue + 2.0 / 3.0, s, v),
        Rgb::from_hsv(hue, (s - 0.35).max(0.1), (v + 0.1).min(1.0)),
        Rgb::from_hsv(hue + 1.0 / 3.0, (s - 0.35).max(0.1), (v + 0.1).min(1.0)),
    ]
}

/// Harmonic derivations over a 12-step hue wheel
fn harmonic_entries() -> Vec<PaletteEntry> {
    let mut entries = Vec::new();
    for deg in (0u32..360).step_by(30) {
        let hue = deg as f32 / 360.0;
        entries.push(PaletteEntry {
            id: 0,
            name: format!("Analogous {deg}"),
            colors: analogous(hue, 0.65, 0.85),
            tags: tag_set(&["generated", "analogous"]),
        });
        entries.push(PaletteEntry {
            id: 0,
            name: format!("Complementary {deg}"),
            colors: complementary(hue, 0.7, 0.85),
            tags: tag_set(&["generated", "complementary"]),
        });
        entries.push(PaletteEntry {
            id: 0,
            name: format!("Triadic {deg}"),
            colors: triadic(hue, 0.6, 0.8),
            tags: tag_set(&["generated", "triadic"]),
        });
    }
    entries
}

/// One seeded randomized combination
fn random_entry(rng: &mut Pcg64Mcg, index: u32) -> PaletteEntry {
    let hue = rng.gen_range(0.0..1.0f32);
    let s = rng.gen_range(0.4..0.9f32);
    let v = rng.gen_range(0.5..0.95f32);
    let colors = match rng.gen_range(0..3u8) {
        0 => analogous(hue, s, v),
        1 => complementary(hue, s, v),
        _ => triadic(hue, s, v),
    };
    debug_assert_eq!(colors.len(), PALETTE_SIZE);
    PaletteEntry {
        id: 0,
        name: format!("Mix {index:03}"),
        colors,
        tags: tag_set(&["generated", "random"]),
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
    fn test_generate_exact_count_and_unique_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let catalog = Catalog::generate(&store, 401).unwrap();
        assert_eq!(catalog.len(), 401);
        let ids: Vec<u32> = catalog.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=401).collect::<Vec<u32>>());
    }

    #[test]
    fn test_every_entry_has_valid_colors() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let catalog = Catalog::generate(&store, 401).unwrap();
        for entry in catalog.entries() {
            assert!(!entry.colors.is_empty(), "{} has no colors", entry.name);
            assert_eq!(
                entry.colors.len(),
                PALETTE_SIZE,
                "{} has unexpected length",
                entry.name
            );
            assert!(!entry.tags.is_empty(), "{} has no tags", entry.name);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let first = Catalog::generate(&store, 401).unwrap();
        let second = Catalog::generate(&store, 401).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_small_target_still_emits_curated_sets() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        // Curated + harmonic sets exceed the tiny target; they are never cut
        let catalog = Catalog::generate(&store, 10).unwrap();
        assert!(catalog.len() > 10);
        assert!(catalog.entries().iter().any(|e| e.tags.contains("design")));
        assert!(catalog.entries().iter().any(|e| e.tags.contains("seasonal")));
    }

    #[test]
    fn test_load_round_trips_generated_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let generated = Catalog::generate(&store, 401).unwrap();
        let loaded = Catalog::load(&store).unwrap();
        assert_eq!(generated, loaded);
    }

    #[test]
    fn test_load_missing_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        assert!(matches!(
            Catalog::load(&store),
            Err(StoreError::CatalogUnavailable)
        ));
    }

    #[test]
    fn test_load_corrupt_record_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        Catalog::generate(&store, 60).unwrap();
        let path = dir.path().join("data").join("preset_palettes.dat");
        let mut raw = std::fs::read(&path).unwrap();
        let mid = raw.len() / 2;
        raw[mid] ^= 0x01;
        std::fs::write(&path, &raw).unwrap();

        assert!(matches!(
            Catalog::load(&store),
            Err(StoreError::CatalogUnavailable)
        ));
    }

    #[test]
    fn test_load_wrong_shape_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store
            .save(PRESET_PALETTES, &serde_json::json!({ "not": "a catalog" }))
            .unwrap();
        assert!(matches!(
            Catalog::load(&store),
            Err(StoreError::CatalogUnavailable)
        ));
    }

    #[test]
    fn test_regeneration_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        Catalog::generate(&store, 401).unwrap();
        let smaller = Catalog::generate(&store, 80).unwrap();
        let loaded = Catalog::load(&store).unwrap();
        assert_eq!(loaded.len(), smaller.len());
        assert!(loaded.len() < 401);
    }
}
