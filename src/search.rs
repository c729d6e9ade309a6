//! Tag and color-similarity filtering over the palette catalog
//!
//! Both predicates are conjunctive and the result keeps catalog order
//! (ascending id). Queries never mutate the catalog.

use crate::catalog::{Catalog, PaletteEntry};
use crate::color::Rgb;
use crate::constants::search::DEFAULT_SIMILARITY_THRESHOLD;

/// Color-similarity predicate: an entry matches if any of its colors is at
/// least `threshold` similar to `target`
#[derive(Debug, Clone, Copy)]
pub struct ColorFilter {
    pub target: Rgb,
    pub threshold: f32,
}

impl ColorFilter {
    pub fn new(target: Rgb) -> Self {
        Self {
            target,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(target: Rgb, threshold: f32) -> Self {
        Self { target, threshold }
    }

    fn matches(&self, entry: &PaletteEntry) -> bool {
        entry
            .colors
            .iter()
            .any(|c| c.similarity(self.target) >= self.threshold)
    }
}

/// Return the entries matching every supplied filter, in catalog order
///
/// An absent tag filter matches every entry; tag matching is exact and
/// case-sensitive. Multiple matching colors within one entry still yield the
/// entry once.
pub fn query<'a>(
    catalog: &'a Catalog,
    tag_filter: Option<&str>,
    color_filter: Option<&ColorFilter>,
) -> Vec<&'a PaletteEntry> {
    catalog
        .entries()
        .iter()
        .filter(|entry| tag_filter.is_none_or(|tag| entry.tags.contains(tag)))
        .filter(|entry| color_filter.is_none_or(|f| f.matches(entry)))
        .collect()
}

/// Sorted distinct tag vocabulary of the catalog (feeds the filter dropdown)
pub fn all_tags(catalog: &Catalog) -> Vec<String> {
    let mut tags: Vec<String> = catalog
        .entries()
        .iter()
        .flat_map(|e| e.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}
