//! Encrypted storage core for the palette editor
//!
//! Everything the rest of the application persists flows through the
//! [`Store`]: application settings, recent files, custom harmonies, and the
//! preset palette catalog. Records are JSON-encoded, compressed when large,
//! encrypted with a process-wide key, and written atomically. Legacy
//! plaintext files migrate transparently on first load.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod cipher;
pub mod codec;
pub mod color;
pub mod compress;
pub mod constants;
pub mod error;
pub mod harmony;
pub mod recent;
pub mod search;
pub mod settings;
pub mod store;

// Re-export the collaborator surface
pub use catalog::{Catalog, PaletteEntry};
pub use color::Rgb;
pub use error::StoreError;
pub use harmony::{Harmony, HarmonyBook, HarmonyRule};
pub use recent::RecentFiles;
pub use search::{ColorFilter, all_tags, query};
pub use settings::Settings;
pub use store::Store;
