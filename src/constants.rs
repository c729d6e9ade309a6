//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the storage core, providing a single source of truth for constant values.

/// Well-known record names
pub mod records {
    /// Application settings record
    pub const CONFIG: &str = "config";

    /// AI recommender configuration record
    pub const AI_CONFIG: &str = "ai_config";

    /// User-defined color harmony rules record
    pub const CUSTOM_HARMONIES: &str = "custom_harmonies";

    /// Recently opened workspace files record
    pub const RECENT_FILES: &str = "recent_files";

    /// Preset palette catalog record
    pub const PRESET_PALETTES: &str = "preset_palettes";
}

/// On-disk record format constants
pub mod storage {
    /// First byte of every current-format record file
    pub const MAGIC: u8 = 0x50;

    /// Flag bit set when the encrypted body was compressed before encryption
    pub const FLAG_COMPRESSED: u8 = 0b0000_0001;

    /// Header length in bytes (magic + flags)
    pub const HEADER_LEN: usize = 2;

    /// File extension for current-format encrypted records
    pub const DATA_EXT: &str = "dat";

    /// File extension for legacy plaintext records
    pub const LEGACY_EXT: &str = "json";

    /// Encoded payloads at or above this size are compressed before encryption
    pub const COMPRESSION_THRESHOLD: usize = 4096;
}

/// Symmetric encryption constants
pub mod cipher {
    /// AES-256-GCM key length in bytes
    pub const KEY_LEN: usize = 32;

    /// AES-GCM nonce length in bytes
    pub const NONCE_LEN: usize = 12;
}

/// Catalog generation constants
pub mod catalog {
    /// Default total number of palettes in a generated catalog
    pub const DEFAULT_TARGET_COUNT: usize = 401;

    /// Number of colors per generated palette
    pub const PALETTE_SIZE: usize = 5;

    /// Fixed seed so regeneration yields an identical catalog
    pub const GENERATION_SEED: u64 = 0x70616C_7661756C;
}

/// Filter/search constants
pub mod search {
    /// Default color similarity threshold (0-100, higher is stricter)
    pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 95.0;
}
