//! Encrypted record store
//!
//! One file per record name inside a dedicated data directory. On save a
//! payload is encoded, compressed when catalog-sized, encrypted, and written
//! atomically behind a two-byte header (magic + flags) that makes the
//! compression choice self-describing. On load the pipeline runs in reverse.
//!
//! Legacy plaintext `<name>.json` files from the pre-encryption era are
//! migrated on first load: parsed directly, re-saved under the current
//! format, then deleted. A current-format file always wins over a leftover
//! legacy file, so a crash between the two steps loses nothing.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::cipher::Cipher;
use crate::codec;
use crate::compress;
use crate::constants::storage::{
    COMPRESSION_THRESHOLD, DATA_EXT, FLAG_COMPRESSED, HEADER_LEN, LEGACY_EXT, MAGIC,
};
use crate::error::StoreError;

/// Storage context constructed once at startup
/// Owns the data directory and the process-wide cipher, so tests can point
/// it at temporary directories and throwaway keys
pub struct Store {
    data_dir: PathBuf,
    cipher: Cipher,
}

impl Store {
    /// Open a store over `data_dir`, bootstrapping the key file at
    /// `key_path` if it does not exist yet
    pub fn open(data_dir: impl Into<PathBuf>, key_path: &Path) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        let cipher = Cipher::from_key_file(key_path)?;
        Ok(Self { data_dir, cipher })
    }

    /// Store rooted at the platform data directory, key file under the
    /// platform config directory (outside the data directory)
    pub fn default_local() -> Result<Self, StoreError> {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("palette-vault");
        let key_path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("palette-vault")
            .join("vault.key");
        Self::open(data_dir, &key_path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.{DATA_EXT}"))
    }

    fn legacy_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.{LEGACY_EXT}"))
    }

    /// Encode, optionally compress, encrypt, and atomically write `payload`
    /// under `name`. Legacy files are untouched; migration is a load-time
    /// concern only.
    pub fn save(&self, name: &str, payload: &Value) -> Result<(), StoreError> {
        let encoded = codec::encode(payload)?;
        let compressed = encoded.len() >= COMPRESSION_THRESHOLD;
        let body = if compressed {
            compress::compress(&encoded)?
        } else {
            encoded
        };
        let ciphertext = self.cipher.encrypt(&body)?;

        let mut flags = 0u8;
        if compressed {
            flags |= FLAG_COMPRESSED;
        }
        let mut bytes = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        bytes.push(MAGIC);
        bytes.push(flags);
        bytes.extend_from_slice(&ciphertext);

        atomic_write(&self.record_path(name), &bytes)?;
        info!(record = %name, bytes = bytes.len(), compressed, "Saved record");
        Ok(())
    }

    /// Load the payload stored under `name`
    ///
    /// Prefers the current-format file; falls back to one-time migration of
    /// a legacy plaintext file; fails with `RecordNotFound` if neither
    /// exists.
    pub fn load(&self, name: &str) -> Result<Value, StoreError> {
        let path = self.record_path(name);
        if path.exists() {
            let bytes = fs::read(&path)?;
            return self
                .decode_record(&bytes)
                .map_err(|source| StoreError::corrupt(name, source));
        }

        let legacy = self.legacy_path(name);
        if legacy.exists() {
            return self.migrate_legacy(name, &legacy);
        }

        Err(StoreError::RecordNotFound(name.to_string()))
    }

    /// Remove the current-format file for `name`, if present
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.record_path(name);
        if path.exists() {
            fs::remove_file(&path)?;
            info!(record = %name, "Deleted record");
        }
        Ok(())
    }

    /// True if a current-format file exists for `name`
    pub fn exists(&self, name: &str) -> bool {
        self.record_path(name).exists()
    }

    fn decode_record(&self, bytes: &[u8]) -> Result<Value, StoreError> {
        if bytes.len() < HEADER_LEN || bytes[0] != MAGIC {
            return Err(StoreError::MalformedPayload(
                "missing record header".to_string(),
            ));
        }
        let flags = bytes[1];
        let body = self.cipher.decrypt(&bytes[HEADER_LEN..])?;
        let encoded = if flags & FLAG_COMPRESSED != 0 {
            compress::decompress(&body)?
        } else {
            body
        };
        codec::decode(&encoded)
    }

    /// One-time migration of a legacy plaintext file
    ///
    /// Parse failures leave the legacy file in place for manual inspection.
    /// The legacy file is only deleted after the current-format file has
    /// been written, so a crash in between is harmless: the next load
    /// prefers the current file and ignores the leftover.
    fn migrate_legacy(&self, name: &str, legacy: &Path) -> Result<Value, StoreError> {
        let text = fs::read_to_string(legacy)?;
        let payload: Value = serde_json::from_str(&text)?;

        self.save(name, &payload)?;
        if let Err(e) = fs::remove_file(legacy) {
            // Data is already safe in the current format; the leftover is
            // ignored by every future load
            warn!(record = %name, error = %e, "Failed to remove legacy file after migration");
        } else {
            info!(record = %name, path = %legacy.display(), "Migrated legacy record");
        }
        Ok(payload)
    }
}

/// Write via temp file + rename so a partially written file is never
/// observable as the final state
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let mut tmp = path.to_path_buf();
    tmp.set_extension("tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
