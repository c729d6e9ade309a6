//! Authenticated encryption for record files
//!
//! AES-256-GCM under a single process-wide key. The key lives in its own
//! file outside the data directory, base64-encoded, and is generated on
//! first use. Every encrypted blob carries its own random nonce so the key
//! can be reused across records.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::info;

use crate::constants::cipher::{KEY_LEN, NONCE_LEN};
use crate::error::StoreError;

pub struct Cipher {
    key: [u8; KEY_LEN],
}

impl Cipher {
    /// Wrap an existing key (tests, alternate key sources)
    pub fn from_key(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Load the key from `key_path`, generating and persisting a fresh one
    /// if the file does not exist. Idempotent: a second call reads back the
    /// same key.
    pub fn from_key_file(key_path: &Path) -> Result<Self, StoreError> {
        if key_path.exists() {
            let encoded = fs::read_to_string(key_path)?;
            return Ok(Self {
                key: Self::decode_key(encoded.trim())?,
            });
        }

        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        if let Some(parent) = key_path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_new_file_restricted(key_path, Self::from_key(key).encode_key().as_bytes())?;
        info!(path = %key_path.display(), "Generated new encryption key");
        Ok(Self { key })
    }

    /// Stable textual encoding of the key for storage
    pub fn encode_key(&self) -> String {
        BASE64.encode(self.key)
    }

    /// Decode a key from its textual encoding
    pub fn decode_key(text: &str) -> Result<[u8; KEY_LEN], StoreError> {
        let decoded = BASE64
            .decode(text.as_bytes())
            .map_err(|e| StoreError::KeyFile(e.to_string()))?;
        let key: [u8; KEY_LEN] = decoded
            .try_into()
            .map_err(|_| StoreError::KeyFile(format!("expected {KEY_LEN}-byte key")))?;
        Ok(key)
    }

    /// Encrypt plaintext, prepending the random nonce to the ciphertext
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, StoreError> {
        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| StoreError::AuthenticationFailed)?;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| StoreError::AuthenticationFailed)?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt a nonce-prefixed blob
    /// Fails with `AuthenticationFailed` on tampering, truncation, or a
    /// mismatched key
    pub fn decrypt(&self, bytes: &[u8]) -> Result<Vec<u8>, StoreError> {
        if bytes.len() <= NONCE_LEN {
            return Err(StoreError::AuthenticationFailed);
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let cipher =
            Aes256Gcm::new_from_slice(&self.key).map_err(|_| StoreError::AuthenticationFailed)?;
        let nonce = Nonce::from_slice(nonce_bytes);
        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| StoreError::AuthenticationFailed)
    }
}

fn write_new_file_restricted(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let mut file = OpenOptions::new().create_new(true).write(true).open(path)?;
    file.write_all(data)?;
    file.flush()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}
