//! Error taxonomy for the storage core
//!
//! Every failure path is surfaced as a distinct kind so callers can decide
//! between substituting a default, regenerating, or aborting. The core itself
//! never guesses recovery.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No current-format or legacy file exists for the record name.
    /// Expected and recoverable: the caller supplies its default payload.
    #[error("record '{0}' not found")]
    RecordNotFound(String),

    /// Bytes that should parse as a payload do not.
    /// On the migration path the legacy file is left in place for inspection.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Ciphertext failed its integrity check: tampered, truncated, or
    /// encrypted under a different key.
    #[error("ciphertext failed authentication")]
    AuthenticationFailed,

    /// Umbrella for any decrypt/decompress/decode failure on a
    /// current-format file. The underlying cause is preserved.
    #[error("record '{name}' is corrupt: {source}")]
    CorruptRecord {
        name: String,
        #[source]
        source: Box<StoreError>,
    },

    /// The palette catalog record is absent, corrupt, or does not have the
    /// catalog shape. The caller regenerates.
    #[error("preset palette catalog is unavailable")]
    CatalogUnavailable,

    /// The key file exists but does not decode to a valid key.
    #[error("key file is invalid: {0}")]
    KeyFile(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedPayload(value.to_string())
    }
}

impl StoreError {
    /// Wrap a decode/decrypt/decompress failure as corruption of `name`.
    pub(crate) fn corrupt(name: &str, source: StoreError) -> Self {
        Self::CorruptRecord {
            name: name.to_string(),
            source: Box::new(source),
        }
    }
}
