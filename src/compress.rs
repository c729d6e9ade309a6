//! Lossless byte-stream compression
//!
//! Applied by the record store to catalog-sized payloads before encryption.
//! The catalog is highly redundant (hex strings, repeated tag vocabulary), so
//! zlib gets a meaningful reduction; small records skip this entirely.

use std::io::Write;

use flate2::Compression;
use flate2::write::{ZlibDecoder, ZlibEncoder};

use crate::error::StoreError;

pub fn compress(bytes: &[u8]) -> Result<Vec<u8>, StoreError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, StoreError> {
    let mut decoder = ZlibDecoder::new(Vec::new());
    decoder.write_all(bytes)?;
    Ok(decoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_empty() {
        assert_eq!(decompress(&compress(b"").unwrap()).unwrap(), b"");
    }

    #[test]
    fn test_round_trip_arbitrary_bytes() {
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
    }

    #[test]
    fn test_redundant_input_shrinks() {
        let data = "#3498DB".repeat(1000);
        let packed = compress(data.as_bytes()).unwrap();
        assert!(packed.len() < data.len() / 4);
    }

    #[test]
    fn test_decompress_garbage_fails() {
        assert!(decompress(b"definitely not a zlib stream").is_err());
    }
}
