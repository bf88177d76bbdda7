//! Checksum utilities for cache artifacts

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Hex-encoded SHA-256 of a file
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    sha256_reader(&mut file)
}

/// Hex-encoded SHA-256 of any readable source
pub fn sha256_reader<R: Read>(reader: &mut R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
