use sha2::{Sha256, Digest};

/// Calculate the SHA-256 of an in-memory buffer as lowercase hex.
///
/// Used to tie an uploaded archive back to the local file it came from.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
