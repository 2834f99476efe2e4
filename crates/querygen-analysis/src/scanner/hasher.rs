//! xxh3 fingerprints of source files and companion bodies. Equal
//! fingerprints mean the bytes on disk already match what would be written.

use xxhash_rust::xxh3::xxh3_64;

/// 64-bit fingerprint of `content`, compared byte-exactly.
#[inline]
pub fn hash_content(content: &[u8]) -> u64 {
    xxh3_64(content)
}
