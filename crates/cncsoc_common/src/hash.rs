//! Content hashing for build versioning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 hash of some canonical byte representation.
///
/// A composed SoC carries the hash of its normalized configuration so that a
/// host driver can detect a bitstream built from a different configuration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hashes a byte slice with XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data).to_le_bytes())
    }

    /// Returns the low 32 bits, suitable for a read-only version register.
    pub fn short(&self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:08x}..)", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(
            ContentHash::from_bytes(b"board=5a-75b"),
            ContentHash::from_bytes(b"board=5a-75b")
        );
    }

    #[test]
    fn sensitive_to_content() {
        assert_ne!(
            ContentHash::from_bytes(b"revision=7.0"),
            ContentHash::from_bytes(b"revision=8.0")
        );
    }

    #[test]
    fn display_is_32_hex_digits() {
        let s = ContentHash::from_bytes(b"x").to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn short_matches_display_prefix_bytes() {
        let h = ContentHash::from_bytes(b"abc");
        let s = h.to_string();
        let first = u8::from_str_radix(&s[0..2], 16).unwrap();
        assert_eq!(h.short() & 0xff, u32::from(first));
    }
}
