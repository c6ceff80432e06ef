//! Content hashing for line artifacts
//!
//! Provides [`ContentHash`], a 32-byte Blake3 digest used to tie a merge
//! plan to the exact artifact it was computed from.

use std::fmt::{self, Display, Formatter};

/// A 32-byte content hash (Blake3)
///
/// Immutable and cheap to clone (Copy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash an ordered sequence of lines.
    ///
    /// Each line is fed with a terminating NUL so that `["ab", "c"]` and
    /// `["a", "bc"]` never collide.
    #[must_use]
    pub fn of_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for line in lines {
            hasher.update(line.as_ref().as_bytes());
            hasher.update(&[0]);
        }
        Self(*hasher.finalize().as_bytes())
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl serde::Serialize for ContentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
