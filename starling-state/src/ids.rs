use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};

/// The ID of an item on the server: a track, album, artist or playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);
impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}
impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

/// The identity of a row within a list.
///
/// Distinct from [`ItemId`]: the same track can appear several times in a
/// playlist or play queue, and each occurrence is selected independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UniqueId(pub SmolStr);
impl UniqueId {
    /// Create a unique ID from an existing string.
    pub fn new(s: impl AsRef<str>) -> Self {
        UniqueId(SmolStr::new(s))
    }

    /// Generate a fresh unique ID that is not shared with any other row
    /// created by this process.
    pub fn generate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        UniqueId(format_smolstr!("row-{n}"))
    }
}
impl std::fmt::Display for UniqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_unique_ids_differ() {
        let a = UniqueId::generate();
        let b = UniqueId::generate();
        assert_ne!(a, b);
    }
}
