//! Type-safe identifier and index wrappers.
//!
//! Bots live in a dense, compacting arena, so array positions are not
//! stable identities. [`BotId`] is a monotonically increasing `u64` minted
//! by the population manager at creation time; it survives compaction and
//! is the only identity external holders (lineage records, diagnostic
//! logs) may keep. [`CellIndex`] is the linear index of a grid cell.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw `u64` value.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner `u64` value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a bot, minted in creation order.
    ///
    /// Unlike a population slot, a `BotId` is never reused and never
    /// invalidated by swap-remove compaction.
    BotId
}

/// Linear index of a grid cell, in `[0, width * height)`.
///
/// The grid is row-major: cell `i` sits at `(i % width, i / width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellIndex(pub usize);

impl CellIndex {
    /// Return the inner linear index.
    pub const fn into_inner(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for CellIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_id_roundtrip() {
        let id = BotId::from_raw(42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn bot_id_ordering_follows_mint_order() {
        assert!(BotId::from_raw(1) < BotId::from_raw(2));
    }

    #[test]
    fn bot_id_roundtrip_serde() {
        let original = BotId::from_raw(7);
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<BotId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn cell_index_display_matches_inner() {
        let cell = CellIndex(1234);
        assert_eq!(cell.to_string(), "1234");
        assert_eq!(cell.into_inner(), 1234);
    }
}
