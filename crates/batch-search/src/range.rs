//! The inclusive block range attributed to a single batch.

use core::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

/// An inclusive range of child-chain block numbers, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRange {
    /// First block of the range.
    pub start: u64,
    /// Last block of the range.
    pub end: u64,
}

impl BlockRange {
    /// Creates a new [`BlockRange`]. Returns `None` if `start > end`.
    pub const fn new(start: u64, end: u64) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Number of blocks in the range, saturating at `u64::MAX`. Inverted bounds hold no blocks.
    pub const fn len(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        (self.end - self.start).saturating_add(1)
    }

    /// Returns `true` only for inverted bounds; a range built with [`BlockRange::new`] always
    /// holds at least one block.
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Returns `true` if `block` lies within the range.
    pub const fn contains(&self, block: u64) -> bool {
        self.start <= block && block <= self.end
    }

    /// Iterates over every block number in ascending order.
    pub const fn iter(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl IntoIterator for BlockRange {
    type Item = u64;
    type IntoIter = RangeInclusive<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert!(BlockRange::new(5, 4).is_none());
        assert_eq!(BlockRange::new(4, 4), Some(BlockRange { start: 4, end: 4 }));
    }

    #[test]
    fn test_len_and_contains() {
        let range = BlockRange { start: 300, end: 399 };
        assert_eq!(range.len(), 100);
        assert!(range.contains(300));
        assert!(range.contains(399));
        assert!(!range.contains(299));
        assert!(!range.contains(400));
    }

    #[test]
    fn test_len_at_extremes() {
        assert_eq!(BlockRange { start: 0, end: u64::MAX }.len(), u64::MAX);
        assert_eq!(BlockRange { start: u64::MAX, end: u64::MAX }.len(), 1);

        let inverted = BlockRange { start: 10, end: 9 };
        assert!(inverted.is_empty());
        assert_eq!(inverted.len(), 0);
        assert_eq!(inverted.into_iter().count(), 0);
    }

    #[test]
    fn test_iter_is_inclusive() {
        let blocks: Vec<u64> = BlockRange { start: 10, end: 12 }.into_iter().collect();
        assert_eq!(blocks, vec![10, 11, 12]);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&BlockRange { start: 1, end: 2 }).unwrap();
        assert_eq!(json, r#"{"start":1,"end":2}"#);
    }
}
