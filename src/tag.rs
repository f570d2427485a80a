//! Tag bitmasks.
//!
//! Grounded on `original_source/src/awm.h` (`TAGMASK`, `unsigned int tags`)
//! and spec.md §3 "Tag model": a tag selection is a bitmask, a client is
//! visible on monitor *m* iff `client.tags & m.tagset[m.seltags]` is
//! nonzero, and the all-tags mask is `!0`.

use serde::{Deserialize, Serialize};

/// The maximum number of tags the bitmask representation supports
/// (spec §3: "at most 31 tags (bitmask must fit in 31 bits)").
pub const MAX_TAGS: usize = 31;

/// The compile-time configured number of tags (default matches
/// `original_source/config.def.h`'s 9-entry `tags[]` array).
pub const TAGSLENGTH: usize = 9;

/// A bitmask over tags: bit *i* set means "visible on tag *i*".
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tags(pub u32);

impl Tags {
    /// The mask covering exactly the configured tags (`TAGMASK` in the C
    /// source is `(1 << LENGTH(tags)) - 1`).
    pub const fn tag_mask() -> Tags {
        Tags((1u32 << TAGSLENGTH) - 1)
    }

    /// The scratchpad / "hidden" mask: no tags set.
    pub const NONE: Tags = Tags(0);

    /// "Show all tags", used for `pertag` slot 0 and the `toggleview`
    /// code path when a client ends up matching no single tag.
    pub const ALL: Tags = Tags(!0);

    pub const fn single(i: usize) -> Tags {
        Tags(1u32 << i)
    }

    pub fn masked(self) -> Tags {
        Tags(self.0 & Self::tag_mask().0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn intersects(self, other: Tags) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: Tags) -> Tags {
        Tags(self.0 | other.0)
    }

    pub fn toggle(self, other: Tags) -> Tags {
        Tags(self.0 ^ other.0)
    }

    /// Index of the lowest set tag bit, used for `_NET_CURRENT_DESKTOP`
    /// ("index of lowest selected tag").
    pub fn lowest_index(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Iterate the indices of every tag slot from 0..TAGSLENGTH that is
    /// currently set.
    pub fn iter_indices(self) -> impl Iterator<Item = usize> {
        (0..TAGSLENGTH).filter(move |i| self.0 & (1 << i) != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_mask_fits_in_31_bits() {
        assert!(TAGSLENGTH <= MAX_TAGS);
        assert_eq!(Tags::tag_mask().0, (1 << TAGSLENGTH) - 1);
    }

    #[test]
    fn masked_clamps_to_tag_mask() {
        let t = Tags(!0);
        assert_eq!(t.masked(), Tags::tag_mask());
    }

    #[test]
    fn lowest_index_picks_smallest_bit() {
        let t = Tags::single(3).union(Tags::single(5));
        assert_eq!(t.lowest_index(), Some(3));
    }

    #[test]
    fn all_mask_is_all_ones() {
        assert_eq!(Tags::ALL.0, !0u32);
    }
}
