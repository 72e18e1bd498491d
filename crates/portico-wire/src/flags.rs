//! Open flags accepted by the `open` and `clone` verbs.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Bitset of flags supplied with an open request.
///
/// The namespace inspects a single bit, [`OpenFlags::DESCRIBE`], which
/// requests a post-open acknowledgment event. All other bits are accepted
/// and carried through untouched: [`OpenFlags::from_bits`] is lossless and
/// unknown bits are never rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenFlags(u32);

impl OpenFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);

    /// Requests an acknowledgment event describing the opened object.
    pub const DESCRIBE: Self = Self(0x0800_0000);

    /// Builds a flag set from raw bits without validation.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` when every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for OpenFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
