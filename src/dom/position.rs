//! Document position flags, as returned by `Node.compareDocumentPosition`

use std::ops::BitOr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DocumentPosition(u16);

impl DocumentPosition {
    pub const SAME: Self = Self(0);
    pub const DISCONNECTED: Self = Self(0x01);
    pub const PRECEDING: Self = Self(0x02);
    pub const FOLLOWING: Self = Self(0x04);
    pub const CONTAINS: Self = Self(0x08);
    pub const CONTAINED_BY: Self = Self(0x10);
    pub const IMPLEMENTATION_SPECIFIC: Self = Self(0x20);

    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// The other node comes before the reference node
    pub fn precedes(self) -> bool {
        self.contains(Self::PRECEDING)
    }

    /// No relation reported: both sides are the same node
    pub fn is_same(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DocumentPosition {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
