use std::fmt;
use std::ops::{Add, Sub};

/// Byte offset into the expression text, 0-based.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct BytePos(pub usize);

impl BytePos {
    pub fn to_usize(self) -> usize {
        self.0
    }
}

impl Sub for BytePos {
    type Output = ByteLen;

    #[inline(always)]
    fn sub(self, rhs: BytePos) -> ByteLen {
        ByteLen(self.0.saturating_sub(rhs.0))
    }
}

impl Add<ByteLen> for BytePos {
    type Output = BytePos;

    #[inline(always)]
    fn add(self, rhs: ByteLen) -> BytePos {
        BytePos(self.0 + rhs.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ByteLen(pub usize);

impl From<usize> for ByteLen {
    fn from(x: usize) -> Self {
        ByteLen(x)
    }
}

impl From<ByteLen> for usize {
    fn from(x: ByteLen) -> Self {
        x.0
    }
}

impl fmt::Display for BytePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed positions, for humans.
        write!(f, "{}", self.0 + 1)
    }
}

#[cfg(test)]
mod pos_tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(BytePos(3) + ByteLen(2), BytePos(5));
        assert_eq!(BytePos(5) - BytePos(3), ByteLen(2));
        // Never underflows, even for reversed spans.
        assert_eq!(BytePos(3) - BytePos(5), ByteLen(0));
    }

    #[test]
    fn display_is_one_based() {
        assert_eq!(BytePos(0).to_string(), "1");
        assert_eq!(BytePos(41).to_string(), "42");
    }
}
