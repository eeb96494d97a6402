use core::fmt;

/// A minimal unsigned 128-bit integer stored as two 64-bit words.
///
/// This is the arithmetic view of a KSUID payload: the 16 payload bytes read
/// as a big-endian number. It only carries the operations needed to step
/// payloads forward and backward and to measure the distance between two
/// payloads in a compressed set.
///
/// Field order matters: the derived [`Ord`] compares `hi` before `lo`, which
/// is exactly numeric order.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint128 {
    hi: u64,
    lo: u64,
}

impl Uint128 {
    /// Zero.
    pub const ZERO: Self = Self::new(0, 0);
    /// One.
    pub const ONE: Self = Self::new(0, 1);
    /// The largest representable value (all bits set).
    pub const MAX: Self = Self::new(u64::MAX, u64::MAX);

    /// Creates a value from its high and low 64-bit words.
    #[must_use]
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Returns the high 64-bit word.
    #[must_use]
    pub const fn hi(&self) -> u64 {
        self.hi
    }

    /// Returns the low 64-bit word.
    #[must_use]
    pub const fn lo(&self) -> u64 {
        self.lo
    }

    /// Reads a big-endian 16-byte buffer.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        let mut hi = [0; 8];
        let mut lo = [0; 8];
        let mut i = 0;
        while i < 8 {
            hi[i] = bytes[i];
            lo[i] = bytes[i + 8];
            i += 1;
        }
        Self::new(u64::from_be_bytes(hi), u64::from_be_bytes(lo))
    }

    /// Writes this value as a big-endian 16-byte buffer.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 16] {
        let hi = self.hi.to_be_bytes();
        let lo = self.lo.to_be_bytes();
        let mut out = [0; 16];
        let mut i = 0;
        while i < 8 {
            out[i] = hi[i];
            out[i + 8] = lo[i];
            i += 1;
        }
        out
    }

    /// Adds `rhs`, returning the wrapped sum and whether it overflowed.
    #[must_use]
    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let (lo, carry) = self.lo.overflowing_add(rhs.lo);
        let (hi, c1) = self.hi.overflowing_add(rhs.hi);
        let (hi, c2) = hi.overflowing_add(carry as u64);
        (Self::new(hi, lo), c1 | c2)
    }

    /// Subtracts `rhs`, returning the wrapped difference and whether it
    /// underflowed.
    #[must_use]
    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let (lo, borrow) = self.lo.overflowing_sub(rhs.lo);
        let (hi, b1) = self.hi.overflowing_sub(rhs.hi);
        let (hi, b2) = hi.overflowing_sub(borrow as u64);
        (Self::new(hi, lo), b1 | b2)
    }

    /// Adds `rhs`, wrapping around at the boundary.
    #[must_use]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    /// Subtracts `rhs`, wrapping around at the boundary.
    #[must_use]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    /// Adds `rhs`, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.overflowing_add(rhs) {
            (v, false) => Some(v),
            (_, true) => None,
        }
    }

    /// Subtracts `rhs`, returning `None` on underflow.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.overflowing_sub(rhs) {
            (v, false) => Some(v),
            (_, true) => None,
        }
    }

    /// Adds one, wrapping from [`Uint128::MAX`] to zero.
    #[must_use]
    pub const fn incr(self) -> Self {
        self.wrapping_add(Self::ONE)
    }

    /// Subtracts one, wrapping from zero to [`Uint128::MAX`].
    #[must_use]
    pub const fn decr(self) -> Self {
        self.wrapping_sub(Self::ONE)
    }

    /// Minimal number of big-endian bytes needed to hold this value.
    ///
    /// Zero still occupies one byte.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        let leading = if self.hi == 0 {
            64 + self.lo.leading_zeros()
        } else {
            self.hi.leading_zeros()
        };
        let len = 16 - (leading as usize / 8);
        if len == 0 { 1 } else { len }
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self::new((value >> 64) as u64, value as u64)
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        (u128::from(value.hi) << 64) | u128::from(value.lo)
    }
}

impl From<u64> for Uint128 {
    fn from(value: u64) -> Self {
        Self::new(0, value)
    }
}

impl fmt::Debug for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}{:016x}", self.hi, self.lo)
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&u128::from(*self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_carries_into_high_word() {
        let a = Uint128::new(0, u64::MAX);
        assert_eq!(a.incr(), Uint128::new(1, 0));
        assert_eq!(a.overflowing_add(Uint128::ONE), (Uint128::new(1, 0), false));
    }

    #[test]
    fn sub_borrows_from_high_word() {
        let a = Uint128::new(1, 0);
        assert_eq!(a.decr(), Uint128::new(0, u64::MAX));
    }

    #[test]
    fn incr_and_decr_wrap_at_the_edges() {
        assert_eq!(Uint128::MAX.incr(), Uint128::ZERO);
        assert_eq!(Uint128::ZERO.decr(), Uint128::MAX);
        assert_eq!(Uint128::MAX.checked_add(Uint128::ONE), None);
        assert_eq!(Uint128::ZERO.checked_sub(Uint128::ONE), None);
    }

    #[test]
    fn compare_orders_high_word_first() {
        assert!(Uint128::new(1, 0) > Uint128::new(0, u64::MAX));
        assert!(Uint128::new(0, 2) > Uint128::new(0, 1));
        assert_eq!(Uint128::new(3, 4).cmp(&Uint128::new(3, 4)), core::cmp::Ordering::Equal);
    }

    #[test]
    fn be_bytes_layout() {
        let mut bytes = [0u8; 16];
        bytes[7] = 0x01;
        bytes[15] = 0x02;
        let v = Uint128::from_be_bytes(bytes);
        assert_eq!(v, Uint128::new(1, 2));
        assert_eq!(v.to_be_bytes(), bytes);
    }

    #[test]
    fn byte_len_is_minimal() {
        assert_eq!(Uint128::ZERO.byte_len(), 1);
        assert_eq!(Uint128::new(0, 0xFF).byte_len(), 1);
        assert_eq!(Uint128::new(0, 0x100).byte_len(), 2);
        assert_eq!(Uint128::new(0, u64::MAX).byte_len(), 8);
        assert_eq!(Uint128::new(1, 0).byte_len(), 9);
        assert_eq!(Uint128::MAX.byte_len(), 16);
    }

    proptest! {
        #[test]
        fn arithmetic_matches_native_u128(a: u128, b: u128) {
            let (x, y) = (Uint128::from(a), Uint128::from(b));
            prop_assert_eq!(u128::from(x.wrapping_add(y)), a.wrapping_add(b));
            prop_assert_eq!(u128::from(x.wrapping_sub(y)), a.wrapping_sub(b));
            prop_assert_eq!(x.overflowing_add(y).1, a.overflowing_add(b).1);
            prop_assert_eq!(x.overflowing_sub(y).1, a.overflowing_sub(b).1);
            prop_assert_eq!(x.cmp(&y), a.cmp(&b));
            prop_assert_eq!(Uint128::from_be_bytes(a.to_be_bytes()), x);
        }
    }
}
