use core::fmt;
use std::{
    cmp::Ordering,
    ops::{
        Add,
        AddAssign,
        BitAnd,
        BitAndAssign,
        BitOr,
        BitOrAssign,
        BitXor,
        BitXorAssign,
        Div,
        DivAssign,
        Mul,
        MulAssign,
        Neg,
        Not,
        Rem,
        RemAssign,
        Shl,
        ShlAssign,
        Shr,
        ShrAssign,
        Sub,
        SubAssign
    },
    str::FromStr
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::ParseIntError,
    kernel::active,
    U128
};

/// Signed 128-bit integer in two's complement, stored as a signed high
/// limb and an unsigned low limb.
///
/// Overflow wraps: negating `MIN` yields `MIN`, and `MIN / -1` wraps back
/// to `MIN`. Division truncates toward zero with the remainder taking the
/// dividend's sign (C-style); dividing by zero returns zero. Right shift
/// is arithmetic, filling vacated bits with the sign bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I128 {
    hi: i64,
    lo: u64,
}

impl I128 {
    pub const BITS: u32 = 128;
    pub const MAX: I128 = I128 { hi: i64::MAX, lo: u64::MAX };
    pub const MIN: I128 = I128 { hi: i64::MIN, lo: 0 };
    pub const ONE: I128 = I128 { hi: 0, lo: 1 };
    pub const ZERO: I128 = I128 { hi: 0, lo: 0 };

    /// Build a value from its `(high, low)` limbs, such that the result
    /// is `high * 2^64 + low` with `high` read as signed.
    pub const fn from_parts(high: i64, low: u64) -> I128 {
        I128 { hi: high, lo: low }
    }

    /// The low 64-bit limb.
    pub const fn low(self) -> u64 {
        self.lo
    }

    /// The high limb, read as signed; the sign of the whole value lives
    /// in its most significant bit.
    pub const fn high(self) -> i64 {
        self.hi
    }

    /// Returns true if the number is zero.
    pub fn is_zero(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Returns true if the value is strictly below zero.
    pub const fn is_negative(self) -> bool {
        self.hi < 0
    }

    /// Reinterpret the bit pattern as unsigned. No range check.
    pub const fn cast_unsigned(self) -> U128 {
        U128::from_parts(self.hi as u64, self.lo)
    }

    /// Wrapping absolute value. `I128::MIN` has no positive counterpart,
    /// so `I128::MIN.abs()` is `I128::MIN` itself.
    pub fn abs(self) -> I128 {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// Exact magnitude as unsigned, defined at every value: for
    /// `I128::MIN` this is 2^127.
    pub fn unsigned_abs(self) -> U128 {
        if self.is_negative() {
            -self.cast_unsigned()
        } else {
            self.cast_unsigned()
        }
    }

    /// Truncate to the low 64 bits, reinterpreted as signed.
    pub const fn as_i64(self) -> i64 {
        self.lo as i64
    }

    /// Truncate to the low 32 bits, reinterpreted as signed.
    pub const fn as_i32(self) -> i32 {
        self.lo as i32
    }

    /// Truncate to the low 64 bits.
    pub const fn as_u64(self) -> u64 {
        self.lo
    }

    /// Truncate to the low 32 bits.
    pub const fn as_u32(self) -> u32 {
        self.lo as u32
    }
}

impl Ord for I128 {
    fn cmp(&self, other: &Self) -> Ordering {
        // High limb compared as signed decides first, then the low limb
        // as unsigned.
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

impl PartialOrd for I128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Addition, subtraction, multiplication and left shift are sign agnostic
// in two's complement, so they run on the unsigned kernel through a bit
// reinterpretation round trip.

impl Add for I128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        (self.cast_unsigned() + rhs.cast_unsigned()).cast_signed()
    }
}

impl Sub for I128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        (self.cast_unsigned() - rhs.cast_unsigned()).cast_signed()
    }
}

impl Mul for I128 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        (self.cast_unsigned() * rhs.cast_unsigned()).cast_signed()
    }
}

impl Div for I128 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return I128::ZERO;
        }
        let negative = self.is_negative() != rhs.is_negative();
        let quotient = (self.unsigned_abs() / rhs.unsigned_abs()).cast_signed();
        if negative {
            -quotient
        } else {
            quotient
        }
    }
}

impl Rem for I128 {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return I128::ZERO;
        }
        let remainder = (self.unsigned_abs() % rhs.unsigned_abs()).cast_signed();
        if self.is_negative() {
            -remainder
        } else {
            remainder
        }
    }
}

impl BitAnd for I128 {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        I128 { hi: self.hi & rhs.hi, lo: self.lo & rhs.lo }
    }
}

impl BitOr for I128 {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        I128 { hi: self.hi | rhs.hi, lo: self.lo | rhs.lo }
    }
}

impl BitXor for I128 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        I128 { hi: self.hi ^ rhs.hi, lo: self.lo ^ rhs.lo }
    }
}

impl Not for I128 {
    type Output = Self;

    fn not(self) -> Self {
        I128 { hi: !self.hi, lo: !self.lo }
    }
}

impl Neg for I128 {
    type Output = Self;

    /// Two's complement negation: bitwise NOT plus one, wrapping.
    fn neg(self) -> Self {
        !self + I128::ONE
    }
}

impl Shl<u32> for I128 {
    type Output = Self;

    fn shl(self, amount: u32) -> Self {
        (self.cast_unsigned() << amount).cast_signed()
    }
}

impl Shr<u32> for I128 {
    type Output = Self;

    /// Arithmetic shift: the sign bit fills the vacated high bits.
    fn shr(self, amount: u32) -> Self {
        let (hi, lo) = active::sar((self.hi, self.lo), amount);
        I128 { hi, lo }
    }
}

impl AddAssign for I128 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for I128 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for I128 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for I128 {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl RemAssign for I128 {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl BitAndAssign for I128 {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for I128 {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for I128 {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl ShlAssign<u32> for I128 {
    fn shl_assign(&mut self, amount: u32) {
        *self = *self << amount;
    }
}

impl ShrAssign<u32> for I128 {
    fn shr_assign(&mut self, amount: u32) {
        *self = *self >> amount;
    }
}

impl From<bool> for I128 {
    fn from(value: bool) -> Self {
        I128 { hi: 0, lo: value as u64 }
    }
}

impl From<u8> for I128 {
    fn from(value: u8) -> Self {
        I128 { hi: 0, lo: value as u64 }
    }
}

impl From<u16> for I128 {
    fn from(value: u16) -> Self {
        I128 { hi: 0, lo: value as u64 }
    }
}

impl From<u32> for I128 {
    fn from(value: u32) -> Self {
        I128 { hi: 0, lo: value as u64 }
    }
}

impl From<u64> for I128 {
    fn from(value: u64) -> Self {
        I128 { hi: 0, lo: value }
    }
}

impl From<i8> for I128 {
    fn from(value: i8) -> Self {
        I128::from(value as i64)
    }
}

impl From<i16> for I128 {
    fn from(value: i16) -> Self {
        I128::from(value as i64)
    }
}

impl From<i32> for I128 {
    fn from(value: i32) -> Self {
        I128::from(value as i64)
    }
}

impl From<i64> for I128 {
    fn from(value: i64) -> Self {
        I128 {
            hi: if value < 0 { -1 } else { 0 },
            lo: value as u64,
        }
    }
}

impl From<i128> for I128 {
    fn from(value: i128) -> Self {
        I128 { hi: (value >> 64) as i64, lo: value as u64 }
    }
}

impl From<I128> for i128 {
    fn from(value: I128) -> Self {
        ((value.hi as i128) << 64) | value.lo as i128
    }
}

impl FromStr for I128 {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let magnitude: U128 = digits.parse()?;
        let limit = if negative {
            I128::MIN.unsigned_abs()
        } else {
            I128::MAX.cast_unsigned()
        };
        if magnitude > limit {
            return Err(ParseIntError::Overflow);
        }

        let value = magnitude.cast_signed();
        Ok(if negative { -value } else { value })
    }
}

impl fmt::Display for I128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        // The unsigned magnitude is exact even at MIN.
        fmt::Display::fmt(&self.unsigned_abs(), f)
    }
}

impl Serialize for I128 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            (self.hi, self.lo).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for I128 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        } else {
            let (hi, lo) = <(i64, u64)>::deserialize(deserializer)?;
            Ok(I128::from_parts(hi, lo))
        }
    }
}
