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
    kernel::{active, Limbs},
    I128
};

/// Unsigned 128-bit integer stored as two 64-bit limbs.
///
/// Every arithmetic result is the exact mathematical value reduced modulo
/// 2^128: overflow wraps silently, division and modulo by zero return
/// zero, and shift amounts of 128 or more yield zero. Callers that need
/// failure semantics must inspect the operands before calling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U128 {
    hi: u64,
    lo: u64,
}

impl U128 {
    pub const BITS: u32 = 128;
    pub const MAX: U128 = U128 { hi: u64::MAX, lo: u64::MAX };
    pub const MIN: U128 = U128::ZERO;
    pub const ONE: U128 = U128 { hi: 0, lo: 1 };
    pub const ZERO: U128 = U128 { hi: 0, lo: 0 };

    /// Build a value from its `(high, low)` limbs, such that the result
    /// is `high * 2^64 + low`.
    pub const fn from_parts(high: u64, low: u64) -> U128 {
        U128 { hi: high, lo: low }
    }

    /// The low 64-bit limb.
    pub const fn low(self) -> u64 {
        self.lo
    }

    /// The high 64-bit limb.
    pub const fn high(self) -> u64 {
        self.hi
    }

    /// Returns true if the number is zero.
    pub fn is_zero(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Returns true if the number is one.
    pub fn is_one(self) -> bool {
        self.lo == 1 && self.hi == 0
    }

    /// Reinterpret the bit pattern as signed. No range check.
    pub const fn cast_signed(self) -> I128 {
        I128::from_parts(self.hi as i64, self.lo)
    }

    /// Truncate to the low 64 bits.
    pub const fn as_u64(self) -> u64 {
        self.lo
    }

    /// Truncate to the low 32 bits.
    pub const fn as_u32(self) -> u32 {
        self.lo as u32
    }

    /// Truncate to the low 16 bits.
    pub const fn as_u16(self) -> u16 {
        self.lo as u16
    }

    /// Truncate to the low 8 bits.
    pub const fn as_u8(self) -> u8 {
        self.lo as u8
    }

    /// All-ones value covering the low `bits` bits, the maximum value a
    /// field of that width can hold. Saturates to `MAX` at 128 and above.
    pub fn mask(bits: u32) -> U128 {
        if bits >= 128 {
            U128::MAX
        } else {
            (U128::ONE << bits) - U128::ONE
        }
    }

    /// Wrapping addition plus a carry-out flag.
    pub fn overflowing_add(self, other: U128) -> (U128, bool) {
        let sum = self + other;
        (sum, sum < self)
    }

    /// Wrapping subtraction plus a borrow-out flag.
    pub fn overflowing_sub(self, other: U128) -> (U128, bool) {
        (self - other, self < other)
    }

    /// Wrapping multiplication plus an overflow flag.
    pub fn overflowing_mul(self, other: U128) -> (U128, bool) {
        let product = self * other;
        // The truncated product divides back to `other` only when no bits
        // were discarded.
        let overflow = !self.is_zero() && product / self != other;
        (product, overflow)
    }

    /// Quotient and remainder in one pass. Both are zero when the divisor
    /// is zero.
    pub fn div_rem(self, divisor: U128) -> (U128, U128) {
        let (quotient, remainder) = active::div_rem(self.limbs(), divisor.limbs());
        (U128::from_limbs(quotient), U128::from_limbs(remainder))
    }

    /// Export the value as a big-endian byte array.
    pub fn to_be_bytes(self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.hi.to_be_bytes());
        bytes[8..].copy_from_slice(&self.lo.to_be_bytes());
        bytes
    }

    /// Import the value from a big-endian byte array.
    pub fn from_be_bytes(bytes: [u8; 16]) -> U128 {
        U128 {
            hi: u64::from_be_bytes(bytes[..8].try_into().unwrap()),
            lo: u64::from_be_bytes(bytes[8..].try_into().unwrap()),
        }
    }

    /// Export the value as a little-endian byte array.
    pub fn to_le_bytes(self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.lo.to_le_bytes());
        bytes[8..].copy_from_slice(&self.hi.to_le_bytes());
        bytes
    }

    /// Import the value from a little-endian byte array.
    pub fn from_le_bytes(bytes: [u8; 16]) -> U128 {
        U128 {
            lo: u64::from_le_bytes(bytes[..8].try_into().unwrap()),
            hi: u64::from_le_bytes(bytes[8..].try_into().unwrap()),
        }
    }

    pub(crate) fn limbs(self) -> Limbs {
        (self.hi, self.lo)
    }

    pub(crate) fn from_limbs((hi, lo): Limbs) -> U128 {
        U128 { hi, lo }
    }
}

impl Ord for U128 {
    fn cmp(&self, other: &Self) -> Ordering {
        active::cmp(self.limbs(), other.limbs())
    }
}

impl PartialOrd for U128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for U128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        U128::from_limbs(active::add(self.limbs(), rhs.limbs()))
    }
}

impl Sub for U128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        U128::from_limbs(active::sub(self.limbs(), rhs.limbs()))
    }
}

impl Mul for U128 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        U128::from_limbs(active::mul(self.limbs(), rhs.limbs()))
    }
}

impl Div for U128 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.div_rem(rhs).0
    }
}

impl Rem for U128 {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        self.div_rem(rhs).1
    }
}

impl BitAnd for U128 {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        U128 { hi: self.hi & rhs.hi, lo: self.lo & rhs.lo }
    }
}

impl BitOr for U128 {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        U128 { hi: self.hi | rhs.hi, lo: self.lo | rhs.lo }
    }
}

impl BitXor for U128 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        U128 { hi: self.hi ^ rhs.hi, lo: self.lo ^ rhs.lo }
    }
}

impl Not for U128 {
    type Output = Self;

    fn not(self) -> Self {
        U128 { hi: !self.hi, lo: !self.lo }
    }
}

impl Neg for U128 {
    type Output = Self;

    /// Wrapping additive inverse, defined as `0 - self`.
    fn neg(self) -> Self {
        U128::ZERO - self
    }
}

impl Shl<u32> for U128 {
    type Output = Self;

    fn shl(self, amount: u32) -> Self {
        U128::from_limbs(active::shl(self.limbs(), amount))
    }
}

impl Shr<u32> for U128 {
    type Output = Self;

    fn shr(self, amount: u32) -> Self {
        U128::from_limbs(active::shr(self.limbs(), amount))
    }
}

impl AddAssign for U128 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for U128 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for U128 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for U128 {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl RemAssign for U128 {
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl BitAndAssign for U128 {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for U128 {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for U128 {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl ShlAssign<u32> for U128 {
    fn shl_assign(&mut self, amount: u32) {
        *self = *self << amount;
    }
}

impl ShrAssign<u32> for U128 {
    fn shr_assign(&mut self, amount: u32) {
        *self = *self >> amount;
    }
}

impl From<bool> for U128 {
    fn from(value: bool) -> Self {
        U128 { hi: 0, lo: value as u64 }
    }
}

impl From<u8> for U128 {
    fn from(value: u8) -> Self {
        U128 { hi: 0, lo: value as u64 }
    }
}

impl From<u16> for U128 {
    fn from(value: u16) -> Self {
        U128 { hi: 0, lo: value as u64 }
    }
}

impl From<u32> for U128 {
    fn from(value: u32) -> Self {
        U128 { hi: 0, lo: value as u64 }
    }
}

impl From<u64> for U128 {
    fn from(value: u64) -> Self {
        U128 { hi: 0, lo: value }
    }
}

impl From<u128> for U128 {
    fn from(value: u128) -> Self {
        U128 { hi: (value >> 64) as u64, lo: value as u64 }
    }
}

// Signed sources sign-extend into the high limb, so the resulting bit
// pattern equals the source value modulo 2^128.

impl From<i8> for U128 {
    fn from(value: i8) -> Self {
        U128::from(value as i64)
    }
}

impl From<i16> for U128 {
    fn from(value: i16) -> Self {
        U128::from(value as i64)
    }
}

impl From<i32> for U128 {
    fn from(value: i32) -> Self {
        U128::from(value as i64)
    }
}

impl From<i64> for U128 {
    fn from(value: i64) -> Self {
        U128 {
            hi: if value < 0 { u64::MAX } else { 0 },
            lo: value as u64,
        }
    }
}

impl From<U128> for u128 {
    fn from(value: U128) -> Self {
        ((value.hi as u128) << 64) | value.lo as u128
    }
}

impl FromStr for U128 {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseIntError::Empty);
        }

        let ten = U128::from(10u64);
        let mut result = U128::ZERO;
        for c in s.chars() {
            let digit = c.to_digit(10).ok_or(ParseIntError::InvalidDigit)?;
            let (shifted, overflow_mul) = result.overflowing_mul(ten);
            let (next, overflow_add) = shifted.overflowing_add(U128::from(digit));
            if overflow_mul || overflow_add {
                return Err(ParseIntError::Overflow);
            }
            result = next;
        }

        Ok(result)
    }
}

impl fmt::Display for U128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let ten = U128::from(10u64);
        let mut digits = String::new();
        let mut value = *self;

        // Repeated division by 10 extracts the decimal digits from least
        // significant to most significant.
        while !value.is_zero() {
            let (quotient, remainder) = value.div_rem(ten);
            digits.push(char::from_digit(remainder.as_u32(), 10).unwrap());
            value = quotient;
        }

        write!(f, "{}", digits.chars().rev().collect::<String>())
    }
}

impl Serialize for U128 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            (self.hi, self.lo).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for U128 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        } else {
            let (hi, lo) = <(u64, u64)>::deserialize(deserializer)?;
            Ok(U128::from_parts(hi, lo))
        }
    }
}
