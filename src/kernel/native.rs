use std::cmp::Ordering;

use super::Limbs;

// Kernels backed by the primitive 128-bit integers. Each function glues
// the limb pair back together, lets the target's wide arithmetic do the
// work, and splits the result. Must stay observably identical to the
// portable module for every input.

fn glue((hi, lo): Limbs) -> u128 {
    (u128::from(hi) << 64) | u128::from(lo)
}

fn split(value: u128) -> Limbs {
    ((value >> 64) as u64, value as u64)
}

pub fn cmp(a: Limbs, b: Limbs) -> Ordering {
    glue(a).cmp(&glue(b))
}

pub fn add(a: Limbs, b: Limbs) -> Limbs {
    split(glue(a).wrapping_add(glue(b)))
}

pub fn sub(a: Limbs, b: Limbs) -> Limbs {
    split(glue(a).wrapping_sub(glue(b)))
}

pub fn mul(a: Limbs, b: Limbs) -> Limbs {
    split(glue(a).wrapping_mul(glue(b)))
}

pub fn shl(a: Limbs, amount: u32) -> Limbs {
    if amount >= 128 {
        (0, 0)
    } else {
        split(glue(a) << amount)
    }
}

pub fn shr(a: Limbs, amount: u32) -> Limbs {
    if amount >= 128 {
        (0, 0)
    } else {
        split(glue(a) >> amount)
    }
}

pub fn sar((hi, lo): (i64, u64), amount: u32) -> (i64, u64) {
    if amount >= 128 {
        return if hi < 0 { (-1, u64::MAX) } else { (0, 0) };
    }
    let value = ((i128::from(hi)) << 64) | i128::from(lo);
    let shifted = value >> amount;
    ((shifted >> 64) as i64, shifted as u64)
}

pub fn div_rem(dividend: Limbs, divisor: Limbs) -> (Limbs, Limbs) {
    let (a, b) = (glue(dividend), glue(divisor));
    if b == 0 {
        return ((0, 0), (0, 0));
    }
    (split(a / b), split(a % b))
}
