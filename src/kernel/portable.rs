use std::cmp::Ordering;

use super::Limbs;

// Software limb kernels. Every function produces the exact mathematical
// result reduced modulo 2^128, written with explicit wrapping primitives
// so no path depends on the target having a wide multiply or divide.

/// Unsigned lexicographic order on `(high, low)`.
pub fn cmp((a_hi, a_lo): Limbs, (b_hi, b_lo): Limbs) -> Ordering {
    a_hi.cmp(&b_hi).then(a_lo.cmp(&b_lo))
}

/// Wrapping addition. A carry into the high limb happens iff the wrapped
/// low sum came out smaller than the original low limb.
pub fn add((a_hi, a_lo): Limbs, (b_hi, b_lo): Limbs) -> Limbs {
    let lo = a_lo.wrapping_add(b_lo);
    let carry = (lo < a_lo) as u64;
    (a_hi.wrapping_add(b_hi).wrapping_add(carry), lo)
}

/// Wrapping subtraction. A borrow out of the low limb happens iff
/// `a_lo < b_lo`.
pub fn sub((a_hi, a_lo): Limbs, (b_hi, b_lo): Limbs) -> Limbs {
    let lo = a_lo.wrapping_sub(b_lo);
    let borrow = (a_lo < b_lo) as u64;
    (a_hi.wrapping_sub(b_hi).wrapping_sub(borrow), lo)
}

/// Schoolbook multiplication truncated to the low 128 bits.
///
/// The low limbs are split into 32-bit halves so every cross product fits
/// in 64 bits. The two middle terms are shifted back up by 32 and folded
/// in through the wrapping adder, which propagates their carries into the
/// high limb; bits beyond the 128th are discarded.
pub fn mul((a_hi, a_lo): Limbs, (b_hi, b_lo): Limbs) -> Limbs {
    let a32 = a_lo >> 32;
    let a00 = a_lo & 0xffff_ffff;
    let b32 = b_lo >> 32;
    let b00 = b_lo & 0xffff_ffff;

    let high = a_hi
        .wrapping_mul(b_lo)
        .wrapping_add(a_lo.wrapping_mul(b_hi))
        .wrapping_add(a32.wrapping_mul(b32));
    let mut result = (high, a00.wrapping_mul(b00));

    result = add(result, shl((0, a32.wrapping_mul(b00)), 32));
    result = add(result, shl((0, a00.wrapping_mul(b32)), 32));
    result
}

/// Left shift, zero filling. Any amount >= 128 yields zero.
pub fn shl((hi, lo): Limbs, amount: u32) -> Limbs {
    if amount == 0 {
        (hi, lo)
    } else if amount >= 128 {
        (0, 0)
    } else if amount >= 64 {
        (lo << (amount - 64), 0)
    } else {
        ((hi << amount) | (lo >> (64 - amount)), lo << amount)
    }
}

/// Logical right shift, zero filling. Any amount >= 128 yields zero.
pub fn shr((hi, lo): Limbs, amount: u32) -> Limbs {
    if amount == 0 {
        (hi, lo)
    } else if amount >= 128 {
        (0, 0)
    } else if amount >= 64 {
        (0, hi >> (amount - 64))
    } else {
        (hi >> amount, (lo >> amount) | (hi << (64 - amount)))
    }
}

/// Arithmetic right shift: vacated high bits take the sign bit. Any
/// amount >= 128 yields 0 for non-negative values and -1 for negative.
pub fn sar((hi, lo): (i64, u64), amount: u32) -> (i64, u64) {
    if amount == 0 {
        (hi, lo)
    } else if amount >= 128 {
        if hi < 0 {
            (-1, u64::MAX)
        } else {
            (0, 0)
        }
    } else if amount >= 64 {
        (if hi < 0 { -1 } else { 0 }, (hi >> (amount - 64)) as u64)
    } else {
        (hi >> amount, (lo >> amount) | ((hi as u64) << (64 - amount)))
    }
}

/// Binary long division. Returns `(quotient, remainder)`; dividing by
/// zero is defined to return zero for both.
pub fn div_rem(dividend: Limbs, divisor: Limbs) -> (Limbs, Limbs) {
    if divisor == (0, 0) {
        return ((0, 0), (0, 0));
    }
    if cmp(dividend, divisor) == Ordering::Less {
        return ((0, 0), dividend);
    }

    // Align the divisor with the most significant set bit of the dividend,
    // stopping before the shifted divisor could run past bit 127.
    let mut shift = 0u32;
    let mut aligned = divisor;
    while cmp(aligned, dividend) != Ordering::Greater && aligned.0 < 1u64 << 63 {
        aligned = shl(aligned, 1);
        shift += 1;
    }

    let mut quotient = (0, 0);
    let mut remainder = dividend;
    for i in (0..=shift).rev() {
        let shifted = shl(divisor, i);
        if cmp(remainder, shifted) != Ordering::Less {
            remainder = sub(remainder, shifted);
            let bit = shl((0, 1), i);
            quotient = (quotient.0 | bit.0, quotient.1 | bit.1);
        }
    }

    (quotient, remainder)
}

#[cfg(test)]
mod tests {
    use super::super::native;
    use super::*;

    // Edge-heavy limb values; the cross products of these cover carry in
    // and out of every boundary the formulas branch on.
    const EDGES: [u64; 8] = [
        0,
        1,
        2,
        0xffff_ffff,
        0x1_0000_0000,
        u64::MAX - 1,
        u64::MAX,
        0x8000_0000_0000_0000,
    ];

    fn edge_pairs() -> Vec<Limbs> {
        let mut pairs = Vec::new();
        for &hi in &EDGES {
            for &lo in &EDGES {
                pairs.push((hi, lo));
            }
        }
        pairs
    }

    fn random_pairs(count: usize) -> Vec<Limbs> {
        use rand::Rng;

        let mut rng = rand::rng();
        (0..count).map(|_| (rng.random(), rng.random())).collect()
    }

    #[test]
    fn add_matches_native() {
        for a in edge_pairs().into_iter().chain(random_pairs(256)) {
            for b in edge_pairs() {
                assert_eq!(add(a, b), native::add(a, b), "{:?} + {:?}", a, b);
            }
        }
    }

    #[test]
    fn sub_matches_native() {
        for a in edge_pairs().into_iter().chain(random_pairs(256)) {
            for b in edge_pairs() {
                assert_eq!(sub(a, b), native::sub(a, b), "{:?} - {:?}", a, b);
            }
        }
    }

    #[test]
    fn mul_matches_native() {
        // The native side reduces the primitive 128-bit product modulo
        // 2^128, which is the independent reference for the truncated
        // schoolbook multiply.
        for a in edge_pairs().into_iter().chain(random_pairs(256)) {
            for b in edge_pairs() {
                assert_eq!(mul(a, b), native::mul(a, b), "{:?} * {:?}", a, b);
            }
        }
    }

    #[test]
    fn mul_commutes() {
        for a in random_pairs(128) {
            for b in edge_pairs() {
                assert_eq!(mul(a, b), mul(b, a));
            }
        }
    }

    #[test]
    fn div_rem_matches_native() {
        for a in edge_pairs().into_iter().chain(random_pairs(64)) {
            for b in edge_pairs() {
                assert_eq!(div_rem(a, b), native::div_rem(a, b), "{:?} / {:?}", a, b);
            }
        }
    }

    #[test]
    fn div_rem_reconstructs_dividend() {
        for a in edge_pairs().into_iter().chain(random_pairs(64)) {
            for b in edge_pairs() {
                if b == (0, 0) {
                    continue;
                }
                let (q, r) = div_rem(a, b);
                assert_eq!(add(mul(q, b), r), a, "{:?} / {:?}", a, b);
                assert_eq!(cmp(r, b), Ordering::Less);
            }
        }
    }

    #[test]
    fn div_rem_by_zero_is_zero() {
        assert_eq!(div_rem((1, 0), (0, 0)), ((0, 0), (0, 0)));
        assert_eq!(div_rem((u64::MAX, u64::MAX), (0, 0)), ((0, 0), (0, 0)));
    }

    #[test]
    fn shifts_match_native() {
        let amounts = [0, 1, 31, 32, 33, 63, 64, 65, 96, 127, 128, 200];
        for value in edge_pairs().into_iter().chain(random_pairs(256)) {
            for amount in amounts {
                assert_eq!(shl(value, amount), native::shl(value, amount), "{:?} << {}", value, amount);
                assert_eq!(shr(value, amount), native::shr(value, amount), "{:?} >> {}", value, amount);
                let signed = (value.0 as i64, value.1);
                assert_eq!(sar(signed, amount), native::sar(signed, amount), "{:?} sar {}", signed, amount);
            }
        }
    }

    #[test]
    fn cmp_matches_native() {
        for a in edge_pairs() {
            for b in edge_pairs() {
                assert_eq!(cmp(a, b), native::cmp(a, b));
            }
        }
    }
}
