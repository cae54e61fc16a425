// 128-bit arithmetic kernels.
//
// Two interchangeable backends implement the same contract over
// `(high, low)` limb pairs: `native` recomposes each pair into the
// primitive 128-bit type and lets the target's wide instructions do the
// work, while `portable` runs the explicit carry/borrow/shift formulas.
// The backend is fixed at compile time through the `portable` cargo
// feature; both modules always compile and the test suite checks them
// against each other operation by operation.

// The inactive backend still compiles (the tests cross-check it) but has
// no non-test callers.
#[cfg_attr(feature = "portable", allow(dead_code))]
pub(crate) mod native;
#[cfg_attr(not(feature = "portable"), allow(dead_code))]
pub(crate) mod portable;

/// A 128-bit value decomposed into `(high, low)` 64-bit limbs.
pub(crate) type Limbs = (u64, u64);

#[cfg(feature = "portable")]
pub(crate) use portable as active;

#[cfg(not(feature = "portable"))]
pub(crate) use native as active;
