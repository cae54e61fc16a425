//! Fixed-width 128-bit integer arithmetic.
//!
//! [`U128`] and [`I128`] behave as exact 128-bit machine words: every
//! operation wraps modulo 2^128 (two's complement for the signed type),
//! division by zero returns zero, and the results are bit-identical
//! whether the build uses the native wide-integer kernels or the portable
//! software ones (`portable` feature).

mod error;
mod int;
mod kernel;
mod uint;

pub use error::ParseIntError;
pub use int::I128;
pub use uint::U128;
