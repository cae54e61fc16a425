use thiserror::Error;

/// Error returned when parsing a decimal string into a 128-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseIntError {
    #[error("cannot parse integer from empty string")]
    Empty,
    #[error("invalid digit found in string")]
    InvalidDigit,
    #[error("number too large to fit in 128 bits")]
    Overflow,
}
