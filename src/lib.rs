//! Exact fractions over 64-bit integers.
//!
//! A [`Fraction`] is always stored in lowest terms with a positive denominator, so equality,
//! hashing and ordering work on the stored fields directly. Arithmetic cancels common factors
//! before multiplying and widens its intermediates, so a result is only rejected when its lowest
//! terms genuinely do not fit in 64 bits.
//!
//! ```
//! use fraction::{frac, Fraction, FractionError};
//!
//! let x = Fraction::new(18, 20)?;
//! assert_eq!(x.to_string(), "9/10");
//! assert_eq!(frac!(1 / 2) + frac!(3 / 4), frac!(5 / 4));
//! assert_eq!(frac!(1 / 2).try_div(Fraction::ZERO), Err(FractionError::DivideByZero));
//! # Ok::<(), FractionError>(())
//! ```

pub mod fract;
pub mod gcd;
pub mod markup;

pub use fract::{BaseInt, Fraction, FractionError};
pub use gcd::gcd;
