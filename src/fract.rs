//! An exact rational number type: a 64-bit numerator over a 64-bit denominator, always stored in
//! lowest terms with the sign on the numerator.
//!
//! Because the stored form is canonical, two fractions are equal exactly when their fields are
//! equal, and hashing and equality come straight from the fields. Every operation that builds a
//! fraction goes through the same normalization step, so no sequence of operations can produce a
//! non-canonical value.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    iter::{Product, Sum},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use num_traits::{
    CheckedAdd, CheckedDiv, CheckedMul, CheckedNeg, CheckedRem, CheckedSub, Inv, Num, One,
    ToPrimitive, Zero,
};
use thiserror::Error;

use crate::gcd::{euclid, gcd};
use crate::markup::{Block, RenderBlocks, RenderMode, DISPLAY};

/// The type of the stored numerator and denominator.
pub type BaseInt = i64;

/// Width used for intermediate results. A product of two [`BaseInt`]s fits, and so does the sum of
/// two such products, so nothing computed before normalization can overflow.
type WideInt = i128;

/// An exact fraction `numerator / denominator`.
///
/// Invariants: the denominator is strictly positive, the numerator and denominator share no
/// common factor, and zero is stored as `0/1`.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct Fraction {
    numerator: BaseInt,
    denominator: BaseInt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FractionError {
    #[error("fraction: attempt to divide by zero")]
    DivideByZero,
    #[error("fraction: result does not fit in a 64-bit numerator and denominator")]
    Overflow,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Fraction = Fraction {
        numerator: 1,
        denominator: 1,
    };

    pub const NEG_ONE: Fraction = Fraction {
        numerator: -1,
        denominator: 1,
    };

    pub const ONE_HALF: Fraction = Fraction {
        numerator: 1,
        denominator: 2,
    };

    /// Creates the fraction `numerator / denominator`, reduced to lowest terms.
    ///
    /// Errors with [`FractionError::DivideByZero`] if `denominator` is zero. A zero numerator gives
    /// [`Fraction::ZERO`] whatever the denominator. Errors with [`FractionError::Overflow`] if the
    /// reduced value is not representable, which only happens when moving the sign off the
    /// denominator leaves 2^63 in the numerator or denominator, as in `new(i64::MIN, -1)` or
    /// `new(1, i64::MIN)`.
    pub fn new(numerator: BaseInt, denominator: BaseInt) -> Result<Self, FractionError> {
        Self::normalize(numerator.into(), denominator.into())
    }

    /// The single path every fraction is built through: fixes the sign, reduces, and narrows back
    /// to [`BaseInt`].
    fn normalize(numerator: WideInt, denominator: WideInt) -> Result<Self, FractionError> {
        if denominator == 0 {
            log::debug!("rejecting fraction {numerator}/0");
            return Err(FractionError::DivideByZero);
        }

        if numerator == 0 {
            return Ok(Self::ZERO);
        }

        let (mut numerator, mut denominator) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };

        // g divides denominator, so it fits in WideInt
        let g = euclid(numerator.unsigned_abs(), denominator.unsigned_abs()) as WideInt;
        if g != 1 {
            numerator /= g;
            denominator /= g;
        }

        match (
            BaseInt::try_from(numerator),
            BaseInt::try_from(denominator),
        ) {
            (Ok(numerator), Ok(denominator)) => Ok(Self {
                numerator,
                denominator,
            }),
            _ => {
                log::debug!("fraction {numerator}/{denominator} does not fit in 64 bits");
                Err(FractionError::Overflow)
            }
        }
    }

    /// The numerator. Carries the sign of the fraction.
    pub const fn numer(&self) -> BaseInt {
        self.numerator
    }

    /// The denominator. Always positive.
    pub const fn denom(&self) -> BaseInt {
        self.denominator
    }

    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Whether the fraction is at least zero. Zero counts as positive here; use
    /// [`Fraction::is_negative`] for the strict test of the other sign.
    pub const fn is_positive(&self) -> bool {
        self.numerator >= 0
    }

    pub const fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// Whether `self` is strictly greater than `other`. Same as `self > other`.
    pub fn greater(&self, other: &Self) -> bool {
        self > other
    }

    /// Splits the two denominators around their gcd `g`, returning `(b / g, d / g, g)`. The common
    /// denominator is then `(b / g) * (d / g) * g`.
    fn common_denominator(self, other: Self) -> (WideInt, WideInt, WideInt) {
        // both denominators are positive, so g is at least 1
        let g = WideInt::from(gcd(self.denominator, other.denominator));
        (
            WideInt::from(self.denominator) / g,
            WideInt::from(other.denominator) / g,
            g,
        )
    }

    pub fn try_add(self, other: Self) -> Result<Self, FractionError> {
        let (b, d, g) = self.common_denominator(other);
        Self::normalize(
            WideInt::from(self.numerator) * d + WideInt::from(other.numerator) * b,
            b * d * g,
        )
    }

    pub fn try_sub(self, other: Self) -> Result<Self, FractionError> {
        if self == other {
            return Ok(Self::ZERO);
        }

        let (b, d, g) = self.common_denominator(other);
        Self::normalize(
            WideInt::from(self.numerator) * d - WideInt::from(other.numerator) * b,
            b * d * g,
        )
    }

    /// Multiplies with cross-cancellation: each numerator is reduced against the other
    /// denominator before anything is multiplied.
    pub fn try_mul(self, other: Self) -> Result<Self, FractionError> {
        let g1 = WideInt::from(gcd(self.numerator, other.denominator));
        let g2 = WideInt::from(gcd(self.denominator, other.numerator));

        Self::normalize(
            (WideInt::from(self.numerator) / g1) * (WideInt::from(other.numerator) / g2),
            (WideInt::from(self.denominator) / g2) * (WideInt::from(other.denominator) / g1),
        )
    }

    /// Multiplies by the reciprocal of `other`, with the same cross-cancellation as
    /// [`Fraction::try_mul`].
    pub fn try_div(self, other: Self) -> Result<Self, FractionError> {
        if other.is_zero() {
            log::debug!("cannot divide {self} by zero");
            return Err(FractionError::DivideByZero);
        }

        let g1 = WideInt::from(gcd(self.numerator, other.numerator));
        let g2 = WideInt::from(gcd(self.denominator, other.denominator));

        Self::normalize(
            (WideInt::from(self.numerator) / g1) * (WideInt::from(other.denominator) / g2),
            (WideInt::from(self.denominator) / g2) * (WideInt::from(other.numerator) / g1),
        )
    }

    /// The remainder of truncating division: `self - other * trunc(self / other)`. Takes the sign
    /// of `self`, like `%` on integers.
    pub fn try_rem(self, other: Self) -> Result<Self, FractionError> {
        if other.is_zero() {
            log::debug!("cannot take {self} modulo zero");
            return Err(FractionError::DivideByZero);
        }

        let (b, d, g) = self.common_denominator(other);
        Self::normalize(
            (WideInt::from(self.numerator) * d) % (WideInt::from(other.numerator) * b),
            b * d * g,
        )
    }

    pub fn try_neg(self) -> Result<Self, FractionError> {
        match self.numerator.checked_neg() {
            Some(numerator) => Ok(Self {
                numerator,
                denominator: self.denominator,
            }),
            None => {
                log::debug!("cannot negate {self}");
                Err(FractionError::Overflow)
            }
        }
    }

    /// `1 / self`.
    pub fn recip(self) -> Result<Self, FractionError> {
        if self.is_zero() {
            log::debug!("zero has no reciprocal");
            return Err(FractionError::DivideByZero);
        }
        Self::normalize(self.denominator.into(), self.numerator.into())
    }

    /// The absolute value. Panics if the numerator is `i64::MIN`, like [`i64::abs`].
    pub fn abs(self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// -1, 0 or 1 depending on the sign.
    pub fn signum(self) -> Self {
        Self::from(self.numerator.signum())
    }

    /// The integer part, rounding toward zero. This is truncation, not floor: `-7/2` gives -3.
    pub const fn trunc(&self) -> BaseInt {
        self.numerator / self.denominator
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Ord for Fraction {
    /// Cross-multiplies over the reduced common denominator. Exact, and never overflows because the
    /// products are taken in the wide type.
    fn cmp(&self, other: &Self) -> Ordering {
        let (b, d, _g) = self.common_denominator(*other);
        (WideInt::from(self.numerator) * d).cmp(&(WideInt::from(other.numerator) * b))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Operator and checked forms of a binary operation, all built on the fallible `try_*` method. The
/// operators panic on error, the same way the primitive integer operators do.
macro_rules! impl_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $Checked:ident, $checked:ident, $try_op:ident, $sym:literal) => {
        impl $Op for Fraction {
            type Output = Self;

            fn $op(self, rhs: Self) -> Self::Output {
                match self.$try_op(rhs) {
                    Ok(value) => value,
                    Err(e) => panic!("cannot compute {} {} {}: {}", self, $sym, rhs, e),
                }
            }
        }

        impl<'a> $Op<&'a Fraction> for Fraction {
            type Output = Self;

            fn $op(self, rhs: &'a Fraction) -> Self::Output {
                <Self as $Op>::$op(self, *rhs)
            }
        }

        impl $OpAssign for Fraction {
            fn $op_assign(&mut self, rhs: Self) {
                *self = <Self as $Op>::$op(*self, rhs);
            }
        }

        impl $Checked for Fraction {
            fn $checked(&self, v: &Self) -> Option<Self> {
                self.$try_op(*v).ok()
            }
        }
    };
}

impl_binop!(Add, add, AddAssign, add_assign, CheckedAdd, checked_add, try_add, "+");
impl_binop!(Sub, sub, SubAssign, sub_assign, CheckedSub, checked_sub, try_sub, "-");
impl_binop!(Mul, mul, MulAssign, mul_assign, CheckedMul, checked_mul, try_mul, "*");
impl_binop!(Div, div, DivAssign, div_assign, CheckedDiv, checked_div, try_div, "/");
impl_binop!(Rem, rem, RemAssign, rem_assign, CheckedRem, checked_rem, try_rem, "%");

impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.try_neg() {
            Ok(value) => value,
            Err(e) => panic!("cannot compute -{}: {}", self, e),
        }
    }
}

impl CheckedNeg for Fraction {
    fn checked_neg(&self) -> Option<Self> {
        self.try_neg().ok()
    }
}

impl Sum for Fraction {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Fraction> for Fraction {
    fn sum<I: Iterator<Item = &'a Fraction>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Product for Fraction {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Fraction> for Fraction {
    fn product<I: Iterator<Item = &'a Fraction>>(iter: I) -> Self {
        iter.copied().product()
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        *self == Self::ONE
    }
}

impl Num for Fraction {
    type FromStrRadixErr = <BaseInt as Num>::FromStrRadixErr;

    /// Only whole numbers are accepted.
    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        BaseInt::from_str_radix(str, radix).map(Self::from)
    }
}

impl Inv for Fraction {
    type Output = Result<Self, FractionError>;

    fn inv(self) -> Self::Output {
        self.recip()
    }
}

impl ToPrimitive for Fraction {
    fn to_i64(&self) -> Option<i64> {
        Some(self.trunc())
    }

    fn to_u64(&self) -> Option<u64> {
        self.trunc().to_u64()
    }

    fn to_f32(&self) -> Option<f32> {
        Some((*self).into())
    }

    fn to_f64(&self) -> Option<f64> {
        Some((*self).into())
    }
}

impl From<Fraction> for f64 {
    fn from(value: Fraction) -> Self {
        (value.numerator as f64) / (value.denominator as f64)
    }
}

impl From<Fraction> for f32 {
    fn from(value: Fraction) -> Self {
        (value.numerator as f32) / (value.denominator as f32)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Fraction {
                fn from(x: $t) -> Self {
                    Self {
                        numerator: BaseInt::from(x),
                        denominator: 1,
                    }
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<u64> for Fraction {
    type Error = FractionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        BaseInt::try_from(value)
            .map(Self::from)
            .map_err(|_e| FractionError::Overflow)
    }
}

// Fractions are exact, so every approx comparison is plain equality.
impl AbsDiffEq for Fraction {
    type Epsilon = Self;

    fn default_epsilon() -> Self::Epsilon {
        Self::ZERO
    }

    fn abs_diff_eq(&self, other: &Self, _epsilon: Self::Epsilon) -> bool {
        self == other
    }
}

impl RelativeEq for Fraction {
    fn default_max_relative() -> Self::Epsilon {
        Self::ZERO
    }

    fn relative_eq(
        &self,
        other: &Self,
        _epsilon: Self::Epsilon,
        _max_relative: Self::Epsilon,
    ) -> bool {
        self == other
    }
}

impl UlpsEq for Fraction {
    fn default_max_ulps() -> u32 {
        0
    }

    fn ulps_eq(&self, other: &Self, _epsilon: Self::Epsilon, _max_ulps: u32) -> bool {
        self == other
    }
}

impl RenderBlocks for Fraction {
    fn components(&self) -> Vec<Block> {
        let num = Block::new_int(self.numerator);
        if self.denominator == 1 {
            vec![num]
        } else {
            vec![Block::new_fraction(num, Block::new_int(self.denominator))]
        }
    }
}

impl Debug for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frac!({} / {})", self.numerator, self.denominator)
    }
}

impl Display for Fraction {
    /// `n` for whole numbers, `n/d` otherwise.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(DISPLAY.render_to_string(self).as_str())
    }
}

/// Builds a [`Fraction`]: `frac!(3 / 4)` or `frac!(-2)`. Panics if the denominator is zero.
#[macro_export]
macro_rules! frac {
    ($num:literal / $denom:expr) => {{
        let n = $num;
        let d = $denom;
        match $crate::fract::Fraction::new(n, d) {
            Ok(frac) => frac,
            Err(e) => panic!("Invalid fraction {}/{}: {}", n, d, e),
        }
    }};
    ($num:expr) => {
        $crate::fract::Fraction::from(($num) as i64)
    };
}
