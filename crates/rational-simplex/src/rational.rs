use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::{BigRational, ParseRatioError};
use num_traits::{One, Signed, Zero};

use crate::error::SolveError;

/// An exact rational number, always kept in lowest terms with a positive
/// denominator.
///
/// No `/` operator is provided; division goes through [`Rational::checked_div`],
/// which reports a zero divisor as an error.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /// Build `numer / denom`. Fails with [`SolveError::DivisionByZero`] when
    /// `denom` is zero.
    pub fn new(numer: i64, denom: i64) -> Result<Self, SolveError> {
        if denom == 0 {
            return Err(SolveError::DivisionByZero);
        }
        Ok(Self(BigRational::new(BigInt::from(numer), BigInt::from(denom))))
    }

    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn one() -> Self {
        Self(BigRational::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn checked_div(&self, divisor: &Rational) -> Result<Rational, SolveError> {
        if divisor.is_zero() {
            return Err(SolveError::DivisionByZero);
        }
        Ok(Self(&self.0 / &divisor.0))
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }
}

impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        Self(value)
    }
}

impl From<Rational> for BigRational {
    fn from(value: Rational) -> Self {
        value.0
    }
}

impl FromStr for Rational {
    type Err = ParseRatioError;

    /// Accepts `"7"`, `"-7"` and `"7/3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<BigRational>().map(Self)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational(self.0.$method(rhs.0))
            }
        }

        impl<'a> $trait<&'a Rational> for &'a Rational {
            type Output = Rational;

            fn $method(self, rhs: &'a Rational) -> Rational {
                Rational((&self.0).$method(&rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl std::iter::Sum for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Rational {
        iter.fold(Rational::zero(), |acc, x| acc + x)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Rational;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::{Serialize, Serializer};

    impl Serialize for Rational {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Integer(i64),
        Text(String),
    }

    impl<'de> Deserialize<'de> for Rational {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match Repr::deserialize(deserializer)? {
                Repr::Integer(value) => Ok(Rational::from(value)),
                Repr::Text(text) => text
                    .parse()
                    .map_err(|e| de::Error::custom(format!("invalid rational `{}`: {}", text, e))),
            }
        }
    }
}
