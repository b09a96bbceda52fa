//! Arbitrary-precision fractions.

pub mod random;

use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FractionError {
    #[error("denominator is zero")]
    ZeroDenominator,
    #[error("invalid fraction {input:?}: expected `n/d` or `n`")]
    Parse { input: String },
    #[error("{bits}-bit numerator is wider than the {max}-bit limit")]
    TooWide { bits: usize, max: usize },
}

/// A fraction of two big integers. The denominator is always positive; the
/// fraction is not necessarily in lowest terms.
#[derive(Debug, Clone)]
pub struct BigFraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl BigFraction {
    /// Build `numerator / denominator`, reducing to lowest terms if asked.
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
        reduced: bool,
    ) -> Result<Self, FractionError> {
        let (mut numerator, mut denominator) = (numerator.into(), denominator.into());
        if denominator.is_zero() {
            return Err(FractionError::ZeroDenominator);
        }
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        let fraction = Self {
            numerator,
            denominator,
        };
        Ok(if reduced { fraction.reduce() } else { fraction })
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            numerator: n.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// The same value in lowest terms.
    pub fn reduce(&self) -> Self {
        let gcd = self.numerator.gcd(&self.denominator);
        if gcd.is_zero() || gcd.is_one() {
            return self.clone();
        }
        Self {
            numerator: &self.numerator / &gcd,
            denominator: &self.denominator / &gcd,
        }
    }

    pub fn is_reduced(&self) -> bool {
        self.numerator.gcd(&self.denominator).is_one()
    }

    /// Render as a mixed number: `"4"`, `"1/2"` or `"4 1/2"`. The sign goes
    /// on the leading part, e.g. `"-4 1/2"`.
    pub fn to_mixed_string(&self) -> String {
        let (whole, remainder) = self.numerator.div_rem(&self.denominator);
        if remainder.is_zero() {
            whole.to_string()
        } else if whole.is_zero() {
            format!("{}/{}", remainder, self.denominator)
        } else {
            format!("{} {}/{}", whole, remainder.abs(), self.denominator)
        }
    }
}

impl PartialEq for BigFraction {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for BigFraction {}

impl Add for &BigFraction {
    type Output = BigFraction;

    fn add(self, rhs: Self) -> BigFraction {
        BigFraction {
            numerator: &self.numerator * &rhs.denominator + &rhs.numerator * &self.denominator,
            denominator: &self.denominator * &rhs.denominator,
        }
        .reduce()
    }
}

impl Add for BigFraction {
    type Output = BigFraction;

    fn add(self, rhs: BigFraction) -> BigFraction {
        &self + &rhs
    }
}

impl Mul for &BigFraction {
    type Output = BigFraction;

    fn mul(self, rhs: Self) -> BigFraction {
        BigFraction {
            numerator: &self.numerator * &rhs.numerator,
            denominator: &self.denominator * &rhs.denominator,
        }
        .reduce()
    }
}

impl Mul for BigFraction {
    type Output = BigFraction;

    fn mul(self, rhs: BigFraction) -> BigFraction {
        &self * &rhs
    }
}

impl fmt::Display for BigFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for BigFraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim().parse::<BigInt>().map_err(|_| FractionError::Parse {
                input: s.to_string(),
            })
        };
        match s.split_once('/') {
            Some((n, d)) => Self::new(parse(n)?, parse(d)?, false),
            None => Ok(Self::from_integer(parse(s)?)),
        }
    }
}
