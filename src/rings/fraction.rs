use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;
use thiserror::Error;

/// Exact rational number, always stored reduced with a positive denominator.
#[derive(Debug, Clone)]
pub struct Fraction {
    num: BigInt,
    den: BigInt,
}

// Larger exponents are rejected instead of building huge powers of ten.
const MAX_EXPONENT: u32 = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid rational literal {0:?}")]
pub struct ParseFractionError(pub String);

impl Fraction {
    /// # Panics
    ///
    /// Panics if `den` is zero.
    pub fn new(num: BigInt, den: BigInt) -> Self {
        if den.is_zero() {
            panic!("Denominator cannot be zero");
        }

        let g = &num.gcd(&den);
        let num = num / g;
        let den = den / g;

        if den < BigInt::zero() {
            return Self {
                num: -num,
                den: -den,
            };
        }
        Self { num, den }
    }

    pub fn from_integer(value: i64) -> Self {
        Self {
            num: BigInt::from(value),
            den: BigInt::one(),
        }
    }

    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    /// Always positive.
    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    pub fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    pub fn is_integer(&self) -> bool {
        self.den.is_one()
    }

    /// `None` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Fraction) -> Option<Fraction> {
        if rhs.is_zero() {
            return None;
        }
        Some(Fraction::new(&self.num * &rhs.den, &self.den * &rhs.num))
    }
}

// Accepts `7`, `-7`, `+7`, `0.25`, `.5`, `5.`, `1e3`, `2.5E-2` and either of
// those on both sides of a `/`.
fn parse_decimal(text: &str) -> Option<Fraction> {
    let (mantissa, exponent) = match text.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (text, 0),
    };
    if exponent.unsigned_abs() > MAX_EXPONENT as u64 {
        return None;
    }

    let (negative, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (whole, decimals) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && decimals.is_empty() {
        return None;
    }
    if !whole.bytes().chain(decimals.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut num = BigInt::parse_bytes(format!("{whole}{decimals}").as_bytes(), 10)?;
    if negative {
        num = -num;
    }

    let ten = BigInt::from(10u32);
    let scale = decimals.len() as i64 - exponent;
    if scale >= 0 {
        Some(Fraction::new(num, ten.pow(scale as u32)))
    } else {
        Some(Fraction::new(num * ten.pow((-scale) as u32), BigInt::one()))
    }
}

impl FromStr for Fraction {
    type Err = ParseFractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseFractionError(s.to_string());
        let text = s.trim();

        match text.split_once('/') {
            Some((num, den)) => {
                let num = parse_decimal(num.trim()).ok_or_else(invalid)?;
                let den = parse_decimal(den.trim()).ok_or_else(invalid)?;
                num.checked_div(&den).ok_or_else(invalid)
            }
            None => parse_decimal(text).ok_or_else(invalid),
        }
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from_integer(value)
    }
}

impl ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        if self.den == rhs.den {
            return Fraction::new(self.num + rhs.num, self.den);
        }

        Fraction::new(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self + (-rhs)
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl ops::Div for Fraction {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl ops::Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction::from_integer(1)
    }
}

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction::from_integer(0)
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl PartialEq<Fraction> for Fraction {
    fn eq(&self, rhs: &Fraction) -> bool {
        &self.num * &rhs.den == &rhs.num * &self.den
    }
}

impl PartialEq<i64> for Fraction {
    fn eq(&self, rhs: &i64) -> bool {
        self.num == &self.den * BigInt::from(*rhs)
    }
}

impl PartialOrd<Fraction> for Fraction {
    fn partial_cmp(&self, rhs: &Fraction) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Eq for Fraction {}
impl Ord for Fraction {
    // Denominators are positive, so cross multiplication keeps the order.
    fn cmp(&self, rhs: &Fraction) -> Ordering {
        (&self.num * &rhs.den).cmp(&(&rhs.num * &self.den))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fraction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fr(s: &str) -> Fraction {
        s.parse().unwrap()
    }

    #[test]
    fn test_fraction_normalizes() {
        let f = Fraction::new(BigInt::from(6), BigInt::from(-8));
        assert_eq!(f.numer(), &BigInt::from(-3));
        assert_eq!(f.denom(), &BigInt::from(4));
        assert_eq!(f.to_string(), "-3/4");

        let zero = Fraction::new(BigInt::zero(), BigInt::from(-5));
        assert!(zero.is_zero());
        assert_eq!(zero.to_string(), "0");
    }

    #[test]
    fn test_fraction_parse() {
        assert_eq!(fr("7"), 7);
        assert_eq!(fr(" -7 "), -7);
        assert_eq!(fr("+7"), 7);
        assert_eq!(fr("3/4").to_string(), "3/4");
        assert_eq!(fr("-3/-4").to_string(), "3/4");
        assert_eq!(fr("0.25").to_string(), "1/4");
        assert_eq!(fr("-1.5").to_string(), "-3/2");
        assert_eq!(fr(".5").to_string(), "1/2");
        assert_eq!(fr("5.").to_string(), "5");
        assert_eq!(fr("1.5 / 3").to_string(), "1/2");

        for bad in ["", ".", "-", "abc", "1/0", "1/2/3", "--1", "0x10", "1 2"] {
            assert!(bad.parse::<Fraction>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_fraction_parse_exponent() {
        assert_eq!(fr("1e3"), 1000);
        assert_eq!(fr("-2E2"), -200);
        assert_eq!(fr("1e+2"), 100);
        assert_eq!(fr("2.5e-2").to_string(), "1/40");
        assert_eq!(fr("1.25e1").to_string(), "25/2");
        assert_eq!(fr("0e5"), 0);
        assert_eq!(fr("1e3/4e2").to_string(), "5/2");

        for bad in ["e3", "1e", "1e1.5", "1ee3", "1e3e1", "1e99999"] {
            assert!(bad.parse::<Fraction>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_fraction_arithmetic() {
        assert_eq!(fr("1/2") + fr("1/3"), fr("5/6"));
        assert_eq!(fr("1/2") - fr("1/3"), fr("1/6"));
        assert_eq!(fr("2/3") * fr("9/4"), fr("3/2"));
        assert_eq!(fr("2/3") / fr("-4/9"), fr("-3/2"));
        assert_eq!(-fr("2/3"), fr("-2/3"));
        assert_eq!(fr("2/3").checked_div(&Fraction::zero()), None);
        assert_eq!(fr("-5/2").abs(), fr("5/2"));
    }

    #[test]
    fn test_fraction_order() {
        assert!(fr("-1/2") < fr("1/3"));
        assert!(fr("2/3") > fr("3/5"));
        assert_eq!(fr("4/6").cmp(&fr("2/3")), Ordering::Equal);
        assert!(fr("-7").abs() > fr("5").abs());
    }
}
