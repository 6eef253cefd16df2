//! Arithmetic on JSON numbers that keeps integers as integers.
//!
//! Integer operands are computed in `i128` and flooring rounds toward negative
//! infinity, so `-1` scaled by `1/4` is `-1`. Any float operand switches the
//! result to a float.

use crate::{CropError, Fraction};
use serde_json::Number;

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn from_integer(v: i128) -> Result<Number, CropError> {
    if let Ok(i) = i64::try_from(v) {
        return Ok(Number::from(i));
    }
    u64::try_from(v)
        .map(Number::from)
        .map_err(|_| CropError::Overflow(v.to_string()))
}

fn from_float(v: f64) -> Result<Number, CropError> {
    Number::from_f64(v).ok_or_else(|| CropError::NonFinite(v.to_string()))
}

fn as_float(n: &Number) -> Result<f64, CropError> {
    n.as_f64().ok_or_else(|| CropError::NonFinite(n.to_string()))
}

/// `floor(value * fraction)`.
pub fn scale_floor(value: &Number, fraction: Fraction) -> Result<Number, CropError> {
    let numerator = fraction.numerator();
    let denominator = fraction.denominator();
    if let Some(int) = as_integer(value) {
        return from_integer((int * i128::from(numerator)).div_euclid(i128::from(denominator)));
    }
    let float = as_float(value)?;
    from_float((float * f64::from(numerator) / f64::from(denominator)).floor())
}

/// `value - amount`.
pub fn subtract(value: &Number, amount: &Number) -> Result<Number, CropError> {
    match (as_integer(value), as_integer(amount)) {
        (Some(a), Some(b)) => from_integer(a - b),
        _ => from_float(as_float(value)? - as_float(amount)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(v: f64) -> Number {
        Number::from_f64(v).unwrap()
    }

    #[test]
    fn test_integer_floor_division() {
        assert_eq!(scale_floor(&Number::from(800), Fraction::HALF).unwrap(), Number::from(400));
        assert_eq!(scale_floor(&Number::from(801), Fraction::HALF).unwrap(), Number::from(400));
        assert_eq!(scale_floor(&Number::from(803), Fraction::QUARTER).unwrap(), Number::from(200));
        assert_eq!(scale_floor(&Number::from(-1), Fraction::QUARTER).unwrap(), Number::from(-1));
    }

    #[test]
    fn test_float_floor_division_stays_float() {
        let halved = scale_floor(&float(801.0), Fraction::HALF).unwrap();
        assert!(halved.is_f64());
        assert_eq!(halved.as_f64(), Some(400.0));
        assert_eq!(scale_floor(&float(-1.5), Fraction::HALF).unwrap().as_f64(), Some(-1.0));
    }

    #[test]
    fn test_decimal_fraction_is_exact_for_integers() {
        let keep: Fraction = "0.6".parse().unwrap();
        assert_eq!(scale_floor(&Number::from(512), keep).unwrap(), Number::from(307));
    }

    #[test]
    fn test_subtract_mixed_types() {
        assert_eq!(subtract(&Number::from(400), &Number::from(200)).unwrap(), Number::from(200));
        let mixed = subtract(&float(400.5), &Number::from(200)).unwrap();
        assert_eq!(mixed.as_f64(), Some(200.5));
        assert!(subtract(&Number::from(10), &float(2.0)).unwrap().is_f64());
    }

    #[test]
    fn test_subtract_can_go_negative() {
        assert_eq!(subtract(&Number::from(0), &Number::from(128)).unwrap(), Number::from(-128));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = subtract(&Number::from(i64::MIN), &Number::from(u64::MAX)).unwrap_err();
        assert!(matches!(err, CropError::Overflow(_)));
    }
}
