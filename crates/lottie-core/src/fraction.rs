use crate::FractionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_DECIMALS: usize = 9;

/// Exact non-negative ratio used for the keep and shift amounts.
///
/// Parsed from `"1/2"`, `"3"` or `"0.6"`; decimals become a power-of-ten
/// ratio so `0.25` scales exactly like `1/4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fraction {
    numerator: u32,
    denominator: u32,
}

impl Fraction {
    pub const HALF: Fraction = Fraction {
        numerator: 1,
        denominator: 2,
    };
    pub const QUARTER: Fraction = Fraction {
        numerator: 1,
        denominator: 4,
    };

    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        (denominator != 0).then_some(Fraction {
            numerator,
            denominator,
        })
    }

    pub fn numerator(self) -> u32 {
        self.numerator
    }

    pub fn denominator(self) -> u32 {
        self.denominator
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let fail = |reason| FractionError {
            input: s.to_string(),
            reason,
        };
        let parse_part = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| fail("expected a non-negative whole number"))
        };

        if let Some((num, den)) = input.split_once('/') {
            let numerator = parse_part(num)?;
            let denominator = parse_part(den)?;
            return Fraction::new(numerator, denominator).ok_or_else(|| fail("zero denominator"));
        }

        match input.split_once('.') {
            None => Ok(Fraction {
                numerator: parse_part(input)?,
                denominator: 1,
            }),
            Some((whole, decimals)) => {
                if decimals.is_empty() || !decimals.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(fail("malformed decimal"));
                }
                if decimals.len() > MAX_DECIMALS {
                    return Err(fail("too many decimal places"));
                }
                let whole = if whole.is_empty() { 0 } else { parse_part(whole)? };
                let denominator = 10u32.pow(decimals.len() as u32);
                let numerator = whole
                    .checked_mul(denominator)
                    .and_then(|n| n.checked_add(decimals.parse::<u32>().ok()?))
                    .ok_or_else(|| fail("value too large"))?;
                Ok(Fraction {
                    numerator,
                    denominator,
                })
            }
        }
    }
}

impl TryFrom<String> for Fraction {
    type Error = FractionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fraction> for String {
    fn from(value: Fraction) -> Self {
        value.to_string()
    }
}
