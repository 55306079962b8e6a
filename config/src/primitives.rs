use std::str::FromStr;

use crate::Error;

/// A finite 64-bit floating point type.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FiniteFloat(f64);

impl From<FiniteFloat> for f64 {
    fn from(float: FiniteFloat) -> Self {
        float.0
    }
}

impl TryFrom<f64> for FiniteFloat {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(Error::NonFiniteFloat)
        }
    }
}

impl FromStr for FiniteFloat {
    type Err = Error;

    /// Parses a trimmed decimal string, rejecting `inf` and `NaN`.
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        string
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::NonFiniteFloat)
            .and_then(Self::try_from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numbers() {
        assert_eq!(f64::from(" 12.5 ".parse::<FiniteFloat>().unwrap()), 12.5);
        assert_eq!(f64::from("-3".parse::<FiniteFloat>().unwrap()), -3.0);
    }

    #[test]
    fn rejects_non_finite_and_garbage() {
        assert!("inf".parse::<FiniteFloat>().is_err());
        assert!("NaN".parse::<FiniteFloat>().is_err());
        assert!("".parse::<FiniteFloat>().is_err());
        assert!("12cm".parse::<FiniteFloat>().is_err());
        assert!(FiniteFloat::try_from(f64::INFINITY).is_err());
    }
}
