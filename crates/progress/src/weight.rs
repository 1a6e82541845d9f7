use serde::{Deserialize, Serialize};

use abal_core::{DomainError, DomainResult, ValueObject};

/// A body-weight magnitude.
///
/// Always finite and strictly positive. The unit is whatever the user chose;
/// nothing in this crate converts between units.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl ValueObject for Weight {}

impl Weight {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("weight must be a finite number"));
        }
        if value <= 0.0 {
            return Err(DomainError::validation("weight must be greater than zero"));
        }
        Ok(Self(value))
    }

    /// Parse user-entered text (e.g. from an input field).
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("weight '{raw}' is not a number")))?;
        Self::new(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(value: Weight) -> Self {
        value.0
    }
}

impl core::fmt::Display for Weight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_finite_values() {
        assert_eq!(Weight::new(182.4).unwrap().value(), 182.4);
        assert_eq!(Weight::parse(" 150 ").unwrap().value(), 150.0);
    }

    #[test]
    fn rejects_invalid_values() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(Weight::new(bad), Err(DomainError::Validation(_))));
        }
        assert!(Weight::parse("abc").is_err());
        assert!(Weight::parse("").is_err());
        assert!(Weight::parse("-3").is_err());
    }

    #[test]
    fn deserialization_revalidates() {
        let w: Weight = serde_json::from_str("148").unwrap();
        assert_eq!(w.value(), 148.0);
        assert!(serde_json::from_str::<Weight>("0").is_err());
        assert!(serde_json::from_str::<Weight>("-12.5").is_err());
    }
}
