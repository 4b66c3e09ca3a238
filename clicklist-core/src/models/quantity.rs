//! Validated item quantity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A positive whole number of units.
///
/// Cart mutations take a `Quantity` so that a bad count is rejected before
/// any request goes out. Conversions exist from integers, integral floats
/// and decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Creates a quantity.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidQuantity` for zero.
    pub fn new(units: u32) -> Result<Self, CoreError> {
        if units == 0 {
            return Err(CoreError::InvalidQuantity(
                "quantity must be at least 1".to_string(),
            ));
        }
        Ok(Self(units))
    }

    /// Number of units.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CoreError;

    fn try_from(units: u32) -> Result<Self, Self::Error> {
        Self::new(units)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = CoreError;

    fn try_from(units: i64) -> Result<Self, Self::Error> {
        let units = u32::try_from(units)
            .map_err(|_| CoreError::InvalidQuantity(format!("{units} is out of range")))?;
        Self::new(units)
    }
}

impl TryFrom<i32> for Quantity {
    type Error = CoreError;

    fn try_from(units: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(units))
    }
}

impl TryFrom<f64> for Quantity {
    type Error = CoreError;

    #[allow(clippy::cast_possible_truncation)]
    fn try_from(units: f64) -> Result<Self, Self::Error> {
        if !units.is_finite() || units.fract() != 0.0 {
            return Err(CoreError::InvalidQuantity(format!(
                "{units} is not a whole number"
            )));
        }
        if units < 1.0 || units > f64::from(u32::MAX) {
            return Err(CoreError::InvalidQuantity(format!("{units} is out of range")));
        }
        Self::new(units as u32)
    }
}

impl FromStr for Quantity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(units) = trimmed.parse::<i64>() {
            return Self::try_from(units);
        }
        match trimmed.parse::<f64>() {
            Ok(units) => Self::try_from(units),
            Err(_) => Err(CoreError::InvalidQuantity(format!("{s:?} is not a number"))),
        }
    }
}

impl TryFrom<&str> for Quantity {
    type Error = CoreError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Quantity {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ============================================================================
// Tests
// ============================================================================
