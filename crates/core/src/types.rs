//! Core domain types.
//!
//! Goals:
//! - no bare f64 / i64 in pivot and line logic
//! - units are fixed at the type level (price vs. epoch millis)

use std::fmt;
use std::ops::{Add, Div};

/// Instrument price (quote units)
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Price(pub f64);

/// Time in milliseconds (unix epoch)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampMs(pub i64);

//
// --- Conversions & helpers --------------------------------------------------
//

impl Price {
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Fixed-point rendering with `digits` decimals (instrument precision)
    pub fn to_fixed(self, digits: u32) -> String {
        format!("{:.*}", digits as usize, self.0)
    }
}

//
// --- Arithmetic (strictly minimal) ------------------------------------------
//

impl Add for Price {
    type Output = Price;
    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

impl Div<f64> for Price {
    type Output = Price;
    fn div(self, rhs: f64) -> Price {
        Price(self.0 / rhs)
    }
}

//
// --- Display (for logs / artifacts) -----------------------------------------
//

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}", self.0)
    }
}

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
