use std::fmt;
use std::str::FromStr;

use pivot_core::types::{Price, TimestampMs};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Candle {
    pub ts: TimestampMs,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timeframe {
    Minute1,
    Minute5,
    Minute15,
    Minute30,
    Hour1,
    Hour4,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown timeframe '{0}'")]
pub struct ParseTimeframeError(pub String);

impl Timeframe {
    pub const ALL: [Timeframe; 9] = [
        Timeframe::Minute1,
        Timeframe::Minute5,
        Timeframe::Minute15,
        Timeframe::Minute30,
        Timeframe::Hour1,
        Timeframe::Hour4,
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::Monthly,
    ];

    /// Stable identifier, used as the tier id inside line names
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Minute1 => "m1",
            Timeframe::Minute5 => "m5",
            Timeframe::Minute15 => "m15",
            Timeframe::Minute30 => "m30",
            Timeframe::Hour1 => "h1",
            Timeframe::Hour4 => "h4",
            Timeframe::Daily => "D1",
            Timeframe::Weekly => "W1",
            Timeframe::Monthly => "MN1",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tf = match s.trim().to_ascii_lowercase().as_str() {
            "m1" | "1m" | "minute" | "minute1" => Timeframe::Minute1,
            "m5" | "5m" | "minute5" => Timeframe::Minute5,
            "m15" | "15m" | "minute15" => Timeframe::Minute15,
            "m30" | "30m" | "minute30" => Timeframe::Minute30,
            "h1" | "1h" | "hour" | "hour1" => Timeframe::Hour1,
            "h4" | "4h" | "hour4" => Timeframe::Hour4,
            "d1" | "1d" | "day" | "daily" => Timeframe::Daily,
            "w1" | "1w" | "week" | "weekly" => Timeframe::Weekly,
            "mn1" | "month" | "monthly" => Timeframe::Monthly,
            _ => return Err(ParseTimeframeError(s.to_string())),
        };
        Ok(tf)
    }
}
