use pivot_core::types::TimestampMs;
use thiserror::Error;

use crate::candle::{Candle, Timeframe};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("bar open-time {next:?} is not after last open-time {last:?}")]
    NonMonotonic { last: TimestampMs, next: TimestampMs },

    #[error("bar open-time {got:?} does not match forming bar {expected:?}")]
    NotFormingBar {
        expected: TimestampMs,
        got: TimestampMs,
    },

    #[error("series is empty")]
    Empty,
}

/// Append-only bar series with strictly increasing open-times.
/// The last bar may still be forming and can be replaced via `update_last`.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    candles: Vec<Candle>,
}

impl BarSeries {
    pub fn new() -> Self {
        Self {
            candles: Vec::new(),
        }
    }

    pub fn from_candles(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        let mut s = Self::new();
        s.candles.reserve(candles.len());
        for c in candles {
            s.push(c)?;
        }
        Ok(s)
    }

    pub fn push(&mut self, candle: Candle) -> Result<(), SeriesError> {
        if let Some(last) = self.candles.last() {
            if candle.ts <= last.ts {
                return Err(SeriesError::NonMonotonic {
                    last: last.ts,
                    next: candle.ts,
                });
            }
        }
        self.candles.push(candle);
        Ok(())
    }

    /// Replace the still-forming last bar (same open-time).
    pub fn update_last(&mut self, candle: Candle) -> Result<(), SeriesError> {
        let last = self.candles.last_mut().ok_or(SeriesError::Empty)?;
        if last.ts != candle.ts {
            return Err(SeriesError::NotFormingBar {
                expected: last.ts,
                got: candle.ts,
            });
        }
        *last = candle;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Index of the bar with the greatest open-time <= `ts`.
    /// `None` when `ts` is before the first bar.
    pub fn index_at_or_before(&self, ts: TimestampMs) -> Option<usize> {
        self.candles
            .partition_point(|c| c.ts <= ts)
            .checked_sub(1)
    }
}

/// External time-series source: the driving (chart) series plus one
/// series per higher timeframe.
pub trait SeriesProvider {
    fn driving(&self) -> &BarSeries;

    fn series(&self, timeframe: Timeframe) -> Option<&BarSeries>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_core::types::Price;

    fn c(ts: i64) -> Candle {
        Candle {
            ts: TimestampMs(ts),
            open: Price(1.0),
            high: Price(2.0),
            low: Price(0.5),
            close: Price(1.5),
        }
    }

    #[test]
    fn at_or_before_picks_greatest_open_time_not_after_ts() {
        let s = BarSeries::from_candles(vec![c(100), c(200), c(300)]).unwrap();

        assert_eq!(s.index_at_or_before(TimestampMs(99)), None);
        assert_eq!(s.index_at_or_before(TimestampMs(100)), Some(0));
        assert_eq!(s.index_at_or_before(TimestampMs(250)), Some(1));
        assert_eq!(s.index_at_or_before(TimestampMs(300)), Some(2));
        assert_eq!(s.index_at_or_before(TimestampMs(10_000)), Some(2));
    }

    #[test]
    fn empty_series_has_no_index() {
        assert_eq!(BarSeries::new().index_at_or_before(TimestampMs(0)), None);
    }

    #[test]
    fn push_rejects_non_increasing_open_time() {
        let mut s = BarSeries::new();
        s.push(c(100)).unwrap();

        assert_eq!(
            s.push(c(100)),
            Err(SeriesError::NonMonotonic {
                last: TimestampMs(100),
                next: TimestampMs(100),
            })
        );
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn forming_bar_can_be_replaced_in_place() {
        let mut s = BarSeries::from_candles(vec![c(100), c(200)]).unwrap();
        let mut updated = c(200);
        updated.high = Price(5.0);

        s.update_last(updated).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.last().unwrap().high, Price(5.0));

        assert!(matches!(
            s.update_last(c(300)),
            Err(SeriesError::NotFormingBar { .. })
        ));
    }
}
