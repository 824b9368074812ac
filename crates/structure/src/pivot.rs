use pivot_core::types::{Price, TimestampMs};

use crate::candle::Candle;
use crate::series::BarSeries;

/// Classic pivot point: (high + low + close) / 3, no rounding
pub fn pivot_price(candle: &Candle) -> Price {
    (candle.high + candle.low + candle.close) / 3.0
}

/// Higher-timeframe bar a pivot was taken from
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AlignedPivot {
    pub index: usize,
    pub open_time: TimestampMs,
    pub price: Price,
}

/// Pivot of the last higher-timeframe bar that was fully closed when the
/// lower-timeframe bar opening at `ltf_open` began.
///
/// - the htf bar containing `ltf_open` is still forming, so step back one bar
/// - the stepped-back open-time is resolved again against the series, which
///   may have advanced since the first lookup
///
/// `None` means no closed htf bar exists yet (or the bar is unusable).
pub fn aligned_pivot(htf: &BarSeries, ltf_open: TimestampMs) -> Option<AlignedPivot> {
    let forming = htf.index_at_or_before(ltf_open)?;
    let closed = forming.checked_sub(1)?;
    let target = htf.get(closed)?.ts;

    let index = htf.index_at_or_before(target)?;
    let candle = htf.get(index)?;

    let price = pivot_price(candle);
    if !price.is_finite() {
        return None;
    }

    Some(AlignedPivot {
        index,
        open_time: candle.ts,
        price,
    })
}
