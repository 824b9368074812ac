use levels::sweep::Crossing;
use levels::tier::Tier;
use pivot_core::types::{Price, TimestampMs};
use structure::candle::Timeframe;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoDataReason {
    /// provider has no series for the tier timeframe
    MissingSeries,
    /// no closed higher-timeframe bar before the current bar
    NoClosedBar,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    LineCreated {
        tier: Tier,
        name: String,
        price: Price,
        /// open-time of the htf bar the pivot came from
        pivot_bar: TimestampMs,
        at: TimestampMs,
    },
    LineExtended {
        tier: Tier,
        name: String,
        at: TimestampMs,
    },
    LineCrossed {
        name: String,
        price: Price,
        crossing: Crossing,
        at: TimestampMs,
    },
    NoPivotData {
        tier: Tier,
        timeframe: Timeframe,
        reason: NoDataReason,
        at: TimestampMs,
    },
}
