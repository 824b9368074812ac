pub mod candle;
pub mod pivot;
pub mod series;

pub use candle::{Candle, ParseTimeframeError, Timeframe};
pub use pivot::{AlignedPivot, aligned_pivot, pivot_price};
pub use series::{BarSeries, SeriesError, SeriesProvider};
