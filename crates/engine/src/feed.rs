use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use pivot_core::types::{Price, TimestampMs};
use structure::candle::{Candle, Timeframe};
use structure::series::{BarSeries, SeriesProvider};

/// Driving series plus already-aggregated higher-timeframe series
#[derive(Debug, Default)]
pub struct SeriesBook {
    driving: BarSeries,
    higher: HashMap<Timeframe, BarSeries>,
}

impl SeriesBook {
    pub fn new(driving: BarSeries) -> Self {
        Self {
            driving,
            higher: HashMap::new(),
        }
    }

    pub fn with_series(mut self, timeframe: Timeframe, series: BarSeries) -> Self {
        self.higher.insert(timeframe, series);
        self
    }

    /// Returns false (and keeps the existing one) if the timeframe is already loaded
    pub fn insert(&mut self, timeframe: Timeframe, series: BarSeries) -> bool {
        if self.higher.contains_key(&timeframe) {
            return false;
        }
        self.higher.insert(timeframe, series);
        true
    }

    /// Live feeds append / update the forming bar through these
    pub fn driving_mut(&mut self) -> &mut BarSeries {
        &mut self.driving
    }

    pub fn series_mut(&mut self, timeframe: Timeframe) -> Option<&mut BarSeries> {
        self.higher.get_mut(&timeframe)
    }
}

impl SeriesProvider for SeriesBook {
    fn driving(&self) -> &BarSeries {
        &self.driving
    }

    fn series(&self, timeframe: Timeframe) -> Option<&BarSeries> {
        self.higher.get(&timeframe)
    }
}

/// Cache row: `ts,open,high,low,close` (extra columns such as volume are ignored)
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CandleRow {
    pub ts: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<CandleRow> for Candle {
    fn from(row: CandleRow) -> Self {
        Candle {
            ts: TimestampMs(row.ts),
            open: Price(row.open),
            high: Price(row.high),
            low: Price(row.low),
            close: Price(row.close),
        }
    }
}

pub fn read_series(path: impl AsRef<Path>) -> Result<BarSeries> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("open series csv {}", path.display()))?;

    let mut out = BarSeries::new();
    for (i, r) in rdr.deserialize::<CandleRow>().enumerate() {
        let row = r.with_context(|| format!("{}: bad row {}", path.display(), i + 1))?;
        out.push(row.into())
            .with_context(|| format!("{}: row {}", path.display(), i + 1))?;
    }
    Ok(out)
}
