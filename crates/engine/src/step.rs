use levels::canvas::LineCanvas;
use levels::registry::{LineRegistry, Upsert};
use levels::sweep::{HighLow, sweep};
use levels::tier::{ConfigError, TierConfig, TierSettings, validate_tiers};
use structure::candle::Candle;
use structure::pivot::aligned_pivot;
use structure::series::SeriesProvider;
use thiserror::Error;
use tracing::info;

use crate::event::{EngineEvent, NoDataReason};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("step index {index} outside driving series of {len} bars")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Engine runtime context (lives across steps)
pub struct PivotEngine<C: LineCanvas> {
    tiers: [TierConfig; 3],
    digits: u32,
    registry: LineRegistry,
    canvas: C,
}

impl<C: LineCanvas> PivotEngine<C> {
    /// Validate all tiers up front; a bad tier means no engine at all.
    pub fn configure(
        settings: &[TierSettings; 3],
        digits: u32,
        canvas: C,
    ) -> Result<Self, ConfigError> {
        let tiers = validate_tiers(settings, digits)?;

        for t in &tiers {
            info!(
                tier = %t.tier,
                timeframe = %t.timeframe,
                color = %t.appearance.color.to_hex(),
                thickness = t.appearance.thickness,
                style = ?t.appearance.style,
                "tier configured"
            );
        }

        Ok(Self {
            tiers,
            digits,
            registry: LineRegistry::new(),
            canvas,
        })
    }

    /// One processing step for driving bar `index`:
    /// aligner + upsert per tier, then a single crossing sweep.
    ///
    /// Re-running the same index is safe: lines are keyed by name.
    pub fn on_step<P: SeriesProvider + ?Sized>(
        &mut self,
        provider: &P,
        index: usize,
    ) -> Result<Vec<EngineEvent>, StepError> {
        let driving = provider.driving();
        let bar = *driving.get(index).ok_or(StepError::IndexOutOfRange {
            index,
            len: driving.len(),
        })?;
        let now = bar.ts;

        let mut events = Vec::new();

        // --- 1) pivot lines per tier ---
        for tier in &self.tiers {
            let Some(htf) = provider.series(tier.timeframe) else {
                events.push(EngineEvent::NoPivotData {
                    tier: tier.tier,
                    timeframe: tier.timeframe,
                    reason: NoDataReason::MissingSeries,
                    at: now,
                });
                continue;
            };

            let Some(pivot) = aligned_pivot(htf, now) else {
                events.push(EngineEvent::NoPivotData {
                    tier: tier.tier,
                    timeframe: tier.timeframe,
                    reason: NoDataReason::NoClosedBar,
                    at: now,
                });
                continue;
            };

            let ev = match self
                .registry
                .upsert(&mut self.canvas, tier, pivot.price, self.digits, now)
            {
                Upsert::Created(line) => EngineEvent::LineCreated {
                    tier: tier.tier,
                    name: line.name.clone(),
                    price: line.price,
                    pivot_bar: pivot.open_time,
                    at: now,
                },
                Upsert::Extended(line) => EngineEvent::LineExtended {
                    tier: tier.tier,
                    name: line.name.clone(),
                    at: now,
                },
            };
            events.push(ev);
        }

        // --- 2) crossing sweep over every active line ---
        let prior = index
            .checked_sub(1)
            .and_then(|i| driving.get(i))
            .map(high_low);

        let removed = sweep(
            &mut self.registry,
            &mut self.canvas,
            high_low(&bar),
            prior,
            now,
        );
        events.extend(removed.into_iter().map(|r| EngineEvent::LineCrossed {
            name: r.name,
            price: r.price,
            crossing: r.crossing,
            at: now,
        }));

        Ok(events)
    }

    pub fn tiers(&self) -> &[TierConfig; 3] {
        &self.tiers
    }

    pub fn registry(&self) -> &LineRegistry {
        &self.registry
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }
}

fn high_low(c: &Candle) -> HighLow {
    HighLow {
        high: c.high,
        low: c.low,
    }
}
