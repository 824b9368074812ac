use pivot_core::types::{Price, TimestampMs};
use tracing::debug;

use crate::canvas::LineCanvas;
use crate::registry::LineRegistry;

/// High/low of one driving bar
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HighLow {
    pub high: Price,
    pub low: Price,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Crossing {
    Upward,
    Downward,
}

/// Line retired by a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedLine {
    pub name: String,
    pub price: Price,
    pub start: TimestampMs,
    pub crossing: Crossing,
}

/// Did price cross `level` between the prior bar and the current one?
/// Inclusive on the current side, strict on the prior side: a level that
/// was already touched by the prior bar does not trigger again.
pub fn crossing(level: Price, current: HighLow, prior: HighLow) -> Option<Crossing> {
    if current.high.0 >= level.0 && prior.high.0 < level.0 {
        return Some(Crossing::Upward);
    }
    if current.low.0 <= level.0 && prior.low.0 > level.0 {
        return Some(Crossing::Downward);
    }
    None
}

/// One pass over all active lines, whatever their tier.
///
/// Crossed lines are removed from the canvas and the registry; every other
/// line is extended to `now`. With no prior bar nothing can be crossed yet.
pub fn sweep<C: LineCanvas + ?Sized>(
    registry: &mut LineRegistry,
    canvas: &mut C,
    current: HighLow,
    prior: Option<HighLow>,
    now: TimestampMs,
) -> Vec<RemovedLine> {
    let mut removed = Vec::new();

    for key in registry.snapshot_keys() {
        let Some(line) = registry.get_by_key(&key) else {
            continue;
        };

        let hit = prior.and_then(|p| crossing(line.price, current, p));

        match hit {
            Some(c) => {
                if let Some(line) = registry.remove_by_key(canvas, &key) {
                    debug!(name = %line.name, price = line.price.0, crossing = ?c, "pivot line crossed");
                    removed.push(RemovedLine {
                        name: line.name,
                        price: line.price,
                        start: line.start,
                        crossing: c,
                    });
                }
            }
            None => registry.extend_by_key(canvas, &key, now),
        }
    }

    removed
}
