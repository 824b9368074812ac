use indexmap::IndexMap;
use indexmap::map::Entry;
use pivot_core::types::{Price, TimestampMs};
use tracing::debug;

use crate::canvas::{ChartPoint, LineCanvas, LineHandle};
use crate::naming::{line_name, name_key};
use crate::tier::TierConfig;

/// Active horizontal pivot line
#[derive(Debug, Clone, PartialEq)]
pub struct PivotLine {
    pub name: String,
    /// fixed at creation
    pub price: Price,
    /// fixed at creation
    pub start: TimestampMs,
    pub end: TimestampMs,
    pub handle: LineHandle,
}

/// Outcome of `LineRegistry::upsert`
#[derive(Debug, PartialEq)]
pub enum Upsert<'a> {
    Created(&'a PivotLine),
    Extended(&'a PivotLine),
}

impl<'a> Upsert<'a> {
    pub fn line(&self) -> &'a PivotLine {
        match self {
            Upsert::Created(l) | Upsert::Extended(l) => l,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Upsert::Created(_))
    }
}

/// Single flat collection of active lines across all tiers, keyed by
/// lower-cased name, in creation order. Sole owner and mutator of lines.
#[derive(Debug, Default)]
pub struct LineRegistry {
    lines: IndexMap<String, PivotLine>,
}

impl LineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the line named after (tier, rounded price) to `now`, or draw a
    /// new zero-length one. Exactly one canvas call either way.
    pub fn upsert<C: LineCanvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        tier: &TierConfig,
        price: Price,
        digits: u32,
        now: TimestampMs,
    ) -> Upsert<'_> {
        let name = line_name(tier.tier_id(), price, digits);

        match self.lines.entry(name_key(&name)) {
            Entry::Occupied(e) => {
                let line = e.into_mut();
                line.end = now;
                canvas.set_end(line.handle, now);
                Upsert::Extended(line)
            }
            Entry::Vacant(e) => {
                let at = ChartPoint { time: now, price };
                let handle = canvas.draw_segment(&name, at, at, &tier.appearance);
                debug!(name = %name, price = price.0, tier = %tier.tier, "pivot line drawn");

                let line = e.insert(PivotLine {
                    name,
                    price,
                    start: now,
                    end: now,
                    handle,
                });
                Upsert::Created(line)
            }
        }
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&PivotLine> {
        self.lines.get(&name_key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lines.contains_key(&name_key(name))
    }

    /// Stable copy of the current keys, safe to iterate while removing
    pub fn snapshot_keys(&self) -> Vec<String> {
        self.lines.keys().cloned().collect()
    }

    pub(crate) fn get_by_key(&self, key: &str) -> Option<&PivotLine> {
        self.lines.get(key)
    }

    pub(crate) fn extend_by_key<C: LineCanvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        key: &str,
        now: TimestampMs,
    ) {
        if let Some(line) = self.lines.get_mut(key) {
            line.end = now;
            canvas.set_end(line.handle, now);
        }
    }

    pub(crate) fn remove_by_key<C: LineCanvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        key: &str,
    ) -> Option<PivotLine> {
        let line = self.lines.shift_remove(key)?;
        canvas.remove(&line.name);
        Some(line)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PivotLine> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
