use chrono::DateTime;
use pivot_core::types::TimestampMs;
use tracing::{debug, info, trace};

use crate::event::EngineEvent;

/// RFC 3339 for logs and artifacts, raw millis when out of chrono range
pub fn fmt_ts(ts: TimestampMs) -> String {
    match DateTime::from_timestamp_millis(ts.0) {
        Some(dt) => dt.to_rfc3339(),
        None => ts.to_string(),
    }
}

pub fn consume(events: &[EngineEvent]) {
    for e in events {
        match e {
            EngineEvent::LineCreated {
                tier,
                name,
                price,
                pivot_bar,
                at,
            } => {
                info!(
                    %tier,
                    %name,
                    %price,
                    pivot_bar = %fmt_ts(*pivot_bar),
                    at = %fmt_ts(*at),
                    "line created"
                );
            }
            EngineEvent::LineExtended { tier, name, at } => {
                trace!(%tier, %name, at = %fmt_ts(*at), "line extended");
            }
            EngineEvent::LineCrossed {
                name,
                price,
                crossing,
                at,
            } => {
                info!(%name, %price, ?crossing, at = %fmt_ts(*at), "line crossed");
            }
            EngineEvent::NoPivotData {
                tier,
                timeframe,
                reason,
                at,
            } => {
                debug!(%tier, %timeframe, ?reason, at = %fmt_ts(*at), "no pivot data");
            }
        }
    }
}
