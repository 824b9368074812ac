pub mod canvas;
pub mod naming;
pub mod registry;
pub mod sweep;
pub mod tier;

pub use canvas::{ChartPoint, LineCanvas, LineHandle, RecordingCanvas};
pub use registry::{LineRegistry, PivotLine, Upsert};
pub use sweep::{Crossing, HighLow, RemovedLine, sweep};
pub use tier::{
    Color, ConfigError, LineAppearance, LineStyle, Tier, TierConfig, TierSettings, validate_tiers,
};
