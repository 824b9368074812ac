pub mod event;
pub mod feed;
pub mod sink;
pub mod step;

pub use event::{EngineEvent, NoDataReason};
pub use feed::SeriesBook;
pub use step::{PivotEngine, StepError};

#[cfg(test)]
mod tests;
