use indexmap::IndexMap;
use pivot_core::types::{Price, TimestampMs};

use crate::tier::LineAppearance;

/// Display handle returned by the canvas; mirrors a registry line
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LineHandle(pub u64);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChartPoint {
    pub time: TimestampMs,
    pub price: Price,
}

/// Rendering surface. The name is the identity shared with the registry.
pub trait LineCanvas {
    fn draw_segment(
        &mut self,
        name: &str,
        start: ChartPoint,
        end: ChartPoint,
        appearance: &LineAppearance,
    ) -> LineHandle;

    fn set_end(&mut self, handle: LineHandle, end: TimestampMs);

    fn remove(&mut self, name: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Draw { name: String, handle: LineHandle },
    SetEnd { handle: LineHandle, end: TimestampMs },
    Remove { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub start: ChartPoint,
    pub end: ChartPoint,
    pub appearance: LineAppearance,
}

/// In-memory canvas: keeps what is currently drawn plus every call made.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    next_handle: u64,
    segments: IndexMap<LineHandle, Segment>,
    ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.values().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    fn handle_of(&self, name: &str) -> Option<LineHandle> {
        self.segments
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(h, _)| *h)
    }
}

impl LineCanvas for RecordingCanvas {
    fn draw_segment(
        &mut self,
        name: &str,
        start: ChartPoint,
        end: ChartPoint,
        appearance: &LineAppearance,
    ) -> LineHandle {
        // drawing under an existing name replaces that object
        self.segments.retain(|_, s| s.name != name);

        self.next_handle += 1;
        let handle = LineHandle(self.next_handle);
        self.segments.insert(
            handle,
            Segment {
                name: name.to_string(),
                start,
                end,
                appearance: *appearance,
            },
        );
        self.ops.push(CanvasOp::Draw {
            name: name.to_string(),
            handle,
        });
        handle
    }

    fn set_end(&mut self, handle: LineHandle, end: TimestampMs) {
        if let Some(s) = self.segments.get_mut(&handle) {
            s.end.time = end;
        }
        self.ops.push(CanvasOp::SetEnd { handle, end });
    }

    fn remove(&mut self, name: &str) {
        if let Some(handle) = self.handle_of(name) {
            self.segments.shift_remove(&handle);
        }
        self.ops.push(CanvasOp::Remove {
            name: name.to_string(),
        });
    }
}
