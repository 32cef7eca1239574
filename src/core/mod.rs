pub(crate) mod controller;
pub(crate) mod render;
pub(crate) mod types;

pub(crate) use controller::{Outcome, TrackerController};
pub(crate) use render::{BoxedRenderer, Renderer, TrackerView};
pub(crate) use types::{LogEntry, TrackerState};
