use super::types::{LogEntry, TrackerState};

/// Read-only snapshot handed to a renderer after every applied change
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrackerView<'a> {
    pub(crate) counter: u64,
    /// Newest first
    pub(crate) logs: &'a [LogEntry],
}

impl<'a> From<&'a TrackerState> for TrackerView<'a> {
    fn from(state: &'a TrackerState) -> Self {
        TrackerView {
            counter: state.counter,
            logs: &state.logs,
        }
    }
}

/// Output side of the tracker. Implementations own all presentation.
pub(crate) trait Renderer {
    fn render(&mut self, view: TrackerView<'_>);
}

pub(crate) type BoxedRenderer = Box<dyn Renderer>;

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, view: TrackerView<'_>) {
        (**self).render(view);
    }
}
