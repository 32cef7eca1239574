use crate::core::{Renderer, TrackerView};

/// Prints the state in its persisted shape
pub(crate) struct JsonRenderer {
    limit: Option<usize>,
}

impl JsonRenderer {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, view: TrackerView<'_>) {
        println!("{}", output_state_json(view, self.limit));
    }
}

pub(crate) fn output_state_json(view: TrackerView<'_>, limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(view.logs.len()).min(view.logs.len());
    let logs = &view.logs[..shown];
    let output = serde_json::json!({
        "counter": view.counter,
        "logs": logs,
    });
    format!("{output:#}")
}
