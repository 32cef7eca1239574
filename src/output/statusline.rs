use crate::core::{Renderer, TrackerView};
use crate::output::format::{NumberFormat, format_number};

/// One line per render, suitable for scripts and tmux status bars.
/// Format: "Tally: 2 | Last: call mom (18/10/2026 11:30:00)"
pub(crate) struct StatusRenderer {
    number_format: NumberFormat,
}

impl StatusRenderer {
    pub(crate) fn new(number_format: NumberFormat) -> Self {
        Self { number_format }
    }
}

impl Renderer for StatusRenderer {
    fn render(&mut self, view: TrackerView<'_>) {
        println!("{}", status_line(view, self.number_format));
    }
}

pub(crate) fn status_line(view: TrackerView<'_>, number_format: NumberFormat) -> String {
    let mut parts = vec![format!(
        "Tally: {}",
        format_number(view.counter, number_format)
    )];
    if let Some(newest) = view.logs.first() {
        parts.push(format!(
            "Last: {} ({})",
            newest.description, newest.display_date
        ));
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogEntry, TrackerState};
    use crate::utils::Timezone;
    use chrono::{DateTime, Utc};

    #[test]
    fn empty_state_is_counter_only() {
        let s = TrackerState::default();
        assert_eq!(
            status_line(TrackerView::from(&s), NumberFormat::default()),
            "Tally: 0"
        );
    }

    #[test]
    fn shows_newest_entry() {
        let mut s = TrackerState::default();
        for (d, ts) in [("buy milk", "2026-10-18T10:00:00Z"), ("call mom", "2026-10-18T11:30:00Z")] {
            s.record(LogEntry::new(
                d.to_string(),
                ts.parse::<DateTime<Utc>>().unwrap(),
                Timezone::Named(chrono_tz::UTC),
            ));
        }
        assert_eq!(
            status_line(TrackerView::from(&s), NumberFormat::default()),
            "Tally: 2 | Last: call mom (18/10/2026 11:30:00)"
        );
    }
}
