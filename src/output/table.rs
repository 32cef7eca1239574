use comfy_table::Color;

use crate::core::{Renderer, TrackerView};
use crate::output::format::{
    NumberFormat, create_styled_table, format_number, header_cell, right_cell, styled_cell,
};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) number_format: NumberFormat,
    /// Show only the newest N entries
    pub(crate) limit: Option<usize>,
}

/// Counter headline plus the newest-first log as a table
pub(crate) struct TableRenderer {
    opts: TableOptions,
}

impl TableRenderer {
    pub(crate) fn new(opts: TableOptions) -> Self {
        Self { opts }
    }
}

impl Renderer for TableRenderer {
    fn render(&mut self, view: TrackerView<'_>) {
        print!("{}", render_table(view, self.opts));
    }
}

fn headline(counter: u64, opts: TableOptions) -> String {
    let count = format_number(counter, opts.number_format);
    if opts.use_color {
        format!("\n  Tally: \x1b[1;32m{count}\x1b[0m\n")
    } else {
        format!("\n  Tally: {count}\n")
    }
}

pub(crate) fn render_table(view: TrackerView<'_>, opts: TableOptions) -> String {
    let mut out = headline(view.counter, opts);

    if view.logs.is_empty() {
        out.push_str("\n  No entries yet.\n\n");
        return out;
    }

    let c = opts.use_color;
    let mut table = create_styled_table();
    if opts.compact {
        table.set_header(vec![header_cell("Date", c), header_cell("Description", c)]);
    } else {
        table.set_header(vec![
            header_cell("#", c),
            header_cell("Date", c),
            header_cell("Description", c),
        ]);
    }

    let shown = opts.limit.unwrap_or(view.logs.len()).min(view.logs.len());
    let date_color = if c { Some(Color::DarkGrey) } else { None };
    for (idx, entry) in view.logs.iter().take(shown).enumerate() {
        let date = styled_cell(&entry.display_date, date_color, false);
        let description = styled_cell(&entry.description, None, idx == 0 && c);
        if opts.compact {
            table.add_row(vec![date, description]);
        } else {
            let number = (view.logs.len() - idx) as u64;
            table.add_row(vec![
                right_cell(&format_number(number, opts.number_format), None),
                date,
                description,
            ]);
        }
    }

    out.push('\n');
    out.push_str(&table.to_string());
    out.push('\n');
    if shown < view.logs.len() {
        out.push_str(&format!(
            "\n  Showing newest {} of {} entries\n",
            format_number(shown as u64, opts.number_format),
            format_number(view.logs.len() as u64, opts.number_format)
        ));
    }
    out.push('\n');
    out
}
