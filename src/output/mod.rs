mod format;
mod json;
mod statusline;
mod table;

pub(crate) use format::NumberFormat;
pub(crate) use json::JsonRenderer;
pub(crate) use statusline::StatusRenderer;
pub(crate) use table::{TableOptions, TableRenderer};
