pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, StorageBackend};
pub(crate) use commands::{Commands, resolve_command};
