//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Record an entry and bump the counter
    Add {
        /// What happened (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1.., value_name = "DESCRIPTION")]
        description: Vec<String>,
    },
    /// Show the counter and the log, newest first (default)
    Show {
        /// Only list the newest N entries
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Print a single status line: counter and newest entry
    Count,
    /// Clear the counter and every entry (asks for confirmation)
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Read entries from stdin, one per line (`:reset`, `:quit` are commands)
    Session,
}

impl Commands {
    /// Whether this command goes through the table renderer
    pub(crate) fn is_listing(&self) -> bool {
        matches!(self, Commands::Show { .. })
    }
}

/// `show` with no limit when no subcommand is given
pub(crate) fn resolve_command(cmd: Option<Commands>) -> Commands {
    cmd.unwrap_or(Commands::Show { limit: None })
}
