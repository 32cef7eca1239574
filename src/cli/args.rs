//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigBackend, ConfigColorMode};
use crate::consts::DATA_DIR_ENV;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum StorageBackend {
    /// One JSON file per key in the data directory (default)
    #[default]
    File,
    /// Key-value table in an SQLite database
    Sqlite,
}

impl From<ConfigColorMode> for ColorMode {
    fn from(mode: ConfigColorMode) -> Self {
        match mode {
            ConfigColorMode::Auto => ColorMode::Auto,
            ConfigColorMode::Always => ColorMode::Always,
            ConfigColorMode::Never => ColorMode::Never,
        }
    }
}

impl From<ConfigBackend> for StorageBackend {
    fn from(backend: ConfigBackend) -> Self {
        match backend {
            ConfigBackend::File => StorageBackend::File,
            ConfigBackend::Sqlite => StorageBackend::Sqlite,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tallybook")]
#[command(about = "Count things and keep a timestamped log of each one", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Directory holding the tracker data
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(long, global = true, value_enum)]
    pub(crate) backend: Option<StorageBackend>,

    /// Timezone for new entries' display date (e.g. "Europe/Paris", "UTC", "local")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Locale for number formatting (e.g. "en", "fr", "de")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Compact output (fewer columns)
    #[arg(short = 'c', long, global = true)]
    pub(crate) compact: bool,

    /// Enable debug diagnostics on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // Boolean flags: config only applies if CLI left them off
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.compact && config.compact {
            self.compact = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = color.into();
        }

        if self.backend.is_none() {
            self.backend = config.backend.map(StorageBackend::from);
        }

        // Data dir: flag, then environment, then config
        if self.data_dir.is_none() {
            self.data_dir = std::env::var_os(DATA_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .or_else(|| config.data_dir.clone());
        }

        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn backend(&self) -> StorageBackend {
        self.backend.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tallybook").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn add_collects_description_words() {
        let cli = parse(&["add", "buy", "milk"]);
        match cli.command {
            Some(Commands::Add { description }) => assert_eq!(description, ["buy", "milk"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn add_requires_description() {
        assert!(Cli::try_parse_from(["tallybook", "add"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["reset", "--yes", "--json", "--backend", "sqlite"]);
        assert!(cli.json);
        assert_eq!(cli.backend(), StorageBackend::Sqlite);
        assert!(matches!(cli.command, Some(Commands::Reset { yes: true })));
    }

    #[test]
    fn config_fills_unset_values_only() {
        let config = Config {
            backend: Some(ConfigBackend::Sqlite),
            timezone: Some("UTC".to_string()),
            locale: Some("de".to_string()),
            color: Some(ConfigColorMode::Always),
            compact: true,
            data_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        let cli = parse(&[
            "--locale",
            "fr",
            "--color",
            "never",
            "--data-dir",
            "/from/flag",
        ])
        .with_config(&config);
        assert_eq!(cli.backend(), StorageBackend::Sqlite);
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert_eq!(cli.locale.as_deref(), Some("fr"));
        assert_eq!(cli.color, ColorMode::Never);
        assert!(cli.compact);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/from/flag")));
    }

    #[test]
    fn backend_defaults_to_file() {
        assert_eq!(parse(&[]).backend(), StorageBackend::File);
    }

    #[test]
    fn no_color_wins() {
        let cli = parse(&["--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }
}
