use std::io::{BufRead, IsTerminal, Lines};
use std::path::Path;

use log::{debug, warn};

use crate::cli::{Cli, Commands, StorageBackend, resolve_command};
use crate::core::{BoxedRenderer, Outcome, Renderer, TrackerController, TrackerState};
use crate::error::AppError;
use crate::output::{JsonRenderer, NumberFormat, StatusRenderer, TableOptions, TableRenderer};
use crate::store::file::default_data_dir;
use crate::store::sqlite::database_path;
use crate::store::{BoxedStorage, FileStorage, PersistedStore, SqliteStorage, Storage};
use crate::utils::Timezone;

const SESSION_RESET: &str = ":reset";

fn open_storage(backend: StorageBackend, data_dir: &Path) -> Result<BoxedStorage, AppError> {
    let storage: BoxedStorage = match backend {
        StorageBackend::File => Box::new(FileStorage::new(data_dir)),
        StorageBackend::Sqlite => Box::new(SqliteStorage::open(database_path(data_dir))?),
    };
    debug!("Using {:?} storage at {}", backend, storage.location());
    Ok(storage)
}

fn build_renderer(cli: &Cli, command: &Commands, number_format: NumberFormat) -> BoxedRenderer {
    let limit = match command {
        Commands::Show { limit } => *limit,
        _ => None,
    };
    if cli.json {
        Box::new(JsonRenderer::new(limit))
    } else if command.is_listing() {
        Box::new(TableRenderer::new(TableOptions {
            use_color: cli.use_color(),
            compact: cli.compact,
            number_format,
            limit,
        }))
    } else {
        Box::new(StatusRenderer::new(number_format))
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Ask on stderr, answer from the next input line. EOF or a read error declines.
fn confirm_reset<B: BufRead>(lines: &mut Lines<B>, state: &TrackerState) -> bool {
    eprint!(
        "Reset counter and all {} entries? This cannot be undone. [y/N] ",
        state.logs.len()
    );
    match lines.next() {
        Some(Ok(answer)) => is_affirmative(&answer),
        Some(Err(e)) => {
            warn!("Failed to read confirmation: {e}");
            false
        }
        None => {
            eprintln!();
            false
        }
    }
}

fn handle_add<S: Storage, R: Renderer>(
    controller: &mut TrackerController<S, R>,
    words: &[String],
) -> Result<(), AppError> {
    if controller.add_entry(&words.join(" "))? == Outcome::EmptyInput {
        eprintln!("Nothing recorded: description is empty.");
    }
    Ok(())
}

fn handle_reset<S: Storage, R: Renderer, B: BufRead>(
    controller: &mut TrackerController<S, R>,
    yes: bool,
    lines: &mut Lines<B>,
) -> Result<(), AppError> {
    let outcome = controller.reset_all(|state| yes || confirm_reset(lines, state))?;
    if outcome == Outcome::Declined {
        eprintln!("Reset cancelled.");
    }
    Ok(())
}

/// Each non-blank line is an entry; `:reset` confirms on the following line.
fn run_session<S: Storage, R: Renderer, B: BufRead>(
    controller: &mut TrackerController<S, R>,
    input: B,
    interactive: bool,
) -> Result<(), AppError> {
    let mut lines = input.lines();
    if interactive {
        eprintln!("Type a description and press Enter. `:reset` clears everything, `:quit` exits.");
    }
    loop {
        if interactive {
            eprint!("> ");
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(AppError::Input)?;
        let command = line.trim();

        if matches!(command, ":quit" | ":q") {
            break;
        }
        if command == SESSION_RESET {
            handle_reset(controller, false, &mut lines)?;
            continue;
        }

        controller.set_input(line);
        if controller.can_submit()
            && let Err(e) = controller.submit()
        {
            warn!("Entry not saved: {}", controller.input().trim());
            return Err(e.into());
        }
    }
    Ok(())
}

pub(crate) fn run(mut cli: Cli) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir().ok_or(AppError::NoDataDir)?,
    };

    let storage = open_storage(cli.backend(), &data_dir)?;
    let command = resolve_command(cli.command.take());
    let renderer = build_renderer(&cli, &command, number_format);
    let mut controller = TrackerController::new(PersistedStore::new(storage), renderer, timezone);

    let stdin = std::io::stdin();
    match command {
        Commands::Add { description } => handle_add(&mut controller, &description),
        Commands::Show { .. } | Commands::Count => {
            controller.render();
            Ok(())
        }
        Commands::Reset { yes } => handle_reset(&mut controller, yes, &mut stdin.lock().lines()),
        Commands::Session => {
            let interactive = stdin.is_terminal();
            run_session(&mut controller, stdin.lock(), interactive)
        }
    }
}
