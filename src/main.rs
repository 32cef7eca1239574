mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod logging;
mod output;
mod store;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();
    let logger = logging::init_logging(cli.debug);

    let config = Config::load();
    let cli = cli.with_config(&config);
    if cli.debug
        && let Some(handle) = &logger
    {
        logging::enable_debug(handle);
    }

    if let Err(e) = app::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
