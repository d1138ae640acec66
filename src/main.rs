mod cli;
mod db;
mod error;
mod fmt;
mod input;
mod logging;
mod models;
mod settings;
mod store;
mod tui;
mod window;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let data_dir = settings::resolve_data_dir(cli.data_dir.as_deref());

    let result = logging::init_logging(&data_dir).and_then(|()| match cli.command {
        None => cli::open::run(&data_dir),
        Some(Commands::Init) => cli::init::run(&data_dir),
        Some(Commands::Add {
            description,
            amount,
            category,
        }) => cli::ledger::add(&data_dir, &description, &amount, &category),
        Some(Commands::List) => cli::ledger::list(&data_dir),
        Some(Commands::Delete { id }) => cli::ledger::delete(&data_dir, id),
        Some(Commands::Totals) => cli::ledger::totals(&data_dir),
        Some(Commands::Status) => cli::status::run(&data_dir),
        Some(Commands::Demo) => cli::demo::run(&data_dir),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
