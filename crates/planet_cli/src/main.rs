//! `planet` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, open storage and run one planet command.
//! - Print JSON results to stdout and failures to stderr with stable codes.
//!
//! # Invariants
//! - Buffered log lines are flushed before the process exits.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use commands::{exit_code, Outcome};
use log::info;
use planet_core::db::open_db;
use planet_core::{PlanetService, SqlitePlanetRepository};

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = planet_core::init_logging(cli.log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let outcome = execute(&cli);
    match &outcome {
        Outcome::Ok(body) if !body.is_null() => println!("{body:#}"),
        Outcome::Ok(_) => {}
        Outcome::Failed { message, .. } => eprintln!("{message}"),
    }

    info!(
        "event=cli_exit module=cli status={} exit_code={}",
        if outcome.exit_code() == exit_code::OK { "ok" } else { "error" },
        outcome.exit_code()
    );
    planet_core::flush_logging();
    std::process::exit(outcome.exit_code());
}

fn execute(cli: &Cli) -> Outcome {
    let db_path = cli.db_path();
    info!(
        "event=cli_start module=cli status=start version={} db_path={}",
        planet_core::core_version(),
        db_path.display()
    );

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => return Outcome::failure(format!("failed to open database: {err}")),
    };
    let repo = match SqlitePlanetRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => return Outcome::failure(format!("failed to open repository: {err}")),
    };
    let service = PlanetService::new(repo);

    commands::run(&service, &cli.command)
}
