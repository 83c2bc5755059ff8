use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use tax_cli::form::FormError;
use tax_cli::{Cli, app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_config())?;
    debug!(command = ?cli.command, "starting");

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match app::run(&cli, stdin, &mut stdout) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast_ref::<FormError>() {
            Some(form_error) => {
                eprintln!("{}", form_error.details());
                Ok(ExitCode::FAILURE)
            }
            None => {
                error!(error = ?err, "command failed");
                Err(err)
            }
        },
    }
}
