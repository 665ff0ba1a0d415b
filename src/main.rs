use std::io;

use anyhow::Result;
use tracing::info;

use echidna_cli::Session;

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the board display.
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    info!("echidna starting");

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout());
    session.run()?;
    Ok(())
}
