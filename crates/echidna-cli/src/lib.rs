//! Terminal front-end for echidna.

pub mod command;
pub mod error;
pub mod session;

pub use command::Command;
pub use error::CliError;
pub use session::Session;
