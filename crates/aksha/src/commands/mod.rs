//! One module per group of subcommands.

pub mod account;
pub mod chat;
pub mod directory;
pub mod location;
pub mod session;
pub mod sos;
