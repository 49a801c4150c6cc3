//! bioget: CLI client for downloading original files from a bio-image
//! data server.
//!
//! The binary wires the bioget-core resolver and dispatcher to an HTTP
//! gateway implementation of the collaborator traits.

pub mod cli;
pub mod commands;
pub mod gateway;

pub use cli::{Cli, Command};
pub use gateway::Gateway;
