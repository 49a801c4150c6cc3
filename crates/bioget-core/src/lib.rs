//! bioget-core: Shared library for resolving object references and
//! dispatching file downloads.
//!
//! This crate provides:
//! - Object reference parsing (`OriginalFile:2`, `Image:5`, bare ids)
//! - The reference resolver (reference -> downloadable file id)
//! - The download dispatcher (file id -> local path or stdout)
//! - Collaborator trait seams for the remote query and download services
//! - Error taxonomy with user-facing diagnostic codes
//! - Logging setup

pub mod error;
pub mod logging;
pub mod query;
pub mod reference;
pub mod resolver;
pub mod transfer;

pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat};
pub use query::{LookupScope, QueryParams, QueryService, Record};
pub use reference::{FileId, ObjectKind, ObjectReference};
pub use resolver::Resolver;
pub use transfer::{Destination, Dispatcher, DownloadService};
