//! Download dispatch: hand a resolved file id to the transport.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::reference::FileId;
use crate::{Error, Result};

/// Where downloaded bytes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The process's standard output stream.
    Stdout,
    /// A local filesystem path.
    Path(PathBuf),
}

impl Destination {
    /// Parse a CLI destination argument. `-` means stdout.
    pub fn parse(s: &str) -> Destination {
        if s == "-" {
            Destination::Stdout
        } else {
            Destination::Path(PathBuf::from(s))
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("-"),
            Destination::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// File retrieval capability of an established server session.
#[async_trait]
pub trait DownloadService: Send + Sync {
    /// Stream the file's bytes into the writer.
    ///
    /// Fails with [`Error::Validation`] when the server-side object
    /// vanished between resolution and download.
    async fn download(
        &self,
        file: FileId,
        dest: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<()>;
}

/// Invokes the download transport exactly once per resolved file.
pub struct Dispatcher<D> {
    transport: D,
}

impl<D: DownloadService> Dispatcher<D> {
    pub fn new(transport: D) -> Self {
        Self { transport }
    }

    /// Download `file` to the destination.
    ///
    /// The destination writer is flushed on every exit path, so no bytes
    /// are left buffered when the process exits. A transport validation
    /// failure is terminal: the object was deleted underneath us and a
    /// retry cannot succeed.
    pub async fn dispatch(&self, file: FileId, dest: &Destination) -> Result<()> {
        debug!(file = %file, dest = %dest, "dispatching download");
        match dest {
            Destination::Stdout => {
                let mut out = tokio::io::stdout();
                self.run(file, &mut out).await
            }
            Destination::Path(path) => {
                // The destination file is only created once resolution has
                // already succeeded; the handle closes on drop.
                let mut out = tokio::fs::File::create(path).await?;
                self.run(file, &mut out).await
            }
        }
    }

    async fn run<W>(&self, file: FileId, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Send + Unpin,
    {
        let result = self.transport.download(file, out).await;
        out.flush().await?;
        match result {
            Err(Error::Validation { message }) => Err(Error::RaceValidation { message }),
            other => other,
        }
    }
}
