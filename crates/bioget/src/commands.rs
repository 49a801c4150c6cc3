//! Command bodies for the CLI subcommands.

use tracing::info;

use bioget_core::{Destination, Dispatcher, ObjectReference, Resolver, Result};

use crate::cli::{Cli, DownloadArgs};
use crate::gateway::Gateway;

/// Run the download command: resolve the reference, then stream the file.
///
/// Parsing and resolution both complete before the destination is opened,
/// so resolution failures never leave partial output behind.
pub async fn run_download(cli: &Cli, args: &DownloadArgs) -> Result<()> {
    let reference = ObjectReference::parse(&args.object)?;
    let destination = Destination::parse(&args.filename);

    let gateway = Gateway::new(
        cli.server()?.clone(),
        cli.session_key.as_deref(),
        cli.connect_timeout(),
    )?;

    let resolver = Resolver::new(gateway.clone());
    let file = resolver.resolve(&reference).await?;

    let dispatcher = Dispatcher::new(gateway);
    dispatcher.dispatch(file, &destination).await?;

    info!(reference = %reference, file = %file, dest = %destination, "download complete");
    Ok(())
}
