use clap::Args;
use std::io::Write as _;
use uapick_catalog::DeviceKind;
use uapick_core::error::{BoxError, ErrorContext as _};

use crate::config::CatalogArgs;

#[derive(Debug, Args)]
/// list all entries of a catalog
pub struct CliCommandList {
    #[arg(short = 'd', long)]
    /// catalog to list: desktop or mobile
    device: DeviceKind,

    #[arg(long)]
    /// print the catalog as a JSON list
    json: bool,
}

/// print the catalog of the selected device
pub async fn run(cfg: CliCommandList, catalogs: &CatalogArgs) -> Result<(), BoxError> {
    let manager = catalogs
        .load_manager()
        .context("load user agent catalogs")?;
    let entries = manager.all(cfg.device);
    tracing::debug!(device = %cfg.device, entries = entries.len(), "list catalog");

    let mut stdout = std::io::stdout().lock();
    if cfg.json {
        serde_json::to_writer_pretty(&mut stdout, &entries).context("write catalog as json")?;
        writeln!(stdout).context("write catalog")?;
    } else {
        for entry in &entries {
            writeln!(stdout, "{:>6.2}  {}", entry.weight(), entry.text()).context("write catalog")?;
        }
    }
    stdout.flush().context("flush stdout")?;
    Ok(())
}
