//! Pick random user agents, as a rate limited client would.

use clap::Args;
use std::{io::Write as _, sync::Arc};
use uapick_catalog::{Category, SelectionRecord};
use uapick_core::{
    Service as _,
    error::{BoxError, ErrorContext as _, OpaqueError},
    layer::limit::ClientKey,
};

use super::{Selection, classify, selection_service};
use crate::config::{CatalogArgs, LimitArgs};

#[derive(Debug, Args)]
/// pick random user agents
pub struct CliCommandPick {
    #[arg(short = 'c', long, default_value_t = Category::Any)]
    /// catalog to pick from: desktop, mobile or any
    category: Category,

    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    /// number of user agents to pick
    count: u32,

    #[arg(long, conflicts_with = "json")]
    /// print the full entry, including its weight, as JSON
    full: bool,

    #[arg(long)]
    /// print a selection record per pick as JSON lines
    json: bool,

    #[arg(long, default_value = "127.0.0.1")]
    /// client the picks are made for, rate limited per client
    client: String,

    #[command(flatten)]
    limits: LimitArgs,
}

/// pick `count` user agents, reporting the picks that got rate limited
pub async fn run(cfg: CliCommandPick, catalogs: &CatalogArgs) -> Result<(), BoxError> {
    let manager = Arc::new(
        catalogs
            .load_manager()
            .context("load user agent catalogs")?,
    );
    let service = selection_service(manager, &cfg.limits).context("create selection service")?;
    let key = ClientKey::from(cfg.client.as_str());

    let mut limited = 0_u32;
    for _ in 0..cfg.count {
        let result = service.serve((key.clone(), cfg.category)).await;
        let entry = match classify(result)
            .map_err(OpaqueError::from_boxed)
            .context("pick user agent")?
        {
            Selection::Accepted(entry) => entry,
            Selection::Limited(err) => {
                tracing::warn!(client.key = %key, "pick rejected: {err}");
                limited += 1;
                continue;
            }
        };

        let line = if cfg.json {
            let record = SelectionRecord::new(entry.into_text(), cfg.category, &cfg.client, "pick");
            serde_json::to_string(&record).context("encode selection record")?
        } else if cfg.full {
            serde_json::to_string(&entry).context("encode entry")?
        } else {
            entry.into_text()
        };
        writeln!(std::io::stdout(), "{line}").context("write pick to stdout")?;
    }

    if limited > 0 {
        tracing::info!(
            limited,
            count = cfg.count,
            "some picks were rate limited, raise --max-requests to pick more",
        );
    }
    Ok(())
}
