//! Concurrent clients picking through one rate limited service.
//!
//! Every client runs as its own task with its own key, sharing a single
//! [`CatalogManager`](uapick_catalog::CatalogManager) and limiter. Each accepted pick is checked to be a
//! catalog member.

use clap::Args;
use std::{
    collections::HashSet,
    io::Write as _,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::task::JoinSet;
use uapick_catalog::{Category, DeviceKind, Entry};
use uapick_core::{
    Service,
    error::{BoxError, ErrorContext as _, OpaqueError},
    layer::limit::ClientKey,
};

use super::{Selection, SelectionInput, classify, selection_service};
use crate::config::{CatalogArgs, LimitArgs};

#[derive(Debug, Args)]
/// run concurrent clients against one shared, rate limited catalog manager
pub struct CliCommandStress {
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=65_536))]
    /// number of concurrent clients
    clients: u32,

    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    /// number of picks per client
    requests: u32,

    #[command(flatten)]
    limits: LimitArgs,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    accepted: u64,
    limited: u64,
}

/// run the stress test, failing if any pick falls outside the catalogs
pub async fn run(cfg: CliCommandStress, catalogs: &CatalogArgs) -> Result<(), BoxError> {
    let manager = Arc::new(
        catalogs
            .load_manager()
            .context("load user agent catalogs")?,
    );
    let members: Arc<HashSet<String>> = Arc::new(
        DeviceKind::ALL
            .into_iter()
            .flat_map(|device| manager.all(device))
            .map(Entry::into_text)
            .collect(),
    );
    let service = Arc::new(
        selection_service(manager, &cfg.limits).context("create selection service")?,
    );

    tracing::info!(
        clients = cfg.clients,
        requests = cfg.requests,
        max_requests = cfg.limits.max_requests,
        window_secs = cfg.limits.window_secs,
        "start stress test",
    );
    let start = Instant::now();

    let mut tasks = JoinSet::new();
    for client in 0..cfg.clients {
        let key = ClientKey::from(format!("10.0.{}.{}", client / 256, client % 256));
        tasks.spawn(run_client(service.clone(), members.clone(), key, cfg.requests));
    }

    let mut total = Tally::default();
    while let Some(joined) = tasks.join_next().await {
        let tally = joined.context("join stress client")??;
        total.accepted += tally.accepted;
        total.limited += tally.limited;
    }
    let elapsed = start.elapsed();

    report(&cfg, total, elapsed).context("write stress report")?;
    Ok(())
}

async fn run_client<S>(
    service: Arc<S>,
    members: Arc<HashSet<String>>,
    key: ClientKey,
    requests: u32,
) -> Result<Tally, BoxError>
where
    S: Service<SelectionInput, Output = Entry, Error = BoxError>,
{
    const CATEGORIES: [Category; 3] = [Category::Desktop, Category::Mobile, Category::Any];

    let mut tally = Tally::default();
    for request in 0..requests {
        let category = CATEGORIES[request as usize % CATEGORIES.len()];
        let result = service.serve((key.clone(), category)).await;
        match classify(result)
            .map_err(OpaqueError::from_boxed)
            .with_context(|| format!("client {key}: pick {category} user agent"))?
        {
            Selection::Accepted(entry) => {
                if !members.contains(entry.text()) {
                    return Err(OpaqueError::from_display(format!(
                        "client {key}: picked user agent outside the catalogs: {}",
                        entry.text()
                    ))
                    .into());
                }
                tally.accepted += 1;
            }
            Selection::Limited(_) => tally.limited += 1,
        }
    }
    tracing::trace!(
        client.key = %key,
        accepted = tally.accepted,
        limited = tally.limited,
        "stress client done",
    );
    Ok(tally)
}

fn report(cfg: &CliCommandStress, total: Tally, elapsed: Duration) -> std::io::Result<()> {
    let expected = u64::from(cfg.clients) * u64::from(cfg.requests);
    tracing::info!(
        accepted = total.accepted,
        limited = total.limited,
        elapsed_ms = elapsed.as_millis(),
        "stress test done",
    );

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "clients:   {}", cfg.clients)?;
    writeln!(stdout, "requests:  {expected}")?;
    writeln!(stdout, "accepted:  {}", total.accepted)?;
    writeln!(stdout, "limited:   {}", total.limited)?;
    writeln!(stdout, "elapsed:   {}ms", elapsed.as_millis())?;
    stdout.flush()
}
