use std::sync::Arc;
use uapick_catalog::{CatalogManager, Category, Entry};
use uapick_core::{
    Layer as _, Service,
    error::BoxError,
    layer::limit::{self, ClientKey, InvalidLimit},
    service::service_fn,
};

use crate::config::LimitArgs;

pub mod list;
pub mod pick;
pub mod stress;

/// Input of the [`selection_service`]: the client asking, and the scope to pick from.
pub type SelectionInput = (ClientKey, Category);

/// A rate limited service picking random entries from the shared manager.
///
/// Rejected inputs fail with a [`limit::RateLimited`] error,
/// without touching the catalogs.
pub fn selection_service(
    manager: Arc<CatalogManager>,
    limits: &LimitArgs,
) -> Result<impl Service<SelectionInput, Output = Entry, Error = BoxError>, InvalidLimit> {
    let picker = service_fn(move |(_, category): SelectionInput| {
        let manager = manager.clone();
        async move { manager.random_in(category) }
    });
    Ok(limit::guard(limits.max_requests(), limits.window())?.layer(picker))
}

/// Outcome of one input served by the [`selection_service`].
pub enum Selection {
    Accepted(Entry),
    Limited(limit::RateLimited),
}

/// Split rate limit rejections from real failures.
pub fn classify(result: Result<Entry, BoxError>) -> Result<Selection, BoxError> {
    match result {
        Ok(entry) => Ok(Selection::Accepted(entry)),
        Err(err) => match err.downcast::<limit::RateLimited>() {
            Ok(limited) => Ok(Selection::Limited(*limited)),
            Err(err) => Err(err),
        },
    }
}
