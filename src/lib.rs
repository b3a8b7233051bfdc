//! Random, rate limited selection of common user agents.
//!
//! `uapick` bundles two building blocks:
//!
//! - [`catalog`]: a [`CatalogManager`](catalog::CatalogManager) owning an
//!   immutable desktop and mobile catalog of user agents, handing out copies
//!   and uniformly random picks drawn from the operating system random source;
//! - [`layer::limit`]: a per-client fixed window rate limiter, usable as a
//!   [`Layer`] around any [`Service`], e.g. a request handler picking user agents.
//!
//! # Examples
//!
//! ```
//! use std::{convert::Infallible, sync::Arc, time::Duration};
//! use uapick::{Layer, Service, catalog::{CatalogManager, Category}};
//! use uapick::layer::limit::{self, ClientKey};
//! use uapick::service::service_fn;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let manager = Arc::new(CatalogManager::load_embedded().unwrap());
//! let service = limit::guard(1, Duration::from_secs(60))
//!     .unwrap()
//!     .layer(service_fn(move |(_, category): (ClientKey, Category)| {
//!         let manager = manager.clone();
//!         async move { manager.random_in(category) }
//!     }));
//!
//! let client = ClientKey::from("127.0.0.1");
//! let entry = service.serve((client.clone(), Category::Mobile)).await.unwrap();
//! assert!(!entry.text().is_empty());
//!
//! // second request within the same minute
//! assert!(service.serve((client, Category::Desktop)).await.is_err());
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[doc(inline)]
pub use ::uapick_core::{Layer, Service, error, layer, service};

#[doc(inline)]
pub use ::uapick_catalog as catalog;
