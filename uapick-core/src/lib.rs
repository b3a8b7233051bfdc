//! `async fn serve(&self, Input) -> Result<Output, Error>`
//!
//! # uapick core
//!
//! The service abstractions shared by the uapick crates: the [`Service`]
//! and [`Layer`] traits, error utilities, and the per-client fixed window
//! rate limiter found in [`layer::limit`].
//!
//! ```
//! use uapick_core::layer::limit::{self, ClientKey};
//! use uapick_core::service::service_fn;
//! use uapick_core::{Layer, Service};
//! use std::convert::Infallible;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = limit::guard(2, Duration::from_secs(60))
//!     .unwrap()
//!     .layer(service_fn(|key: ClientKey| async move {
//!         Ok::<_, Infallible>(format!("hello {key}"))
//!     }));
//!
//! let key = ClientKey::from("127.0.0.1");
//! assert_eq!("hello 127.0.0.1", service.serve(key.clone()).await.unwrap());
//! assert!(service.serve(key.clone()).await.is_ok());
//! assert!(service.serve(key).await.is_err());
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;

pub mod service;
pub use service::Service;

pub mod layer;
pub use layer::Layer;
