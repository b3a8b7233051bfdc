//! Service type and utilities.
//!
//! A [`Service`] is anything that asynchronously turns an input into an
//! output or an error: a request handler, a catalog lookup, or a middleware
//! such as [`Limit`](crate::layer::limit::Limit) wrapping one of those.

mod svc;
#[doc(inline)]
pub use svc::Service;

mod handler;
pub use handler::{ServiceFn, service_fn};
