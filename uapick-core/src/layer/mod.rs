//! Layer type and utilities.
//!
//! Layers are the abstraction of middleware: a [`Layer`] wraps an inner
//! [`Service`](crate::Service) and produces a new one. Modelled after
//! [tower-layer](https://docs.rs/tower-layer/0.3.0/tower_layer/trait.Layer.html).

/// A layer that produces a Layered service (middleware(inner service)).
pub trait Layer<S> {
    /// The service produced by the layer.
    type Service;

    /// Wrap the given service with the middleware, returning a new service.
    fn layer(&self, inner: S) -> Self::Service;
}

pub mod limit;
#[doc(inline)]
pub use limit::LimitLayer;
