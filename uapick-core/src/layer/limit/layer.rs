use std::fmt;

use super::{Limit, into_output::ErrorIntoOutputFn};
use crate::Layer;

/// Limit inputs based on a [`Policy`].
///
/// [`Policy`]: crate::layer::limit::Policy
pub struct LimitLayer<P, F = ()> {
    policy: P,
    error_into_output: F,
}

impl<P> LimitLayer<P> {
    /// Creates a new [`LimitLayer`] from a [`crate::layer::limit::Policy`].
    pub const fn new(policy: P) -> Self {
        Self {
            policy,
            error_into_output: (),
        }
    }

    /// Attach a function to this [`LimitLayer`] turning a policy rejection
    /// into a result compatible with the inner service's result.
    pub fn with_error_into_output_fn<F>(self, f: F) -> LimitLayer<P, ErrorIntoOutputFn<F>> {
        LimitLayer {
            policy: self.policy,
            error_into_output: ErrorIntoOutputFn(f),
        }
    }
}

impl<P, F> LimitLayer<P, F> {
    /// The policy shared by every service this layer produces.
    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<P: fmt::Debug, F: fmt::Debug> fmt::Debug for LimitLayer<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitLayer")
            .field("policy", &self.policy)
            .field("error_into_output", &self.error_into_output)
            .finish()
    }
}

impl<P: Clone, F: Clone> Clone for LimitLayer<P, F> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            error_into_output: self.error_into_output.clone(),
        }
    }
}

impl<S, P: Clone, F: Clone> Layer<S> for LimitLayer<P, F> {
    type Service = Limit<S, P, F>;

    fn layer(&self, inner: S) -> Self::Service {
        Limit {
            inner,
            policy: self.policy.clone(),
            error_into_output: self.error_into_output.clone(),
        }
    }
}
