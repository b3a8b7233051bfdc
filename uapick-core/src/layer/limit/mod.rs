//! A middleware that limits inputs based on a [`Policy`].
//!
//! See [`Limit`], and [`guard`] for the per-client fixed window limiter.

use crate::Service;
use crate::error::BoxError;
use into_output::RejectionIntoOutput as _;
use std::time::Duration;

pub mod policy;
use policy::FixedWindowCounter;
#[doc(inline)]
pub use policy::{FixedWindowPolicy, InvalidLimit, Policy, PolicyOutput, RateLimited};

mod key;
#[doc(inline)]
pub use key::{ClientKey, ExtractClientKey, FromInput, HasClientKey};

mod layer;
#[doc(inline)]
pub use layer::LimitLayer;

mod into_output;
#[doc(inline)]
pub use into_output::ErrorIntoOutputFn;

/// Create a [`LimitLayer`] allowing each client at most `max_requests`
/// inputs per `window`.
///
/// Inputs identify their client through [`HasClientKey`].
/// Rejected inputs fail with a [`RateLimited`] error
/// and never reach the wrapped service.
pub fn guard(
    max_requests: usize,
    window: Duration,
) -> Result<LimitLayer<FixedWindowPolicy>, InvalidLimit> {
    Ok(LimitLayer::new(FixedWindowPolicy::try_new(
        max_requests,
        window,
    )?))
}

/// Same as [`guard`], but deriving the client of an input
/// using the given [`ExtractClientKey`].
pub fn guard_with<K>(
    max_requests: usize,
    window: Duration,
    extractor: K,
) -> Result<LimitLayer<FixedWindowPolicy<K>>, InvalidLimit> {
    let counter = FixedWindowCounter::try_new(max_requests, window)?;
    Ok(LimitLayer::new(FixedWindowPolicy::with_extractor(
        counter, extractor,
    )))
}

/// Limit inputs based on a [`Policy`].
///
/// Created by [`LimitLayer`].
#[derive(Debug, Clone)]
pub struct Limit<S, P, F = ()> {
    inner: S,
    policy: P,
    error_into_output: F,
}

impl<S, P, F> Limit<S, P, F> {
    /// The policy guarding the underlying service.
    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<S, P, Input> Service<Input> for Limit<S, P, ()>
where
    S: Service<Input, Error: Into<BoxError>>,
    P: Policy<Input, Error: Into<BoxError>>,
    Input: Send + 'static,
{
    type Output = S::Output;
    type Error = BoxError;

    async fn serve(&self, input: Input) -> Result<Self::Output, Self::Error> {
        let result = self.policy.check(input).await;
        match result.output {
            PolicyOutput::Ready(guard) => {
                let _guard = guard;
                self.inner.serve(result.input).await.map_err(Into::into)
            }
            PolicyOutput::Abort(err) => Err(err.into()),
        }
    }
}

impl<S, P, F, Input, FnOutput, FnError> Service<Input> for Limit<S, P, ErrorIntoOutputFn<F>>
where
    S: Service<Input>,
    P: Policy<Input>,
    F: Fn(P::Error) -> Result<FnOutput, FnError> + Send + Sync + 'static,
    FnOutput: Into<S::Output> + Send + 'static,
    FnError: Into<S::Error> + Send + 'static,
    Input: Send + 'static,
{
    type Output = S::Output;
    type Error = S::Error;

    async fn serve(&self, input: Input) -> Result<Self::Output, Self::Error> {
        let result = self.policy.check(input).await;
        match result.output {
            PolicyOutput::Ready(guard) => {
                let _guard = guard;
                self.inner.serve(result.input).await
            }
            PolicyOutput::Abort(err) => match self.error_into_output.rejection_into_output(err) {
                Ok(output) => Ok(output.into()),
                Err(err) => Err(err.into()),
            },
        }
    }
}
