use std::fmt;

/// Turns a rejection of a [`Policy`](super::Policy) into
/// the result of the wrapped service.
pub(super) trait RejectionIntoOutput<Rejection>: Send + Sync + 'static {
    type Output: Send + 'static;
    type Error: Send + 'static;

    fn rejection_into_output(&self, rejection: Rejection) -> Result<Self::Output, Self::Error>;
}

/// Callback turning a policy rejection into a service result,
/// e.g. a "too many requests" response.
///
/// Created by [`LimitLayer::with_error_into_output_fn`](super::LimitLayer::with_error_into_output_fn).
#[derive(Clone)]
pub struct ErrorIntoOutputFn<F>(pub(super) F);

impl<F> fmt::Debug for ErrorIntoOutputFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorIntoOutputFn")
            .field(&std::any::type_name::<F>())
            .finish()
    }
}

impl<F, Rejection, Output, Error> RejectionIntoOutput<Rejection> for ErrorIntoOutputFn<F>
where
    F: Fn(Rejection) -> Result<Output, Error> + Send + Sync + 'static,
    Output: Send + 'static,
    Error: Send + 'static,
{
    type Output = Output;
    type Error = Error;

    fn rejection_into_output(&self, rejection: Rejection) -> Result<Output, Error> {
        (self.0)(rejection)
    }
}
