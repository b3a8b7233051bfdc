//! Limit policies decide, per input, whether a [`super::Limit`]
//! lets it through to the wrapped service.

use std::fmt;

mod fixed_window;
#[doc(inline)]
pub use fixed_window::{FixedWindowCounter, FixedWindowPolicy, InvalidLimit, RateLimited};

/// The full result of a limit policy.
pub struct PolicyResult<Input, Guard, Error> {
    /// The input
    pub input: Input,
    /// The output part of the limit policy.
    pub output: PolicyOutput<Guard, Error>,
}

impl<Input: fmt::Debug, Guard: fmt::Debug, Error: fmt::Debug> fmt::Debug
    for PolicyResult<Input, Guard, Error>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyResult")
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}

/// The output part of a limit policy.
pub enum PolicyOutput<Guard, Error> {
    /// The input is allowed to proceed,
    /// and the guard is kept alive until the inner service completed.
    Ready(Guard),
    /// The input is not allowed to proceed, and should be aborted.
    Abort(Error),
}

impl<Guard: fmt::Debug, Error: fmt::Debug> fmt::Debug for PolicyOutput<Guard, Error> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(guard) => write!(f, "PolicyOutput::Ready({guard:?})"),
            Self::Abort(error) => write!(f, "PolicyOutput::Abort({error:?})"),
        }
    }
}

/// A limit [`Policy`] is used to determine whether an input is allowed to proceed.
pub trait Policy<Input>: Send + Sync + 'static {
    /// The guard type that is returned when the input is allowed to proceed.
    ///
    /// See [`PolicyOutput::Ready`].
    type Guard: Send + 'static;
    /// The error type that is returned when the input is not allowed to proceed.
    ///
    /// See [`PolicyOutput::Abort`].
    type Error: Send + 'static;

    /// Check whether the input is allowed to proceed.
    ///
    /// The input is handed back as part of the [`PolicyResult`],
    /// so it can be passed on to the inner service.
    fn check(
        &self,
        input: Input,
    ) -> impl Future<Output = PolicyResult<Input, Self::Guard, Self::Error>> + Send + '_;
}
