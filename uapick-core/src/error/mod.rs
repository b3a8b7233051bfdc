//! Error utilities shared by the uapick crates.
//!
//! Library code returns concrete error enums. At the application edge
//! (the `uapick` binary, integration glue) errors are usually erased into a
//! [`BoxError`], optionally decorated with a human readable context via
//! [`ErrorContext`] or [`ErrorExt`].

use std::fmt::Display;

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

mod wrapper;
pub use wrapper::{ContextError, OpaqueError};
pub(crate) use wrapper::MessageError;

/// Extends the `Result` and `Option` types with methods for adding context to errors.
///
/// # Examples
///
/// ```
/// use uapick_core::error::ErrorContext;
///
/// let result = "hello".parse::<i32>().context("parse integer");
/// assert_eq!("parse integer: invalid digit found in string", result.unwrap_err().to_string());
/// ```
pub trait ErrorContext: private::SealedErrorContext {
    /// The resulting context type after adding context to the contained error.
    type Context;

    /// Add a static context to the contained error.
    fn context<M>(self, context: M) -> Self::Context
    where
        M: Display + Send + Sync + 'static;

    /// Lazily add a context to the contained error, if it exists.
    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    type Context = Result<T, ContextError>;

    fn context<M>(self, context: M) -> Self::Context
    where
        M: Display + Send + Sync + 'static,
    {
        self.map_err(|error| error.context(context))
    }

    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| error.context(context()))
    }
}

impl<T> ErrorContext for Option<T> {
    type Context = Result<T, ContextError>;

    fn context<M>(self, context: M) -> Self::Context
    where
        M: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| MessageError("Option is None").context(context))
    }

    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| MessageError("Option is None").context(context()))
    }
}

/// Extends the `Error` type with methods for working with errors.
///
/// # Examples
///
/// ```
/// use uapick_core::error::ErrorExt;
///
/// #[derive(Debug)]
/// struct CustomError;
///
/// impl std::fmt::Display for CustomError {
///     fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
///         write!(f, "custom error")
///     }
/// }
///
/// impl std::error::Error for CustomError {}
///
/// let error = CustomError.context("whoops");
/// assert_eq!("whoops: custom error", error.to_string());
/// ```
pub trait ErrorExt: private::SealedErrorExt {
    /// Wrap the error in a context.
    fn context<M>(self, context: M) -> ContextError
    where
        M: Display + Send + Sync + 'static;
}

impl<E> ErrorExt for E
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<M>(self, context: M) -> ContextError
    where
        M: Display + Send + Sync + 'static,
    {
        ContextError::new(context, self)
    }
}

mod private {
    pub trait SealedErrorContext {}

    impl<T, E> SealedErrorContext for Result<T, E> where E: std::error::Error + Send + Sync + 'static {}
    impl<T> SealedErrorContext for Option<T> {}

    pub trait SealedErrorExt {}

    impl<E> SealedErrorExt for E where E: std::error::Error + Send + Sync + 'static {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("boom")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn context_is_prefixed_to_the_message() {
        let err = Err::<(), _>(Boom).context("load catalog").unwrap_err();
        assert_eq!("load catalog: boom", err.to_string());
    }

    #[test]
    fn nested_context_keeps_the_source() {
        let err = Boom.context("inner").context("outer");
        assert_eq!("outer: inner: boom", err.to_string());
        let inner = std::error::Error::source(&err).unwrap();
        assert_eq!("inner: boom", inner.to_string());
        let root = std::error::Error::source(inner).unwrap();
        assert!(root.downcast_ref::<Boom>().is_some());
    }

    #[test]
    fn option_none_becomes_an_error() {
        let err = None::<u8>.with_context(|| format!("missing {}", "value")).unwrap_err();
        assert_eq!("missing value: Option is None", err.to_string());
    }

    #[test]
    fn context_error_can_be_boxed() {
        let err: BoxError = Boom.context("boxed").into();
        assert_eq!("boxed: boom", err.to_string());
    }
}
