//! `async fn(Input) -> Result<Output, Error>` as a [`Service`].

use std::fmt;
use std::marker::PhantomData;

use super::Service;

/// Create a [`ServiceFn`] from a function.
///
/// # Examples
///
/// ```
/// use uapick_core::service::{Service, service_fn};
/// use std::convert::Infallible;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = service_fn(|name: &'static str| async move { Ok::<_, Infallible>(name.len()) });
/// assert_eq!(5, service.serve("hello").await.unwrap());
/// # }
/// ```
pub fn service_fn<F, Input, Fut, O, E>(f: F) -> ServiceFn<F, Input>
where
    F: Fn(Input) -> Fut,
    Fut: Future<Output = Result<O, E>>,
{
    ServiceFn {
        hnd: f,
        _input: PhantomData,
    }
}

/// A [`ServiceFn`] is a [`Service`] implemented using a function.
///
/// Use [`service_fn`] to create one.
pub struct ServiceFn<F, Input> {
    hnd: F,
    _input: PhantomData<fn(Input)>,
}

impl<F, Input> fmt::Debug for ServiceFn<F, Input> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceFn").finish()
    }
}

impl<F: Clone, Input> Clone for ServiceFn<F, Input> {
    fn clone(&self) -> Self {
        Self {
            hnd: self.hnd.clone(),
            _input: PhantomData,
        }
    }
}

impl<F, Input, Fut, O, E> Service<Input> for ServiceFn<F, Input>
where
    F: Fn(Input) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, E>> + Send + 'static,
    Input: Send + 'static,
    O: Send + 'static,
    E: Send + 'static,
{
    type Output = O;
    type Error = E;

    fn serve(&self, input: Input) -> impl Future<Output = Result<O, E>> + Send + '_ {
        (self.hnd)(input)
    }
}
