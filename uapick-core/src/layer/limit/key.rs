//! Client keys used to bucket per-client limiter state.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// An opaque identifier of a client, e.g. its IP address.
///
/// Cheap to clone, as the key is shared behind an [`Arc`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientKey(Arc<str>);

impl ClientKey {
    /// Create a new [`ClientKey`].
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// View the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientKey {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for ClientKey {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<IpAddr> for ClientKey {
    fn from(value: IpAddr) -> Self {
        Self(value.to_string().into())
    }
}

/// Derives the [`ClientKey`] of an input.
///
/// Implemented for any `Fn(&Input) -> ClientKey`,
/// and by [`FromInput`] for inputs that carry their own key.
pub trait ExtractClientKey<Input>: Send + Sync + 'static {
    /// Return the key the input is to be limited under.
    fn extract_client_key(&self, input: &Input) -> ClientKey;
}

impl<F, Input> ExtractClientKey<Input> for F
where
    F: Fn(&Input) -> ClientKey + Send + Sync + 'static,
{
    fn extract_client_key(&self, input: &Input) -> ClientKey {
        (self)(input)
    }
}

/// Inputs which carry the [`ClientKey`] of the client that issued them.
pub trait HasClientKey {
    /// The key of the issuing client.
    fn client_key(&self) -> &ClientKey;
}

impl HasClientKey for ClientKey {
    fn client_key(&self) -> &ClientKey {
        self
    }
}

impl<T> HasClientKey for (ClientKey, T) {
    fn client_key(&self) -> &ClientKey {
        &self.0
    }
}

/// [`ExtractClientKey`] for inputs implementing [`HasClientKey`].
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct FromInput;

impl<Input: HasClientKey> ExtractClientKey<Input> for FromInput {
    fn extract_client_key(&self, input: &Input) -> ClientKey {
        input.client_key().clone()
    }
}
