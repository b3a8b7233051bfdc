//! Uniform index draws from the operating system random source.

use crate::{Category, SelectionError};
use rand::TryRngCore as _;
use rand::rngs::OsRng;
use uapick_core::error::OpaqueError;

/// Draw an index uniformly from `0..n`.
///
/// Each draw reads a fresh `u64` from the operating system's
/// cryptographically secure random source. Draws falling in the final
/// partial zone of the `u64` range are rejected and redrawn, so every
/// index is equally likely.
///
/// # Errors
///
/// [`SelectionError::EmptyCatalog`] (for [`Category::Any`]) if `n` is zero,
/// and [`SelectionError::RandomSource`] if the random source fails.
/// There is no fallback to a weaker generator.
pub fn secure_index(n: usize) -> Result<usize, SelectionError> {
    let mut rng = OsRng;
    uniform_index(n, || rng.try_next_u64().map_err(OpaqueError::from_std))
}

/// [`secure_index`] drawing from the given `u64` source.
pub(crate) fn uniform_index<F>(n: usize, mut next_u64: F) -> Result<usize, SelectionError>
where
    F: FnMut() -> Result<u64, OpaqueError>,
{
    if n == 0 {
        return Err(SelectionError::EmptyCatalog {
            category: Category::Any,
        });
    }
    let n = n as u64;
    // 2^64 mod n
    let rem = (u64::MAX % n + 1) % n;
    loop {
        let value = next_u64().map_err(SelectionError::RandomSource)?;
        // accept everything below 2^64 - rem, a multiple of n
        if rem == 0 || value < 0u64.wrapping_sub(rem) {
            return Ok((value % n) as usize);
        }
        tracing::trace!(value, n, "secure index: rejected draw from partial zone");
    }
}
