//! Process wide [`CatalogManager`] over the embedded catalogs.
//!
//! The manager is constructed on first use. Should that fail, the
//! construction error is kept and returned by every later call, there is
//! no retry.

use crate::{CatalogManager, ConstructionError, Entry, SelectionError};
use std::{fmt, sync::OnceLock};

static DEFAULT_MANAGER: OnceLock<Result<CatalogManager, ConstructionError>> = OnceLock::new();

/// The process wide [`CatalogManager`], loaded from the embedded catalogs.
pub fn default_manager() -> Result<&'static CatalogManager, &'static ConstructionError> {
    DEFAULT_MANAGER
        .get_or_init(|| {
            let result = CatalogManager::load_embedded();
            if let Err(err) = &result {
                tracing::error!("default user agent catalog manager: {err}");
            }
            result
        })
        .as_ref()
}

/// Error returned by the functions operating on the [`default_manager`].
#[derive(Debug)]
pub enum DefaultManagerError {
    /// The default manager failed to initialize.
    Init(&'static ConstructionError),
    /// The selection itself failed.
    Selection(SelectionError),
}

impl fmt::Display for DefaultManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(err) => write!(f, "default catalog manager not initialized: {err}"),
            Self::Selection(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for DefaultManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Init(err) => Some(*err),
            Self::Selection(err) => Some(err),
        }
    }
}

impl From<SelectionError> for DefaultManagerError {
    fn from(err: SelectionError) -> Self {
        Self::Selection(err)
    }
}

fn manager() -> Result<&'static CatalogManager, DefaultManagerError> {
    default_manager().map_err(DefaultManagerError::Init)
}

/// [`CatalogManager::all_desktop`] on the [`default_manager`].
pub fn all_desktop() -> Result<Vec<Entry>, DefaultManagerError> {
    Ok(manager()?.all_desktop())
}

/// [`CatalogManager::all_mobile`] on the [`default_manager`].
pub fn all_mobile() -> Result<Vec<Entry>, DefaultManagerError> {
    Ok(manager()?.all_mobile())
}

/// [`CatalogManager::random_desktop`] on the [`default_manager`].
pub fn random_desktop() -> Result<Entry, DefaultManagerError> {
    Ok(manager()?.random_desktop()?)
}

/// [`CatalogManager::random_mobile`] on the [`default_manager`].
pub fn random_mobile() -> Result<Entry, DefaultManagerError> {
    Ok(manager()?.random_mobile()?)
}

/// [`CatalogManager::random_any`] on the [`default_manager`].
pub fn random_any() -> Result<Entry, DefaultManagerError> {
    Ok(manager()?.random_any()?)
}

/// [`CatalogManager::random_desktop_text`] on the [`default_manager`].
pub fn random_desktop_text() -> Result<String, DefaultManagerError> {
    Ok(manager()?.random_desktop_text()?)
}

/// [`CatalogManager::random_mobile_text`] on the [`default_manager`].
pub fn random_mobile_text() -> Result<String, DefaultManagerError> {
    Ok(manager()?.random_mobile_text()?)
}

/// [`CatalogManager::random_any_text`] on the [`default_manager`].
pub fn random_any_text() -> Result<String, DefaultManagerError> {
    Ok(manager()?.random_any_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manager_is_created_once() {
        let first = default_manager().unwrap();
        let second = default_manager().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn convenience_functions_use_the_default_manager() {
        let desktop = all_desktop().unwrap();
        let mobile = all_mobile().unwrap();
        assert_eq!(default_manager().unwrap().all_desktop(), desktop);

        assert!(desktop.contains(&random_desktop().unwrap()));
        assert!(mobile.contains(&random_mobile().unwrap()));

        let any = random_any().unwrap();
        assert!(desktop.contains(&any) || mobile.contains(&any));

        let text = random_desktop_text().unwrap();
        assert!(desktop.iter().any(|entry| entry.text() == text));
        let text = random_mobile_text().unwrap();
        assert!(mobile.iter().any(|entry| entry.text() == text));
        let text = random_any_text().unwrap();
        assert!(desktop.iter().chain(&mobile).any(|entry| entry.text() == text));
    }
}
