use crate::{Category, DeviceKind};
use std::{fmt, path::PathBuf};
use uapick_core::error::OpaqueError;

/// A catalog entry violating one of the catalog invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryViolation {
    /// The text is empty.
    EmptyText,
    /// The text length, in characters, is out of bounds.
    TextLength {
        /// Actual length of the text.
        len: usize,
    },
    /// The weight is not a percentage.
    Weight {
        /// Actual weight of the entry.
        weight: f64,
    },
}

impl fmt::Display for EntryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => f.write_str("user agent text is empty"),
            Self::TextLength { len } => write!(
                f,
                "user agent text length {len} is not within {}..={}",
                crate::MIN_TEXT_LEN,
                crate::MAX_TEXT_LEN,
            ),
            Self::Weight { weight } => write!(
                f,
                "weight {weight} is not within 0..={}",
                crate::MAX_WEIGHT
            ),
        }
    }
}

impl std::error::Error for EntryViolation {}

/// Failure to construct a [`CatalogManager`](crate::CatalogManager).
///
/// Construction is all or nothing, none of these leave a partial manager behind.
#[derive(Debug)]
pub enum ConstructionError {
    /// The catalog source path is empty, missing or unreadable.
    SourceNotFound {
        /// Catalog the source was meant for.
        device: DeviceKind,
        /// Path that could not be read.
        path: PathBuf,
    },
    /// The catalog source is not a JSON list of entries.
    Parse {
        /// Catalog the source was meant for.
        device: DeviceKind,
        /// Underlying decode error.
        source: serde_json::Error,
    },
    /// An entry of the catalog is invalid.
    InvalidEntry {
        /// Catalog containing the entry.
        device: DeviceKind,
        /// Position of the entry within its catalog.
        index: usize,
        /// The invariant the entry violates.
        violation: EntryViolation,
    },
    /// Both catalogs are empty.
    NoEntries,
}

impl ConstructionError {
    /// Returns `true` if a catalog source could not be found,
    /// as opposed to being found but invalid.
    #[must_use]
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }

    /// The catalog the error relates to, if any.
    #[must_use]
    pub fn device(&self) -> Option<DeviceKind> {
        match self {
            Self::SourceNotFound { device, .. }
            | Self::Parse { device, .. }
            | Self::InvalidEntry { device, .. } => Some(*device),
            Self::NoEntries => None,
        }
    }
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound { device, path } => write!(
                f,
                "{device} catalog: source not found at '{}'",
                path.display()
            ),
            Self::Parse { device, source } => {
                write!(f, "{device} catalog: invalid catalog data: {source}")
            }
            Self::InvalidEntry {
                device,
                index,
                violation,
            } => write!(f, "{device} catalog: entry #{index}: {violation}"),
            Self::NoEntries => f.write_str("desktop and mobile catalogs are both empty"),
        }
    }
}

impl std::error::Error for ConstructionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::InvalidEntry { violation, .. } => Some(violation),
            Self::SourceNotFound { .. } | Self::NoEntries => None,
        }
    }
}

/// Failure to select a random entry.
#[derive(Debug)]
pub enum SelectionError {
    /// The catalog in scope has no entries.
    EmptyCatalog {
        /// Scope of the failed selection.
        category: Category,
    },
    /// The operating system random source failed.
    RandomSource(OpaqueError),
}

impl SelectionError {
    /// Returns `true` if the selection failed because
    /// there was nothing to select from.
    #[must_use]
    pub fn is_empty_catalog(&self) -> bool {
        matches!(self, Self::EmptyCatalog { .. })
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog { category } => write!(f, "{category} catalog is empty"),
            Self::RandomSource(err) => write!(f, "random source failure: {err}"),
        }
    }
}

impl std::error::Error for SelectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RandomSource(err) => Some(err),
            Self::EmptyCatalog { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_error_messages_name_catalog_and_index() {
        let err = ConstructionError::InvalidEntry {
            device: DeviceKind::Mobile,
            index: 3,
            violation: EntryViolation::TextLength { len: 5 },
        };
        assert_eq!(
            "Mobile catalog: entry #3: user agent text length 5 is not within 10..=1000",
            err.to_string()
        );
        assert_eq!(Some(DeviceKind::Mobile), err.device());
        assert!(!err.is_source_not_found());

        let err = ConstructionError::SourceNotFound {
            device: DeviceKind::Desktop,
            path: PathBuf::from("missing.json"),
        };
        assert!(err.is_source_not_found());
        assert_eq!(
            "Desktop catalog: source not found at 'missing.json'",
            err.to_string()
        );
    }

    #[test]
    fn empty_catalog_message() {
        let err = SelectionError::EmptyCatalog {
            category: Category::Any,
        };
        assert!(err.is_empty_catalog());
        assert_eq!("random catalog is empty", err.to_string());
    }
}
