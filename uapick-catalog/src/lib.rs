//! User agent catalogs for uapick.
//!
//! A [`CatalogManager`] owns two immutable catalogs of [`Entry`] values,
//! one for desktop and one for mobile user agents, loaded from a
//! [`CatalogSource`] and validated once at construction. After that it
//! hands out copies and uniformly random picks, drawn from the operating
//! system random source, to any number of concurrent callers.
//!
//! With the `embed-catalogs` feature (enabled by default) a pair of catalogs
//! ships with the crate, usable through [`CatalogManager::load_embedded`] or
//! the process wide [`default_manager`] and its convenience functions.
//!
//! # Examples
//!
//! ```
//! use uapick_catalog::{CatalogManager, CatalogSource, Category};
//!
//! let manager = CatalogManager::load(
//!     CatalogSource::from_static(br#"[{"ua": "Mozilla/5.0 (Windows NT 10.0; Win64; x64)", "pct": 42.0}]"#),
//!     CatalogSource::from_static(br#"[{"ua": "Mozilla/5.0 (iPhone; CPU iPhone OS 18_6)", "pct": 12.0}]"#),
//! )
//! .unwrap();
//!
//! let entry = manager.random_in(Category::Mobile).unwrap();
//! assert_eq!("Mozilla/5.0 (iPhone; CPU iPhone OS 18_6)", entry.text());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod device;
#[doc(inline)]
pub use device::{Category, DeviceKind};

mod entry;
#[doc(inline)]
pub use entry::{Entry, MAX_TEXT_LEN, MAX_WEIGHT, MIN_TEXT_LEN};

mod error;
#[doc(inline)]
pub use error::{ConstructionError, EntryViolation, SelectionError};

mod source;
#[doc(inline)]
pub use source::CatalogSource;

mod rng;
#[doc(inline)]
pub use rng::secure_index;

mod manager;
#[doc(inline)]
pub use manager::CatalogManager;

mod record;
#[doc(inline)]
pub use record::SelectionRecord;

#[cfg(feature = "embed-catalogs")]
mod embedded;

#[cfg(feature = "embed-catalogs")]
#[cfg_attr(docsrs, doc(cfg(feature = "embed-catalogs")))]
pub mod global;
#[cfg(feature = "embed-catalogs")]
#[doc(inline)]
pub use global::{DefaultManagerError, default_manager};
