use crate::{
    CatalogSource, Category, ConstructionError, DeviceKind, Entry, SelectionError, secure_index,
};
use parking_lot::RwLock;

#[derive(Debug)]
struct Catalogs {
    desktop: Vec<Entry>,
    mobile: Vec<Entry>,
}

impl Catalogs {
    fn get(&self, device: DeviceKind) -> &[Entry] {
        match device {
            DeviceKind::Desktop => &self.desktop,
            DeviceKind::Mobile => &self.mobile,
        }
    }
}

/// Owner of the desktop and mobile catalogs.
///
/// Both catalogs are loaded and validated once at construction and never
/// change afterwards. All operations take `&self` and are safe to call
/// from many threads at once, e.g. through an `Arc<CatalogManager>`.
///
/// Random selections are uniform over the entries in scope and draw from
/// the operating system random source (see [`secure_index`]). The
/// [`Entry::weight`] is not taken into account.
///
/// # Examples
///
/// ```
/// use uapick_catalog::{CatalogManager, Entry};
///
/// let manager = CatalogManager::from_entries(
///     vec![Entry::new("Mozilla/5.0 (X11; Linux x86_64)", 60.0)],
///     vec![],
/// )
/// .unwrap();
///
/// assert_eq!("Mozilla/5.0 (X11; Linux x86_64)", manager.random_any_text().unwrap());
/// assert!(manager.random_mobile().unwrap_err().is_empty_catalog());
/// ```
#[derive(Debug)]
pub struct CatalogManager {
    catalogs: RwLock<Catalogs>,
}

impl CatalogManager {
    /// Read, parse and validate both catalogs from their sources.
    ///
    /// Fails on the first unreadable source, malformed source or invalid
    /// entry, or if both catalogs turn out to be empty.
    pub fn load(
        desktop: impl Into<CatalogSource>,
        mobile: impl Into<CatalogSource>,
    ) -> Result<Self, ConstructionError> {
        let desktop = desktop.into().read_entries(DeviceKind::Desktop)?;
        let mobile = mobile.into().read_entries(DeviceKind::Mobile)?;
        Self::from_entries(desktop, mobile)
    }

    #[cfg(feature = "embed-catalogs")]
    #[cfg_attr(docsrs, doc(cfg(feature = "embed-catalogs")))]
    /// Load the catalogs embedded in this crate.
    pub fn load_embedded() -> Result<Self, ConstructionError> {
        Self::load(
            CatalogSource::embedded(DeviceKind::Desktop),
            CatalogSource::embedded(DeviceKind::Mobile),
        )
    }

    /// Validate both catalogs and create a manager owning them.
    pub fn from_entries(desktop: Vec<Entry>, mobile: Vec<Entry>) -> Result<Self, ConstructionError> {
        for (device, entries) in [(DeviceKind::Desktop, &desktop), (DeviceKind::Mobile, &mobile)] {
            for (index, entry) in entries.iter().enumerate() {
                entry
                    .validate()
                    .map_err(|violation| ConstructionError::InvalidEntry {
                        device,
                        index,
                        violation,
                    })?;
            }
        }
        if desktop.is_empty() && mobile.is_empty() {
            return Err(ConstructionError::NoEntries);
        }

        tracing::debug!(
            desktop = desktop.len(),
            mobile = mobile.len(),
            "user agent catalogs loaded",
        );
        Ok(Self {
            catalogs: RwLock::new(Catalogs { desktop, mobile }),
        })
    }

    /// A copy of all desktop entries, in catalog order.
    #[must_use]
    pub fn all_desktop(&self) -> Vec<Entry> {
        self.all(DeviceKind::Desktop)
    }

    /// A copy of all mobile entries, in catalog order.
    #[must_use]
    pub fn all_mobile(&self) -> Vec<Entry> {
        self.all(DeviceKind::Mobile)
    }

    /// A copy of all entries of the given catalog, in catalog order.
    #[must_use]
    pub fn all(&self, device: DeviceKind) -> Vec<Entry> {
        self.catalogs.read().get(device).to_vec()
    }

    /// Number of entries in the given catalog.
    #[must_use]
    pub fn len(&self, device: DeviceKind) -> usize {
        self.catalogs.read().get(device).len()
    }

    /// Number of entries across both catalogs.
    #[must_use]
    pub fn total_len(&self) -> usize {
        let catalogs = self.catalogs.read();
        catalogs.desktop.len() + catalogs.mobile.len()
    }

    /// A random desktop entry.
    pub fn random_desktop(&self) -> Result<Entry, SelectionError> {
        self.random(DeviceKind::Desktop)
    }

    /// A random mobile entry.
    pub fn random_mobile(&self) -> Result<Entry, SelectionError> {
        self.random(DeviceKind::Mobile)
    }

    /// A random entry of the given catalog.
    pub fn random(&self, device: DeviceKind) -> Result<Entry, SelectionError> {
        let catalogs = self.catalogs.read();
        let entries = catalogs.get(device);
        if entries.is_empty() {
            return Err(SelectionError::EmptyCatalog {
                category: device.into(),
            });
        }
        let index = secure_index(entries.len())?;
        Ok(entries[index].clone())
    }

    /// A random entry of either catalog.
    ///
    /// Every entry of the union is equally likely,
    /// regardless of the size of its own catalog.
    pub fn random_any(&self) -> Result<Entry, SelectionError> {
        let catalogs = self.catalogs.read();
        let total = catalogs.desktop.len() + catalogs.mobile.len();
        if total == 0 {
            return Err(SelectionError::EmptyCatalog {
                category: Category::Any,
            });
        }
        let index = secure_index(total)?;
        let entry = match index.checked_sub(catalogs.desktop.len()) {
            None => &catalogs.desktop[index],
            Some(index) => &catalogs.mobile[index],
        };
        Ok(entry.clone())
    }

    /// A random entry within the given [`Category`].
    pub fn random_in(&self, category: Category) -> Result<Entry, SelectionError> {
        match category.device() {
            Some(device) => self.random(device),
            None => self.random_any(),
        }
    }

    /// The text of a random desktop entry.
    pub fn random_desktop_text(&self) -> Result<String, SelectionError> {
        self.random_desktop().map(Entry::into_text)
    }

    /// The text of a random mobile entry.
    pub fn random_mobile_text(&self) -> Result<String, SelectionError> {
        self.random_mobile().map(Entry::into_text)
    }

    /// The text of a random entry of either catalog.
    pub fn random_any_text(&self) -> Result<String, SelectionError> {
        self.random_any().map(Entry::into_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryViolation;
    use std::collections::HashSet;

    fn entries(prefix: &str, n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry::new(format!("Mozilla/5.0 ({prefix} {i})"), 1.0))
            .collect()
    }

    #[test]
    fn valid_lists_construct() {
        let desktop = entries("Desktop", 3);
        let mobile = entries("Mobile", 2);
        let manager = CatalogManager::from_entries(desktop.clone(), mobile.clone()).unwrap();

        assert_eq!(desktop, manager.all_desktop());
        assert_eq!(mobile, manager.all_mobile());
        assert_eq!(3, manager.len(DeviceKind::Desktop));
        assert_eq!(2, manager.len(DeviceKind::Mobile));
        assert_eq!(5, manager.total_len());
    }

    #[test]
    fn copies_are_isolated() {
        let manager = CatalogManager::from_entries(entries("Desktop", 2), vec![]).unwrap();

        let mut copy = manager.all_desktop();
        copy.clear();
        copy.push(Entry::new("Mozilla/5.0 (tampered)", 50.0));

        assert_eq!(entries("Desktop", 2), manager.all_desktop());
    }

    #[test]
    fn invalid_entries_fail_construction() {
        for (entry, expected) in [
            (Entry::new("", 1.0), EntryViolation::EmptyText),
            (Entry::new("short", 1.0), EntryViolation::TextLength { len: 5 }),
            (
                Entry::new("Mozilla/5.0 (X11)", -1.0),
                EntryViolation::Weight { weight: -1.0 },
            ),
            (
                Entry::new("Mozilla/5.0 (X11)", 101.0),
                EntryViolation::Weight { weight: 101.0 },
            ),
        ] {
            let mut mobile = entries("Mobile", 3);
            mobile.insert(1, entry);

            let err = CatalogManager::from_entries(entries("Desktop", 1), mobile).unwrap_err();
            match err {
                ConstructionError::InvalidEntry {
                    device,
                    index,
                    violation,
                } => {
                    assert_eq!(DeviceKind::Mobile, device);
                    assert_eq!(1, index);
                    assert_eq!(expected, violation);
                }
                err => panic!("unexpected error: {err}"),
            }
        }
    }

    #[test]
    fn both_empty_fails_construction() {
        assert!(matches!(
            CatalogManager::from_entries(vec![], vec![]),
            Err(ConstructionError::NoEntries)
        ));
    }

    #[test]
    fn single_empty_catalog_fails_on_selection() {
        let manager = CatalogManager::from_entries(vec![], entries("Mobile", 2)).unwrap();
        assert!(matches!(
            manager.random_desktop(),
            Err(SelectionError::EmptyCatalog {
                category: Category::Desktop
            })
        ));
        assert!(manager.random_desktop_text().unwrap_err().is_empty_catalog());
        assert!(manager.random_mobile().is_ok());
    }

    #[test]
    fn random_picks_are_members_and_cover_the_catalog() {
        let desktop = entries("Desktop", 5);
        let manager = CatalogManager::from_entries(desktop.clone(), vec![]).unwrap();

        let mut seen = HashSet::new();
        for _ in 0..(50 * desktop.len()) {
            let entry = manager.random_desktop().unwrap();
            assert!(desktop.contains(&entry));
            seen.insert(entry.into_text());
        }
        assert_eq!(desktop.len(), seen.len());
    }

    #[test]
    fn random_any_covers_the_union() {
        let desktop = entries("Desktop", 3);
        let mobile = entries("Mobile", 3);
        let manager = CatalogManager::from_entries(desktop.clone(), mobile.clone()).unwrap();

        let mut seen = HashSet::new();
        for _ in 0..300 {
            let text = manager.random_any_text().unwrap();
            assert!(
                desktop.iter().chain(&mobile).any(|entry| entry.text() == text),
                "{text}"
            );
            seen.insert(text);
        }
        assert_eq!(6, seen.len());
    }

    #[test]
    fn random_any_degenerates_to_the_non_empty_catalog() {
        let mobile = entries("Mobile", 4);
        let manager = CatalogManager::from_entries(vec![], mobile.clone()).unwrap();
        for _ in 0..100 {
            assert!(mobile.contains(&manager.random_any().unwrap()));
        }
    }

    #[test]
    fn random_in_dispatches_on_category() {
        let desktop = entries("Desktop", 2);
        let mobile = entries("Mobile", 2);
        let manager = CatalogManager::from_entries(desktop.clone(), mobile.clone()).unwrap();

        for _ in 0..20 {
            assert!(desktop.contains(&manager.random_in(Category::Desktop).unwrap()));
            assert!(mobile.contains(&manager.random_in(Category::Mobile).unwrap()));
            let any = manager.random_in(Category::Any).unwrap();
            assert!(desktop.contains(&any) || mobile.contains(&any));
        }
    }

    #[cfg(feature = "embed-catalogs")]
    #[test]
    fn embedded_catalogs_load() {
        let manager = CatalogManager::load_embedded().unwrap();
        assert!(manager.len(DeviceKind::Desktop) > 0);
        assert!(manager.len(DeviceKind::Mobile) > 0);
    }
}
