use crate::{ConstructionError, DeviceKind, Entry};
use std::{borrow::Cow, fmt, path::PathBuf};

/// Where the entries of a catalog are read from.
///
/// Every source holds a JSON list of [`Entry`] objects.
#[derive(Clone)]
pub enum CatalogSource {
    /// In-memory JSON, e.g. data embedded in the binary.
    Bytes(Cow<'static, [u8]>),
    /// A JSON file on disk, read once at construction.
    Path(PathBuf),
}

impl CatalogSource {
    /// Create a source from a file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Create a source from static JSON bytes.
    #[must_use]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }

    /// Create a source from an owned JSON buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(Cow::Owned(bytes.into()))
    }

    #[cfg(feature = "embed-catalogs")]
    #[cfg_attr(docsrs, doc(cfg(feature = "embed-catalogs")))]
    /// The catalog data embedded in this crate for the given device.
    #[must_use]
    pub const fn embedded(device: DeviceKind) -> Self {
        Self::from_static(crate::embedded::catalog_bytes(device))
    }

    pub(crate) fn read_entries(&self, device: DeviceKind) -> Result<Vec<Entry>, ConstructionError> {
        let bytes = match self {
            Self::Bytes(bytes) => Cow::Borrowed(bytes.as_ref()),
            Self::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(ConstructionError::SourceNotFound {
                        device,
                        path: path.clone(),
                    });
                }
                match std::fs::read(path) {
                    Ok(bytes) => Cow::Owned(bytes),
                    Err(err) => {
                        tracing::debug!(
                            %device,
                            path = %path.display(),
                            "read catalog source: {err}",
                        );
                        return Err(ConstructionError::SourceNotFound {
                            device,
                            path: path.clone(),
                        });
                    }
                }
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| ConstructionError::Parse { device, source })
    }
}

impl fmt::Debug for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f
                .debug_tuple("CatalogSource::Bytes")
                .field(&format_args!("{} bytes", bytes.len()))
                .finish(),
            Self::Path(path) => f.debug_tuple("CatalogSource::Path").field(path).finish(),
        }
    }
}

impl From<PathBuf> for CatalogSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&'static [u8]> for CatalogSource {
    fn from(bytes: &'static [u8]) -> Self {
        Self::from_static(bytes)
    }
}

impl From<Vec<u8>> for CatalogSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn empty_path_is_not_found() {
        let err = CatalogSource::from_path("")
            .read_entries(DeviceKind::Desktop)
            .unwrap_err();
        assert!(err.is_source_not_found());
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogSource::from_path(dir.path().join("nope.json"))
            .read_entries(DeviceKind::Mobile)
            .unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::SourceNotFound {
                device: DeviceKind::Mobile,
                ..
            }
        ));
    }

    #[test]
    fn path_source_is_read_and_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"ua": "Mozilla/5.0 (X11; Linux x86_64)", "pct": 1.5}]"#)
            .unwrap();

        let entries = CatalogSource::from_path(file.path())
            .read_entries(DeviceKind::Desktop)
            .unwrap();
        assert_eq!(vec![Entry::new("Mozilla/5.0 (X11; Linux x86_64)", 1.5)], entries);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let cases: [&'static [u8]; 4] = [b"{", b"{}", b"[{\"ua\": 1}]", b""];
        for data in cases {
            let err = CatalogSource::from_static(data)
                .read_entries(DeviceKind::Desktop)
                .unwrap_err();
            assert!(
                matches!(err, ConstructionError::Parse { .. }),
                "{}: {err}",
                String::from_utf8_lossy(data)
            );
        }
    }

    #[test]
    fn debug_hides_the_payload() {
        let source = CatalogSource::from_bytes(b"[]".to_vec());
        assert_eq!("CatalogSource::Bytes(2 bytes)", format!("{source:?}"));
    }
}
