use crate::EntryViolation;
use serde::{Deserialize, Serialize};

/// Minimum length of an entry text, in characters.
pub const MIN_TEXT_LEN: usize = 10;
/// Maximum length of an entry text, in characters.
pub const MAX_TEXT_LEN: usize = 1000;
/// Maximum weight of an entry.
pub const MAX_WEIGHT: f64 = 100.0;

/// A user agent string together with its usage share.
///
/// Serialized as `{"ua": "...", "pct": 12.5}`,
/// `text` and `weight` are accepted as field aliases.
///
/// The weight is metadata only: selection from a catalog is uniform
/// over its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "ua", alias = "text")]
    text: String,
    #[serde(rename = "pct", alias = "weight")]
    weight: f64,
}

impl Entry {
    /// Create a new [`Entry`].
    ///
    /// The entry is validated once it becomes part of a catalog.
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    /// The user agent string.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The usage share, as a percentage.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Consume the entry, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Check the entry against the catalog invariants.
    ///
    /// The text must be between [`MIN_TEXT_LEN`] and [`MAX_TEXT_LEN`]
    /// characters long, and the weight within `0..=`[`MAX_WEIGHT`].
    pub fn validate(&self) -> Result<(), EntryViolation> {
        if self.text.is_empty() {
            return Err(EntryViolation::EmptyText);
        }
        let len = self.text.chars().count();
        if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len) {
            return Err(EntryViolation::TextLength { len });
        }
        if !(0.0..=MAX_WEIGHT).contains(&self.weight) {
            return Err(EntryViolation::Weight {
                weight: self.weight,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIREFOX: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0";

    #[test]
    fn valid_entries() {
        for entry in [
            Entry::new(FIREFOX, 12.5),
            Entry::new(FIREFOX, 0.0),
            Entry::new(FIREFOX, 100.0),
            Entry::new("a".repeat(MIN_TEXT_LEN), 1.0),
            Entry::new("a".repeat(MAX_TEXT_LEN), 1.0),
        ] {
            assert_eq!(Ok(()), entry.validate(), "{entry:?}");
        }
    }

    #[test]
    fn invalid_entries() {
        assert_eq!(Err(EntryViolation::EmptyText), Entry::new("", 1.0).validate());
        assert_eq!(
            Err(EntryViolation::TextLength { len: 5 }),
            Entry::new("short", 1.0).validate()
        );
        assert_eq!(
            Err(EntryViolation::TextLength {
                len: MAX_TEXT_LEN + 1
            }),
            Entry::new("a".repeat(MAX_TEXT_LEN + 1), 1.0).validate()
        );
        assert!(matches!(
            Entry::new(FIREFOX, -1.0).validate(),
            Err(EntryViolation::Weight { .. })
        ));
        assert!(matches!(
            Entry::new(FIREFOX, 101.0).validate(),
            Err(EntryViolation::Weight { .. })
        ));
        assert!(matches!(
            Entry::new(FIREFOX, f64::NAN).validate(),
            Err(EntryViolation::Weight { .. })
        ));
    }

    #[test]
    fn text_length_counts_characters() {
        // 10 characters, 20 bytes
        let text = "éééééééééé";
        assert_eq!(Ok(()), Entry::new(text, 1.0).validate());
        assert_eq!(
            Err(EntryViolation::TextLength { len: 9 }),
            Entry::new(&text[2..], 1.0).validate()
        );
    }

    #[test]
    fn serde_field_names_and_aliases() {
        let entry: Entry = serde_json::from_str(&format!(r#"{{"ua":"{FIREFOX}","pct":3.5}}"#)).unwrap();
        assert_eq!(Entry::new(FIREFOX, 3.5), entry);

        let entry: Entry =
            serde_json::from_str(&format!(r#"{{"text":"{FIREFOX}","weight":3.5}}"#)).unwrap();
        assert_eq!(Entry::new(FIREFOX, 3.5), entry);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(FIREFOX, value["ua"]);
        assert_eq!(Some(3.5), value["pct"].as_f64());
    }
}
