use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use uapick_core::error::OpaqueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Device class of a catalog.
pub enum DeviceKind {
    /// Personal Computers
    Desktop,
    /// Phones, Tablets and other mobile devices
    Mobile,
}

impl DeviceKind {
    /// All device kinds, in catalog order.
    pub const ALL: [Self; 2] = [Self::Desktop, Self::Mobile];

    /// Lowercase name of the device kind, as used in catalogs and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Mobile => "Mobile",
        }
    }
}

impl FromStr for DeviceKind {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("desktop") {
            Ok(Self::Desktop)
        } else if s.eq_ignore_ascii_case("mobile") {
            Ok(Self::Mobile)
        } else {
            Err(OpaqueError::from_display(format!("invalid device: {s}")))
        }
    }
}

impl Serialize for DeviceKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeviceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse::<Self>().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope of a random selection: one of the device catalogs,
/// or their union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Desktop catalog only.
    Desktop,
    /// Mobile catalog only.
    Mobile,
    /// Union of the desktop and mobile catalogs.
    Any,
}

impl Category {
    /// Lowercase name of the category.
    ///
    /// [`Category::Any`] is named `random`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Any => "random",
        }
    }

    /// The device catalog this category is restricted to, if any.
    #[must_use]
    pub fn device(&self) -> Option<DeviceKind> {
        match self {
            Self::Desktop => Some(DeviceKind::Desktop),
            Self::Mobile => Some(DeviceKind::Mobile),
            Self::Any => None,
        }
    }
}

impl From<DeviceKind> for Category {
    fn from(device: DeviceKind) -> Self {
        match device {
            DeviceKind::Desktop => Self::Desktop,
            DeviceKind::Mobile => Self::Mobile,
        }
    }
}

impl FromStr for Category {
    type Err = OpaqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("any") || s.eq_ignore_ascii_case("random") {
            return Ok(Self::Any);
        }
        match s.parse::<DeviceKind>() {
            Ok(device) => Ok(device.into()),
            Err(_) => Err(OpaqueError::from_display(format!("invalid category: {s}"))),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse::<Self>().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_kind_parses_case_insensitive() {
        for (input, expected) in [
            ("desktop", DeviceKind::Desktop),
            ("Desktop", DeviceKind::Desktop),
            ("MOBILE", DeviceKind::Mobile),
            ("mObIlE", DeviceKind::Mobile),
        ] {
            assert_eq!(expected, input.parse::<DeviceKind>().unwrap(), "{input}");
        }
        assert!("tablet".parse::<DeviceKind>().is_err());
        assert!("".parse::<DeviceKind>().is_err());
    }

    #[test]
    fn category_uses_random_for_the_union() {
        assert_eq!("random", Category::Any.to_string());
        assert_eq!(Category::Any, "any".parse::<Category>().unwrap());
        assert_eq!(Category::Any, "Random".parse::<Category>().unwrap());
        assert_eq!(Category::Mobile, "mobile".parse::<Category>().unwrap());
        assert_eq!(
            "invalid category: tv",
            "tv".parse::<Category>().unwrap_err().to_string()
        );
    }

    #[test]
    fn category_serde() {
        assert_eq!(r#""random""#, serde_json::to_string(&Category::Any).unwrap());
        assert_eq!(
            Category::Desktop,
            serde_json::from_str::<Category>(r#""desktop""#).unwrap()
        );
        assert_eq!(
            DeviceKind::Mobile,
            serde_json::from_str::<DeviceKind>(r#""Mobile""#).unwrap()
        );
    }
}
