use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Display name of a region, used as its catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Trims `raw` and falls back to `placeholder` when nothing is left.
    #[must_use]
    pub fn normalized(raw: Option<&str>, placeholder: &str) -> Self {
        match raw.map(str::trim) {
            Some(name) if !name.is_empty() => Self(name.to_owned()),
            _ => Self(placeholder.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RegionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Region outline as delivered by the feature collection.
///
/// The interaction core never inspects it; hosts hand it to their map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionGeometry(serde_json::Value);

impl RegionGeometry {
    #[must_use]
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(serde_json::Value::Null)
    }

    #[must_use]
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub geometry: RegionGeometry,
}

impl Region {
    #[must_use]
    pub fn new(id: impl Into<RegionId>, geometry: RegionGeometry) -> Self {
        Self {
            id: id.into(),
            geometry,
        }
    }
}
