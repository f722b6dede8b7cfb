//! Region catalog: loads region shapes and normalizes their names.

mod geojson;
mod source;

pub use geojson::parse_feature_collection;
pub use source::{FsRegionSource, RegionSource};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::CatalogConfig;
use crate::core::{Region, RegionId};
use crate::error::{OverlayError, OverlayResult};

/// Regions keyed by display name, in feature-collection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCatalog {
    regions: IndexMap<RegionId, Region>,
}

impl RegionCatalog {
    /// Inserts `region` unless its name is already present. Returns `true` when inserted.
    pub fn insert(&mut self, region: Region) -> bool {
        if self.regions.contains_key(&region.id) {
            return false;
        }
        self.regions.insert(region.id.clone(), region);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RegionId> {
        self.regions.keys()
    }
}

impl FromIterator<Region> for RegionCatalog {
    fn from_iter<T: IntoIterator<Item = Region>>(iter: T) -> Self {
        let mut catalog = Self::default();
        for region in iter {
            catalog.insert(region);
        }
        catalog
    }
}

/// Inline message shown in place of the map when the catalog cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLoadNotice {
    pub headline: String,
    pub detail: String,
    pub retry_label: String,
}

impl CatalogLoadNotice {
    #[must_use]
    pub fn from_error(error: &OverlayError) -> Self {
        Self {
            headline: "Map data could not be loaded.".to_owned(),
            detail: format!("Error: {error}"),
            retry_label: "Try again".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogLoadState {
    Loading,
    Ready(RegionCatalog),
    Failed(CatalogLoadNotice),
}

impl CatalogLoadState {
    #[must_use]
    pub fn catalog(&self) -> Option<&RegionCatalog> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<&CatalogLoadNotice> {
        match self {
            Self::Failed(notice) => Some(notice),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}

/// Fetches the feature collection from a primary location with one fallback.
pub struct CatalogLoader<S: RegionSource> {
    source: S,
    config: CatalogConfig,
    state: CatalogLoadState,
}

impl<S: RegionSource> CatalogLoader<S> {
    #[must_use]
    pub fn new(source: S, config: CatalogConfig) -> Self {
        Self {
            source,
            config,
            state: CatalogLoadState::Loading,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CatalogLoadState {
        &self.state
    }

    /// Loads and parses the catalog, recording the outcome in [`Self::state`].
    pub fn load(&mut self) -> OverlayResult<&RegionCatalog> {
        self.state = CatalogLoadState::Loading;
        match self.fetch_and_parse() {
            Ok(catalog) => self.state = CatalogLoadState::Ready(catalog),
            Err(err) => {
                warn!(error = %err, "region catalog load failed");
                self.state = CatalogLoadState::Failed(CatalogLoadNotice::from_error(&err));
                return Err(err);
            }
        }
        self.state
            .catalog()
            .ok_or_else(|| OverlayError::InvalidData("catalog not ready after load".to_owned()))
    }

    /// Manual retry action offered by [`CatalogLoadNotice`].
    pub fn retry(&mut self) -> OverlayResult<&RegionCatalog> {
        debug!("retrying region catalog load");
        self.load()
    }

    #[must_use]
    pub fn into_state(self) -> CatalogLoadState {
        self.state
    }

    fn fetch_and_parse(&self) -> OverlayResult<RegionCatalog> {
        let body = match self.source.fetch(&self.config.primary_location) {
            Ok(body) => body,
            Err(primary_err) => {
                if self.config.fallback_location.is_empty() {
                    return Err(primary_err);
                }
                warn!(
                    error = %primary_err,
                    fallback = %self.config.fallback_location,
                    "primary catalog location failed, trying fallback"
                );
                self.source.fetch(&self.config.fallback_location)?
            }
        };
        parse_feature_collection(&body, &self.config)
    }
}
