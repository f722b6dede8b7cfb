use std::path::PathBuf;

use crate::error::{OverlayError, OverlayResult};

/// Raw access to feature-collection documents by location.
pub trait RegionSource {
    fn fetch(&self, location: &str) -> OverlayResult<String>;
}

/// Reads locations as paths relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsRegionSource {
    root: PathBuf,
}

impl FsRegionSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RegionSource for FsRegionSource {
    fn fetch(&self, location: &str) -> OverlayResult<String> {
        let path = self.root.join(location);
        std::fs::read_to_string(&path).map_err(|e| OverlayError::CatalogLoad {
            location: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl<T: RegionSource + ?Sized> RegionSource for &T {
    fn fetch(&self, location: &str) -> OverlayResult<String> {
        (**self).fetch(location)
    }
}
