use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::CatalogConfig;
use crate::core::{Region, RegionGeometry, RegionId};
use crate::error::{OverlayError, OverlayResult};

use super::RegionCatalog;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Value>,
}

/// Parses a GeoJSON feature collection into a region catalog.
///
/// The region name comes from the first of `config.name_keys` holding a
/// non-empty string, else `config.placeholder_name`. Excluded names are
/// dropped. A repeated name keeps its first feature.
pub fn parse_feature_collection(input: &str, config: &CatalogConfig) -> OverlayResult<RegionCatalog> {
    let collection: FeatureCollection = serde_json::from_str(input)
        .map_err(|e| OverlayError::CatalogParse(format!("invalid feature collection: {e}")))?;

    let feature_count = collection.features.len();
    let mut catalog = RegionCatalog::default();
    let mut excluded = 0usize;
    for feature in collection.features {
        let id = region_name(feature.properties.as_ref(), config);
        if is_excluded(&id, &config.excluded_names) {
            excluded += 1;
            continue;
        }
        let geometry = feature
            .geometry
            .map_or_else(RegionGeometry::empty, RegionGeometry::new);
        if !catalog.insert(Region::new(id.clone(), geometry)) {
            warn!(region = %id, "duplicate region name in feature collection, keeping first");
        }
    }

    debug!(
        feature_count,
        excluded,
        region_count = catalog.len(),
        "parsed region catalog"
    );
    Ok(catalog)
}

pub(super) fn region_name(properties: Option<&Map<String, Value>>, config: &CatalogConfig) -> RegionId {
    let raw = properties.and_then(|properties| {
        config.name_keys.iter().find_map(|key| {
            properties
                .get(key)
                .and_then(Value::as_str)
                .filter(|name| !name.trim().is_empty())
        })
    });
    RegionId::normalized(raw, &config.placeholder_name)
}

fn is_excluded(id: &RegionId, excluded_names: &[String]) -> bool {
    let name = id.as_str().to_lowercase();
    excluded_names
        .iter()
        .any(|excluded| excluded.to_lowercase() == name)
}
