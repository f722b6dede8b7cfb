use std::cell::RefCell;
use std::collections::HashMap;

use choropleth_rs::api::CatalogConfig;
use choropleth_rs::catalog::{
    CatalogLoadState, CatalogLoader, FsRegionSource, RegionSource, parse_feature_collection,
};
use choropleth_rs::error::{OverlayError, OverlayResult};

const COUNTRIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "type": "Feature", "properties": { "ADMIN": "Norway" },
          "geometry": { "type": "Polygon", "coordinates": [[[5.0, 58.0], [10.0, 58.0], [10.0, 62.0], [5.0, 58.0]]] } },
        { "type": "Feature", "properties": { "name": "Chile" }, "geometry": null },
        { "type": "Feature", "properties": { "ADMIN": "Antarctica" }, "geometry": null },
        { "type": "Feature", "properties": {}, "geometry": null },
        { "type": "Feature", "properties": { "ADMIN": "Norway" }, "geometry": null }
    ]
}"#;

#[derive(Default)]
struct MemorySource {
    documents: HashMap<String, String>,
    fetches: RefCell<Vec<String>>,
}

impl MemorySource {
    fn with(mut self, location: &str, body: &str) -> Self {
        self.documents.insert(location.to_owned(), body.to_owned());
        self
    }
}

impl RegionSource for MemorySource {
    fn fetch(&self, location: &str) -> OverlayResult<String> {
        self.fetches.borrow_mut().push(location.to_owned());
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| OverlayError::CatalogLoad {
                location: location.to_owned(),
                reason: "404 Not Found".to_owned(),
            })
    }
}

#[test]
fn parse_normalizes_names_and_drops_excluded_regions() {
    let catalog =
        parse_feature_collection(COUNTRIES, &CatalogConfig::default()).expect("valid collection");

    let names: Vec<&str> = catalog.ids().map(|id| id.as_str()).collect();
    assert_eq!(names, vec!["Norway", "Chile", "Unknown region"]);
    assert!(!catalog.contains("Antarctica"));
    assert!(!catalog.get("Norway").expect("norway").geometry.is_empty());
    assert!(catalog.get("Chile").expect("chile").geometry.is_empty());
}

#[test]
fn exclusion_list_is_configurable() {
    let config = CatalogConfig {
        excluded_names: vec!["NORWAY".to_owned()],
        ..CatalogConfig::default()
    };
    let catalog = parse_feature_collection(COUNTRIES, &config).expect("valid collection");

    assert!(!catalog.contains("Norway"));
    assert!(catalog.contains("Antarctica"));
}

#[test]
fn malformed_documents_are_parse_errors() {
    let err = parse_feature_collection("{\"features\": 3}", &CatalogConfig::default())
        .expect_err("must fail");
    assert!(matches!(err, OverlayError::CatalogParse(_)));
}

#[test]
fn loader_uses_primary_location_first() {
    let source = MemorySource::default().with("../data/countries.geojson", COUNTRIES);
    let mut loader = CatalogLoader::new(&source, CatalogConfig::default());

    let count = loader.load().expect("catalog").len();
    assert_eq!(count, 3);
    assert_eq!(source.fetches.borrow().len(), 1);
}

#[test]
fn loader_falls_back_to_secondary_location() {
    let source = MemorySource::default().with("countries.geojson", COUNTRIES);
    let mut loader = CatalogLoader::new(&source, CatalogConfig::default());

    assert!(loader.load().is_ok());
    assert_eq!(
        *source.fetches.borrow(),
        vec![
            "../data/countries.geojson".to_owned(),
            "countries.geojson".to_owned()
        ]
    );
    assert!(loader.state().catalog().is_some());
}

#[test]
fn failed_load_exposes_notice_and_retry_recovers() {
    let mut source = MemorySource::default();
    {
        let mut loader = CatalogLoader::new(&source, CatalogConfig::default());
        assert!(loader.load().is_err());

        let notice = loader.state().notice().expect("failure notice");
        assert_eq!(notice.headline, "Map data could not be loaded.");
        assert_eq!(notice.retry_label, "Try again");
        assert!(notice.detail.starts_with("Error: "));
        assert!(notice.detail.contains("404 Not Found"));
    }

    source = source.with("countries.geojson", COUNTRIES);
    let mut loader = CatalogLoader::new(&source, CatalogConfig::default());
    assert!(loader.load().is_ok());
    loader.retry().expect("retry succeeds");
    assert!(matches!(loader.into_state(), CatalogLoadState::Ready(_)));
}

#[test]
fn filesystem_source_reads_relative_to_root() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("countries.geojson"), COUNTRIES).expect("write fixture");

    let source = FsRegionSource::new(dir.path());
    let mut loader = CatalogLoader::new(source, CatalogConfig::default());
    let catalog = loader.load().expect("fallback file");
    assert!(catalog.contains("Chile"));

    let missing = FsRegionSource::new(dir.path()).fetch("nope.geojson");
    assert!(matches!(missing, Err(OverlayError::CatalogLoad { .. })));
}
