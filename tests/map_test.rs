//! Map adapter contract tests
//!
//! Both backends are exercised through the shared `MapAdapter` trait so the
//! contract stays identical across providers.

use graffiti_archive::config::Config;
use graffiti_archive::dataset::MapPoint;
use graffiti_archive::map::{build_adapter, MapAdapter, MapProvider};

fn test_config() -> Config {
    Config {
        google_maps_api_key: Some("test-key".to_string()),
        ..Config::default()
    }
}

fn adapters() -> Vec<Box<dyn MapAdapter>> {
    let config = test_config();
    vec![
        build_adapter(MapProvider::Leaflet, &config),
        build_adapter(MapProvider::GoogleMaps, &config),
    ]
}

fn point(id: &str, lat: f64, lng: f64) -> MapPoint {
    MapPoint {
        id: id.to_string(),
        url: format!("https://drive.google.com/uc?id={}&export=view", id),
        lat,
        lng,
        timestamp: "2024-11-02T10:30:00.000Z".to_string(),
        filename: format!("{}.jpg", id),
    }
}

#[test]
fn test_initialize_renders_one_marker_per_valid_point() {
    for mut adapter in adapters() {
        adapter
            .initialize(&[
                point("a", 39.47, -0.38),
                point("b", 39.48, -0.37),
                point("bad", 999.0, 0.0),
            ])
            .unwrap();

        assert_eq!(adapter.marker_count(), 2, "{}", adapter.provider().name());
    }
}

#[test]
fn test_clear_then_initialize_empty() {
    for mut adapter in adapters() {
        adapter.initialize(&[point("a", 39.47, -0.38)]).unwrap();
        adapter.clear_markers();
        adapter.initialize(&[]).unwrap();

        assert_eq!(adapter.marker_count(), 0);
        // Renders the regional default view without error.
        assert!(adapter.render_page().is_ok());
    }
}

#[test]
fn test_add_marker_out_of_range_returns_none() {
    for mut adapter in adapters() {
        adapter.initialize(&[point("a", 39.47, -0.38)]).unwrap();
        let before = adapter.marker_count();

        assert!(adapter.add_marker(&point("bad", 999.0, 0.0)).is_none());
        assert_eq!(adapter.marker_count(), before);
    }
}

#[test]
fn test_add_marker_returns_tracking_handle() {
    for mut adapter in adapters() {
        adapter.initialize(&[]).unwrap();

        let handle = adapter.add_marker(&point("a", 39.47, -0.38)).unwrap();
        assert_eq!(handle.index, 0);
        assert_eq!(handle.point_id, "a");
        assert_eq!(adapter.marker_count(), 1);
    }
}

#[test]
fn test_reinitialize_replaces_markers_in_bulk() {
    for mut adapter in adapters() {
        adapter
            .initialize(&[point("a", 39.47, -0.38), point("b", 39.48, -0.37)])
            .unwrap();
        adapter.initialize(&[point("c", 39.49, -0.36)]).unwrap();

        assert_eq!(adapter.marker_count(), 1);
        let page = adapter.render_page().unwrap();
        assert!(page.contains("c.jpg"));
        assert!(!page.contains("a.jpg"));
    }
}

#[test]
fn test_clear_markers_is_idempotent() {
    for mut adapter in adapters() {
        adapter.initialize(&[point("a", 39.47, -0.38)]).unwrap();
        adapter.clear_markers();
        adapter.clear_markers();
        assert_eq!(adapter.marker_count(), 0);
    }
}

#[test]
fn test_pages_share_popup_content() {
    let points = [point("plaza", 39.4699, -0.3763)];
    let mut pages = Vec::new();

    for mut adapter in adapters() {
        adapter.initialize(&points).unwrap();
        pages.push(adapter.render_page().unwrap());
    }

    // Identical detail panel on both providers.
    for page in &pages {
        assert!(page.contains("plaza.jpg"));
        assert!(page.contains("02/11/2024 10:30"));
        assert!(page.contains("39.469900, -0.376300"));
        assert!(page.contains("Ver imagen completa"));
    }
}

#[test]
fn test_google_without_key_is_a_runtime_error() {
    let mut adapter = build_adapter(MapProvider::GoogleMaps, &Config::default());
    let err = adapter.initialize(&[]).unwrap_err();
    assert!(matches!(
        err,
        graffiti_archive::error::GraffitiError::MapRuntime(_)
    ));
}
