//! Map rendering adapters.
//!
//! Two interchangeable backends (Leaflet/OpenStreetMap and Google Maps)
//! implement one contract; the shell picks a variant explicitly rather than
//! probing for whichever runtime happens to be loaded.

pub mod google;
pub mod leaflet;
pub mod popup;

use crate::config::Config;
use crate::dataset::MapPoint;
use crate::error::Result;
use crate::geo::is_valid_coordinate;
use std::str::FromStr;

pub use google::GoogleMapsAdapter;
pub use leaflet::LeafletAdapter;

/// Which mapping backend renders the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapProvider {
    Leaflet,
    GoogleMaps,
}

impl MapProvider {
    pub fn name(&self) -> &'static str {
        match self {
            MapProvider::Leaflet => "OpenStreetMap with Leaflet",
            MapProvider::GoogleMaps => "Google Maps",
        }
    }
}

impl FromStr for MapProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "leaflet" | "osm" | "openstreetmap" => Ok(MapProvider::Leaflet),
            "google" | "googlemaps" | "gmaps" => Ok(MapProvider::GoogleMaps),
            _ => Err(format!("Unknown map provider: {}. Use leaflet or google", s)),
        }
    }
}

impl std::fmt::Display for MapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapProvider::Leaflet => write!(f, "leaflet"),
            MapProvider::GoogleMaps => write!(f, "google"),
        }
    }
}

/// Handle to one tracked marker. Handles are bulk-invalidated whenever the
/// adapter re-renders; there is no per-marker diffing.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    pub index: usize,
    pub point_id: String,
}

/// Current viewport decision for the rendered page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// Fit the view to all rendered markers.
    FitMarkers,
    /// Explicit center and zoom.
    Fixed { lat: f64, lng: f64, zoom: u8 },
}

/// The capability set both backends implement.
pub trait MapAdapter {
    fn provider(&self) -> MapProvider;

    /// Replaces any previously rendered marker set with one marker per valid
    /// point and fits the viewport to them (falling back to the regional
    /// default with no markers). Fails if the provider runtime is not
    /// configured.
    fn initialize(&mut self, points: &[MapPoint]) -> Result<()>;

    /// Tracks one new marker, or returns `None` without side effect when the
    /// point fails coordinate validation.
    fn add_marker(&mut self, point: &MapPoint) -> Option<MarkerHandle>;

    /// Drops all tracked markers and open-popup state. Idempotent.
    fn clear_markers(&mut self);

    /// Recenters the view; no-op before `initialize`.
    fn center_on(&mut self, lat: f64, lng: f64, zoom: u8);

    fn marker_count(&self) -> usize;

    /// Emits the self-contained HTML page for the current marker set.
    fn render_page(&self) -> Result<String>;
}

/// Explicit variant selection for the shell.
pub fn build_adapter(provider: MapProvider, config: &Config) -> Box<dyn MapAdapter> {
    match provider {
        MapProvider::Leaflet => Box::new(LeafletAdapter::new(config)),
        MapProvider::GoogleMaps => Box::new(GoogleMapsAdapter::new(config)),
    }
}

/// Shared marker-set bookkeeping for both adapters.
#[derive(Debug, Default)]
pub(crate) struct MarkerSet {
    markers: Vec<MapPoint>,
}

impl MarkerSet {
    pub fn add(&mut self, point: &MapPoint) -> Option<MarkerHandle> {
        if !is_valid_coordinate(point.lat, point.lng) {
            eprintln!(
                "⚠️  Invalid coordinates for {}: {}, {}",
                point.filename, point.lat, point.lng
            );
            return None;
        }

        let handle = MarkerHandle {
            index: self.markers.len(),
            point_id: point.id.clone(),
        };
        self.markers.push(point.clone());
        Some(handle)
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn points(&self) -> &[MapPoint] {
        &self.markers
    }
}
