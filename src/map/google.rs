//! Google Maps backend.
//!
//! Same contract as the Leaflet adapter; requires a browser-side Maps API
//! key in the configuration.

use super::popup::popup_html;
use super::{MapAdapter, MapProvider, MarkerHandle, MarkerSet, Viewport};
use crate::config::Config;
use crate::dataset::MapPoint;
use crate::error::{GraffitiError, Result};
use serde::Serialize;

#[derive(Serialize)]
struct MarkerData {
    lat: f64,
    lng: f64,
    title: String,
    popup: String,
}

pub struct GoogleMapsAdapter {
    markers: MarkerSet,
    viewport: Viewport,
    initialized: bool,
    api_key: Option<String>,
    default_center: (f64, f64),
    default_zoom: u8,
}

impl GoogleMapsAdapter {
    pub fn new(config: &Config) -> Self {
        Self {
            markers: MarkerSet::default(),
            viewport: Viewport::Fixed {
                lat: config.map_center_lat,
                lng: config.map_center_lng,
                zoom: config.map_zoom,
            },
            initialized: false,
            api_key: config.google_maps_api_key.clone(),
            default_center: (config.map_center_lat, config.map_center_lng),
            default_zoom: config.map_zoom,
        }
    }

    fn require_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GraffitiError::MapRuntime(
                    "no Google Maps API key configured (set google_maps_api_key)".to_string(),
                )
            })
    }

    fn marker_json(&self) -> Result<String> {
        let data: Vec<MarkerData> = self
            .markers
            .points()
            .iter()
            .map(|point| MarkerData {
                lat: point.lat,
                lng: point.lng,
                title: format!("Graffiti: {}", point.filename),
                popup: popup_html(point),
            })
            .collect();

        Ok(serde_json::to_string(&data)?.replace("</", "<\\/"))
    }
}

impl MapAdapter for GoogleMapsAdapter {
    fn provider(&self) -> MapProvider {
        MapProvider::GoogleMaps
    }

    fn initialize(&mut self, points: &[MapPoint]) -> Result<()> {
        self.require_key()?;

        self.clear_markers();
        self.initialized = true;

        for point in points {
            self.add_marker(point);
        }

        self.viewport = if self.markers.is_empty() {
            Viewport::Fixed {
                lat: self.default_center.0,
                lng: self.default_center.1,
                zoom: self.default_zoom,
            }
        } else {
            Viewport::FitMarkers
        };

        Ok(())
    }

    fn add_marker(&mut self, point: &MapPoint) -> Option<MarkerHandle> {
        self.markers.add(point)
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn center_on(&mut self, lat: f64, lng: f64, zoom: u8) {
        if self.initialized {
            self.viewport = Viewport::Fixed { lat, lng, zoom };
        }
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn render_page(&self) -> Result<String> {
        if !self.initialized {
            return Err(GraffitiError::RenderFailed(
                "Google Maps adapter not initialized".to_string(),
            ));
        }
        let api_key = self.require_key()?;
        let markers = self.marker_json()?;

        let view_js = match self.viewport {
            Viewport::FitMarkers => concat!(
                "var bounds = new google.maps.LatLngBounds();\n",
                "  markersData.forEach(function (m) { bounds.extend({ lat: m.lat, lng: m.lng }); });\n",
                "  map.fitBounds(bounds);"
            )
            .to_string(),
            Viewport::Fixed { lat, lng, zoom } => format!(
                "map.setCenter({{ lat: {}, lng: {} }});\n  map.setZoom({});",
                lat, lng, zoom
            ),
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Archivo Graffitis DANA Valencia</title>
<style>
  html, body, #map {{ height: 100%; margin: 0; }}
  .popup-content {{ max-width: 280px; text-align: center; }}
  .popup-content img {{ max-width: 260px; max-height: 180px; border-radius: 8px; }}
  .popup-title {{ font-weight: bold; font-size: 14px; margin: 5px 0; }}
  .popup-meta {{ font-size: 12px; color: #666; margin: 5px 0; }}
  .popup-link {{ display: inline-block; background: #ff6b35; color: #fff; padding: 8px 16px;
    border-radius: 6px; font-size: 12px; margin-top: 8px; text-decoration: none; }}
</style>
</head>
<body>
<div id="map"></div>
<script>
var markersData = {markers};
var infoWindows = [];
var currentInfoWindow = null;

function initMap() {{
  var map = new google.maps.Map(document.getElementById('map'), {{
    center: {{ lat: {center_lat}, lng: {center_lng} }},
    zoom: {zoom},
    gestureHandling: 'greedy'
  }});

  markersData.forEach(function (m) {{
    var marker = new google.maps.Marker({{
      position: {{ lat: m.lat, lng: m.lng }},
      map: map,
      title: m.title,
      icon: {{
        path: google.maps.SymbolPath.CIRCLE,
        fillColor: '#ff6b35',
        fillOpacity: 0.9,
        strokeColor: '#ffffff',
        strokeWeight: 3,
        scale: 12
      }}
    }});
    var infoWindow = new google.maps.InfoWindow({{ content: m.popup, maxWidth: 320 }});
    marker.addListener('click', function () {{
      if (currentInfoWindow) {{ currentInfoWindow.close(); }}
      infoWindow.open(map, marker);
      currentInfoWindow = infoWindow;
    }});
    infoWindows.push(infoWindow);
  }});

  {view}
}}
</script>
<script async defer src="https://maps.googleapis.com/maps/api/js?key={key}&callback=initMap"></script>
</body>
</html>
"#,
            markers = markers,
            center_lat = self.default_center.0,
            center_lng = self.default_center.1,
            zoom = self.default_zoom,
            view = view_js,
            key = api_key,
        ))
    }
}
