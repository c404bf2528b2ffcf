//! Leaflet/OpenStreetMap backend.

use super::popup::popup_html;
use super::{MapAdapter, MapProvider, MarkerHandle, MarkerSet, Viewport};
use crate::config::Config;
use crate::dataset::MapPoint;
use crate::error::{GraffitiError, Result};
use serde::Serialize;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

#[derive(Serialize)]
struct MarkerData {
    lat: f64,
    lng: f64,
    title: String,
    popup: String,
}

pub struct LeafletAdapter {
    markers: MarkerSet,
    viewport: Viewport,
    initialized: bool,
    tile_url: String,
    default_center: (f64, f64),
    default_zoom: u8,
}

impl LeafletAdapter {
    pub fn new(config: &Config) -> Self {
        Self {
            markers: MarkerSet::default(),
            viewport: Viewport::Fixed {
                lat: config.map_center_lat,
                lng: config.map_center_lng,
                zoom: config.map_zoom,
            },
            initialized: false,
            tile_url: config.tile_url.clone(),
            default_center: (config.map_center_lat, config.map_center_lng),
            default_zoom: config.map_zoom,
        }
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

        // Keep the embedded JSON inert inside a <script> block.
        Ok(serde_json::to_string(&data)?.replace("</", "<\\/"))
    }
}

impl MapAdapter for LeafletAdapter {
    fn provider(&self) -> MapProvider {
        MapProvider::Leaflet
    }

    fn initialize(&mut self, points: &[MapPoint]) -> Result<()> {
        if self.tile_url.trim().is_empty() {
            return Err(GraffitiError::MapRuntime(
                "no tile URL configured for Leaflet".to_string(),
            ));
        }

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
                "Leaflet adapter not initialized".to_string(),
            ));
        }

        let markers = self.marker_json()?;
        let view_js = match self.viewport {
            Viewport::FitMarkers => "map.fitBounds(group.getBounds().pad(0.1));".to_string(),
            Viewport::Fixed { lat, lng, zoom } => {
                format!("map.setView([{}, {}], {});", lat, lng, zoom)
            }
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Archivo Graffitis DANA Valencia</title>
<link rel="stylesheet" href="{css}" />
<style>
  html, body, #map {{ height: 100%; margin: 0; }}
  .custom-marker div {{ background: #ff6b35; width: 20px; height: 20px; border-radius: 50%;
    border: 3px solid #fff; box-shadow: 0 2px 5px rgba(0,0,0,0.3); }}
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
<script src="{js}"></script>
<script>
  var markersData = {markers};
  var map = L.map('map', {{ zoomControl: true, attributionControl: true }});
  L.tileLayer('{tiles}', {{
    attribution: '© OpenStreetMap contributors',
    maxZoom: 19,
    minZoom: 10
  }}).addTo(map);
  L.control.scale({{ position: 'bottomleft', metric: true, imperial: false }}).addTo(map);

  var icon = L.divIcon({{ className: 'custom-marker', html: '<div></div>',
    iconSize: [26, 26], iconAnchor: [13, 13] }});
  var markers = markersData.map(function (m) {{
    return L.marker([m.lat, m.lng], {{ icon: icon, title: m.title }})
      .addTo(map)
      .bindPopup(m.popup, {{ maxWidth: 320, className: 'custom-popup' }});
  }});
  var group = L.featureGroup(markers);
  {view}
</script>
</body>
</html>
"#,
            css = LEAFLET_CSS,
            js = LEAFLET_JS,
            markers = markers,
            tiles = self.tile_url,
            view = view_js,
        ))
    }
}
