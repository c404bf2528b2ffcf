//! Popup content shared by both map backends.
//!
//! One pure formatting path so the Leaflet and Google pages show identical
//! detail panels.

use crate::dataset::MapPoint;
use chrono::DateTime;

/// dd/mm/YYYY HH:MM, parsed from the record's ISO-8601 timestamp. Falls back
/// to the raw string when the source timestamp is not parseable.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Six decimal places, roughly 10cm of precision.
pub fn format_coordinates(lat: f64, lng: f64) -> String {
    format!("{:.6}, {:.6}", lat, lng)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The detail panel bound to one marker: image, filename, localized date,
/// coordinates, full-image link.
pub fn popup_html(point: &MapPoint) -> String {
    let filename = escape_html(&point.filename);
    let url = escape_html(&point.url);
    let date = escape_html(&format_timestamp(&point.timestamp));
    let coords = format_coordinates(point.lat, point.lng);

    format!(
        concat!(
            r#"<div class="popup-content">"#,
            r#"<img src="{url}" alt="Graffiti: {filename}" loading="lazy" />"#,
            r#"<p class="popup-title">📷 {filename}</p>"#,
            r#"<p class="popup-meta">📅 {date}</p>"#,
            r#"<p class="popup-meta">📍 {coords}</p>"#,
            r#"<a class="popup-link" href="{url}" target="_blank" rel="noopener">🔍 Ver imagen completa</a>"#,
            r#"</div>"#
        ),
        url = url,
        filename = filename,
        date = date,
        coords = coords,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> MapPoint {
        MapPoint {
            id: "abc".to_string(),
            url: "https://drive.google.com/uc?id=abc&export=view".to_string(),
            lat: 39.4699,
            lng: -0.3763,
            timestamp: "2024-11-02T10:30:00.000Z".to_string(),
            filename: "plaza.jpg".to_string(),
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-11-02T10:30:00.000Z"), "02/11/2024 10:30");
    }

    #[test]
    fn test_format_timestamp_fallback() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_coordinates_six_decimals() {
        assert_eq!(format_coordinates(39.4699, -0.3763), "39.469900, -0.376300");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='alert(1)'>"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;alert(1)&#39;&gt;"
        );
    }

    #[test]
    fn test_popup_contains_all_fields() {
        let html = popup_html(&point());
        assert!(html.contains("plaza.jpg"));
        assert!(html.contains("02/11/2024 10:30"));
        assert!(html.contains("39.469900, -0.376300"));
        assert!(html.contains("https://drive.google.com/uc?id=abc&amp;export=view"));
    }

    #[test]
    fn test_popup_escapes_filename() {
        let mut p = point();
        p.filename = "<script>.jpg".to_string();
        let html = popup_html(&p);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;.jpg"));
    }
}
