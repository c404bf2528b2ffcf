//! Drive file descriptor -> normalized image record.

use crate::dataset::ImageRecord;
use crate::drive::{DriveFile, ImageMetadata};
use crate::geo::Coordinates;

/// Public-viewable URL derived from a file id. Pure string templating, no
/// network involved.
pub fn view_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?id={}&export=view", file_id)
}

/// Normalizes one drive file into an [`ImageRecord`].
///
/// `metadata` is `None` when the per-file lookup failed; that case, a missing
/// location block, and an out-of-range location all degrade to the same
/// GPS-absent record. This function never fails.
pub fn extract_record(file: &DriveFile, metadata: Option<&ImageMetadata>) -> ImageRecord {
    let coordinates = metadata
        .and_then(|m| m.location.as_ref())
        .and_then(|loc| Coordinates::validated(loc.latitude, loc.longitude));

    ImageRecord {
        id: file.id.clone(),
        url: view_url(&file.id),
        filename: file.name.clone(),
        timestamp: file.created_time.clone(),
        modified_time: file.modified_time.clone(),
        size: file.size.clone(),
        has_gps: coordinates.is_some(),
        coordinates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::GpsLocation;

    fn drive_file(id: &str) -> DriveFile {
        DriveFile {
            id: id.to_string(),
            name: format!("{}.jpg", id),
            created_time: "2024-11-02T10:30:00.000Z".to_string(),
            modified_time: Some("2024-11-02T11:00:00.000Z".to_string()),
            size: Some("1024".to_string()),
            web_content_link: None,
            web_view_link: None,
        }
    }

    fn metadata_at(lat: f64, lng: f64) -> ImageMetadata {
        ImageMetadata {
            location: Some(GpsLocation { latitude: lat, longitude: lng }),
        }
    }

    #[test]
    fn test_extract_with_location() {
        let file = drive_file("abc");
        let metadata = metadata_at(39.4699, -0.3763);
        let record = extract_record(&file, Some(&metadata));

        assert!(record.has_gps);
        let coords = record.coordinates.unwrap();
        assert_eq!(coords.lat, 39.4699);
        assert_eq!(coords.lng, -0.3763);
        assert_eq!(record.url, "https://drive.google.com/uc?id=abc&export=view");
        assert_eq!(record.timestamp, "2024-11-02T10:30:00.000Z");
    }

    #[test]
    fn test_extract_without_location_block() {
        let file = drive_file("abc");
        let record = extract_record(&file, Some(&ImageMetadata { location: None }));

        assert!(!record.has_gps);
        assert!(record.coordinates.is_none());
        assert_eq!(record.filename, "abc.jpg");
    }

    #[test]
    fn test_extract_when_metadata_lookup_failed() {
        let file = drive_file("abc");
        let record = extract_record(&file, None);

        assert!(!record.has_gps);
        assert!(record.coordinates.is_none());
        // All descriptor fields survive the degradation.
        assert_eq!(record.id, "abc");
        assert_eq!(record.size.as_deref(), Some("1024"));
    }

    #[test]
    fn test_extract_with_invalid_location() {
        let file = drive_file("abc");
        let metadata = metadata_at(999.0, -0.3763);
        let record = extract_record(&file, Some(&metadata));

        // Malformed is indistinguishable from absent.
        assert!(!record.has_gps);
        assert!(record.coordinates.is_none());
    }

    #[test]
    fn test_extract_with_nan_location() {
        let file = drive_file("abc");
        let metadata = metadata_at(f64::NAN, -0.3763);
        let record = extract_record(&file, Some(&metadata));
        assert!(!record.has_gps);
    }

    #[test]
    fn test_gps_flag_matches_coordinates() {
        let file = drive_file("abc");
        for metadata in [None, Some(metadata_at(39.0, -0.3))] {
            let record = extract_record(&file, metadata.as_ref());
            assert_eq!(record.has_gps, record.coordinates.is_some());
        }
    }
}
