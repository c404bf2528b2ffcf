//! Local folder ingest: builds image records from files on disk instead of
//! a Drive listing, reading coordinates from EXIF.

mod exif;

use crate::dataset::ImageRecord;
use crate::error::{GraffitiError, Result};
use crate::geo::Coordinates;
use chrono::{DateTime, Utc};
use std::path::Path;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageRecord>> {
    if !folder.exists() {
        return Err(GraffitiError::FolderNotFound(folder.display().to_string()));
    }

    let mut records = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1) // direct children only
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_image_extension(path) {
            continue;
        }

        records.push(record_from_file(path));
    }

    records.sort_by(|a, b| a.filename.cmp(&b.filename));

    Ok(records)
}

fn is_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_lowercase();
            IMAGE_EXTENSIONS.iter().any(|&e| e == lower)
        })
        .unwrap_or(false)
}

/// Builds one record from a local file. EXIF failures degrade to a
/// GPS-absent record; this never aborts the scan.
fn record_from_file(path: &Path) -> ImageRecord {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let id = path
        .file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.clone());

    let summary = exif::read_summary(path);
    let coordinates = match (summary.latitude, summary.longitude) {
        (Some(lat), Some(lng)) => Coordinates::validated(lat, lng),
        _ => None,
    };

    let timestamp = summary
        .taken
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).to_rfc3339())
        .or_else(|| {
            std::fs::metadata(path)
                .ok()
                .and_then(|meta| meta.modified().ok())
                .map(|time| DateTime::<Utc>::from(time).to_rfc3339())
        })
        .unwrap_or_default();

    let size = std::fs::metadata(path).ok().map(|meta| meta.len().to_string());

    let url = match path.canonicalize() {
        Ok(absolute) => format!("file://{}", absolute.display()),
        Err(_) => format!("file://{}", path.display()),
    };

    ImageRecord {
        id,
        url,
        filename,
        timestamp,
        modified_time: None,
        size,
        has_gps: coordinates.is_some(),
        coordinates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(GraffitiError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_empty() {
        let temp_dir = std::env::temp_dir().join("graffiti-scan-empty");
        fs::create_dir_all(&temp_dir).unwrap();

        let result = scan_folder(&temp_dir).unwrap();
        assert!(result.is_empty());

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_scan_folder_filters_extensions() {
        let temp_dir = std::env::temp_dir().join("graffiti-scan-filter");
        fs::create_dir_all(&temp_dir).unwrap();

        File::create(temp_dir.join("wall.jpg")).unwrap().write_all(b"x").unwrap();
        File::create(temp_dir.join("bridge.PNG")).unwrap().write_all(b"x").unwrap();
        File::create(temp_dir.join("notes.txt")).unwrap().write_all(b"x").unwrap();

        let result = scan_folder(&temp_dir).unwrap();
        assert_eq!(result.len(), 2);

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_scan_records_degrade_without_exif() {
        let temp_dir = std::env::temp_dir().join("graffiti-scan-degrade");
        fs::create_dir_all(&temp_dir).unwrap();

        // Not a real JPEG, so EXIF reading fails; the record survives.
        File::create(temp_dir.join("broken.jpg")).unwrap().write_all(b"x").unwrap();

        let result = scan_folder(&temp_dir).unwrap();
        assert_eq!(result.len(), 1);
        assert!(!result[0].has_gps);
        assert!(result[0].coordinates.is_none());
        assert_eq!(result[0].id, "broken");
        assert!(result[0].url.starts_with("file://"));

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_scan_sorted_by_filename() {
        let temp_dir = std::env::temp_dir().join("graffiti-scan-sort");
        fs::create_dir_all(&temp_dir).unwrap();

        File::create(temp_dir.join("c.jpg")).unwrap();
        File::create(temp_dir.join("a.jpg")).unwrap();
        File::create(temp_dir.join("b.jpg")).unwrap();

        let result = scan_folder(&temp_dir).unwrap();
        let names: Vec<_> = result.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);

        fs::remove_dir_all(&temp_dir).ok();
    }
}
