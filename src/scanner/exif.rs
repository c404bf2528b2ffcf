use chrono::NaiveDateTime;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// GPS position and capture time pulled from a local file's EXIF block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifSummary {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub taken: Option<NaiveDateTime>,
}

/// Reads what we need from one file. Any failure (unreadable file, no EXIF
/// container, missing tags) collapses to an empty summary.
pub fn read_summary(path: &Path) -> ExifSummary {
    match try_read(path) {
        Some(summary) => summary,
        None => ExifSummary::default(),
    }
}

fn try_read(path: &Path) -> Option<ExifSummary> {
    let file = File::open(path).ok()?;
    let mut bufreader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut bufreader).ok()?;

    Some(ExifSummary {
        latitude: parse_gps_coord(&exif, exif::Tag::GPSLatitude, exif::Tag::GPSLatitudeRef),
        longitude: parse_gps_coord(&exif, exif::Tag::GPSLongitude, exif::Tag::GPSLongitudeRef),
        taken: parse_date(&exif),
    })
}

fn parse_date(exif: &exif::Exif) -> Option<NaiveDateTime> {
    for tag in [exif::Tag::DateTimeOriginal, exif::Tag::DateTime] {
        if let Some(field) = exif.get_field(tag, exif::In::PRIMARY) {
            let raw = field.display_value().to_string();
            // EXIF date format: "2024-11-02 10:30:00" after display formatting.
            if let Ok(parsed) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S") {
                return Some(parsed);
            }
            if let Ok(parsed) = NaiveDateTime::parse_from_str(&raw, "%Y:%m:%d %H:%M:%S") {
                return Some(parsed);
            }
        }
    }
    None
}

/// Rational degrees/minutes/seconds to signed decimal, negated for the
/// S and W hemisphere references.
fn parse_gps_coord(exif: &exif::Exif, coord_tag: exif::Tag, ref_tag: exif::Tag) -> Option<f64> {
    let field = exif.get_field(coord_tag, exif::In::PRIMARY)?;
    let rationals = match &field.value {
        exif::Value::Rational(v) if v.len() >= 3 => v,
        _ => return None,
    };

    let degrees = rationals[0].to_f64();
    let minutes = rationals[1].to_f64();
    let seconds = rationals[2].to_f64();
    let mut coord = degrees + minutes / 60.0 + seconds / 3600.0;

    let ref_field = exif.get_field(ref_tag, exif::In::PRIMARY)?;
    let ref_str = ref_field.display_value().to_string();
    if ref_str == "S" || ref_str == "W" {
        coord = -coord;
    }

    Some(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_summary_non_image_is_empty() {
        let dir = std::env::temp_dir().join("graffiti-exif-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not-an-image.jpg");
        std::fs::write(&path, b"plain text").unwrap();

        let summary = read_summary(&path);
        assert!(summary.latitude.is_none());
        assert!(summary.longitude.is_none());
        assert!(summary.taken.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_summary_missing_file_is_empty() {
        let summary = read_summary(Path::new("/nonexistent/photo.jpg"));
        assert!(summary.latitude.is_none());
    }
}
