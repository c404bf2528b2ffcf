//! Persisted dataset model and change detection.
//!
//! The dataset file (`images.json`) is fully rebuilt on every fetch run; the
//! previous version is read only to decide whether a rewrite is warranted.

use crate::geo::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One image as captured by a fetch or scan run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: String,
    pub url: String,
    pub filename: String,
    /// ISO-8601 creation time, as reported by the source.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "hasGPS")]
    pub has_gps: bool,
}

/// A mappable image: the subset of `ImageRecord` the map adapters consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub id: String,
    pub url: String,
    pub lat: f64,
    pub lng: f64,
    pub timestamp: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub last_updated: Option<DateTime<Utc>>,
    pub total_images: usize,
    pub mappable_images: usize,
    /// Mappable subset only, in input order.
    pub images: Vec<MapPoint>,
    /// Full record set, in input order.
    pub all_images: Vec<ImageRecord>,
}

impl Dataset {
    /// The canonical empty dataset: what a first run compares against.
    pub fn empty() -> Self {
        Self {
            last_updated: None,
            total_images: 0,
            mappable_images: 0,
            images: Vec::new(),
            all_images: Vec::new(),
        }
    }

    /// Builds a dataset from already-normalized records, preserving input
    /// order. Pure; the caller supplies the build time.
    pub fn build(records: Vec<ImageRecord>, now: DateTime<Utc>) -> Self {
        let images: Vec<MapPoint> = records
            .iter()
            .filter_map(|record| {
                record.coordinates.map(|coords| MapPoint {
                    id: record.id.clone(),
                    url: record.url.clone(),
                    lat: coords.lat,
                    lng: coords.lng,
                    timestamp: record.timestamp.clone(),
                    filename: record.filename.clone(),
                })
            })
            .collect();

        Self {
            last_updated: Some(now),
            total_images: records.len(),
            mappable_images: images.len(),
            images,
            all_images: records,
        }
    }

    /// Change detection: the total count and the ordered mappable sequence
    /// are compared; `allImages`-only differences do not count as a change.
    pub fn differs_from(&self, previous: &Dataset) -> bool {
        self.total_images != previous.total_images || self.images != previous.images
    }

    /// Loads the persisted dataset, falling back to the empty dataset on a
    /// missing or unreadable file. Never fails.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::empty();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return Self::empty(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(dataset) => dataset,
            Err(_) => {
                eprintln!("⚠️  Existing dataset unreadable, starting fresh: {}", path.display());
                Self::empty()
            }
        }
    }

    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
