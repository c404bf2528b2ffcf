//! The batch fetch job: Drive listing -> normalized records -> persisted
//! dataset, rewriting the file only when the dataset actually changed.

pub mod extract;
pub mod pacing;

use crate::config::DriveEnv;
use crate::dataset::{Dataset, ImageRecord};
use crate::drive::DriveClient;
use crate::error::{GraffitiError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pacing::Pacer;
use std::path::Path;

pub use extract::{extract_record, view_url};

/// Outcome of one fetch run.
#[derive(Debug)]
pub struct FetchSummary {
    pub total_images: usize,
    pub mappable_images: usize,
    pub changed: bool,
    pub written: bool,
}

pub struct Fetcher {
    client: DriveClient,
    folder_id: String,
    pacer: Pacer,
    verbose: bool,
}

impl Fetcher {
    pub fn new(env: DriveEnv, interval_ms: u64, verbose: bool) -> Self {
        Self {
            client: DriveClient::new(env.api_key),
            folder_id: env.folder_id,
            pacer: Pacer::from_millis(interval_ms),
            verbose,
        }
    }

    /// Runs the whole batch. The dataset file is only touched after every
    /// file has been processed, so a mid-run failure leaves the previous
    /// dataset intact.
    pub async fn run(&mut self, output: &Path, force: bool) -> Result<FetchSummary> {
        let files = self.client.list_images(&self.folder_id).await?;
        if files.is_empty() {
            return Err(GraffitiError::NoImagesFound(format!(
                "Drive folder {}",
                self.folder_id
            )));
        }
        println!("📷 Found {} images in Drive folder", files.len());

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut records: Vec<ImageRecord> = Vec::with_capacity(files.len());
        for file in &files {
            progress.set_message(file.name.clone());
            self.pacer.pause().await;

            let metadata = match self.client.image_metadata(&file.id).await {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    // Per-file degradation: keep the record, drop the GPS.
                    progress.suspend(|| {
                        eprintln!("⚠️  Could not extract metadata for {}: {}", file.name, e);
                    });
                    None
                }
            };

            let record = extract_record(file, metadata.as_ref());
            if self.verbose && !record.has_gps {
                progress.suspend(|| println!("   {} has no usable GPS data", record.filename));
            }
            records.push(record);
            progress.inc(1);
        }
        progress.finish_and_clear();

        let previous = Dataset::load(output);
        let dataset = Dataset::build(records, chrono::Utc::now());
        let changed = dataset.differs_from(&previous);

        let written = if changed || force {
            dataset.save(output)?;
            true
        } else {
            false
        };

        Ok(FetchSummary {
            total_images: dataset.total_images,
            mappable_images: dataset.mappable_images,
            changed,
            written,
        })
    }
}
