//! Minimal Google Drive v3 client for a public image folder.
//!
//! Auth is the API-key query parameter; the folder is shared publicly so no
//! OAuth exchange is involved.

use crate::error::{GraffitiError, Result};
use serde::Deserialize;

const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3/files";
const PAGE_SIZE: u32 = 1000;

/// A file descriptor from the Drive listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub created_time: String,
    #[serde(default)]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub web_content_link: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

/// Per-file image metadata, requested separately from the listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    #[serde(default)]
    pub location: Option<GpsLocation>,
}

/// Raw EXIF location block. Values arrive unvalidated; the extractor runs
/// them through the coordinate validator.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GpsLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadataResponse {
    #[serde(default)]
    image_media_metadata: Option<ImageMetadata>,
}

pub struct DriveClient {
    client: reqwest::Client,
    api_key: String,
}

impl DriveClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Lists image files in the folder, newest first.
    pub async fn list_images(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        let query = format!("'{}' in parents and mimeType contains 'image/'", folder_id);
        let page_size = PAGE_SIZE.to_string();
        let response = self
            .client
            .get(DRIVE_API_URL)
            .query(&[
                ("q", query.as_str()),
                (
                    "fields",
                    "files(id,name,createdTime,modifiedTime,size,webContentLink,webViewLink)",
                ),
                ("orderBy", "createdTime desc"),
                ("pageSize", page_size.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GraffitiError::ApiCall(format!(
                "listing folder {} failed with status {}: {}",
                folder_id, status, body
            )));
        }

        let listing: FileListResponse = response
            .json()
            .await
            .map_err(|e| GraffitiError::ApiParse(e.to_string()))?;
        Ok(listing.files)
    }

    /// Fetches the EXIF metadata block for one file. Callers treat an `Err`
    /// as a per-file degradation, not a batch failure.
    pub async fn image_metadata(&self, file_id: &str) -> Result<ImageMetadata> {
        let url = format!("{}/{}", DRIVE_API_URL, file_id);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("fields", "imageMediaMetadata,name,createdTime"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GraffitiError::ApiCall(format!(
                "metadata for {} failed with status {}",
                file_id,
                response.status()
            )));
        }

        let metadata: FileMetadataResponse = response
            .json()
            .await
            .map_err(|e| GraffitiError::ApiParse(e.to_string()))?;
        Ok(metadata.image_media_metadata.unwrap_or_default())
    }
}
