//! Uploads a queue of photos into an album, one request at a time, with
//! progress tracking.

use crate::api_client::{AlbumId, ApiError, GalleryApi, PhotoFile};
use crate::gallery::Gallery;
use crate::upload::queue::{PendingPhoto, UploadQueue};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

pub const UPLOAD_CONNECTION_ERROR_TEXT: &str = "Connection error while uploading";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { file: String, url: String },
    Failed { file: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct UploadReport {
    pub album_id: AlbumId,
    pub outcomes: Vec<UploadOutcome>,
}

impl UploadReport {
    pub fn uploaded_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, UploadOutcome::Uploaded { .. }))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            UploadOutcome::Failed { file, reason } => Some((file.as_str(), reason.as_str())),
            UploadOutcome::Uploaded { .. } => None,
        })
    }
}

/// Creates the progress bar shown while a batch is uploading.
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{elapsed_precise} [{bar:40.cyan/blue}] {pos}/{len} photos {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    progress
}

/// Uploads every queued photo in order.
///
/// Each photo is awaited before the next one starts. A successful upload
/// appends a thumbnail built from the URL the server returned; a failed one is
/// recorded and the batch moves on.
pub async fn upload_photos<A: GalleryApi + ?Sized>(
    api: &A,
    gallery: &mut Gallery,
    mut queue: UploadQueue,
    progress: &ProgressBar,
) -> UploadReport {
    let album_id = queue.album_id().clone();
    let mut outcomes = Vec::with_capacity(queue.len());
    progress.set_length(queue.len() as u64);

    while let Some(photo) = queue.next_photo() {
        let file = photo.file_name();
        progress.set_message(format!("Uploading: {file}"));

        match upload_one(api, &album_id, &photo).await {
            Ok(url) => {
                info!(%album_id, %file, %url, "photo uploaded");
                if !gallery.append_thumbnail(&album_id, &url) {
                    warn!(%album_id, "uploaded into an album that is not on the grid");
                }
                outcomes.push(UploadOutcome::Uploaded { file, url });
            }
            Err(e) => {
                warn!(%album_id, %file, error = %e, "photo upload failed");
                let reason = failure_reason(&e);
                progress.println(format!("\x1b[31mFailed: {file}: {reason}\x1b[0m"));
                outcomes.push(UploadOutcome::Failed { file, reason });
            }
        }
        progress.inc(1);
    }

    progress.finish_with_message("All uploads completed");
    UploadReport { album_id, outcomes }
}

async fn upload_one<A: GalleryApi + ?Sized>(
    api: &A,
    album_id: &AlbumId,
    photo: &PendingPhoto,
) -> Result<String, ApiError> {
    let bytes = tokio::fs::read(&photo.path).await?;
    let file = PhotoFile {
        file_name: photo.file_name(),
        mime_type: photo.mime_type().to_string(),
        bytes,
    };

    let uploaded = api.upload_photo(album_id, file).await?;
    Ok(uploaded.url)
}

fn failure_reason(error: &ApiError) -> String {
    match error {
        ApiError::Io(e) => format!("Could not read file: {}", e),
        _ => error.user_message(UPLOAD_CONNECTION_ERROR_TEXT),
    }
}
