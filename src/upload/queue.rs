use crate::api_client::AlbumId;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Supported image file extensions.
const IMAGE_EXTENSIONS: [&str; 9] = [
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "tif", "tiff",
];

/// A local file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPhoto {
    pub path: PathBuf,
}

impl PendingPhoto {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    pub fn mime_type(&self) -> &'static str {
        match extension_of(&self.path).as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            Some("heic") => "image/heic",
            Some("tif") | Some("tiff") => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

/// Photos waiting to be uploaded into one album, taken strictly in order.
#[derive(Debug)]
pub struct UploadQueue {
    album_id: AlbumId,
    pending: VecDeque<PendingPhoto>,
}

impl UploadQueue {
    pub fn new(album_id: AlbumId, photos: Vec<PendingPhoto>) -> Self {
        Self {
            album_id,
            pending: photos.into(),
        }
    }

    pub fn album_id(&self) -> &AlbumId {
        &self.album_id
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes the next photo in selection order.
    pub fn next_photo(&mut self) -> Option<PendingPhoto> {
        self.pending.pop_front()
    }
}

/// Expands the given paths into the photos to upload.
///
/// Directories are walked recursively and contribute their image files
/// sorted by name; plain paths are kept in argument order. Anything that is
/// not an image is skipped.
pub fn collect_photos(paths: &[PathBuf]) -> Vec<PendingPhoto> {
    let mut photos = Vec::new();

    for path in paths {
        if path.is_dir() {
            photos.extend(
                WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_file() && is_image_file(entry.path()))
                    .map(|entry| PendingPhoto::new(entry.into_path())),
            );
        } else if is_image_file(path) {
            photos.push(PendingPhoto::new(path.clone()));
        } else {
            warn!(path = %path.display(), "skipping file that is not an image");
        }
    }

    photos
}

/// Check if a file is an image based on its extension.
fn is_image_file(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_queue_preserves_selection_order() {
        let mut queue = UploadQueue::new(
            AlbumId::from(1),
            vec![
                PendingPhoto::new("c.jpg"),
                PendingPhoto::new("a.jpg"),
                PendingPhoto::new("b.jpg"),
            ],
        );

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.next_photo().unwrap().file_name(), "c.jpg");
        assert_eq!(queue.next_photo().unwrap().file_name(), "a.jpg");
        assert_eq!(queue.next_photo().unwrap().file_name(), "b.jpg");
        assert!(queue.next_photo().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("photo.jpg")));
        assert!(is_image_file(Path::new("photo.JPEG")));
        assert!(is_image_file(Path::new("photo.png")));
        assert!(is_image_file(Path::new("photo.HEIC")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("no_extension")));
    }

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(PendingPhoto::new("a.JPG").mime_type(), "image/jpeg");
        assert_eq!(PendingPhoto::new("a.png").mime_type(), "image/png");
        assert_eq!(PendingPhoto::new("a.tiff").mime_type(), "image/tiff");
        assert_eq!(
            PendingPhoto::new("a.raw").mime_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_collect_photos_expands_directories() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("partido");
        fs::create_dir(&folder).unwrap();
        File::create(folder.join("02.jpg")).unwrap();
        File::create(folder.join("01.png")).unwrap();
        File::create(folder.join("readme.txt")).unwrap();

        let single = temp_dir.path().join("portada.jpg");
        File::create(&single).unwrap();
        let text = temp_dir.path().join("lista.txt");
        File::create(&text).unwrap();

        let photos = collect_photos(&[single.clone(), folder.clone(), text]);
        let names: Vec<String> = photos.iter().map(PendingPhoto::file_name).collect();

        assert_eq!(names, vec!["portada.jpg", "01.png", "02.jpg"]);
    }
}
