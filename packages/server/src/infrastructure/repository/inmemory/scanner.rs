//! Filesystem scanner that seeds the in-memory picture store.

use std::path::Path;

use walkdir::WalkDir;

use crate::domain::PictureId;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "avif"];

/// Collect picture ids for every image file under `root`.
///
/// Ids are `/`-separated paths relative to `root`. Symlinks are followed.
/// Unreadable entries and non UTF-8 names are logged and skipped.
pub fn scan_pictures(root: &Path) -> Vec<PictureId> {
    if !root.exists() {
        tracing::warn!("Picture root does not exist: {}", root.display());
        return Vec::new();
    }

    let mut pictures = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Cannot access entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let mut id = String::new();
        for component in relative.components() {
            match component.as_os_str().to_str() {
                Some(name) => {
                    id.push('/');
                    id.push_str(name);
                }
                None => {
                    tracing::warn!("Skipping non UTF-8 path: {}", entry.path().display());
                    id.clear();
                    break;
                }
            }
        }
        if let Ok(picture) = PictureId::new(id) {
            pictures.push(picture);
        }
    }

    tracing::info!("Scanned {} pictures under {}", pictures.len(), root.display());
    pictures
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
