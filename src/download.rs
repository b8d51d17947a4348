//! Saving stored artwork to named files.
//!
//! Classifies a resource by its declared media type to pick the file
//! extension, then hands the decoded bytes to the filesystem. Unrecognized
//! or missing media types fall back to `jpg` — the most widely handled
//! extension — rather than failing; this mirrors how download helpers treat
//! the extension as a hint for the receiving OS, not a correctness
//! guarantee. No retries here: a failed write is the caller's problem.

use crate::types::{ImageResource, ResourceError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// `download-<id>.<ext>`, with the extension derived from the declared
/// media type. `image/svg*` → svg, png → png, jpeg/jpg → jpg, gif → gif;
/// anything else (including no media type) → jpg.
pub fn resolve_filename(id: &str, resource: &ImageResource) -> String {
    let ext = match resource.media_type() {
        Some(mt) if mt.starts_with("image/svg") => "svg",
        Some("image/png") => "png",
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/gif") => "gif",
        _ => "jpg",
    };
    format!("download-{id}.{ext}")
}

/// Decode the resource payload and write it under `dir` with the resolved
/// filename. Returns the written path.
pub fn save(id: &str, resource: &ImageResource, dir: &Path) -> Result<PathBuf, DownloadError> {
    let bytes = resource.decode()?;
    let path = dir.join(resolve_filename(id, resource));
    fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn svg_resource() -> ImageResource {
        // "<svg/>"
        ImageResource::new("data:image/svg+xml;base64,PHN2Zy8+")
    }

    #[test]
    fn svg_media_type_maps_to_svg_extension() {
        assert_eq!(resolve_filename("7", &svg_resource()), "download-7.svg");
    }

    #[test]
    fn raster_media_types_map_to_their_extensions() {
        let png = ImageResource::new("data:image/png;base64,AA==");
        let jpeg = ImageResource::new("data:image/jpeg;base64,AA==");
        let jpg = ImageResource::new("data:image/jpg;base64,AA==");
        let gif = ImageResource::new("data:image/gif;base64,AA==");
        assert_eq!(resolve_filename("1", &png), "download-1.png");
        assert_eq!(resolve_filename("1", &jpeg), "download-1.jpg");
        assert_eq!(resolve_filename("1", &jpg), "download-1.jpg");
        assert_eq!(resolve_filename("1", &gif), "download-1.gif");
    }

    #[test]
    fn unknown_media_type_falls_back_to_jpg() {
        let webp = ImageResource::new("data:image/webp;base64,AA==");
        assert_eq!(resolve_filename("7", &webp), "download-7.jpg");
    }

    #[test]
    fn missing_media_type_falls_back_to_jpg() {
        let bare = ImageResource::new("data:;base64,AA==");
        let not_data = ImageResource::new("http://example.com/a.png");
        assert_eq!(resolve_filename("7", &bare), "download-7.jpg");
        assert_eq!(resolve_filename("7", &not_data), "download-7.jpg");
    }

    #[test]
    fn save_writes_decoded_bytes_under_the_resolved_name() {
        let tmp = TempDir::new().unwrap();
        let path = save("42", &svg_resource(), tmp.path()).unwrap();

        assert_eq!(path, tmp.path().join("download-42.svg"));
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }

    #[test]
    fn save_fails_on_a_payload_free_resource() {
        let tmp = TempDir::new().unwrap();
        let raw = ImageResource::new("data:image/png,rawdata");
        let result = save("1", &raw, tmp.path());
        assert!(matches!(result, Err(DownloadError::Resource(_))));
    }
}
