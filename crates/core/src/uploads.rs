//! Upload naming, type checks and image header inspection.

use std::io::Cursor;

use crate::error::CoreError;

/// Image extensions accepted for photos.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Document extensions accepted for contracts.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Default maximum upload size (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Lowercased extension of a client-supplied filename.
pub fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate that `filename` has one of the `allowed` extensions and return it.
pub fn validate_extension(filename: &str, allowed: &[&str]) -> Result<String, CoreError> {
    match extension(filename) {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(ext),
        Some(ext) => Err(CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Supported: {}",
            allowed.join(", ")
        ))),
        None => Err(CoreError::Validation(format!(
            "File '{filename}' has no extension. Supported: {}",
            allowed.join(", ")
        ))),
    }
}

/// Validate the size of an upload.
pub fn validate_size(len: usize, max_bytes: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if len > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {len} bytes; the limit is {max_bytes} bytes"
        )));
    }
    Ok(())
}

/// A random storage filename with the given extension.
///
/// Random names keep concurrent uploads of the same client filename apart.
pub fn random_filename(ext: &str) -> String {
    format!("{}.{ext}", uuid::Uuid::new_v4().simple())
}

/// MIME type for an accepted extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Read image dimensions from the header without decoding pixel data.
///
/// Fails when the bytes are not a recognizable image, which also catches
/// files renamed to an image extension.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), CoreError> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CoreError::Validation(format!("Unreadable image: {e}")))?
        .into_dimensions()
        .map_err(|e| CoreError::Validation(format!("Unreadable image: {e}")))
}
