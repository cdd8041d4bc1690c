//! File upload gateway.
//!
//! Validates media type and size against the caller's allow-list, then
//! persists under a per-category directory. Callers that fail a downstream
//! write MUST call [`cleanup`] with the returned path to release the file.

use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::ServiceError;

pub const UPLOAD_ROOT: &str = "./uploads";

pub const ALLOWED_DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

pub const MAX_DOCUMENT_SIZE: usize = 10 * 1024 * 1024;
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

fn detect_media_type(filename: &str, bytes: &[u8]) -> Option<&'static str> {
    // Magic numbers first, extension as the fallback for plain formats.
    if bytes.starts_with(b"%PDF") {
        return Some("application/pdf");
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }

    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())?;
    match ext.as_str() {
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        "txt" => Some("text/plain"),
        _ => None,
    }
}

/// Store `bytes` under `uploads/<category>/`, returning the relative path.
pub async fn store(
    category: &str,
    filename: &str,
    bytes: &[u8],
    allowed_types: &[&str],
    max_size_bytes: usize,
) -> Result<String, ServiceError> {
    if bytes.len() > max_size_bytes {
        return Err(ServiceError::FileTooLarge);
    }

    let media_type =
        detect_media_type(filename, bytes).ok_or(ServiceError::UnsupportedType)?;
    if !allowed_types.contains(&media_type) {
        return Err(ServiceError::UnsupportedType);
    }

    let safe_name = sanitize_filename::sanitize(filename);
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let stored_name = format!("{timestamp}_{safe_name}");

    let dir = format!("{UPLOAD_ROOT}/{category}");
    fs::create_dir_all(&dir)
        .await
        .map_err(|_| ServiceError::StorageUnavailable)?;

    let full_path = format!("{dir}/{stored_name}");
    let mut file = fs::File::create(&full_path)
        .await
        .map_err(|_| ServiceError::StorageUnavailable)?;
    file.write_all(bytes)
        .await
        .map_err(|_| ServiceError::StorageUnavailable)?;
    file.flush()
        .await
        .map_err(|_| ServiceError::StorageUnavailable)?;

    Ok(format!("{category}/{stored_name}"))
}

/// Release a stored file after a failed downstream persistence step.
pub async fn cleanup(relative_path: &str) {
    let full_path = format!("{UPLOAD_ROOT}/{relative_path}");
    if let Err(err) = fs::remove_file(&full_path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::error!("Failed to clean up upload {}: {}", full_path, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_magic_number_wins_over_extension() {
        assert_eq!(
            detect_media_type("syllabus.bin", b"%PDF-1.7 rest"),
            Some("application/pdf")
        );
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert_eq!(detect_media_type("malware.exe", &[0x4D, 0x5A, 0x00]), None);
    }

    #[tokio::test]
    async fn oversized_files_are_refused() {
        let result = store(
            "subject_syllabus",
            "big.pdf",
            b"%PDF-1.7 data",
            ALLOWED_DOCUMENT_TYPES,
            4,
        )
        .await;
        assert!(matches!(result, Err(ServiceError::FileTooLarge)));
    }

    #[tokio::test]
    async fn disallowed_type_is_refused_before_any_write() {
        let result = store(
            "subject_syllabus",
            "photo.png",
            &[0x89, b'P', b'N', b'G', 0x0D],
            ALLOWED_DOCUMENT_TYPES,
            MAX_DOCUMENT_SIZE,
        )
        .await;
        assert!(matches!(result, Err(ServiceError::UnsupportedType)));
    }
}
