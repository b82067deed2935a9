use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppError;

/// Upload size limit used when `MAX_UPLOAD_BYTES` is not configured (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// MIME types the upload panel accepts, with the extension shown to users.
pub const ACCEPTED_DOCUMENT_TYPES: &[(&str, &str)] = &[
    ("application/pdf", "pdf"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
    ("text/plain", "txt"),
];

/// Metadata for a document the user uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct UploadedDocument {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// Hex-encoded SHA-256 of the stored bytes.
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

/// Value for the file input's `accept` attribute.
pub fn accept_attribute() -> String {
    ACCEPTED_DOCUMENT_TYPES
        .iter()
        .map(|(_, ext)| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Resolve the content type of an upload. Browsers sometimes report an
/// empty or generic type, in which case the file extension decides.
pub fn resolve_content_type(file_name: &str, reported: Option<&str>) -> Option<&'static str> {
    if let Some(reported) = reported {
        let reported = reported.trim().to_ascii_lowercase();
        if let Some((mime, _)) = ACCEPTED_DOCUMENT_TYPES.iter().find(|(m, _)| *m == reported) {
            return Some(mime);
        }
    }
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    ACCEPTED_DOCUMENT_TYPES
        .iter()
        .find(|(_, e)| *e == ext)
        .map(|(mime, _)| *mime)
}

/// Check an upload before any bytes are sent or stored.
///
/// Returns the canonical content type on success.
pub fn validate_upload(
    file_name: &str,
    reported_type: Option<&str>,
    size_bytes: u64,
    max_bytes: u64,
) -> Result<&'static str, AppError> {
    if file_name.trim().is_empty() {
        return Err(AppError::field("file", "File name is missing"));
    }
    let content_type = resolve_content_type(file_name, reported_type).ok_or_else(|| {
        AppError::field("file", "Only PDF, DOCX and plain-text files are accepted")
    })?;
    if size_bytes == 0 {
        return Err(AppError::field("file", "File is empty"));
    }
    if size_bytes > max_bytes {
        return Err(AppError::field(
            "file",
            format!("File exceeds the {} upload limit", format_file_size(max_bytes)),
        ));
    }
    Ok(content_type)
}

/// Reduce a user-supplied file name to a storage-safe slug: path
/// components dropped, anything outside `[A-Za-z0-9._-]` replaced with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.chars().take(120).collect()
    }
}

/// Human-readable file size (B, KB, MB, GB) with one decimal above bytes.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MAX: u64 = DEFAULT_MAX_UPLOAD_BYTES;

    #[test]
    fn accepts_known_types() {
        assert_eq!(
            validate_upload("brief.pdf", Some("application/pdf"), 10, MAX).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            validate_upload("notes.txt", Some("text/plain"), 10, MAX).unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn falls_back_to_extension_when_type_is_generic() {
        assert_eq!(
            validate_upload("Motion.DOCX", Some("application/octet-stream"), 10, MAX).unwrap(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(validate_upload("a.pdf", None, 1, MAX).unwrap(), "application/pdf");
    }

    #[test]
    fn rejects_unsupported_types() {
        let err = validate_upload("photo.png", Some("image/png"), 10, MAX).unwrap_err();
        assert!(err.field_errors.contains_key("file"));
        assert!(validate_upload("no_extension", None, 10, MAX).is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_files() {
        assert_eq!(
            validate_upload("a.pdf", None, 0, MAX).unwrap_err().message,
            "File is empty"
        );
        let err = validate_upload("a.pdf", None, MAX + 1, MAX).unwrap_err();
        assert_eq!(err.message, "File exceeds the 20.0 MB upload limit");
        assert!(validate_upload("a.pdf", None, MAX, MAX).is_ok());
    }

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\cases\\Brief #2.pdf"), "Brief__2.pdf");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name("///"), "document");
    }

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn accept_attribute_lists_extensions() {
        assert_eq!(accept_attribute(), ".pdf,.docx,.txt");
    }
}
