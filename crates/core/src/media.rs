//! Media type admission and file extension handling.

use std::path::Path;

/// Image types admitted for upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl MediaType {
    /// Parse a declared MIME type against the admission list.
    pub fn from_mime(mime: &str) -> crate::Result<Self> {
        // Strip any parameters ("image/jpeg; charset=...") before matching.
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            "image/gif" => Ok(Self::Gif),
            "image/webp" => Ok(Self::Webp),
            other => Err(crate::Error::UnsupportedMediaType(other.to_string())),
        }
    }

    /// The MIME type string for this media type.
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Canonical file extension (with leading dot) for this media type.
    pub fn canonical_extension(&self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Gif => ".gif",
            Self::Webp => ".webp",
        }
    }
}

/// Derive the stored-file extension from the client's original filename.
///
/// The original extension is kept (lowercased) when it is a plausible one;
/// otherwise the canonical extension for the admitted media type is used.
/// The result always starts with a dot and contains only `[a-z0-9]`.
pub fn normalized_extension(original_name: &str, media_type: MediaType) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(e)
            if !e.is_empty()
                && e.len() <= 8
                && e.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) =>
        {
            format!(".{e}")
        }
        _ => media_type.canonical_extension().to_string(),
    }
}

/// Guess the content type to serve for a stored filename.
///
/// Serving is extension-driven; unknown extensions fall back to a generic
/// binary type.
pub fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}
