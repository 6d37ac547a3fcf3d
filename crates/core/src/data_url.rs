//! Converts uploaded photos into self-describing `data:` URLs and back
//!
//! The encoded string is what gets posted to the classification service and
//! what the preview decodes, so the image is only read from disk once.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;

use crate::error::{AnalyzerError, Result};

const FALLBACK_MIME: &str = "application/octet-stream";

/// A decoded `data:<mime>;base64,<payload>` string
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Read a file fully into memory and encode it as a data URL
pub fn file_to_data_url(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .map_err(|e| AnalyzerError::Read(format!("{}: {}", path.display(), e)))?;
    let extension_hint = path.extension().and_then(|ext| ext.to_str());
    bytes_to_data_url(&bytes, extension_hint)
}

/// Encode in-memory bytes (e.g. a dropped file) as a data URL.
///
/// The mime type is sniffed from the content first, then from the
/// extension hint.
pub fn bytes_to_data_url(bytes: &[u8], extension_hint: Option<&str>) -> Result<String> {
    if bytes.is_empty() {
        return Err(AnalyzerError::Read("file is empty".to_string()));
    }

    let mime = sniff_mime(bytes, extension_hint);
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn sniff_mime(bytes: &[u8], extension_hint: Option<&str>) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .or_else(|| extension_hint.and_then(ImageFormat::from_extension))
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

/// Split a base64 data URL back into mime type and raw bytes.
/// Returns `None` for anything that is not a well-formed base64 data URL.
pub fn decode_data_url(url: &str) -> Option<DataUrl> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload).ok()?;

    Some(DataUrl {
        mime: if mime.is_empty() { FALLBACK_MIME.to_string() } else { mime.to_string() },
        bytes,
    })
}
