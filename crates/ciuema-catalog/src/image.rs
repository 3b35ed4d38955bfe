use std::path::Path;

use base64::Engine;
use ciuema_core::error::CiuemaError;

/// MIME type for a supported image file extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

/// Embed raw image bytes as a `data:` URL.
pub fn bytes_to_data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Read an image file whole and embed it as a `data:` URL.
pub fn image_to_data_url(path: &Path) -> Result<String, CiuemaError> {
    let mime = mime_for_path(path).ok_or_else(|| {
        CiuemaError::validation("image", format!("{} is not a supported image", path.display()))
    })?;
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "embedded image");
    Ok(bytes_to_data_url(mime, &bytes))
}
