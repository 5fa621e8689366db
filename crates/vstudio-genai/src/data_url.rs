//! Image payload handling for image-to-video requests.

/// MIME type assumed when the payload carries no data-URL prefix.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Base64-encoded image bytes plus their MIME type, as submitted to the
/// generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Raw base64 data, without any data-URL prefix.
    pub data: String,
    /// MIME type of the encoded image.
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Build a payload from an uploaded image string.
    ///
    /// A `data:<mime>;base64,` prefix is stripped and its MIME type kept;
    /// a bare base64 string is passed through with the default MIME type.
    pub fn from_data_url(payload: &str) -> Self {
        if let Some(rest) = payload.strip_prefix("data:") {
            if let Some((mime, data)) = rest.split_once(";base64,") {
                let mime_type = if mime.is_empty() { DEFAULT_IMAGE_MIME } else { mime };
                return Self::new(data, mime_type);
            }
        }

        Self::new(payload, DEFAULT_IMAGE_MIME)
    }
}
