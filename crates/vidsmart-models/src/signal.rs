//! Image signal passed to the content analysis client.

use std::fmt;

/// A compressed raster image held as base64, self-describing via MIME type.
///
/// Renders as a `data:` URI for display and exposes the raw base64 payload
/// for inlining into analysis requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSignal {
    mime_type: String,
    data: String,
}

impl ImageSignal {
    /// Wrap raw JPEG bytes.
    pub fn from_jpeg(bytes: &[u8]) -> Self {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        Self {
            mime_type: "image/jpeg".to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Parse a `data:` URI back into a signal.
    ///
    /// Returns `None` when the input is not a base64 data URI.
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (mime_type, data) = rest.split_once(";base64,")?;
        Some(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    /// MIME type of the encoded image.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 payload without the data-URI prefix.
    pub fn base64_data(&self) -> &str {
        &self.data
    }

    /// Displayable `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

impl fmt::Display for ImageSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_data_uri())
    }
}
