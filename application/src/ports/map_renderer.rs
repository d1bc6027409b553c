//! Map renderer port
//!
//! Turns a concept graph into encoded image bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use studybuddy_domain::ConceptGraph;

/// Encoded image plus its media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl RenderedImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Standard base64 of the image bytes
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URI suitable for embedding in HTML or JSON
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// Renders concept graphs
///
/// Rendering never fails: adapters degrade internal errors into a
/// placeholder image that carries the error text.
pub trait MapRenderer: Send + Sync {
    fn render(&self, graph: &ConceptGraph) -> RenderedImage;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_helpers() {
        let image = RenderedImage::new("image/svg+xml", b"<svg/>".to_vec());
        assert_eq!(image.to_base64(), "PHN2Zy8+");
        assert_eq!(image.to_data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
