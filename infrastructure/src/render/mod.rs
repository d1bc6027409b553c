//! Map renderers

mod svg;

pub use svg::{SVG_MIME_TYPE, SvgMapRenderer, encode_svg};
