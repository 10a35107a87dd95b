pub mod axis;
pub mod canvas;
pub mod color;
pub mod dictionary_table;
pub mod errorbar;
#[cfg(feature = "png")]
pub mod png;
pub mod primitives;

use std::path::Path;

use crate::error::{ReportError, Result};

/// Encodes an SVG document in the format named by `format` (`svg` or `png`).
#[cfg_attr(not(feature = "png"), allow(unused_variables))]
pub fn encode(svg: &str, format: &str, dpi: u32) -> Result<Vec<u8>> {
    match format.to_ascii_lowercase().as_str() {
        "svg" => Ok(svg.as_bytes().to_vec()),
        #[cfg(feature = "png")]
        "png" => png::svg_to_png(svg, dpi),
        other => Err(ReportError::UnsupportedFormat(other.to_string())),
    }
}

/// Writes an SVG document to `path`, choosing the encoding from the file extension.
pub fn save(svg: &str, path: &Path, dpi: u32) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("svg");
    let bytes = encode(svg, ext, dpi)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
