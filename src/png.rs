//! PNG encoding of rendered surfaces
//!
//! Golden-file comparisons work on the raw buffer from
//! [`Surface::to_bytes`]; this module adds a human-inspectable PNG path on
//! top. Premultiplied surfaces are converted to straight alpha before
//! encoding, since PNG stores unassociated alpha.

use crate::error::{EncodeError, Result};
use crate::surface::Surface;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Encodes the surface as PNG bytes
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>> {
  let width = surface.width();
  let height = surface.height();
  let rgba = surface.to_rgba_bytes();

  let img = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| EncodeError::EncodeFailed {
    format: "PNG".to_string(),
    reason: "surface bytes do not match dimensions".to_string(),
  })?;

  let mut buffer = Vec::new();
  img
    .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
    .map_err(|e| EncodeError::EncodeFailed {
      format: "PNG".to_string(),
      reason: e.to_string(),
    })?;

  Ok(buffer)
}

/// Encodes the surface and writes it to `path`
pub fn write_png(surface: &Surface, path: &std::path::Path) -> Result<()> {
  let bytes = encode_png(surface)?;
  std::fs::write(path, bytes)?;
  Ok(())
}
