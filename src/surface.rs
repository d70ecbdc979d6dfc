//! Pixel surfaces: owned rectangular buffers of one fixed format
//!
//! A [`Surface`] owns a row-major, zero-initialized buffer of [`Rgb`],
//! [`Rgba`], or [`Alpha8`] pixels. Access is bounds-checked with defined
//! out-of-bounds behavior: reads return the format's zero pixel and writes
//! are silently clipped, so callers never see an error from pixel access.
//!
//! Construction guards the allocation: dimension math is checked, the byte
//! size is capped, and the buffer is reserved with `try_reserve_exact` so
//! an oversized request fails with an error instead of aborting the
//! process.

use crate::error::SurfaceError;
use crate::pixel::{Alpha8, Pixel, Rgb, Rgba};

/// Upper bound on a single surface allocation to avoid process aborts on
/// OOM.
const MAX_SURFACE_BYTES: u64 = 512 * 1024 * 1024;

/// The pixel format of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFormat {
  Rgb,
  Rgba,
  Alpha8,
}

impl SurfaceFormat {
  /// Bytes per pixel in the raw buffer export
  pub fn bytes_per_pixel(self) -> u64 {
    match self {
      SurfaceFormat::Rgb => 3,
      SurfaceFormat::Rgba => 4,
      SurfaceFormat::Alpha8 => 1,
    }
  }

  /// The zero pixel for this format (transparent/black)
  pub fn zero_pixel(self) -> Pixel {
    match self {
      SurfaceFormat::Rgb => Pixel::Rgb(Rgb::default()),
      SurfaceFormat::Rgba => Pixel::Rgba(Rgba::default()),
      SurfaceFormat::Alpha8 => Pixel::Alpha8(Alpha8::default()),
    }
  }
}

/// One rectangular plane of pixels of a single concrete type.
#[derive(Debug, Clone)]
struct Plane<P> {
  width: u32,
  height: u32,
  pixels: Vec<P>,
}

impl<P: Copy + Default> Plane<P> {
  fn new(width: u32, height: u32, bytes_per_pixel: u64) -> Result<Self, SurfaceError> {
    if width == 0 || height == 0 {
      return Err(SurfaceError::InvalidDimensions { width, height });
    }
    let count = (width as u64)
      .checked_mul(height as u64)
      .ok_or(SurfaceError::InvalidDimensions { width, height })?;
    let bytes = count
      .checked_mul(bytes_per_pixel)
      .ok_or(SurfaceError::InvalidDimensions { width, height })?;
    if bytes > MAX_SURFACE_BYTES {
      return Err(SurfaceError::AllocationTooLarge {
        width,
        height,
        bytes,
        limit: MAX_SURFACE_BYTES,
      });
    }

    let mut pixels = Vec::new();
    pixels
      .try_reserve_exact(count as usize)
      .map_err(|err| SurfaceError::AllocationFailed {
        bytes,
        reason: err.to_string(),
      })?;
    pixels.resize(count as usize, P::default());

    Ok(Self {
      width,
      height,
      pixels,
    })
  }

  #[inline]
  fn index(&self, x: i32, y: i32) -> Option<usize> {
    if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
      None
    } else {
      Some(y as usize * self.width as usize + x as usize)
    }
  }

  #[inline]
  fn get(&self, x: i32, y: i32) -> Option<P> {
    self.index(x, y).map(|i| self.pixels[i])
  }

  #[inline]
  fn set(&mut self, x: i32, y: i32, p: P) {
    if let Some(i) = self.index(x, y) {
      self.pixels[i] = p;
    }
  }
}

/// An owned pixel buffer of one fixed format
///
/// # Examples
///
/// ```
/// use pathrender::{Surface, SurfaceFormat};
/// use pathrender::pixel::{Pixel, Rgb};
///
/// let mut surface = Surface::new(SurfaceFormat::Rgb, 4, 4).unwrap();
/// surface.set(1, 2, Pixel::Rgb(Rgb::new(255, 0, 0)));
/// assert_eq!(surface.get(1, 2), Pixel::Rgb(Rgb::new(255, 0, 0)));
///
/// // Out-of-bounds reads return the zero pixel; writes are clipped.
/// assert_eq!(surface.get(-1, 0), Pixel::Rgb(Rgb::new(0, 0, 0)));
/// surface.set(100, 100, Pixel::Rgb(Rgb::new(1, 1, 1)));
/// ```
#[derive(Debug, Clone)]
pub enum Surface {
  Rgb(SurfaceRgb),
  Rgba(SurfaceRgba),
  Alpha8(SurfaceAlpha8),
}

/// An RGB surface plane (newtype so the enum variants stay nameable)
#[derive(Debug, Clone)]
pub struct SurfaceRgb(Plane<Rgb>);

/// An RGBA (premultiplied) surface plane
#[derive(Debug, Clone)]
pub struct SurfaceRgba(Plane<Rgba>);

/// A coverage-only surface plane
#[derive(Debug, Clone)]
pub struct SurfaceAlpha8(Plane<Alpha8>);

impl Surface {
  /// Creates a zero-initialized surface
  ///
  /// # Errors
  ///
  /// Fails with [`SurfaceError`] if either dimension is zero, the pixel
  /// count overflows, or the buffer would exceed the allocation cap.
  pub fn new(format: SurfaceFormat, width: u32, height: u32) -> Result<Self, SurfaceError> {
    let bpp = format.bytes_per_pixel();
    Ok(match format {
      SurfaceFormat::Rgb => Surface::Rgb(SurfaceRgb(Plane::new(width, height, bpp)?)),
      SurfaceFormat::Rgba => Surface::Rgba(SurfaceRgba(Plane::new(width, height, bpp)?)),
      SurfaceFormat::Alpha8 => Surface::Alpha8(SurfaceAlpha8(Plane::new(width, height, bpp)?)),
    })
  }

  /// The surface's pixel format
  pub fn format(&self) -> SurfaceFormat {
    match self {
      Surface::Rgb(_) => SurfaceFormat::Rgb,
      Surface::Rgba(_) => SurfaceFormat::Rgba,
      Surface::Alpha8(_) => SurfaceFormat::Alpha8,
    }
  }

  /// Surface width in pixels
  pub fn width(&self) -> u32 {
    match self {
      Surface::Rgb(s) => s.0.width,
      Surface::Rgba(s) => s.0.width,
      Surface::Alpha8(s) => s.0.width,
    }
  }

  /// Surface height in pixels
  pub fn height(&self) -> u32 {
    match self {
      Surface::Rgb(s) => s.0.height,
      Surface::Rgba(s) => s.0.height,
      Surface::Alpha8(s) => s.0.height,
    }
  }

  /// Reads the pixel at `(x, y)`
  ///
  /// Out-of-bounds coordinates return the format's zero pixel.
  pub fn get(&self, x: i32, y: i32) -> Pixel {
    match self {
      Surface::Rgb(s) => Pixel::Rgb(s.0.get(x, y).unwrap_or_default()),
      Surface::Rgba(s) => Pixel::Rgba(s.0.get(x, y).unwrap_or_default()),
      Surface::Alpha8(s) => Pixel::Alpha8(s.0.get(x, y).unwrap_or_default()),
    }
  }

  /// Writes the pixel at `(x, y)`, converting to the surface format
  ///
  /// Out-of-bounds writes are silently clipped. A mismatched variant is
  /// converted: widening follows the standard casts, and narrowing to RGB
  /// keeps the (premultiplied) color channels.
  pub fn set(&mut self, x: i32, y: i32, pixel: Pixel) {
    match self {
      Surface::Rgb(s) => {
        let p = match pixel {
          Pixel::Rgb(p) => p,
          other => {
            let rgba = other.as_rgba();
            Rgb::new(rgba.r, rgba.g, rgba.b)
          }
        };
        s.0.set(x, y, p);
      }
      Surface::Rgba(s) => s.0.set(x, y, pixel.as_rgba()),
      Surface::Alpha8(s) => s.0.set(x, y, pixel.as_alpha8()),
    }
  }

  /// Composites `src` over the pixel at `(x, y)` with Porter-Duff
  /// `src-over`
  ///
  /// Out-of-bounds coordinates are ignored.
  pub fn composite_src_over(&mut self, x: i32, y: i32, src: Pixel) {
    match self {
      Surface::Rgb(s) => {
        if let Some(dst) = s.0.get(x, y) {
          s.0.set(x, y, dst.src_over(src.as_rgba()));
        }
      }
      Surface::Rgba(s) => {
        if let Some(dst) = s.0.get(x, y) {
          s.0.set(x, y, dst.src_over(src.as_rgba()));
        }
      }
      Surface::Alpha8(s) => {
        if let Some(dst) = s.0.get(x, y) {
          s.0.set(x, y, dst.src_over(src.as_alpha8()));
        }
      }
    }
  }

  /// Composites with Porter-Duff `dst-in`, scaling the destination by the
  /// source's alpha
  pub fn composite_dst_in(&mut self, x: i32, y: i32, src: Pixel) {
    match self {
      Surface::Rgb(s) => {
        if let Some(dst) = s.0.get(x, y) {
          s.0.set(x, y, dst.dst_in(src.as_rgba()));
        }
      }
      Surface::Rgba(s) => {
        if let Some(dst) = s.0.get(x, y) {
          s.0.set(x, y, dst.dst_in(src.as_rgba()));
        }
      }
      Surface::Alpha8(s) => {
        if let Some(dst) = s.0.get(x, y) {
          s.0.set(x, y, dst.dst_in(src.as_alpha8()));
        }
      }
    }
  }

  /// Exports the buffer as raw bytes in the surface's native channel order
  ///
  /// Row-major: 3 bytes per pixel for RGB, 4 for RGBA (premultiplied, as
  /// stored), 1 for Alpha8. This is the representation golden-file
  /// comparisons use.
  pub fn to_bytes(&self) -> Vec<u8> {
    match self {
      Surface::Rgb(s) => {
        let mut out = Vec::with_capacity(s.0.pixels.len() * 3);
        for p in &s.0.pixels {
          out.extend_from_slice(&[p.r, p.g, p.b]);
        }
        out
      }
      Surface::Rgba(s) => {
        let mut out = Vec::with_capacity(s.0.pixels.len() * 4);
        for p in &s.0.pixels {
          out.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        out
      }
      Surface::Alpha8(s) => s.0.pixels.iter().map(|p| p.a).collect(),
    }
  }

  /// Exports the buffer as straight-alpha RGBA bytes for image encoding
  ///
  /// Premultiplied surfaces are demultiplied; RGB gains an opaque alpha
  /// channel; Alpha8 exports as transparent black at its coverage.
  pub fn to_rgba_bytes(&self) -> Vec<u8> {
    let (w, h) = (self.width() as usize, self.height() as usize);
    let mut out = Vec::with_capacity(w * h * 4);
    match self {
      Surface::Rgb(s) => {
        for p in &s.0.pixels {
          out.extend_from_slice(&[p.r, p.g, p.b, 255]);
        }
      }
      Surface::Rgba(s) => {
        for p in &s.0.pixels {
          let straight = p.demultiply();
          out.extend_from_slice(&[straight.r, straight.g, straight.b, straight.a]);
        }
      }
      Surface::Alpha8(s) => {
        for p in &s.0.pixels {
          out.extend_from_slice(&[0, 0, 0, p.a]);
        }
      }
    }
    out
  }
}
