//! Error types for pathrender
//!
//! This module provides error types for all subsystems:
//! - Pixel errors (format mismatches in checked casts)
//! - Surface errors (dimension/allocation failures)
//! - SVG errors (document-level parse failures)
//! - Encode errors (PNG output)
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.
//!
//! Two failure classes deliberately do NOT surface here: out-of-bounds
//! surface access (reads return a zero pixel, writes are clipped) and
//! malformed path construction (a builder assertion, since it is a
//! programming error rather than a runtime condition). Attribute-level SVG
//! problems accumulate as warnings on the parsed scene instead of aborting
//! the parse.

use thiserror::Error;

/// Result type alias for pathrender operations
///
/// # Examples
///
/// ```
/// use pathrender::Result;
///
/// fn prepare() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for pathrender
///
/// Each variant wraps a more specific error type for that subsystem.
#[derive(Error, Debug)]
pub enum Error {
  /// Pixel format mismatch in a checked conversion
  #[error("Pixel error: {0}")]
  Pixel(#[from] PixelError),

  /// Surface construction error
  #[error("Surface error: {0}")]
  Surface(#[from] SurfaceError),

  /// SVG document error
  #[error("SVG error: {0}")]
  Svg(#[from] SvgError),

  /// Image encoding error
  #[error("Encode error: {0}")]
  Encode(#[from] EncodeError),

  /// I/O error (file reading/writing)
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// Generic error for miscellaneous issues
  #[error("{0}")]
  Other(String),
}

/// Errors from checked pixel conversions
///
/// The infallible widening casts (`Rgb` → `Rgba` and friends) never produce
/// these; only `try_*` narrowing of the tagged [`Pixel`] union does.
///
/// [`Pixel`]: crate::pixel::Pixel
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelError {
  /// The pixel's variant does not match the requested format
  #[error("Invalid pixel format: expected {expected}, got {actual}")]
  InvalidPixelFormat {
    expected: &'static str,
    actual: &'static str,
  },
}

/// Errors that occur when constructing a surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
  /// Width or height is zero, or the pixel count overflows
  #[error("Invalid surface dimensions: {width}x{height}")]
  InvalidDimensions { width: u32, height: u32 },

  /// The buffer would exceed the allocation cap
  #[error("Surface {width}x{height} would allocate {bytes} bytes (limit {limit})")]
  AllocationTooLarge {
    width: u32,
    height: u32,
    bytes: u64,
    limit: u64,
  },

  /// The allocator refused the buffer
  #[error("Surface allocation failed for {bytes} bytes: {reason}")]
  AllocationFailed { bytes: u64, reason: String },
}

/// Errors that occur while reading an SVG document
///
/// These cover document-level failures only; malformed attributes inside a
/// well-formed document become warnings on the parsed scene.
#[derive(Error, Debug, Clone)]
pub enum SvgError {
  /// The XML itself could not be parsed
  #[error("Malformed XML: {reason}")]
  MalformedXml { reason: String },

  /// The root element is not `<svg>`
  #[error("Root element is <{found}>, expected <svg>")]
  NotSvg { found: String },
}

/// Errors that occur while encoding rendered output
#[derive(Error, Debug, Clone)]
pub enum EncodeError {
  /// Encoding to the named format failed
  #[error("Failed to encode image as {format}: {reason}")]
  EncodeFailed { format: String, reason: String },
}
