//! The geometric rasterization pipeline
//!
//! Rendering is a strict leaves-first composition: curves are flattened to
//! polylines ([`flatten`]), strokes are transformed into closed fillable
//! outlines ([`stroke`]), and polygons are scan-converted into coverage and
//! composited ([`fill`]). The option enums here configure the pipeline and
//! are re-exported at the crate root.

pub mod fill;
pub mod flatten;
pub mod stroke;

/// Antialiasing mode for coverage computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AntiAliasMode {
  /// Single-sample each pixel center: hard edges, no blending
  None,
  /// Supersampled coverage on a regular subpixel grid
  #[default]
  Default,
}

/// Rule deciding which points are inside a self-intersecting polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
  /// A point is inside when the sum of signed edge crossings is non-zero
  #[default]
  NonZero,
  /// A point is inside when the number of edge crossings is odd
  EvenOdd,
}

/// Geometry bridging two consecutive stroked segments at a shared vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinMode {
  /// Extend the outer edges to their intersection, up to the miter limit
  #[default]
  Miter,
  /// Approximate a circular arc around the vertex
  Round,
  /// Connect the outer corners directly
  Bevel,
}

/// Geometry terminating an open stroked subpath's endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapMode {
  /// End exactly at the endpoint
  #[default]
  Butt,
  /// Extend past the endpoint by half the thickness
  Square,
  /// Approximate a semicircle around the endpoint
  Round,
}
