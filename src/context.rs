//! The drawing context: the thin orchestrator over the pipeline
//!
//! A [`Context`] borrows a target surface, carries a pattern and the
//! rendering options, and exposes the two drawing verbs: [`Context::fill`]
//! and [`Context::stroke`]. It owns nothing long-lived beyond these; every
//! intermediate allocation (flattened nodes, stroke outlines, edge lists)
//! lives only for the duration of one call.

use crate::path::Path;
use crate::pattern::Pattern;
use crate::raster::fill::{fill_polygons, path_polygons};
use crate::raster::flatten::{flatten, DEFAULT_TOLERANCE};
use crate::raster::stroke::{stroke_outlines, StrokeOptions};
use crate::raster::{AntiAliasMode, CapMode, FillRule, JoinMode};
use crate::surface::Surface;
use log::debug;

/// Drawing context borrowing a surface and a pattern
///
/// # Examples
///
/// ```
/// use pathrender::{Context, Path, Pattern, Surface, SurfaceFormat};
/// use pathrender::pixel::{Pixel, Rgb};
///
/// let mut surface = Surface::new(SurfaceFormat::Rgb, 100, 100).unwrap();
/// let mut context = Context::new(
///     &mut surface,
///     Pattern::Opaque(Pixel::Rgb(Rgb::new(255, 255, 255))),
/// );
///
/// let mut path = Path::new();
/// path.move_to(10.0, 10.0).line_to(90.0, 10.0).line_to(50.0, 90.0).close();
/// context.fill(&path);
/// ```
#[derive(Debug)]
pub struct Context<'a> {
  surface: &'a mut Surface,
  /// Paint source for fills and strokes
  pub pattern: Pattern,
  /// Coverage sampling mode
  pub anti_aliasing_mode: AntiAliasMode,
  /// Inside/outside rule used by [`Context::fill`]
  pub fill_rule: FillRule,
  /// Stroke thickness in surface units
  pub line_width: f64,
  /// Join geometry between stroked segments
  pub line_join: JoinMode,
  /// Miter-to-half-width ratio beyond which joins bevel
  pub miter_limit: f64,
  /// Cap geometry for open stroked subpaths
  pub line_cap: CapMode,
}

impl<'a> Context<'a> {
  /// Creates a context with default rendering options
  pub fn new(surface: &'a mut Surface, pattern: Pattern) -> Self {
    let stroke_defaults = StrokeOptions::default();
    Self {
      surface,
      pattern,
      anti_aliasing_mode: AntiAliasMode::default(),
      fill_rule: FillRule::default(),
      line_width: stroke_defaults.width,
      line_join: stroke_defaults.join,
      miter_limit: stroke_defaults.miter_limit,
      line_cap: stroke_defaults.cap,
    }
  }

  /// The surface being drawn to
  pub fn surface(&self) -> &Surface {
    &*self.surface
  }

  /// Fills the path's interior under the configured fill rule
  ///
  /// Curves are flattened first; every subpath is treated as closed, so an
  /// open subpath fills as if its endpoints were connected.
  pub fn fill(&mut self, path: &Path) {
    let flattened = flatten(path.nodes(), DEFAULT_TOLERANCE);
    let polygons = path_polygons(&flattened);
    debug!(
      "fill: {} nodes -> {} polygons ({:?}, {:?})",
      path.nodes().len(),
      polygons.len(),
      self.fill_rule,
      self.anti_aliasing_mode
    );
    fill_polygons(
      self.surface,
      &self.pattern,
      &polygons,
      self.fill_rule,
      self.anti_aliasing_mode,
    );
  }

  /// Strokes along the path with the configured pen
  ///
  /// Curves are flattened, the stroke transformer builds one closed
  /// outline polygon per subpath, and the outlines are filled under the
  /// non-zero rule.
  pub fn stroke(&mut self, path: &Path) {
    let flattened = flatten(path.nodes(), DEFAULT_TOLERANCE);
    let options = StrokeOptions {
      width: self.line_width,
      join: self.line_join,
      miter_limit: self.miter_limit,
      cap: self.line_cap,
    };
    let outlines = stroke_outlines(&flattened, &options);
    debug!(
      "stroke: {} nodes -> {} outlines (width {})",
      path.nodes().len(),
      outlines.len(),
      options.width
    );
    fill_polygons(
      self.surface,
      &self.pattern,
      &outlines,
      FillRule::NonZero,
      self.anti_aliasing_mode,
    );
  }
}
