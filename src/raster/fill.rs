//! Polygon scan-conversion and compositing
//!
//! The filler turns closed polygons into per-pixel coverage over the
//! target surface's bounding rectangle, then composites the pattern
//! through that coverage with Porter-Duff `src-over`.
//!
//! Inside/outside tests cast a horizontal ray from the sample point and
//! count edge crossings with the half-open convention (top edge inclusive,
//! bottom edge exclusive), which keeps shared vertices single-counted and
//! skips horizontal edges entirely. The non-zero rule sums signed
//! crossings; the even-odd rule takes their parity.

use crate::geometry::{Point, Rect};
use crate::path::PathNode;
use crate::pattern::Pattern;
use crate::pixel::Alpha8;
use crate::raster::{AntiAliasMode, FillRule};
use crate::surface::Surface;

/// Supersampling grid dimension for the default antialiasing mode: each
/// pixel is resolved from `SAMPLE_GRID`² subsamples.
const SAMPLE_GRID: u32 = 4;

/// One non-horizontal polygon edge, kept in input order with its winding
/// direction.
#[derive(Debug, Clone, Copy)]
struct Edge {
  /// Endpoint with the smaller y.
  top: Point,
  /// Endpoint with the larger y.
  bottom: Point,
  /// +1 if the polygon traverses this edge downward, -1 upward.
  dir: i32,
}

impl Edge {
  fn new(a: Point, b: Point) -> Option<Edge> {
    if a.y == b.y {
      return None;
    }
    if a.y < b.y {
      Some(Edge {
        top: a,
        bottom: b,
        dir: 1,
      })
    } else {
      Some(Edge {
        top: b,
        bottom: a,
        dir: -1,
      })
    }
  }

  /// The signed crossing of a rightward ray from `p`, if any.
  #[inline]
  fn crossing(&self, p: Point) -> Option<i32> {
    if p.y < self.top.y || p.y >= self.bottom.y {
      return None;
    }
    let t = (p.y - self.top.y) / (self.bottom.y - self.top.y);
    let x = self.top.x + t * (self.bottom.x - self.top.x);
    (x > p.x).then_some(self.dir)
  }
}

/// Converts implicitly-closed polygons into the edge list the sampling
/// loop walks.
fn collect_edges(polygons: &[Vec<Point>]) -> (Vec<Edge>, Rect) {
  let mut edges = Vec::new();
  let mut bounds = Rect::EMPTY;
  for polygon in polygons {
    if polygon.len() < 2 {
      continue;
    }
    for i in 0..polygon.len() {
      let a = polygon[i];
      let b = polygon[(i + 1) % polygon.len()];
      bounds.expand_to(a);
      if let Some(edge) = Edge::new(a, b) {
        edges.push(edge);
      }
    }
  }
  (edges, bounds)
}

/// Tests a sample point against the edge list under the fill rule.
fn sample_inside(edges: &[Edge], p: Point, rule: FillRule) -> bool {
  let mut winding = 0i32;
  let mut crossings = 0u32;
  for edge in edges {
    if let Some(dir) = edge.crossing(p) {
      winding += dir;
      crossings += 1;
    }
  }
  match rule {
    FillRule::NonZero => winding != 0,
    FillRule::EvenOdd => crossings % 2 == 1,
  }
}

/// The 8-bit coverage of the pixel whose top-left corner is `(x, y)`.
fn pixel_coverage(edges: &[Edge], x: i32, y: i32, rule: FillRule, aa: AntiAliasMode) -> u8 {
  match aa {
    AntiAliasMode::None => {
      let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
      if sample_inside(edges, center, rule) {
        255
      } else {
        0
      }
    }
    AntiAliasMode::Default => {
      let mut samples = [Alpha8::new(0); (SAMPLE_GRID * SAMPLE_GRID) as usize];
      let mut i = 0;
      for sy in 0..SAMPLE_GRID {
        for sx in 0..SAMPLE_GRID {
          let p = Point::new(
            x as f64 + (sx as f64 + 0.5) / SAMPLE_GRID as f64,
            y as f64 + (sy as f64 + 0.5) / SAMPLE_GRID as f64,
          );
          if sample_inside(edges, p, rule) {
            samples[i] = Alpha8::new(255);
          }
          i += 1;
        }
      }
      Alpha8::average(&samples).a
    }
  }
}

/// Fills implicitly-closed polygons onto the surface through the pattern
///
/// Coverage is computed per pixel inside the polygons' bounding box
/// clipped to the surface; zero-coverage pixels are skipped, and covered
/// pixels composite `pattern(x, y)` attenuated by coverage with
/// `src-over`.
pub fn fill_polygons(
  surface: &mut Surface,
  pattern: &Pattern,
  polygons: &[Vec<Point>],
  rule: FillRule,
  aa: AntiAliasMode,
) {
  let (edges, bounds) = collect_edges(polygons);
  if edges.is_empty() || bounds.is_empty() {
    return;
  }

  let surface_rect = Rect::new(
    Point::ZERO,
    Point::new(surface.width() as f64, surface.height() as f64),
  );
  let clipped = bounds.intersect(surface_rect);
  if clipped.is_empty() {
    return;
  }

  let x0 = clipped.min.x.floor().max(0.0) as i32;
  let y0 = clipped.min.y.floor().max(0.0) as i32;
  let x1 = (clipped.max.x.floor() as i32).min(surface.width() as i32 - 1);
  let y1 = (clipped.max.y.floor() as i32).min(surface.height() as i32 - 1);

  for y in y0..=y1 {
    for x in x0..=x1 {
      let coverage = pixel_coverage(&edges, x, y, rule, aa);
      if coverage == 0 {
        continue;
      }
      let src = pattern.pixel_at(x, y).attenuated(coverage);
      surface.composite_src_over(x, y, src);
    }
  }
}

/// Gathers a flattened node list into implicitly-closed polygons, one per
/// subpath
///
/// Explicit `ClosePath` nodes and the implicit closing edge of an open
/// subpath produce the same polygon, which is what makes `fill` invariant
/// under splitting a subpath with intermediate `MoveTo`s.
pub fn path_polygons(nodes: &[PathNode]) -> Vec<Vec<Point>> {
  let mut polygons = Vec::new();
  let mut current: Vec<Point> = Vec::new();

  for node in nodes {
    match *node {
      PathNode::MoveTo { point } => {
        if current.len() > 1 {
          polygons.push(std::mem::take(&mut current));
        } else {
          current.clear();
        }
        current.push(point);
      }
      PathNode::LineTo { point } => {
        debug_assert!(!current.is_empty(), "line node with no subpath");
        if current.last() != Some(&point) {
          current.push(point);
        }
      }
      PathNode::CurveTo { end, .. } => {
        debug_assert!(false, "fill input must be flattened");
        if current.last() != Some(&end) {
          current.push(end);
        }
      }
      PathNode::ClosePath => {
        if current.len() > 1 {
          polygons.push(std::mem::take(&mut current));
        } else {
          current.clear();
        }
      }
    }
  }
  if current.len() > 1 {
    polygons.push(current);
  }

  polygons
}
