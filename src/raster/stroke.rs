//! Stroke transformer: polyline + pen parameters → fillable outline
//!
//! Given a flattened path, a thickness, a join mode, a miter limit, and a
//! cap mode, this module produces closed polygons whose interiors are the
//! stroked region. One polygon is emitted per subpath; the filler then
//! renders them under the non-zero rule.
//!
//! Geometry is built from offset *faces*: for each spine segment, the four
//! corners obtained by translating the endpoints perpendicular to the
//! segment by half the thickness, clockwise and counter-clockwise. Faces
//! are a tagged variant over `Horizontal` / `Vertical` / `Diagonal` so
//! axis-aligned segments take `copysign` fast paths and all join
//! intersections stay closed-form point-plus-slope math.

use crate::geometry::Point;
use crate::path::PathNode;
use crate::raster::{CapMode, JoinMode};

/// Tolerance for the line-segment approximation of round joins and caps,
/// in surface units.
const ARC_TOLERANCE: f64 = 0.1;

/// Directions whose cross product is below this are treated as collinear.
const COLLINEAR_EPS: f64 = 1e-9;

/// Pen parameters for one stroke operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeOptions {
  /// Stroke thickness in surface units
  pub width: f64,
  /// Geometry bridging consecutive segments at a shared vertex
  pub join: JoinMode,
  /// Maximum ratio of miter length to half-thickness before a miter join
  /// falls back to bevel
  pub miter_limit: f64,
  /// Geometry terminating an open subpath's endpoints
  pub cap: CapMode,
}

impl Default for StrokeOptions {
  fn default() -> Self {
    Self {
      width: 2.0,
      join: JoinMode::Miter,
      miter_limit: 10.0,
      cap: CapMode::Butt,
    }
  }
}

/// Which perpendicular side of a face an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
  Cw,
  Ccw,
}

#[derive(Debug, Clone, Copy)]
struct FaceGeometry {
  p0: Point,
  p1: Point,
  /// Unit spine direction.
  dir: Point,
  /// Perpendicular offset from the spine to the clockwise side, length
  /// half the thickness.
  offset: Point,
}

/// An offset face around one spine segment.
///
/// The variant records the segment's orientation class: horizontal and
/// vertical segments get exact offsets from `copysign` with no
/// normalization, and the split keeps the intersection arithmetic below
/// free of indeterminate slopes.
#[derive(Debug, Clone, Copy)]
enum Face {
  Horizontal(FaceGeometry),
  Vertical(FaceGeometry),
  Diagonal(FaceGeometry),
}

impl Face {
  fn new(p0: Point, p1: Point, half: f64) -> Face {
    let d = p1 - p0;
    if d.y == 0.0 {
      let dir = Point::new(1.0_f64.copysign(d.x), 0.0);
      let offset = Point::new(0.0, half.copysign(d.x));
      Face::Horizontal(FaceGeometry {
        p0,
        p1,
        dir,
        offset,
      })
    } else if d.x == 0.0 {
      let dir = Point::new(0.0, 1.0_f64.copysign(d.y));
      let offset = Point::new((-half).copysign(d.y), 0.0);
      Face::Vertical(FaceGeometry {
        p0,
        p1,
        dir,
        offset,
      })
    } else {
      let dir = d.normalized();
      let offset = Point::new(-dir.y, dir.x) * half;
      Face::Diagonal(FaceGeometry {
        p0,
        p1,
        dir,
        offset,
      })
    }
  }

  #[inline]
  fn geometry(&self) -> &FaceGeometry {
    match self {
      Face::Horizontal(g) | Face::Vertical(g) | Face::Diagonal(g) => g,
    }
  }

  #[inline]
  fn dir(&self) -> Point {
    self.geometry().dir
  }

  #[inline]
  fn side_offset(&self, side: Side) -> Point {
    match side {
      Side::Cw => self.geometry().offset,
      Side::Ccw => -self.geometry().offset,
    }
  }

  #[inline]
  fn p0_on(&self, side: Side) -> Point {
    self.geometry().p0 + self.side_offset(side)
  }

  #[inline]
  fn p1_on(&self, side: Side) -> Point {
    self.geometry().p1 + self.side_offset(side)
  }

  #[inline]
  fn is_vertical(&self) -> bool {
    matches!(self, Face::Vertical(_))
  }

  /// dy/dx of the spine. Callers must rule out vertical faces first.
  #[inline]
  fn slope(&self) -> f64 {
    match self {
      Face::Horizontal(_) => 0.0,
      Face::Vertical(_) => unreachable!("slope of a vertical face"),
      Face::Diagonal(g) => g.dir.y / g.dir.x,
    }
  }
}

/// Intersects the `side` offset lines of two faces.
///
/// Returns `None` when the lines are parallel; the caller degenerates to
/// the shared offset corner in that case.
fn intersect_offsets(a: &Face, b: &Face, side: Side) -> Option<Point> {
  let qa = a.p0_on(side);
  let qb = b.p0_on(side);
  match (a.is_vertical(), b.is_vertical()) {
    (true, true) => None,
    (true, false) => {
      let x = qa.x;
      Some(Point::new(x, qb.y + b.slope() * (x - qb.x)))
    }
    (false, true) => {
      let x = qb.x;
      Some(Point::new(x, qa.y + a.slope() * (x - qa.x)))
    }
    (false, false) => {
      let ma = a.slope();
      let mb = b.slope();
      if ma == mb {
        return None;
      }
      let x = (ma * qa.x - mb * qb.x + qb.y - qa.y) / (ma - mb);
      Some(Point::new(x, qa.y + ma * (x - qa.x)))
    }
  }
}

/// Appends the interior points of a circular arc around `center`.
///
/// The endpoints themselves are not emitted. The arc is approximated by
/// line segments short enough that the sagitta stays below
/// [`ARC_TOLERANCE`].
fn push_arc(out: &mut Vec<Point>, center: Point, radius: f64, start_angle: f64, sweep: f64) {
  if radius <= 0.0 || sweep == 0.0 {
    return;
  }
  let max_step = 2.0 * (1.0 - ARC_TOLERANCE / radius).clamp(-1.0, 1.0).acos();
  if !(max_step > 0.0) {
    return;
  }
  let segments = (sweep.abs() / max_step).ceil().max(1.0) as usize;
  for k in 1..segments {
    let angle = start_angle + sweep * (k as f64 / segments as f64);
    out.push(center + radius * Point::new(angle.cos(), angle.sin()));
  }
}

/// The join points at one vertex, one list per chain, both in forward
/// traversal order along the stroke spine.
#[derive(Debug, Default)]
struct Join {
  ccw: Vec<Point>,
  cw: Vec<Point>,
}

/// Computes the join between face `a` (into the vertex) and face `b` (out
/// of it).
///
/// The convex side of the turn receives the decorative treatment (miter
/// with limit fallback, bevel corners, or a round arc); the concave side
/// keeps the plain offset-line intersection. A zero turn degenerates both
/// sides to the shared offset corner.
fn compute_join(a: &Face, b: &Face, vertex: Point, half: f64, options: &StrokeOptions) -> Join {
  let turn = a.dir().cross(b.dir());
  if turn.abs() < COLLINEAR_EPS {
    return Join {
      ccw: vec![a.p1_on(Side::Ccw)],
      cw: vec![a.p1_on(Side::Cw)],
    };
  }

  let outer = if turn > 0.0 { Side::Ccw } else { Side::Cw };
  let inner = if turn > 0.0 { Side::Cw } else { Side::Ccw };

  let inner_point =
    intersect_offsets(a, b, inner).unwrap_or_else(|| a.p1_on(inner));

  let corner_a = a.p1_on(outer);
  let corner_b = b.p0_on(outer);
  let outer_points = match options.join {
    JoinMode::Miter => match intersect_offsets(a, b, outer) {
      Some(miter) if vertex.distance_to(miter) / half <= options.miter_limit => vec![miter],
      _ => vec![corner_a, corner_b],
    },
    JoinMode::Bevel => vec![corner_a, corner_b],
    JoinMode::Round => {
      let mut points = vec![corner_a];
      let from = corner_a - vertex;
      let to = corner_b - vertex;
      let start_angle = from.y.atan2(from.x);
      let end_angle = to.y.atan2(to.x);
      let mut sweep = end_angle - start_angle;
      if sweep > std::f64::consts::PI {
        sweep -= 2.0 * std::f64::consts::PI;
      } else if sweep < -std::f64::consts::PI {
        sweep += 2.0 * std::f64::consts::PI;
      }
      push_arc(&mut points, vertex, half, start_angle, sweep);
      points.push(corner_b);
      points
    }
  };

  match outer {
    Side::Ccw => Join {
      ccw: outer_points,
      cw: vec![inner_point],
    },
    Side::Cw => Join {
      ccw: vec![inner_point],
      cw: outer_points,
    },
  }
}

/// Appends the cap geometry terminating the stroke after the end face's
/// counter-clockwise corner and before its clockwise corner.
fn push_end_cap(out: &mut Vec<Point>, face: &Face, half: f64, cap: CapMode) {
  let g = face.geometry();
  match cap {
    CapMode::Butt => {}
    CapMode::Square => {
      let ext = g.dir * half;
      out.push(face.p1_on(Side::Ccw) + ext);
      out.push(face.p1_on(Side::Cw) + ext);
    }
    CapMode::Round => {
      let from = face.p1_on(Side::Ccw) - g.p1;
      push_arc(out, g.p1, half, from.y.atan2(from.x), std::f64::consts::PI);
    }
  }
}

/// Appends the cap geometry closing the stroke after the start face's
/// clockwise corner and before its counter-clockwise corner.
fn push_start_cap(out: &mut Vec<Point>, face: &Face, half: f64, cap: CapMode) {
  let g = face.geometry();
  match cap {
    CapMode::Butt => {}
    CapMode::Square => {
      let ext = g.dir * half;
      out.push(face.p0_on(Side::Cw) - ext);
      out.push(face.p0_on(Side::Ccw) - ext);
    }
    CapMode::Round => {
      let from = face.p0_on(Side::Cw) - g.p0;
      push_arc(out, g.p0, half, from.y.atan2(from.x), std::f64::consts::PI);
    }
  }
}

/// One subpath's spine, ready for offsetting.
struct Spine {
  points: Vec<Point>,
  closed: bool,
}

/// Splits a flattened node list into spines, deduplicating coincident
/// consecutive points.
fn collect_spines(nodes: &[PathNode]) -> Vec<Spine> {
  let mut spines = Vec::new();
  let mut points: Vec<Point> = Vec::new();
  let mut closed = false;

  let mut flush = |points: &mut Vec<Point>, closed: &mut bool| {
    if !points.is_empty() {
      let mut taken = std::mem::take(points);
      if *closed && taken.len() > 1 && taken.first() == taken.last() {
        taken.pop();
      }
      spines.push(Spine {
        points: taken,
        closed: *closed,
      });
    }
    *closed = false;
  };

  for node in nodes {
    match *node {
      PathNode::MoveTo { point } => {
        flush(&mut points, &mut closed);
        points.push(point);
      }
      PathNode::LineTo { point } => {
        debug_assert!(!points.is_empty(), "line node with no subpath");
        if points.last() != Some(&point) {
          points.push(point);
        }
      }
      PathNode::CurveTo { end, .. } => {
        debug_assert!(false, "stroke input must be flattened");
        if points.last() != Some(&end) {
          points.push(end);
        }
      }
      PathNode::ClosePath => {
        closed = true;
        flush(&mut points, &mut closed);
      }
    }
  }
  flush(&mut points, &mut closed);

  spines
}

/// Builds the outline polygon for an open spine.
fn outline_open(spine: &[Point], half: f64, options: &StrokeOptions) -> Vec<Point> {
  let faces: Vec<Face> = spine
    .windows(2)
    .map(|w| Face::new(w[0], w[1], half))
    .collect();
  let joins: Vec<Join> = (1..spine.len() - 1)
    .map(|i| compute_join(&faces[i - 1], &faces[i], spine[i], half, options))
    .collect();

  let first = faces.first().expect("open spine has at least one face");
  let last = faces.last().expect("open spine has at least one face");

  let mut poly = Vec::new();
  poly.push(first.p0_on(Side::Ccw));
  for join in &joins {
    poly.extend_from_slice(&join.ccw);
  }
  poly.push(last.p1_on(Side::Ccw));
  push_end_cap(&mut poly, last, half, options.cap);
  poly.push(last.p1_on(Side::Cw));
  for join in joins.iter().rev() {
    poly.extend(join.cw.iter().rev().copied());
  }
  poly.push(first.p0_on(Side::Cw));
  push_start_cap(&mut poly, first, half, options.cap);
  poly
}

/// Builds the outline polygon for a closed spine.
///
/// The offset rings are emitted as a single polygon: the counter-clockwise
/// ring forward, the clockwise ring backward, anchored at the first
/// vertex's join so the two connector edges coincide and cancel under the
/// non-zero rule, leaving the ring interior unfilled.
fn outline_closed(spine: &[Point], half: f64, options: &StrokeOptions) -> Vec<Point> {
  let n = spine.len();
  let faces: Vec<Face> = (0..n)
    .map(|i| Face::new(spine[i], spine[(i + 1) % n], half))
    .collect();
  let joins: Vec<Join> = (0..n)
    .map(|i| {
      let prev = &faces[(i + n - 1) % n];
      compute_join(prev, &faces[i], spine[i], half, options)
    })
    .collect();

  let mut poly = Vec::new();
  for join in &joins {
    poly.extend_from_slice(&join.ccw);
  }
  let outer_anchor = joins[0].ccw[0];
  poly.push(outer_anchor);

  let inner_anchor = *joins[0].cw.last().expect("join has at least one point");
  poly.extend(joins[0].cw.iter().rev().copied());
  for join in joins[1..].iter().rev() {
    poly.extend(join.cw.iter().rev().copied());
  }
  poly.push(inner_anchor);
  poly
}

/// Transforms a flattened path into stroke outline polygons, one per
/// subpath
///
/// Each returned polygon is implicitly closed and is meant to be filled
/// under the non-zero rule. Degenerate subpaths (a single point, or a
/// non-positive stroke width) produce no polygon.
///
/// The input must already be flattened: the transformer only understands
/// `MoveTo`, `LineTo`, and `ClosePath`.
pub fn stroke_outlines(nodes: &[PathNode], options: &StrokeOptions) -> Vec<Vec<Point>> {
  if options.width <= 0.0 {
    return Vec::new();
  }
  let half = options.width / 2.0;

  collect_spines(nodes)
    .into_iter()
    .filter_map(|spine| {
      if spine.points.len() < 2 {
        return None;
      }
      let poly = if spine.closed && spine.points.len() >= 3 {
        outline_closed(&spine.points, half, options)
      } else {
        outline_open(&spine.points, half, options)
      };
      (!poly.is_empty()).then_some(poly)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::path::Path;
  use crate::raster::flatten::{flatten, DEFAULT_TOLERANCE};

  fn options(width: f64) -> StrokeOptions {
    StrokeOptions {
      width,
      ..StrokeOptions::default()
    }
  }

  fn approx(a: Point, b: Point) -> bool {
    a.distance_to(b) < 1e-9
  }

  #[test]
  fn single_segment_strokes_to_offset_rectangle() {
    let mut path = Path::new();
    path.move_to(10.0, 10.0).line_to(110.0, 10.0);

    let polys = stroke_outlines(path.nodes(), &options(10.0));
    assert_eq!(polys.len(), 1);
    let poly = &polys[0];
    assert_eq!(poly.len(), 4);
    assert!(approx(poly[0], Point::new(10.0, 5.0)));
    assert!(approx(poly[1], Point::new(110.0, 5.0)));
    assert!(approx(poly[2], Point::new(110.0, 15.0)));
    assert!(approx(poly[3], Point::new(10.0, 15.0)));
  }

  #[test]
  fn diagonal_segment_offsets_by_unit_normal() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(10.0, 10.0);

    let polys = stroke_outlines(path.nodes(), &options(2.0 * 2.0_f64.sqrt()));
    let poly = &polys[0];
    // Unit normal of the 45° segment is (∓1/√2, ±1/√2); half-width √2.
    assert!(approx(poly[0], Point::new(1.0, -1.0)));
    assert!(approx(poly[1], Point::new(11.0, 9.0)));
    assert!(approx(poly[2], Point::new(9.0, 11.0)));
    assert!(approx(poly[3], Point::new(-1.0, 1.0)));
  }

  #[test]
  fn degenerate_subpaths_emit_nothing() {
    let mut path = Path::new();
    path.move_to(10.0, 10.0).close();
    assert!(stroke_outlines(path.nodes(), &options(5.0)).is_empty());

    let mut path = Path::new();
    path.move_to(10.0, 10.0);
    assert!(stroke_outlines(path.nodes(), &options(5.0)).is_empty());

    let mut path = Path::new();
    path.move_to(10.0, 10.0).line_to(20.0, 10.0);
    assert!(stroke_outlines(path.nodes(), &options(0.0)).is_empty());
  }

  #[test]
  fn right_angle_miter_join_produces_the_corner_point() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0);

    let polys = stroke_outlines(path.nodes(), &options(2.0));
    let poly = &polys[0];
    // Outer (convex) miter corner of a right-then-down turn.
    assert!(
      poly.iter().any(|&p| approx(p, Point::new(11.0, -1.0))),
      "missing outer miter corner in {poly:?}"
    );
    // Inner intersection.
    assert!(
      poly.iter().any(|&p| approx(p, Point::new(9.0, 1.0))),
      "missing inner corner in {poly:?}"
    );
  }

  #[test]
  fn sharp_turn_falls_back_to_bevel_under_miter_limit() {
    // Nearly-reversing V: the miter would be ~11x the half-width.
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(0.0, 1.8);

    let limited = StrokeOptions {
      width: 2.0,
      miter_limit: 2.0,
      ..StrokeOptions::default()
    };
    let unlimited = StrokeOptions {
      width: 2.0,
      miter_limit: 100.0,
      ..StrokeOptions::default()
    };

    let beveled = &stroke_outlines(path.nodes(), &limited)[0];
    let mitered = &stroke_outlines(path.nodes(), &unlimited)[0];
    // The bevel replaces one miter point with two corner points.
    assert_eq!(beveled.len(), mitered.len() + 1);
    let far_x = |poly: &[Point]| poly.iter().map(|p| p.x).fold(f64::MIN, f64::max);
    assert!(far_x(mitered) > far_x(beveled));
  }

  #[test]
  fn collinear_segments_join_without_dividing_by_zero() {
    let mut path = Path::new();
    path
      .move_to(0.0, 0.0)
      .line_to(5.0, 0.0)
      .line_to(10.0, 0.0);

    let polys = stroke_outlines(path.nodes(), &options(2.0));
    let poly = &polys[0];
    assert!(poly.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    // Same rectangle as a single segment, with the seam vertex repeated.
    assert!(poly.iter().any(|&p| approx(p, Point::new(5.0, -1.0))));
    assert!(poly.iter().any(|&p| approx(p, Point::new(5.0, 1.0))));
  }

  #[test]
  fn closed_square_produces_inner_and_outer_rings() {
    let mut path = Path::new();
    path
      .move_to(50.0, 50.0)
      .line_to(150.0, 50.0)
      .line_to(150.0, 150.0)
      .line_to(50.0, 150.0)
      .close();

    let polys = stroke_outlines(path.nodes(), &options(10.0));
    assert_eq!(polys.len(), 1);
    let poly = &polys[0];
    for expected in [
      Point::new(45.0, 45.0),
      Point::new(155.0, 45.0),
      Point::new(155.0, 155.0),
      Point::new(45.0, 155.0),
      Point::new(55.0, 55.0),
      Point::new(145.0, 145.0),
    ] {
      assert!(
        poly.iter().any(|&p| approx(p, expected)),
        "missing {expected} in {poly:?}"
      );
    }
  }

  #[test]
  fn square_cap_extends_by_half_width() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(10.0, 0.0);

    let opts = StrokeOptions {
      width: 2.0,
      cap: CapMode::Square,
      ..StrokeOptions::default()
    };
    let poly = &stroke_outlines(path.nodes(), &opts)[0];
    assert!(poly.iter().any(|&p| approx(p, Point::new(11.0, -1.0))));
    assert!(poly.iter().any(|&p| approx(p, Point::new(11.0, 1.0))));
    assert!(poly.iter().any(|&p| approx(p, Point::new(-1.0, -1.0))));
    assert!(poly.iter().any(|&p| approx(p, Point::new(-1.0, 1.0))));
  }

  #[test]
  fn round_cap_points_stay_on_the_half_width_circle() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(10.0, 0.0);

    let opts = StrokeOptions {
      width: 8.0,
      cap: CapMode::Round,
      ..StrokeOptions::default()
    };
    let poly = &stroke_outlines(path.nodes(), &opts)[0];
    assert!(poly.len() > 4, "round caps should add arc points");
    // Every arc point sits half a width from one of the endpoints.
    let ends = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    for p in poly {
      let nearest = ends
        .iter()
        .map(|e| e.distance_to(*p))
        .fold(f64::INFINITY, f64::min);
      assert!((nearest - 4.0).abs() < 1e-6, "point {p} off the cap circle");
    }
    // The cap bulges past both endpoints.
    assert!(poly.iter().any(|p| p.x > 13.0));
    assert!(poly.iter().any(|p| p.x < -3.0));
  }

  #[test]
  fn round_join_arcs_around_the_vertex() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0);

    let opts = StrokeOptions {
      width: 8.0,
      join: JoinMode::Round,
      ..StrokeOptions::default()
    };
    let poly = &stroke_outlines(path.nodes(), &opts)[0];
    let vertex = Point::new(10.0, 0.0);
    let arc_points: Vec<_> = poly
      .iter()
      .filter(|p| (vertex.distance_to(**p) - 4.0).abs() < 1e-6 && p.x > 10.0 && p.y < 0.0)
      .collect();
    assert!(!arc_points.is_empty(), "no arc points around the join");
  }

  #[test]
  fn stroking_a_flattened_curve_stays_finite() {
    let mut path = Path::new();
    path.move_to(10.0, 100.0);
    path.curve_to(40.0, 20.0, 80.0, 180.0, 110.0, 100.0);
    let flat = flatten(path.nodes(), DEFAULT_TOLERANCE);

    let polys = stroke_outlines(&flat, &options(6.0));
    assert_eq!(polys.len(), 1);
    assert!(polys[0].len() >= 8);
    assert!(polys[0]
      .iter()
      .all(|p| p.x.is_finite() && p.y.is_finite()));
  }
}
