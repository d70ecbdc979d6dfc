//! Cubic Bézier flattening
//!
//! Every `CurveTo` is replaced by a polyline before stroking or filling.
//! Subdivision is adaptive: a curve segment is emitted as a single line
//! once the distance from its chord midpoint to its curve midpoint falls
//! below the tolerance. Endpoints are preserved exactly.

use crate::geometry::Point;
use crate::path::PathNode;

/// Default flattening tolerance in surface units.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Subdivision depth cap; at this depth a segment is emitted regardless.
const MAX_DEPTH: u32 = 16;

/// Replaces every `CurveTo` in `nodes` with an approximating run of
/// `LineTo` nodes
///
/// `MoveTo`, `LineTo`, and `ClosePath` nodes pass through unchanged, so the
/// output is a pure polyline path suitable for the stroke transformer and
/// the filler.
pub fn flatten(nodes: &[PathNode], tolerance: f64) -> Vec<PathNode> {
  let mut out = Vec::with_capacity(nodes.len());
  let mut current = Point::ZERO;

  for node in nodes {
    match *node {
      PathNode::MoveTo { point } => {
        out.push(PathNode::MoveTo { point });
        current = point;
      }
      PathNode::LineTo { point } => {
        out.push(PathNode::LineTo { point });
        current = point;
      }
      PathNode::CurveTo { c1, c2, end } => {
        subdivide(current, c1, c2, end, tolerance, 0, &mut out);
        current = end;
      }
      PathNode::ClosePath => {
        out.push(PathNode::ClosePath);
      }
    }
  }

  out
}

/// Evaluates the curve midpoint and recurses until the chord is close
/// enough, emitting `LineTo` nodes in order.
fn subdivide(
  p0: Point,
  c1: Point,
  c2: Point,
  p1: Point,
  tolerance: f64,
  depth: u32,
  out: &mut Vec<PathNode>,
) {
  // De Casteljau split at t = 0.5; `mid` is the curve midpoint.
  let ab = Point::midpoint(p0, c1);
  let bc = Point::midpoint(c1, c2);
  let cd = Point::midpoint(c2, p1);
  let abbc = Point::midpoint(ab, bc);
  let bccd = Point::midpoint(bc, cd);
  let mid = Point::midpoint(abbc, bccd);

  let chord_mid = Point::midpoint(p0, p1);
  if depth >= MAX_DEPTH || chord_mid.distance_to(mid) <= tolerance {
    out.push(PathNode::LineTo { point: p1 });
    return;
  }

  subdivide(p0, ab, abbc, mid, tolerance, depth + 1, out);
  subdivide(mid, bccd, cd, p1, tolerance, depth + 1, out);
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cubic_at(t: f64, p0: Point, c1: Point, c2: Point, p1: Point) -> Point {
    let u = 1.0 - t;
    (u * u * u) * p0 + (3.0 * u * u * t) * c1 + (3.0 * u * t * t) * c2 + (t * t * t) * p1
  }

  #[test]
  fn non_curve_nodes_pass_through() {
    let nodes = [
      PathNode::MoveTo {
        point: Point::new(0.0, 0.0),
      },
      PathNode::LineTo {
        point: Point::new(5.0, 5.0),
      },
      PathNode::ClosePath,
    ];
    assert_eq!(flatten(&nodes, DEFAULT_TOLERANCE), nodes.to_vec());
  }

  #[test]
  fn degenerate_curve_flattens_to_one_line() {
    // Control points on the chord: the curve is the chord.
    let nodes = [
      PathNode::MoveTo {
        point: Point::new(0.0, 0.0),
      },
      PathNode::CurveTo {
        c1: Point::new(1.0, 1.0),
        c2: Point::new(2.0, 2.0),
        end: Point::new(3.0, 3.0),
      },
    ];
    let flat = flatten(&nodes, DEFAULT_TOLERANCE);
    assert_eq!(flat.len(), 2);
    assert_eq!(
      flat[1],
      PathNode::LineTo {
        point: Point::new(3.0, 3.0)
      }
    );
  }

  #[test]
  fn curve_endpoints_are_exact() {
    let p0 = Point::new(10.0, 10.0);
    let end = Point::new(110.0, 10.0);
    let nodes = [
      PathNode::MoveTo { point: p0 },
      PathNode::CurveTo {
        c1: Point::new(40.0, 90.0),
        c2: Point::new(80.0, 90.0),
        end,
      },
    ];
    let flat = flatten(&nodes, DEFAULT_TOLERANCE);
    assert!(flat.len() > 3, "a bowed curve should subdivide");
    assert_eq!(flat.first(), Some(&PathNode::MoveTo { point: p0 }));
    assert_eq!(flat.last(), Some(&PathNode::LineTo { point: end }));
  }

  #[test]
  fn flattened_points_lie_on_the_curve() {
    let p0 = Point::new(0.0, 0.0);
    let c1 = Point::new(0.0, 100.0);
    let c2 = Point::new(100.0, 100.0);
    let p1 = Point::new(100.0, 0.0);
    let nodes = [
      PathNode::MoveTo { point: p0 },
      PathNode::CurveTo { c1, c2, end: p1 },
    ];
    // Every emitted vertex is a subdivision point, so it must sit on the
    // curve (up to floating error) for some parameter t.
    for node in flatten(&nodes, DEFAULT_TOLERANCE) {
      if let PathNode::LineTo { point } = node {
        let mut best = f64::INFINITY;
        for i in 0..=1000 {
          let t = i as f64 / 1000.0;
          best = best.min(point.distance_to(cubic_at(t, p0, c1, c2, p1)));
        }
        assert!(best < 0.15, "vertex {point} is {best} away from the curve");
      }
    }
  }
}
