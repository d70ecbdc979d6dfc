//! Path node model and builder
//!
//! A path is an ordered sequence of drawing commands over floating-point
//! points. The builder enforces well-formedness: every non-empty subpath
//! begins with `MoveTo`, and issuing `line_to`/`curve_to`/`close` with no
//! current point is a programming error that trips an assertion rather
//! than returning an error.
//!
//! Closing a subpath emits the `ClosePath` node followed by an implicit
//! `MoveTo` back to the subpath's start, so the iterator's notion of the
//! current point stays well-defined after a close.

use crate::geometry::Point;

/// One drawing command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathNode {
  /// Begins a new subpath at `point`
  MoveTo { point: Point },
  /// A straight segment from the current point
  LineTo { point: Point },
  /// A cubic Bézier from the current point
  CurveTo { c1: Point, c2: Point, end: Point },
  /// Closes the current subpath back to its last `MoveTo`
  ClosePath,
}

/// An owned list of path nodes with a builder API
///
/// # Examples
///
/// ```
/// use pathrender::Path;
///
/// let mut path = Path::new();
/// path.move_to(10.0, 10.0);
/// path.line_to(189.0, 10.0);
/// path.line_to(99.0, 189.0);
/// path.close();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Path {
  nodes: Vec<PathNode>,
  current: Option<Point>,
  subpath_start: Option<Point>,
}

impl Path {
  /// Creates an empty path
  pub fn new() -> Self {
    Self::default()
  }

  /// The node list, in insertion order
  pub fn nodes(&self) -> &[PathNode] {
    &self.nodes
  }

  /// True if no nodes have been added
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// The current point, if a subpath is in progress
  pub fn current_point(&self) -> Option<Point> {
    self.current
  }

  /// Discards all nodes so the builder can be reused
  pub fn clear(&mut self) {
    self.nodes.clear();
    self.current = None;
    self.subpath_start = None;
  }

  /// Begins a new subpath at `(x, y)`
  pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
    let point = Point::new(x, y);
    self.nodes.push(PathNode::MoveTo { point });
    self.current = Some(point);
    self.subpath_start = Some(point);
    self
  }

  /// Adds a straight segment to `(x, y)`
  ///
  /// # Panics
  ///
  /// Panics if no subpath has been started with [`Path::move_to`].
  pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
    assert!(self.current.is_some(), "line_to with no current point");
    let point = Point::new(x, y);
    self.nodes.push(PathNode::LineTo { point });
    self.current = Some(point);
    self
  }

  /// Adds a cubic Bézier to `(x, y)` with control points `(cx1, cy1)` and
  /// `(cx2, cy2)`
  ///
  /// # Panics
  ///
  /// Panics if no subpath has been started with [`Path::move_to`].
  pub fn curve_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) -> &mut Self {
    assert!(self.current.is_some(), "curve_to with no current point");
    let end = Point::new(x, y);
    self.nodes.push(PathNode::CurveTo {
      c1: Point::new(cx1, cy1),
      c2: Point::new(cx2, cy2),
      end,
    });
    self.current = Some(end);
    self
  }

  /// Closes the current subpath back to its starting point
  ///
  /// Emits `ClosePath` followed by an implicit `MoveTo` to the subpath
  /// start, so a following `line_to` continues from there.
  ///
  /// # Panics
  ///
  /// Panics if no subpath has been started with [`Path::move_to`].
  pub fn close(&mut self) -> &mut Self {
    let start = self
      .subpath_start
      .expect("close_path with no current subpath");
    self.nodes.push(PathNode::ClosePath);
    self.nodes.push(PathNode::MoveTo { point: start });
    self.current = Some(start);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder_records_nodes_in_order() {
    let mut path = Path::new();
    path.move_to(1.0, 2.0).line_to(3.0, 4.0);
    path.curve_to(5.0, 6.0, 7.0, 8.0, 9.0, 10.0);
    assert_eq!(
      path.nodes(),
      &[
        PathNode::MoveTo {
          point: Point::new(1.0, 2.0)
        },
        PathNode::LineTo {
          point: Point::new(3.0, 4.0)
        },
        PathNode::CurveTo {
          c1: Point::new(5.0, 6.0),
          c2: Point::new(7.0, 8.0),
          end: Point::new(9.0, 10.0)
        },
      ]
    );
    assert_eq!(path.current_point(), Some(Point::new(9.0, 10.0)));
  }

  #[test]
  fn close_emits_implicit_move_back_to_start() {
    let mut path = Path::new();
    path.move_to(5.0, 5.0).line_to(10.0, 5.0).close();
    assert_eq!(
      path.nodes().last(),
      Some(&PathNode::MoveTo {
        point: Point::new(5.0, 5.0)
      })
    );
    assert_eq!(path.current_point(), Some(Point::new(5.0, 5.0)));
  }

  #[test]
  #[should_panic(expected = "line_to with no current point")]
  fn line_without_move_is_a_programming_error() {
    Path::new().line_to(1.0, 1.0);
  }

  #[test]
  #[should_panic(expected = "close_path with no current subpath")]
  fn close_without_move_is_a_programming_error() {
    Path::new().close();
  }

  #[test]
  fn clear_resets_the_builder() {
    let mut path = Path::new();
    path.move_to(1.0, 1.0).line_to(2.0, 2.0);
    path.clear();
    assert!(path.is_empty());
    assert_eq!(path.current_point(), None);
  }
}
