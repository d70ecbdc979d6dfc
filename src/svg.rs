//! Minimal SVG attribute front-end
//!
//! Reads the `<svg>` root and its `<path>` elements from an XML stream and
//! interprets the `fill`, `stroke`, `stroke-width`, and `d` attributes,
//! producing [`Shape`] records ready for the rasterization pipeline. This
//! is deliberately not an SVG renderer: no transforms, no groups, no
//! gradients, no document semantics beyond the attributes named above.
//!
//! Attribute-level problems (an unknown color, a malformed `d` command)
//! are recorded in the scene's warnings list and never abort parsing;
//! only a malformed XML document or a non-`<svg>` root is an error.

use crate::color;
use crate::context::Context;
use crate::error::SvgError;
use crate::geometry::Point;
use crate::path::Path;
use crate::pattern::Pattern;
use crate::pixel::{Pixel, Rgb};
use crate::raster::AntiAliasMode;
use crate::surface::Surface;
use log::debug;
use roxmltree::Document;

/// Default viewport size when the root carries no usable width/height,
/// matching the CSS default replaced-element size.
const DEFAULT_WIDTH: u32 = 300;
const DEFAULT_HEIGHT: u32 = 150;

/// One recoverable problem encountered during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgWarning {
  pub message: String,
}

impl SvgWarning {
  fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// One drawable `<path>` element
#[derive(Debug, Clone)]
pub struct Shape {
  /// Fill paint; `None` renders no fill
  pub fill: Option<Rgb>,
  /// Stroke paint; `None` renders no stroke
  pub stroke: Option<Rgb>,
  /// Stroke thickness in surface units
  pub stroke_width: f64,
  /// The parsed path geometry
  pub path: Path,
}

/// A parsed SVG document: viewport, shapes, and accumulated warnings
#[derive(Debug, Clone)]
pub struct SvgScene {
  pub width: u32,
  pub height: u32,
  pub shapes: Vec<Shape>,
  pub warnings: Vec<SvgWarning>,
}

impl SvgScene {
  /// Renders every shape onto the surface, fills before strokes, in
  /// document order
  pub fn render(&self, surface: &mut Surface, aa: AntiAliasMode) {
    for shape in &self.shapes {
      if let Some(fill) = shape.fill {
        let mut context = Context::new(surface, Pattern::Opaque(Pixel::Rgb(fill)));
        context.anti_aliasing_mode = aa;
        context.fill(&shape.path);
      }
      if let Some(stroke) = shape.stroke {
        let mut context = Context::new(surface, Pattern::Opaque(Pixel::Rgb(stroke)));
        context.anti_aliasing_mode = aa;
        context.line_width = shape.stroke_width;
        context.stroke(&shape.path);
      }
    }
  }
}

/// Parses an SVG document's `<svg>` root and `<path>` children
///
/// # Errors
///
/// Fails only when the XML cannot be parsed at all or the root element is
/// not `<svg>`; everything else degrades to warnings on the returned
/// scene.
pub fn parse_svg(content: &str) -> Result<SvgScene, SvgError> {
  let doc = Document::parse(content).map_err(|e| SvgError::MalformedXml {
    reason: e.to_string(),
  })?;
  let root = doc.root_element();
  if !root.tag_name().name().eq_ignore_ascii_case("svg") {
    return Err(SvgError::NotSvg {
      found: root.tag_name().name().to_string(),
    });
  }

  let mut warnings = Vec::new();

  let width = parse_dimension(root.attribute("width"), "width", &mut warnings)
    .unwrap_or(DEFAULT_WIDTH);
  let height = parse_dimension(root.attribute("height"), "height", &mut warnings)
    .unwrap_or(DEFAULT_HEIGHT);

  let mut shapes = Vec::new();
  for node in root.descendants().filter(|n| n.is_element()) {
    if !node.tag_name().name().eq_ignore_ascii_case("path") {
      continue;
    }

    let fill = match node.attribute("fill") {
      // Unspecified fill paints black, per the SVG initial value.
      None => Some(Rgb::new(0, 0, 0)),
      Some(value) => match parse_paint(value) {
        Ok(paint) => paint,
        Err(message) => {
          warnings.push(SvgWarning::new(format!("fill: {message}")));
          None
        }
      },
    };
    let stroke = match node.attribute("stroke") {
      None => None,
      Some(value) => match parse_paint(value) {
        Ok(paint) => paint,
        Err(message) => {
          warnings.push(SvgWarning::new(format!("stroke: {message}")));
          None
        }
      },
    };
    let stroke_width = match node.attribute("stroke-width") {
      None => 1.0,
      Some(value) => match value.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => w,
        _ => {
          warnings.push(SvgWarning::new(format!(
            "stroke-width: invalid value '{value}'"
          )));
          1.0
        }
      },
    };

    let mut path = Path::new();
    match node.attribute("d") {
      None => {
        warnings.push(SvgWarning::new("path element without d attribute"));
        continue;
      }
      Some(d) => {
        if let Err(message) = parse_path_data(d, &mut path) {
          warnings.push(SvgWarning::new(format!("d: {message}")));
        }
      }
    }
    if path.is_empty() {
      continue;
    }

    shapes.push(Shape {
      fill,
      stroke,
      stroke_width,
      path,
    });
  }

  debug!(
    "parsed svg: {}x{}, {} shapes, {} warnings",
    width,
    height,
    shapes.len(),
    warnings.len()
  );

  Ok(SvgScene {
    width,
    height,
    shapes,
    warnings,
  })
}

/// Parses a width/height attribute: a number with an optional `px` suffix.
fn parse_dimension(
  value: Option<&str>,
  name: &str,
  warnings: &mut Vec<SvgWarning>,
) -> Option<u32> {
  let raw = value?.trim();
  let number = raw.strip_suffix("px").unwrap_or(raw).trim();
  match number.parse::<f64>() {
    Ok(v) if v.is_finite() && v >= 1.0 => Some(v as u32),
    _ => {
      warnings.push(SvgWarning::new(format!("{name}: invalid length '{raw}'")));
      None
    }
  }
}

/// Parses a paint attribute: `none`, a CSS2 color name (case-sensitive),
/// or a hex color.
fn parse_paint(value: &str) -> Result<Option<Rgb>, String> {
  let value = value.trim();
  if value == "none" {
    return Ok(None);
  }
  if let Some(rgb) = Rgb::from_name(value) {
    return Ok(Some(rgb));
  }
  if let Some(rgb) = color::parse_hex(value) {
    return Ok(Some(rgb));
  }
  Err(format!("unrecognized color '{value}'"))
}

/// Cursor over path-data text, splitting command letters and numbers.
struct PathData<'a> {
  bytes: &'a [u8],
  pos: usize,
}

impl<'a> PathData<'a> {
  fn new(data: &'a str) -> Self {
    Self {
      bytes: data.as_bytes(),
      pos: 0,
    }
  }

  fn skip_separators(&mut self) {
    while let Some(&b) = self.bytes.get(self.pos) {
      if b.is_ascii_whitespace() || b == b',' {
        self.pos += 1;
      } else {
        break;
      }
    }
  }

  fn next_command(&mut self) -> Option<u8> {
    self.skip_separators();
    let &b = self.bytes.get(self.pos)?;
    if b.is_ascii_alphabetic() {
      self.pos += 1;
      Some(b)
    } else {
      None
    }
  }

  fn at_end(&mut self) -> bool {
    self.skip_separators();
    self.pos >= self.bytes.len()
  }

  fn next_number(&mut self) -> Result<f64, String> {
    self.skip_separators();
    let start = self.pos;
    if let Some(&b) = self.bytes.get(self.pos) {
      if b == b'+' || b == b'-' {
        self.pos += 1;
      }
    }
    let mut seen_dot = false;
    while let Some(&b) = self.bytes.get(self.pos) {
      match b {
        b'0'..=b'9' => self.pos += 1,
        b'.' if !seen_dot => {
          seen_dot = true;
          self.pos += 1;
        }
        _ => break,
      }
    }
    // Exponent tail.
    if let Some(&b) = self.bytes.get(self.pos) {
      if b == b'e' || b == b'E' {
        let mark = self.pos;
        self.pos += 1;
        if let Some(&s) = self.bytes.get(self.pos) {
          if s == b'+' || s == b'-' {
            self.pos += 1;
          }
        }
        let digits_start = self.pos;
        while let Some(&d) = self.bytes.get(self.pos) {
          if d.is_ascii_digit() {
            self.pos += 1;
          } else {
            break;
          }
        }
        if self.pos == digits_start {
          self.pos = mark;
        }
      }
    }
    let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
    text
      .parse::<f64>()
      .map_err(|_| format!("expected number at offset {start}"))
  }

  fn next_pair(&mut self) -> Result<(f64, f64), String> {
    let x = self.next_number()?;
    let y = self.next_number()?;
    Ok((x, y))
  }

  /// True when the next token is another number (an implicit repeat of the
  /// current command).
  fn peek_number(&mut self) -> bool {
    self.skip_separators();
    matches!(
      self.bytes.get(self.pos),
      Some(b'0'..=b'9') | Some(b'+') | Some(b'-') | Some(b'.')
    )
  }
}

/// Parses SVG path data (`M/m L/l H/h V/v C/c Z/z`) into the builder
///
/// Stops at the first malformed token or unsupported command, returning a
/// description of the problem; whatever was parsed up to that point stays
/// in `path`.
fn parse_path_data(data: &str, path: &mut Path) -> Result<(), String> {
  let mut cursor = PathData::new(data);

  while !cursor.at_end() {
    let command = cursor
      .next_command()
      .ok_or_else(|| format!("expected command letter at offset {}", cursor.pos))?;
    let relative = command.is_ascii_lowercase();
    let current = |path: &Path| path.current_point().unwrap_or(Point::ZERO);

    match command.to_ascii_uppercase() {
      b'M' => {
        let (x, y) = cursor.next_pair()?;
        let (x, y) = if relative {
          let base = current(path);
          (base.x + x, base.y + y)
        } else {
          (x, y)
        };
        path.move_to(x, y);
        // Additional coordinate pairs are implicit line-tos.
        while cursor.peek_number() {
          let (lx, ly) = cursor.next_pair()?;
          let base = current(path);
          if relative {
            path.line_to(base.x + lx, base.y + ly);
          } else {
            path.line_to(lx, ly);
          }
        }
      }
      b'L' => {
        if path.current_point().is_none() {
          return Err("line command before any moveto".to_string());
        }
        loop {
          let (x, y) = cursor.next_pair()?;
          let base = current(path);
          if relative {
            path.line_to(base.x + x, base.y + y);
          } else {
            path.line_to(x, y);
          }
          if !cursor.peek_number() {
            break;
          }
        }
      }
      b'H' => {
        if path.current_point().is_none() {
          return Err("line command before any moveto".to_string());
        }
        loop {
          let x = cursor.next_number()?;
          let base = current(path);
          let x = if relative { base.x + x } else { x };
          path.line_to(x, base.y);
          if !cursor.peek_number() {
            break;
          }
        }
      }
      b'V' => {
        if path.current_point().is_none() {
          return Err("line command before any moveto".to_string());
        }
        loop {
          let y = cursor.next_number()?;
          let base = current(path);
          let y = if relative { base.y + y } else { y };
          path.line_to(base.x, y);
          if !cursor.peek_number() {
            break;
          }
        }
      }
      b'C' => {
        if path.current_point().is_none() {
          return Err("curve command before any moveto".to_string());
        }
        loop {
          let (x1, y1) = cursor.next_pair()?;
          let (x2, y2) = cursor.next_pair()?;
          let (x, y) = cursor.next_pair()?;
          let base = current(path);
          if relative {
            path.curve_to(
              base.x + x1,
              base.y + y1,
              base.x + x2,
              base.y + y2,
              base.x + x,
              base.y + y,
            );
          } else {
            path.curve_to(x1, y1, x2, y2, x, y);
          }
          if !cursor.peek_number() {
            break;
          }
        }
      }
      b'Z' => {
        if path.current_point().is_none() {
          return Err("close command before any moveto".to_string());
        }
        path.close();
      }
      other => {
        return Err(format!(
          "unsupported path command '{}'",
          char::from(other)
        ));
      }
    }
  }

  Ok(())
}
