//! pathrender: a CPU rasterizer for 2D vector paths
//!
//! Paths built from move/line/curve/close commands are flattened, stroked
//! into fillable outlines, scan-converted into antialiased coverage, and
//! composited through a pattern onto a typed pixel surface with
//! Porter-Duff operators. A minimal SVG attribute front-end turns `<path>`
//! elements into the same pipeline inputs.

pub mod color;
pub mod context;
pub mod error;
pub mod geometry;
pub mod path;
pub mod pattern;
pub mod pixel;
pub mod png;
pub mod raster;
pub mod surface;
pub mod svg;

pub use context::Context;
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use path::{Path, PathNode};
pub use pattern::Pattern;
pub use pixel::{Alpha8, Pixel, Rgb, Rgba};
pub use raster::{AntiAliasMode, CapMode, FillRule, JoinMode};
pub use surface::{Surface, SurfaceFormat};
