//! SVG front-end driving the full pipeline, through to PNG encoding.

use pathrender::pixel::Rgb;
use pathrender::png::encode_png;
use pathrender::svg::parse_svg;
use pathrender::{AntiAliasMode, Surface, SurfaceFormat};

#[test]
fn svg_triangle_renders_and_encodes() {
  let scene = parse_svg(
    r#"<svg width="600" height="400">
         <path d="M 10,10 L 189,10 L 99,189 Z" fill="white"/>
       </svg>"#,
  )
  .unwrap();
  assert!(scene.warnings.is_empty());

  let mut surface = Surface::new(SurfaceFormat::Rgb, scene.width, scene.height).unwrap();
  scene.render(&mut surface, AntiAliasMode::Default);

  assert_eq!(
    surface.get(100, 100).try_rgb().unwrap(),
    Rgb::new(255, 255, 255)
  );
  assert_eq!(surface.get(0, 0).try_rgb().unwrap(), Rgb::new(0, 0, 0));

  let png = encode_png(&surface).unwrap();
  let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
  assert_eq!(decoded.dimensions(), (600, 400));
  assert_eq!(decoded.get_pixel(100, 100).0, [255, 255, 255, 255]);
  assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn svg_parse_problems_accumulate_without_aborting() {
  let scene = parse_svg(
    r##"<svg width="100" height="100">
         <path d="M 10,10 L 90,10 L 50,90 Z" fill="mauve-ish"/>
         <path d="M 20,20 L 80,20" stroke="navy" stroke-width="four"/>
         <path d="M 5,5 L 95,95" stroke="#123456"/>
       </svg>"##,
  )
  .unwrap();

  assert_eq!(scene.shapes.len(), 3);
  assert_eq!(scene.warnings.len(), 2);
  assert_eq!(scene.shapes[1].stroke, Some(Rgb::new(0, 0, 0x80)));
  assert_eq!(scene.shapes[1].stroke_width, 1.0);
  assert_eq!(scene.shapes[2].stroke, Some(Rgb::new(0x12, 0x34, 0x56)));
}

#[test]
fn raw_buffer_export_matches_rendered_pixels() {
  let scene = parse_svg(
    r#"<svg width="8" height="8">
         <path d="M 0,0 L 8,0 L 8,8 L 0,8 Z" fill="red"/>
       </svg>"#,
  )
  .unwrap();
  let mut surface = Surface::new(SurfaceFormat::Rgb, 8, 8).unwrap();
  scene.render(&mut surface, AntiAliasMode::None);

  let bytes = surface.to_bytes();
  assert_eq!(bytes.len(), 8 * 8 * 3);
  assert!(bytes
    .chunks_exact(3)
    .all(|px| px == [255, 0, 0]));
}
