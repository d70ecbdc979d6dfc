//! Render an SVG file's `<path>` elements to a PNG.

use clap::Parser;
use pathrender::png::write_png;
use pathrender::svg::parse_svg;
use pathrender::{AntiAliasMode, Result, Surface, SurfaceFormat};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
  name = "render_svg",
  version,
  about = "Rasterize an SVG's path elements to a PNG"
)]
struct Args {
  /// Input SVG file
  input: PathBuf,

  /// Output PNG file
  output: PathBuf,

  /// Surface width; defaults to the SVG root's width attribute
  #[arg(long)]
  width: Option<u32>,

  /// Surface height; defaults to the SVG root's height attribute
  #[arg(long)]
  height: Option<u32>,

  /// Disable antialiased coverage
  #[arg(long)]
  no_antialias: bool,

  /// Suppress parse warnings on stderr
  #[arg(long)]
  quiet: bool,
}

fn run(args: &Args) -> Result<()> {
  let content = std::fs::read_to_string(&args.input)?;
  let scene = parse_svg(&content)?;

  if !args.quiet {
    for warning in &scene.warnings {
      eprintln!("warning: {}", warning.message);
    }
  }

  let width = args.width.unwrap_or(scene.width);
  let height = args.height.unwrap_or(scene.height);
  let mut surface = Surface::new(SurfaceFormat::Rgb, width, height)?;

  let aa = if args.no_antialias {
    AntiAliasMode::None
  } else {
    AntiAliasMode::Default
  };
  scene.render(&mut surface, aa);

  write_png(&surface, &args.output)?;
  Ok(())
}

fn main() -> ExitCode {
  let args = Args::parse();
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err}");
      ExitCode::FAILURE
    }
  }
}
