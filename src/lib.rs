//! Roimap: region-of-interest annotation for multi-camera mosaics.
//!
//! Operators draw lines, polygons and squares over a grid of camera feeds.
//! Roimap keeps those annotations, edits them through a small state
//! machine, and projects them onto full-resolution still images of each
//! camera, producing annotated copies and a coordinate manifest.
//!
//! # Modules
//!
//! - [`geom`]: Typed points and hit-testing primitives
//! - [`layout`]: Camera tile grid over the mosaic surface
//! - [`model`]: Annotation set, pending shape, selection and redo stack
//! - [`editor`]: Event-driven edit controller
//! - [`mapping`]: Mosaic-to-image coordinate mapping
//! - [`export`]: Per-image projection, annotated rasters and the manifest
//! - [`render`]: Drawing primitives shared by the mosaic view and export
//! - [`project`]: Saved sessions (JSON)
//! - [`images`]: Loading target images
//! - [`error`]: Error types for roimap operations

pub mod editor;
pub mod error;
pub mod export;
pub mod geom;
pub mod images;
pub mod layout;
pub mod mapping;
pub mod model;
pub mod project;
pub mod render;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

pub use error::RoiError;

use editor::{EditEvent, Editor};
use export::CameraImageMapping;
use layout::{CameraTile, DEFAULT_CAMERA_COUNT};
use project::{Project, SurfaceSize};

/// The roimap CLI application.
#[derive(Parser)]
#[command(name = "roimap")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the camera tile grid for a surface.
    Layout(LayoutArgs),
    /// Summarize the ROIs in a project and the cameras they touch.
    Inspect(InspectArgs),
    /// Apply a script of edit events (JSON lines) and save the result.
    Replay(ReplayArgs),
    /// Project a project's ROIs onto per-camera images.
    Export(ExportArgs),
}

/// Surface size overrides shared by several subcommands.
#[derive(clap::Args)]
struct SurfaceArgs {
    /// Mosaic surface width in pixels.
    #[arg(long = "surface-width", env = "ROIMAP_SURFACE_WIDTH")]
    width: Option<f64>,

    /// Mosaic surface height in pixels.
    #[arg(long = "surface-height", env = "ROIMAP_SURFACE_HEIGHT")]
    height: Option<f64>,
}

impl SurfaceArgs {
    fn apply(&self, surface: SurfaceSize) -> SurfaceSize {
        SurfaceSize::new(
            self.width.unwrap_or(surface.width),
            self.height.unwrap_or(surface.height),
        )
    }
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Number of cameras in the mosaic.
    #[arg(long, default_value_t = DEFAULT_CAMERA_COUNT)]
    cameras: u32,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct InspectArgs {
    /// Project file to inspect.
    project: PathBuf,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct ReplayArgs {
    /// File with one JSON edit event per line.
    events: PathBuf,

    /// Where to write the resulting project.
    #[arg(long)]
    out: PathBuf,

    /// Project to start from (defaults to an empty mosaic).
    #[arg(long)]
    project: Option<PathBuf>,

    #[command(flatten)]
    surface: SurfaceArgs,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Project whose ROIs are exported.
    project: PathBuf,

    /// Target image, one per camera, in camera order unless --assign is given.
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Directory of target images, appended after any --image in file name order.
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Camera number (1-based) for each image, in the same order.
    #[arg(long = "assign", num_args = 1..)]
    assign: Option<Vec<u32>>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Only write the coordinate manifest; images are probed, not decoded.
    #[arg(long)]
    manifest_only: bool,

    #[command(flatten)]
    surface: SurfaceArgs,
}

/// Run the roimap CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), RoiError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Layout(args)) => run_layout(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Replay(args)) => run_replay(args),
        Some(Commands::Export(args)) => run_export(args),
        None => {
            println!("roimap {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Region-of-interest annotation for multi-camera mosaics.");
            println!();
            println!("Run 'roimap --help' for usage information.");
            Ok(())
        }
    }
}

/// Output formats for report-style subcommands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_output(value: &str) -> Result<OutputFormat, RoiError> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(RoiError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), RoiError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

fn load_project(path: &Path, surface: &SurfaceArgs) -> Result<Project, RoiError> {
    let mut project = project::io_json::read_project(path)?;
    project.surface = surface.apply(project.surface);
    project.check()?;
    Ok(project)
}

/// Execute the layout subcommand.
fn run_layout(args: LayoutArgs) -> Result<(), RoiError> {
    let output = parse_output(&args.output)?;
    let surface = args.surface.apply(SurfaceSize::default());
    let tiles = layout::layout(args.cameras, surface.width, surface.height);

    match output {
        OutputFormat::Json => print_json(&tiles)?,
        OutputFormat::Text => {
            println!(
                "{} camera(s) on {}x{} ({} column(s))",
                tiles.len(),
                surface.width,
                surface.height,
                layout::columns_for(layout::clamp_camera_count(args.cameras))
            );
            for tile in &tiles {
                println!(
                    "  Camera {}: x={} y={} {}x{}",
                    tile.index, tile.x, tile.y, tile.width, tile.height
                );
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct InspectReport {
    camera_count: u32,
    surface: SurfaceSize,
    lines: usize,
    polygons: usize,
    squares: usize,
    rois: Vec<RoiSummary>,
}

#[derive(Serialize)]
struct RoiSummary {
    index: usize,
    kind: String,
    color: String,
    cameras: Vec<u32>,
}

fn cameras_touched(shape: &model::RoiShape, tiles: &[CameraTile]) -> Vec<u32> {
    tiles
        .iter()
        .filter(|tile| mapping::belongs_to(shape, Some(tile)))
        .map(|tile| tile.index)
        .collect()
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), RoiError> {
    let output = parse_output(&args.output)?;
    let project = load_project(&args.project, &args.surface)?;
    let tiles = layout::layout(
        project.camera_count,
        project.surface.width,
        project.surface.height,
    );

    let count = |kind: model::ShapeKind| project.rois.iter().filter(|r| r.kind() == kind).count();
    let report = InspectReport {
        camera_count: tiles.len() as u32,
        surface: project.surface,
        lines: count(model::ShapeKind::Line),
        polygons: count(model::ShapeKind::Polygon),
        squares: count(model::ShapeKind::Square),
        rois: project
            .rois
            .iter()
            .enumerate()
            .map(|(index, roi)| RoiSummary {
                index,
                kind: roi.kind().to_string(),
                color: roi.color().to_string(),
                cameras: cameras_touched(roi, &tiles),
            })
            .collect(),
    };

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("Project: {}", args.project.display());
            println!(
                "Mosaic: {} camera(s) on {}x{}",
                report.camera_count, report.surface.width, report.surface.height
            );
            println!(
                "ROIs: {} ({} line, {} polygon, {} square)",
                report.rois.len(),
                report.lines,
                report.polygons,
                report.squares
            );
            for roi in &report.rois {
                let cameras = if roi.cameras.is_empty() {
                    "none".to_string()
                } else {
                    roi.cameras
                        .iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                println!(
                    "  #{} {} {} -> camera(s): {}",
                    roi.index, roi.kind, roi.color, cameras
                );
            }
        }
    }
    Ok(())
}

/// Execute the replay subcommand.
fn run_replay(args: ReplayArgs) -> Result<(), RoiError> {
    let base = match &args.project {
        Some(path) => load_project(path, &args.surface)?,
        None => {
            let project = Project {
                surface: args.surface.apply(SurfaceSize::default()),
                ..Project::default()
            };
            project.check()?;
            project
        }
    };
    let mut editor = Editor::from_project(&base);

    let script = fs::read_to_string(&args.events)?;
    let mut applied = 0usize;
    for (idx, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: EditEvent = serde_json::from_str(line).map_err(|source| RoiError::ReplayParse {
            line: idx + 1,
            source,
        })?;

        match editor.handle(event) {
            Ok(_) => applied += 1,
            Err(err @ RoiError::InsufficientVertices { .. }) => {
                log::warn!("line {}: {}", idx + 1, err);
            }
            Err(err) => return Err(err),
        }
    }

    let result = editor.to_project();
    project::io_json::write_project(&args.out, &result)?;
    println!(
        "Applied {} event(s); {} ROI(s) written to {}",
        applied,
        result.rois.len(),
        args.out.display()
    );
    Ok(())
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs) -> Result<(), RoiError> {
    let project = load_project(&args.project, &args.surface)?;
    let tiles = layout::layout(
        project.camera_count,
        project.surface.width,
        project.surface.height,
    );

    let mut paths = args.images.clone();
    if let Some(dir) = &args.images_dir {
        paths.extend(images::collect_images(dir)?);
    }

    let targets = paths
        .iter()
        .map(|path| {
            if args.manifest_only {
                images::probe_image(path)
            } else {
                images::load_image(path)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mapping = match args.assign {
        Some(cameras) => CameraImageMapping::new(targets, cameras, tiles.len())?,
        None => CameraImageMapping::in_order(targets, tiles.len())?,
    };

    let summary = export::write_export(&args.out, &project.rois, &tiles, &mapping)?;
    println!(
        "Exported {} ROI(s) for {} image(s)",
        summary.shapes_exported,
        mapping.len()
    );
    for path in &summary.images_written {
        println!("  {}", path.display());
    }
    println!("Manifest: {}", summary.manifest_path.display());
    Ok(())
}
