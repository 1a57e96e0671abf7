//! Projecting annotations onto per-camera target images.
//!
//! Export works from an owned snapshot of the annotation set, so further
//! edits cannot race with it. For every image assigned to a camera it
//! produces the mapped shapes, a copy of the image with the shapes burnt
//! in, and a block of the coordinate manifest.

pub mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::RoiError;
use crate::images::TargetImage;
use crate::layout::{tile_by_index, CameraTile};
use crate::mapping::{belongs_to, MappedShape, TileMapper};
use crate::model::RoiShape;
use crate::render::{draw_polyline_roi, draw_square_roi, PixmapSurface, Rgb, ROI_WIDTH};

/// File name of the aggregate manifest.
pub const MANIFEST_FILE_NAME: &str = "roi_coordinates.txt";

/// Which camera each imported image belongs to.
///
/// Built once per import and not modified afterwards.
#[derive(Clone, Debug)]
pub struct CameraImageMapping {
    images: Vec<TargetImage>,
    cameras: Vec<u32>,
}

impl CameraImageMapping {
    /// Pairs image `i` with camera `cameras[i]` (1-based).
    ///
    /// # Errors
    /// - [`RoiError::MappingCountMismatch`] if the number of images differs
    ///   from the number of cameras in the mosaic.
    /// - [`RoiError::InvalidAssignment`] if `cameras` does not have one entry
    ///   per image.
    ///
    /// Camera numbers themselves are not range-checked here; an image whose
    /// camera has no tile is skipped at export time.
    pub fn new(
        images: Vec<TargetImage>,
        cameras: Vec<u32>,
        camera_count: usize,
    ) -> Result<Self, RoiError> {
        if images.len() != camera_count {
            return Err(RoiError::MappingCountMismatch {
                images: images.len(),
                cameras: camera_count,
            });
        }
        if cameras.len() != images.len() {
            return Err(RoiError::InvalidAssignment {
                assignments: cameras.len(),
                images: images.len(),
            });
        }
        Ok(Self { images, cameras })
    }

    /// Pairs image `i` with camera `i + 1`.
    pub fn in_order(images: Vec<TargetImage>, camera_count: usize) -> Result<Self, RoiError> {
        let cameras = (1..=images.len() as u32).collect();
        Self::new(images, cameras, camera_count)
    }

    /// `(camera, image)` pairs in import order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &TargetImage)> {
        self.cameras.iter().copied().zip(self.images.iter())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// The shapes projected onto one image.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageExport {
    pub image_name: String,
    pub camera: u32,
    pub shapes: Vec<MappedShape>,
}

/// Maps a snapshot of the annotation set onto every assigned image.
///
/// Images whose camera has no tile in `tiles` are skipped.
pub fn project_annotations(
    shapes: &[RoiShape],
    tiles: &[CameraTile],
    mapping: &CameraImageMapping,
) -> Vec<ImageExport> {
    let mut exports = Vec::with_capacity(mapping.len());

    for (camera, image) in mapping.iter() {
        let Some(tile) = tile_by_index(tiles, camera) else {
            log::warn!(
                "skipping {}: camera {} has no region in the current layout",
                image.name,
                camera
            );
            continue;
        };

        let mapper = TileMapper::new(tile, image.width, image.height);
        let mapped: Vec<MappedShape> = shapes
            .iter()
            .filter(|shape| belongs_to(shape, Some(tile)))
            .map(|shape| mapper.map_shape(shape))
            .collect();

        log::debug!(
            "{}: {} of {} ROI(s) fall on camera {}",
            image.name,
            mapped.len(),
            shapes.len(),
            camera
        );
        exports.push(ImageExport {
            image_name: image.name.clone(),
            camera,
            shapes: mapped,
        });
    }

    exports
}

/// Draws mapped shapes onto a copy of `base`.
///
/// Polygons are filled at 30% opacity and then outlined; lines and squares
/// are opaque outlines. Returns `None` for an empty image.
pub fn render_annotated(base: &RgbaImage, shapes: &[MappedShape]) -> Option<RgbaImage> {
    let mut surface = PixmapSurface::from_image(base)?;

    for shape in shapes {
        let color = Rgb::parse_or_red(shape.color());
        match shape {
            MappedShape::Line { points, .. } => {
                let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
                draw_polyline_roi(&mut surface, color, &pts, false, ROI_WIDTH);
            }
            MappedShape::Polygon { points, .. } => {
                let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
                draw_polyline_roi(&mut surface, color, &pts, true, ROI_WIDTH);
            }
            MappedShape::Square { x, y, size, .. } => {
                draw_square_roi(&mut surface, color, (*x, *y, *size, *size), ROI_WIDTH);
            }
        }
    }

    surface.into_image()
}

/// Output file name for an annotated image.
pub fn annotated_file_name(image_name: &str) -> String {
    format!("{image_name}_roi.png")
}

/// What [`write_export`] produced.
#[derive(Clone, Debug, Default)]
pub struct ExportSummary {
    pub manifest_path: PathBuf,
    pub images_written: Vec<PathBuf>,
    pub shapes_exported: usize,
}

/// Projects `shapes` and writes the results into `out_dir`.
///
/// Writes `<image name>_roi.png` for every assigned image that carries
/// pixels, and the aggregate manifest as [`MANIFEST_FILE_NAME`].
pub fn write_export(
    out_dir: &Path,
    shapes: &[RoiShape],
    tiles: &[CameraTile],
    mapping: &CameraImageMapping,
) -> Result<ExportSummary, RoiError> {
    fs::create_dir_all(out_dir)?;

    let exports = project_annotations(shapes, tiles, mapping);
    let mut summary = ExportSummary {
        manifest_path: out_dir.join(MANIFEST_FILE_NAME),
        ..Default::default()
    };

    for export in &exports {
        summary.shapes_exported += export.shapes.len();

        let raster = mapping
            .iter()
            .find(|(camera, image)| *camera == export.camera && image.name == export.image_name)
            .and_then(|(_, image)| image.raster.as_ref());
        let Some(raster) = raster else {
            continue;
        };
        let Some(annotated) = render_annotated(raster, &export.shapes) else {
            log::warn!("skipping raster for {}: image is empty", export.image_name);
            continue;
        };

        let path = out_dir.join(annotated_file_name(&export.image_name));
        annotated
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| RoiError::ImageEncode {
                path: path.clone(),
                source,
            })?;
        summary.images_written.push(path);
    }

    fs::write(&summary.manifest_path, manifest::manifest(&exports))?;
    log::info!(
        "exported {} ROI(s) across {} image(s) to {}",
        summary.shapes_exported,
        exports.len(),
        out_dir.display()
    );
    Ok(summary)
}
