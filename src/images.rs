//! Target images supplied per camera.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use walkdir::WalkDir;

use crate::error::RoiError;

/// File extensions picked up when collecting images from a directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// A still image that annotations are projected onto.
#[derive(Clone, Debug)]
pub struct TargetImage {
    /// Display name, used to name exported files (usually the file name).
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Decoded pixels. `None` when only the dimensions were probed.
    pub raster: Option<RgbaImage>,
}

impl TargetImage {
    /// An image known only by name and size.
    pub fn with_size(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            raster: None,
        }
    }

    /// An image with pixels.
    pub fn from_raster(name: impl Into<String>, raster: RgbaImage) -> Self {
        Self {
            name: name.into(),
            width: raster.width(),
            height: raster.height(),
            raster: Some(raster),
        }
    }
}

/// Decodes an image file.
pub fn load_image(path: &Path) -> Result<TargetImage, RoiError> {
    let decoded = image::open(path).map_err(|source| RoiError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TargetImage::from_raster(display_name(path), decoded.to_rgba8()))
}

/// Reads only the dimensions of an image file.
pub fn probe_image(path: &Path) -> Result<TargetImage, RoiError> {
    let size = imagesize::size(path).map_err(|source| RoiError::ImageProbe {
        path: path.to_path_buf(),
        source,
    })?;

    let width: u32 = size.width.try_into().map_err(|_| RoiError::ImageDir {
        path: path.to_path_buf(),
        message: format!("image width {} does not fit in u32", size.width),
    })?;
    let height: u32 = size.height.try_into().map_err(|_| RoiError::ImageDir {
        path: path.to_path_buf(),
        message: format!("image height {} does not fit in u32", size.height),
    })?;

    Ok(TargetImage::with_size(display_name(path), width, height))
}

/// Lists image files directly inside `dir`, sorted by file name.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, RoiError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).max_depth(1) {
        let entry = entry.map_err(|source| RoiError::ImageDir {
            path: dir.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
