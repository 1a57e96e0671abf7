//! JSON persistence for projects.
//!
//! Shapes are stored as plain tagged records:
//!
//! ```json
//! {"type": "line", "points": [{"x": 10, "y": 10}, {"x": 50, "y": 50}], "color": "#ff0000"}
//! {"type": "square", "x": 75, "y": 75, "size": 50, "color": "#00ff00"}
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::Project;
use crate::error::RoiError;

/// Reads and checks a project file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid project JSON,
/// or fails [`Project::check`].
pub fn read_project(path: &Path) -> Result<Project, RoiError> {
    let file = File::open(path).map_err(RoiError::Io)?;
    let reader = BufReader::new(file);

    let project: Project =
        serde_json::from_reader(reader).map_err(|source| RoiError::ProjectParse {
            path: path.to_path_buf(),
            source,
        })?;
    project.check()?;
    Ok(project)
}

/// Writes a project file as pretty-printed JSON.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_project(path: &Path, project: &Project) -> Result<(), RoiError> {
    let file = File::create(path).map_err(RoiError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, project).map_err(|source| RoiError::ProjectWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a project from a JSON string without checking it.
pub fn from_json_str(json: &str) -> Result<Project, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a project from JSON bytes without checking it.
pub fn from_json_slice(bytes: &[u8]) -> Result<Project, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Serializes a project to a pretty-printed JSON string.
pub fn to_json_string(project: &Project) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(project)
}
