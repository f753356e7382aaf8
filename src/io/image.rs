//! PNG loading, saving and output path naming

use crate::io::configuration::DEFAULT_EXTENSION;
use crate::io::error::{GridError, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Decode any supported image file into RGBA8
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| GridError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Save an RGBA image, creating parent directories as needed
///
/// The format follows the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_rgba<P: AsRef<Path>>(img: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GridError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(path).map_err(|e| GridError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Sibling path of `input` named `<stem><suffix>.<ext>`
///
/// Inputs without an extension get `.png`.
pub fn suffixed_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let extension = input
        .extension()
        .map_or_else(|| DEFAULT_EXTENSION.into(), |ext| ext.to_string_lossy());
    let name = format!("{stem}{suffix}.{extension}");

    input
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}

/// Whether `path` has a `.png` extension, ignoring case
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}
