use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use log::info;

/// Decode an image file into RGBA8 pixels.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;
    info!(
        "decoded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img.to_rgba8())
}
