use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use super::PalmImage;
use crate::error::{Result, VanbaError};

pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Decode an uploaded image and keep it as a JPEG data URL sized to the bitmap.
pub fn capture_from_bytes(file_name: &str, bytes: &[u8]) -> Result<PalmImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| VanbaError::image_read(format!("{}: {}", file_name, e)))?;
    let (width, height) = (decoded.width(), decoded.height());

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut jpeg = Cursor::new(Vec::new());
    rgb.write_to(&mut jpeg, ImageFormat::Jpeg)
        .map_err(|e| VanbaError::image_read(format!("{}: {}", file_name, e)))?;

    log::info!("captured palm image {} ({}x{})", file_name, width, height);
    Ok(PalmImage {
        file_name: file_name.to_string(),
        width,
        height,
        data_url: format!("{}{}", JPEG_DATA_URL_PREFIX, STANDARD.encode(jpeg.into_inner())),
    })
}

pub async fn capture_from_path(path: &Path) -> Result<PalmImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| VanbaError::image_read(format!("{}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    capture_from_bytes(&file_name, &bytes)
}
