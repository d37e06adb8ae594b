//! Frame readback helpers.
//!
//! Surfaces and capture textures are usually BGRA; PNG export wants RGBA.

use std::path::Path;

use anyhow::{ensure, Context, Result};

/// Whether pixels of `format` must be swizzled before export.
pub fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

pub fn convert_bgra_to_rgba(bgra_data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let pixel_count = (width * height) as usize;
    let mut rgba_data = bgra_data.to_vec();
    for pixel in rgba_data.chunks_exact_mut(4).take(pixel_count) {
        pixel.swap(0, 2);
    }
    rgba_data
}

/// Drops the row padding wgpu requires on buffer copies.
pub fn strip_row_padding(
    padded: &[u8],
    padded_bytes_per_row: u32,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let unpadded_bytes_per_row = (width * 4) as usize;
    let mut frame = Vec::with_capacity(unpadded_bytes_per_row * height as usize);
    for row in padded
        .chunks(padded_bytes_per_row as usize)
        .take(height as usize)
    {
        frame.extend_from_slice(&row[..unpadded_bytes_per_row.min(row.len())]);
    }
    frame
}

pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

pub fn save_png(path: &Path, rgba_data: &[u8], width: u32, height: u32) -> Result<()> {
    let expected = (width * height * 4) as usize;
    ensure!(
        rgba_data.len() == expected,
        "frame holds {} bytes, expected {} for {}x{}",
        rgba_data.len(),
        expected,
        width,
        height
    );
    image::save_buffer(path, rgba_data, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {}x{} frame to {}", width, height, path.display());
    Ok(())
}
