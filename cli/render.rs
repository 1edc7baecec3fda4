//! Record-to-image rendering for the command line.
//!
//! Pixels are stretched so the brightest value maps to full ink, then
//! inverted so digits come out dark on a white background.

use std::path::PathBuf;

use image::{GrayImage, ImageFormat, Luma};

use digit_net::{Result, Session};

/// A `--image INDEX:PATH` request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTarget {
    pub index: usize,
    pub path: PathBuf,
}

pub fn parse_image_target(arg: &str) -> std::result::Result<ImageTarget, String> {
    let (index, path) = arg
        .split_once(':')
        .ok_or_else(|| format!("'{}' is not of the form INDEX:PATH", arg))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a record index", index))?;
    if path.is_empty() {
        return Err("image path must not be empty".into());
    }
    Ok(ImageTarget { index, path: PathBuf::from(path) })
}

/// Lays the pixels out as a square when their count is a perfect square,
/// otherwise as a single row.
pub fn record_image(pixels: &[f64]) -> GrayImage {
    let side = (pixels.len() as f64).sqrt().round() as usize;
    let (width, height) = if side * side == pixels.len() {
        (side, side)
    } else {
        (pixels.len(), 1)
    };

    let max = pixels.iter().cloned().fold(0.0_f64, f64::max);
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };

    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let p = pixels[y as usize * width + x as usize].max(0.0);
        let ink = (p * scale).round().min(255.0) as u8;
        Luma([255 - ink])
    })
}

/// Renders evaluation record `target.index` into a PNG. Returns `false`
/// when there is no such record.
pub fn save_record_image(session: &Session, target: &ImageTarget) -> Result<bool> {
    let Some(pixels) = session.record_pixels(target.index)? else {
        return Ok(false);
    };

    record_image(&pixels)
        .save_with_format(&target.path, ImageFormat::Png)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    Ok(true)
}
