// Copyright 2025 Mozaik Developers
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};
use mozaik_structures::{MozaikError, MozaikResult};
use tracing::warn;

use crate::{Frame, TRANSPARENT};

/// Writes each frame as an 8-bit grayscale PNG named `<prefix>_<index>.png` inside
/// `directory`.
///
/// Luminance is scaled so that `max_luminance` maps to white; transparent pixels are
/// written black. Frames are validated before writing; when one fails, the files already
/// written by this call are removed.
pub fn write_frames_as_png<I>(
    frames: I,
    directory: &Path,
    prefix: &str,
    max_luminance: f64,
) -> MozaikResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = Frame>,
{
    let mut paths = Vec::new();
    for (index, frame) in frames.into_iter().enumerate() {
        match write_frame(&frame, directory, prefix, index, max_luminance) {
            Ok(path) => paths.push(path),
            Err(e) => {
                remove_partial_output(&paths);
                return Err(e);
            }
        }
    }
    Ok(paths)
}

fn write_frame(frame: &Frame, directory: &Path, prefix: &str, index: usize, max_luminance: f64) -> MozaikResult<PathBuf> {
    frame.validate_luminance(max_luminance)?;
    let image = to_gray_image(frame, max_luminance)?;
    let path = directory.join(format!("{}_{:05}.png", prefix, index));
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| MozaikError::ImageError(format!("{}: {}", path.display(), e)))?;
    Ok(path)
}

fn remove_partial_output(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            warn!(target: "mozaik-stimuli", "Failed to remove partial export {}: {}", path.display(), e);
        }
    }
}

fn to_gray_image(frame: &Frame, max_luminance: f64) -> MozaikResult<GrayImage> {
    let (rows, cols) = frame.img.dim();
    let width = u32::try_from(cols).map_err(|_| MozaikError::ImageError("frame too wide".into()))?;
    let height = u32::try_from(rows).map_err(|_| MozaikError::ImageError("frame too tall".into()))?;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let value = frame.img[[y as usize, x as usize]];
        if value == TRANSPARENT {
            Luma([0u8])
        } else {
            Luma([(value / max_luminance * 255.0).round().clamp(0.0, 255.0) as u8])
        }
    }))
}
