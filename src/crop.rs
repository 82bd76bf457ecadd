use image::DynamicImage;
use image::imageops::FilterType;
use thiserror::Error;

use crate::selection::{MARGIN, SelectionRect};
use crate::viewport::ViewportState;

/// Suggested file name for exported samples.
pub const EXPORT_FILE_NAME: &str = "cropped.png";

#[derive(Debug, Error)]
pub enum CropError {
    #[error("no image loaded")]
    NoImage,
    #[error("no selection to extract")]
    NoSelection,
}

/// Source region for a selection, in native pixel coordinates.
///
/// At native scale the selection maps one-to-one after removing the margin;
/// a downscaled display maps back by dividing through the scale factor.
pub fn source_region(rect: &SelectionRect, viewport: &ViewportState) -> (f32, f32, f32, f32) {
    let x = (rect.left - MARGIN) as f32;
    let y = (rect.top - MARGIN) as f32;
    let w = rect.width as f32;
    let h = rect.height as f32;
    if viewport.is_native_scale() {
        (x, y, w, h)
    } else {
        let sf = viewport.scale_factor;
        (x / sf, y / sf, w / sf, h / sf)
    }
}

/// Sample the selected region out of `image`.
///
/// The result always measures exactly `rect.width` by `rect.height` pixels;
/// a downscaled source region is resampled to that size. The source image is
/// never mutated.
pub fn extract(image: &DynamicImage, rect: &SelectionRect, viewport: &ViewportState) -> DynamicImage {
    let (sx, sy, sw, sh) = source_region(rect, viewport);

    let x = (sx.round().max(0.0) as u32).min(image.width().saturating_sub(1));
    let y = (sy.round().max(0.0) as u32).min(image.height().saturating_sub(1));
    let w = (sw.round().max(1.0) as u32).min(image.width() - x);
    let h = (sh.round().max(1.0) as u32).min(image.height() - y);

    let sample = image.crop_imm(x, y, w, h);
    let out_w = rect.width as u32;
    let out_h = rect.height as u32;
    if (sample.width(), sample.height()) == (out_w, out_h) {
        sample
    } else {
        sample.resize_exact(out_w, out_h, FilterType::Triangle)
    }
}

/// Export entry point: resolves the loaded state, then delegates to
/// [`extract`]. Called before an image or selection exists, it fails instead
/// of panicking so the caller can log and carry on.
pub fn request_export(
    image: Option<&DynamicImage>,
    rect: Option<&SelectionRect>,
    viewport: Option<&ViewportState>,
) -> Result<(DynamicImage, &'static str), CropError> {
    let image = image.ok_or(CropError::NoImage)?;
    let (rect, viewport) = rect.zip(viewport).ok_or(CropError::NoSelection)?;
    Ok((extract(image, rect, viewport), EXPORT_FILE_NAME))
}
