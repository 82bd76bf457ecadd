use crate::selection::MARGIN;

/// Display size and scale derived once per loaded image.
///
/// `display_width`/`display_height` include the 5-unit margin on every side;
/// the image itself is painted into the inner region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub display_width: i32,
    pub display_height: i32,
    /// Ratio applied to the natural image size, 1.0 when no downscaling was
    /// needed. Never above 1.0.
    pub scale_factor: f32,
}

impl ViewportState {
    /// Fit an image of the given natural size into the available area,
    /// preserving aspect ratio and never upscaling.
    pub fn fit(natural_width: u32, natural_height: u32, avail_width: f32, avail_height: f32) -> Self {
        let nw = natural_width.max(1) as f32;
        let nh = natural_height.max(1) as f32;
        let scale_factor = (avail_width / nw).min(avail_height / nh).min(1.0);

        Self {
            display_width: (nw * scale_factor).round() as i32 + 2 * MARGIN,
            display_height: (nh * scale_factor).round() as i32 + 2 * MARGIN,
            scale_factor,
        }
    }

    /// True when the image is shown at its natural pixel size.
    pub fn is_native_scale(&self) -> bool {
        self.scale_factor >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_smaller_than_viewport_is_not_upscaled() {
        let viewport = ViewportState::fit(400, 300, 1000.0, 800.0);

        assert_eq!(viewport.scale_factor, 1.0);
        assert_eq!(viewport.display_width, 410);
        assert_eq!(viewport.display_height, 310);
        assert!(viewport.is_native_scale());
    }

    #[test]
    fn large_image_is_scaled_by_the_tighter_axis() {
        let viewport = ViewportState::fit(4000, 3000, 1000.0, 800.0);

        assert_eq!(viewport.scale_factor, 0.25);
        assert_eq!(viewport.display_width, 1010);
        assert_eq!(viewport.display_height, 760);
        assert!(!viewport.is_native_scale());
    }

    #[test]
    fn portrait_image_in_landscape_viewport() {
        let viewport = ViewportState::fit(600, 1200, 900.0, 600.0);

        assert_eq!(viewport.scale_factor, 0.5);
        assert_eq!(viewport.display_width, 310);
        assert_eq!(viewport.display_height, 610);
    }
}
