//! Frozen full-screen snapshots. Exactly one snapshot exists per capture
//! session; region crops are copies out of it, so the snapshot can be
//! dropped as soon as the crop is taken.

use anyhow::{Context, Result};
use image::RgbaImage;
use mapleglass_types::{CaptureRegion, CroppedRegion};
use xcap::Monitor;

pub struct FrozenFrame {
    image: RgbaImage,
}

impl FrozenFrame {
    /// Snapshots the primary monitor.
    pub fn capture_primary() -> Result<Self> {
        let monitors = Monitor::all().context("failed to enumerate monitors")?;
        let monitor = monitors.first().context("no monitor found")?;
        let captured = monitor
            .capture_image()
            .context("failed to capture screen")?;

        let (width, height) = (captured.width(), captured.height());
        let image = RgbaImage::from_raw(width, height, captured.into_raw())
            .context("captured frame has inconsistent dimensions")?;
        Ok(Self { image })
    }

    /// Wraps an existing raster; used by tests to run capture sessions
    /// without a screen.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Copies `region` out of the snapshot, clamped to the snapshot bounds.
    /// `None` when the clamped region has no area.
    pub fn crop(&self, region: CaptureRegion) -> Option<CroppedRegion> {
        let x = region.x.clamp(0, self.width() as i32) as u32;
        let y = region.y.clamp(0, self.height() as i32) as u32;
        let width = region.width.min(self.width() - x);
        let height = region.height.min(self.height() - y);
        if width == 0 || height == 0 {
            return None;
        }

        let cropped = image::imageops::crop_imm(&self.image, x, y, width, height).to_image();
        Some(CroppedRegion {
            width: cropped.width(),
            height: cropped.height(),
            data: cropped.into_raw(),
        })
    }
}

/// Size of the primary monitor, for the overlay's fallback bounds when the
/// game window is not running.
pub fn primary_screen_size() -> Result<(u32, u32)> {
    let monitors = Monitor::all().context("failed to enumerate monitors")?;
    let monitor = monitors.first().context("no monitor found")?;
    Ok((monitor.width(), monitor.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame(w: u32, h: u32) -> FrozenFrame {
        FrozenFrame::from_image(RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        }))
    }

    #[test]
    fn crop_within_bounds() {
        let crop = frame(100, 60)
            .crop(CaptureRegion { x: 10, y: 5, width: 50, height: 20 })
            .unwrap();
        assert_eq!((crop.width, crop.height), (50, 20));
        // First pixel of the crop is the snapshot pixel at (10, 5).
        assert_eq!(&crop.data[0..2], &[10, 5]);
    }

    #[test]
    fn crop_clamps_to_snapshot_edge() {
        let crop = frame(100, 60)
            .crop(CaptureRegion { x: 80, y: 50, width: 500, height: 500 })
            .unwrap();
        assert_eq!((crop.width, crop.height), (20, 10));
    }

    #[test]
    fn fully_outside_region_yields_none() {
        assert!(frame(100, 60).crop(CaptureRegion { x: 100, y: 0, width: 10, height: 10 }).is_none());
        assert!(frame(100, 60).crop(CaptureRegion { x: 0, y: 0, width: 0, height: 10 }).is_none());
    }
}
