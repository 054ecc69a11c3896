//! Cover-fit geometry
//!
//! Pure calculations, no pixels involved. A [`CoverPlan`] describes where a
//! uniformly scaled source lands on the target surface: the larger of the two
//! axis scales is chosen so the scaled image covers the box on both axes, and
//! the overflow is split evenly on each side of the cropped axis.

use crate::{Error, Result};

/// Placement of a scaled source on a `target_width × target_height` surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPlan {
    pub source_width: u32,
    pub source_height: u32,
    pub target_width: u32,
    pub target_height: u32,
    /// Uniform scale factor, `max(tw / W, th / H)`.
    pub scale: f64,
    pub scaled_width: f64,
    pub scaled_height: f64,
    /// Horizontal draw offset; never positive.
    pub dx: f64,
    /// Vertical draw offset; never positive.
    pub dy: f64,
}

impl CoverPlan {
    /// Plan a cover fit of `source` into `target`, both given as `(width, height)`.
    ///
    /// The governing axis is picked with exact integer arithmetic, so the
    /// scaled extent on that axis equals the target extent exactly and its
    /// offset is exactly zero.
    ///
    /// ```
    /// # use coverfit::geometry::CoverPlan;
    /// let plan = CoverPlan::new((800, 600), (400, 400)).unwrap();
    /// assert_eq!(plan.scaled_height, 400.0);
    /// assert_eq!(plan.dy, 0.0);
    /// assert!(plan.dx < -66.0 && plan.dx > -67.0);
    /// ```
    pub fn new(source: (u32, u32), target: (u32, u32)) -> Result<Self> {
        let (src_w, src_h) = source;
        let (tgt_w, tgt_h) = target;

        if tgt_w == 0 || tgt_h == 0 {
            return Err(Error::InvalidDimensions(format!(
                "target box {}x{} has zero area",
                tgt_w, tgt_h
            )));
        }
        if src_w == 0 || src_h == 0 {
            return Err(Error::InvalidDimensions(format!(
                "source image {}x{} has zero area",
                src_w, src_h
            )));
        }

        // Compare tw/W against th/H without rounding: tw*H vs th*W.
        let width_ratio = tgt_w as u64 * src_h as u64;
        let height_ratio = tgt_h as u64 * src_w as u64;

        let (scale, scaled_width, scaled_height) = if width_ratio == height_ratio {
            // Same aspect ratio: pure uniform scale, nothing to crop
            (tgt_w as f64 / src_w as f64, tgt_w as f64, tgt_h as f64)
        } else if width_ratio > height_ratio {
            // Source is taller: width matches, height overflows
            let h = src_h as f64 * tgt_w as f64 / src_w as f64;
            (tgt_w as f64 / src_w as f64, tgt_w as f64, h)
        } else {
            // Source is wider: height matches, width overflows
            let w = src_w as f64 * tgt_h as f64 / src_h as f64;
            (tgt_h as f64 / src_h as f64, w, tgt_h as f64)
        };

        Ok(Self {
            source_width: src_w,
            source_height: src_h,
            target_width: tgt_w,
            target_height: tgt_h,
            scale,
            scaled_width,
            scaled_height,
            dx: (tgt_w as f64 - scaled_width) / 2.0,
            dy: (tgt_h as f64 - scaled_height) / 2.0,
        })
    }

    /// Whether the source already has the target dimensions.
    pub fn is_identity(&self) -> bool {
        self.source_width == self.target_width && self.source_height == self.target_height
    }

    /// Region of the source that ends up on the target surface.
    ///
    /// This is the target box divided by the scale, centered on the source
    /// and rounded to whole source pixels. Scaling just this window to the
    /// target size gives the same picture as scaling the whole source and
    /// clipping it at `(dx, dy)`, without ever allocating the scaled source.
    pub fn source_window(&self) -> SourceWindow {
        let src_w = self.source_width as u64;
        let src_h = self.source_height as u64;
        let tgt_w = self.target_width as u64;
        let tgt_h = self.target_height as u64;

        let (width, height) = if tgt_w * src_h >= tgt_h * src_w {
            // Width governs: keep every column, trim rows
            (src_w, round_div(tgt_h * src_w, tgt_w).clamp(1, src_h))
        } else {
            (round_div(tgt_w * src_h, tgt_h).clamp(1, src_w), src_h)
        };

        SourceWindow {
            x: ((src_w - width) / 2) as u32,
            y: ((src_h - height) / 2) as u32,
            width: width as u32,
            height: height as u32,
        }
    }
}

/// Rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceWindow {
    pub fn is_full(&self, (width, height): (u32, u32)) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

fn round_div(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}
