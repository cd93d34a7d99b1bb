//! Crop rectangle resolution.
//!
//! Turns a target crop size plus either an anchor or a normalized subject box
//! into an integer pixel rectangle that lies inside the document.

use serde::Deserialize;

/// Padding percent used when a focus crop does not specify one.
pub const DEFAULT_FOCUS_PADDING: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Subject region in percent (0-100) of the document dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FocusBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropPlacement {
    Anchor(Anchor),
    Focus { focus: FocusBox, padding: f64 },
}

/// Resolves the crop rectangle for `target` inside `document`.
///
/// `target` must have positive dimensions.
pub fn resolve_crop(document: Size, target: Size, placement: CropPlacement) -> PixelRect {
    match placement {
        CropPlacement::Anchor(anchor) => anchored_rect(document, target, anchor),
        CropPlacement::Focus { focus, padding } => focused_rect(document, target, focus, padding),
    }
}

fn anchored_rect(document: Size, target: Size, anchor: Anchor) -> PixelRect {
    let width = target.width.min(document.width);
    let height = target.height.min(document.height);
    let centered_left = (document.width - width) / 2.0;
    let centered_top = (document.height - height) / 2.0;

    let (left, top) = match anchor {
        Anchor::Center => (centered_left, centered_top),
        Anchor::Top => (centered_left, 0.0),
        Anchor::Bottom => (centered_left, document.height - height),
        Anchor::Left => (0.0, centered_top),
        Anchor::Right => (document.width - width, centered_top),
    };

    contained_rect(document, left, top, width, height)
}

fn focused_rect(document: Size, target: Size, focus: FocusBox, padding: f64) -> PixelRect {
    let subject_left = focus.x * document.width / 100.0;
    let subject_top = focus.y * document.height / 100.0;
    let subject_width = focus.width * document.width / 100.0;
    let subject_height = focus.height * document.height / 100.0;
    let center_x = subject_left + subject_width / 2.0;
    let center_y = subject_top + subject_height / 2.0;

    let inflate = 1.0 + padding / 50.0;
    let min_width = subject_width * inflate;
    let min_height = subject_height * inflate;

    // Only ever grow the target, and by the same factor on both axes.
    let scale = (min_width / target.width)
        .max(min_height / target.height)
        .max(1.0);
    let mut crop_width = target.width * scale;
    let mut crop_height = target.height * scale;

    if crop_width > document.width || crop_height > document.height {
        let downscale = (document.width / crop_width).min(document.height / crop_height);
        crop_width *= downscale;
        crop_height *= downscale;
    }

    let mut left = (center_x - crop_width / 2.0).max(0.0);
    let mut top = (center_y - crop_height / 2.0).max(0.0);
    if left + crop_width > document.width {
        left = document.width - crop_width;
    }
    if top + crop_height > document.height {
        top = document.height - crop_height;
    }

    contained_rect(document, left, top, crop_width, crop_height)
}

/// Rounds to whole pixels, translating back inside the document if rounding
/// pushed the far edge past it.
fn contained_rect(document: Size, left: f64, top: f64, width: f64, height: f64) -> PixelRect {
    let document_width = to_px(document.width.floor());
    let document_height = to_px(document.height.floor());
    let width = to_px(width).min(document_width);
    let height = to_px(height).min(document_height);
    let left = to_px(left).min(document_width - width);
    let top = to_px(top).min(document_height - height);

    PixelRect {
        left,
        top,
        right: left + width,
        bottom: top + height,
    }
}

fn to_px(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
