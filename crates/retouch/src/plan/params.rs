use serde::Deserialize;

use crate::geometry::{Anchor, CropPlacement, FocusBox, DEFAULT_FOCUS_PADDING};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResizeParams {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub method: Interpolation,
}

/// Resampling method; unrecognized names resolve to bicubic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum Interpolation {
    NearestNeighbor,
    Bilinear,
    Bicubic,
    BicubicSharper,
}

impl Default for Interpolation {
    fn default() -> Self {
        Interpolation::Bicubic
    }
}

impl From<Option<String>> for Interpolation {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("nearestNeighbor") => Interpolation::NearestNeighbor,
            Some("bilinear") => Interpolation::Bilinear,
            Some("bicubicSharper") => Interpolation::BicubicSharper,
            _ => Interpolation::Bicubic,
        }
    }
}

impl Interpolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolation::NearestNeighbor => "nearestNeighbor",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
            Interpolation::BicubicSharper => "bicubicSharper",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropParams {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub position: CropPosition,
    #[serde(default)]
    pub focus_box: Option<FocusBox>,
    #[serde(default)]
    pub padding: Option<f64>,
}

impl CropParams {
    /// Focus mode needs both `position: "coordinates"` and a focus box;
    /// anything else is an anchored crop. Missing or zero padding uses the
    /// default.
    pub fn placement(&self) -> CropPlacement {
        match (self.position, self.focus_box) {
            (CropPosition::Coordinates, Some(focus)) => CropPlacement::Focus {
                focus,
                padding: self
                    .padding
                    .filter(|padding| *padding != 0.0)
                    .unwrap_or(DEFAULT_FOCUS_PADDING),
            },
            (position, _) => CropPlacement::Anchor(position.anchor()),
        }
    }
}

/// Crop anchor; unrecognized names resolve to center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum CropPosition {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    Coordinates,
}

impl Default for CropPosition {
    fn default() -> Self {
        CropPosition::Center
    }
}

impl From<Option<String>> for CropPosition {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("top") => CropPosition::Top,
            Some("bottom") => CropPosition::Bottom,
            Some("left") => CropPosition::Left,
            Some("right") => CropPosition::Right,
            Some("coordinates") => CropPosition::Coordinates,
            _ => CropPosition::Center,
        }
    }
}

impl CropPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropPosition::Center => "center",
            CropPosition::Top => "top",
            CropPosition::Bottom => "bottom",
            CropPosition::Left => "left",
            CropPosition::Right => "right",
            CropPosition::Coordinates => "coordinates",
        }
    }

    fn anchor(&self) -> Anchor {
        match self {
            CropPosition::Top => Anchor::Top,
            CropPosition::Bottom => Anchor::Bottom,
            CropPosition::Left => Anchor::Left,
            CropPosition::Right => Anchor::Right,
            CropPosition::Center | CropPosition::Coordinates => Anchor::Center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlurParams {
    #[serde(default)]
    pub blur_type: BlurKind,
    pub radius: f64,
    #[serde(default)]
    pub angle: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum BlurKind {
    Gaussian,
    Motion,
    Radial,
    Other(String),
}

impl Default for BlurKind {
    fn default() -> Self {
        BlurKind::Other(String::new())
    }
}

impl From<Option<String>> for BlurKind {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("gaussian") => BlurKind::Gaussian,
            Some("motion") => BlurKind::Motion,
            Some("radial") => BlurKind::Radial,
            _ => BlurKind::Other(value.unwrap_or_default()),
        }
    }
}

impl BlurKind {
    pub fn as_str(&self) -> &str {
        match self {
            BlurKind::Gaussian => "gaussian",
            BlurKind::Motion => "motion",
            BlurKind::Radial => "radial",
            BlurKind::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ColorParams {
    #[serde(default)]
    pub brightness: Option<f64>,
    #[serde(default)]
    pub contrast: Option<f64>,
    #[serde(default)]
    pub saturation: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SharpenParams {
    pub amount: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSubjectParams {
    #[serde(default)]
    pub copy_to_new_layer: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeParams {
    #[serde(default)]
    pub layer_names: Vec<String>,
}
