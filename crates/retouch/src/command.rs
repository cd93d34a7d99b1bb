//! Concrete host editing commands and their batch-play descriptors.

use serde::Serialize;
use serde_json::{json, Value};

use crate::geometry::PixelRect;
use crate::plan::Interpolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "pixelsUnit")]
    Pixels,
    #[serde(rename = "percentUnit")]
    Percent,
    #[serde(rename = "angleUnit")]
    Degrees,
    #[serde(rename = "levelUnit")]
    Level,
}

/// A number tagged with its unit, as the host expects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitValue {
    #[serde(rename = "_unit")]
    pub unit: Unit,
    #[serde(rename = "_value")]
    pub value: f64,
}

impl UnitValue {
    pub fn pixels(value: f64) -> Self {
        Self {
            unit: Unit::Pixels,
            value,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            unit: Unit::Percent,
            value,
        }
    }

    pub fn degrees(value: f64) -> Self {
        Self {
            unit: Unit::Degrees,
            value,
        }
    }

    pub fn level(value: f64) -> Self {
        Self {
            unit: Unit::Level,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Crop(CropCommand),
    Resize(ResizeCommand),
    Blur(BlurCommand),
    /// Applied together as one logical edit.
    AdjustColor(Vec<ColorAdjustment>),
    Sharpen(SharpenCommand),
    CutoutSubject(CutoutCommand),
    MergeLayers(MergeCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropCommand {
    pub rect: PixelRect,
}

impl CropCommand {
    pub fn descriptor(&self) -> Value {
        json!({
            "_obj": "crop",
            "to": {
                "_obj": "rectangle",
                "top": UnitValue::pixels(self.rect.top as f64),
                "left": UnitValue::pixels(self.rect.left as f64),
                "bottom": UnitValue::pixels(self.rect.bottom as f64),
                "right": UnitValue::pixels(self.rect.right as f64),
            },
            "angle": UnitValue::degrees(0.0),
            "delete": true,
            "_options": dialog_options(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeCommand {
    pub width: u32,
    pub height: u32,
    pub interpolation: Interpolation,
}

impl ResizeCommand {
    pub fn descriptor(&self) -> Value {
        json!({
            "_obj": "imageSize",
            "width": UnitValue::pixels(self.width as f64),
            "height": UnitValue::pixels(self.height as f64),
            "interfaceIconFrameDimmed": {
                "_enum": "interpolationType",
                "_value": self.interpolation.as_str(),
            },
            "_options": dialog_options(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlurCommand {
    Gaussian { radius: f64 },
    Motion { angle: i64, distance: i64 },
    /// Spin blur, `amount` capped at 100.
    Radial { amount: u32 },
}

impl BlurCommand {
    pub fn descriptor(&self) -> Value {
        match *self {
            BlurCommand::Gaussian { radius } => json!({
                "_obj": "gaussianBlur",
                "radius": UnitValue::pixels(radius),
                "_options": dialog_options(),
            }),
            BlurCommand::Motion { angle, distance } => json!({
                "_obj": "motionBlur",
                "angle": UnitValue::degrees(angle as f64),
                "distance": UnitValue::pixels(distance as f64),
                "_options": dialog_options(),
            }),
            BlurCommand::Radial { amount } => json!({
                "_obj": "radialBlur",
                "amount": amount,
                "blurMethod": { "_enum": "radialBlurMethod", "_value": "spin" },
                "blurQuality": { "_enum": "radialBlurQuality", "_value": "good" },
                "_options": dialog_options(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorAdjustment {
    BrightnessContrast {
        brightness: f64,
        contrast: f64,
    },
    HueSaturation {
        saturation: f64,
    },
    /// Cyan-red channel shifts per tonal band; magenta-green and
    /// yellow-blue stay at zero.
    ColorBalance {
        shadows: [f64; 3],
        midtones: [f64; 3],
        highlights: [f64; 3],
        preserve_luminosity: bool,
    },
}

impl ColorAdjustment {
    pub fn descriptor(&self) -> Value {
        match *self {
            ColorAdjustment::BrightnessContrast {
                brightness,
                contrast,
            } => json!({
                "_obj": "brightnessEvent",
                "brightness": brightness,
                "center": contrast,
                "useLegacy": false,
                "_options": dialog_options(),
            }),
            ColorAdjustment::HueSaturation { saturation } => json!({
                "_obj": "hueSaturation",
                "adjustment": [{
                    "_obj": "hueSatAdjustmentV2",
                    "hue": 0,
                    "saturation": saturation,
                    "lightness": 0,
                }],
                "_options": dialog_options(),
            }),
            ColorAdjustment::ColorBalance {
                shadows,
                midtones,
                highlights,
                preserve_luminosity,
            } => json!({
                "_obj": "colorBalance",
                "shadows": shadows,
                "midtones": midtones,
                "highlights": highlights,
                "preserveLuminosity": preserve_luminosity,
                "_options": dialog_options(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpenCommand {
    pub amount: f64,
    pub radius: f64,
}

impl SharpenCommand {
    pub fn descriptor(&self) -> Value {
        json!({
            "_obj": "unsharpMask",
            "amount": UnitValue::percent(self.amount),
            "radius": UnitValue::pixels(self.radius),
            "threshold": UnitValue::level(0.0),
            "_options": dialog_options(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoutCommand {
    pub copy_to_new_layer: bool,
}

impl CutoutCommand {
    pub fn select_descriptor(&self) -> Value {
        json!({ "_obj": "autoCutout", "sampleAllLayers": false })
    }

    pub fn copy_descriptor(&self) -> Value {
        json!({
            "_obj": "copyToLayer",
            "_target": [{ "_ref": "layer", "_enum": "ordinal", "_value": "targetEnum" }],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCommand {
    pub layer_names: Vec<String>,
}

impl MergeCommand {
    /// Selects the first layer, adds the rest to the selection, then merges.
    pub fn descriptors(&self) -> Vec<Value> {
        let mut descriptors: Vec<Value> = self
            .layer_names
            .iter()
            .enumerate()
            .map(|(index, name)| select_layer_by_name(name, index > 0))
            .collect();
        descriptors.push(json!({ "_obj": "mergeLayersNew" }));
        descriptors
    }
}

pub fn select_layer_by_name(name: &str, add_to_selection: bool) -> Value {
    let mut descriptor = json!({
        "_obj": "select",
        "_target": [{ "_ref": "layer", "_name": name }],
        "makeVisible": false,
    });
    if add_to_selection {
        descriptor["selectionModifier"] = json!({
            "_enum": "selectionModifierType",
            "_value": "addToSelection",
        });
    }
    descriptor
}

fn dialog_options() -> Value {
    json!({ "dialogOptions": "dontDisplay" })
}
