//! Maps plan operations onto host commands.

use crate::command::{
    BlurCommand, ColorAdjustment, CropCommand, CutoutCommand, HostCommand, MergeCommand,
    ResizeCommand, SharpenCommand,
};
use crate::error::{CoreError, CoreResult};
use crate::geometry::{resolve_crop, CropPlacement, Size};
use crate::plan::{
    BlurKind, BlurParams, ColorParams, CropParams, Interpolation, MergeParams, OperationKind,
    ResizeParams,
};

/// Host commands for one plan step, grouped under a single undo label.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub label: &'static str,
    pub commands: Vec<HostCommand>,
}

impl Translation {
    fn new(label: &'static str, commands: Vec<HostCommand>) -> Self {
        Self { label, commands }
    }
}

/// Translates one operation. `document` is the current document size and is
/// only needed for crops.
///
/// Unsupported operation kinds translate to no commands rather than an error.
pub fn translate(kind: &OperationKind, document: Option<Size>) -> CoreResult<Translation> {
    let translation = match kind {
        OperationKind::Resize(params) => Translation::new("AI Resize", translate_resize(params)?),
        OperationKind::Crop(params) => {
            let document = document.ok_or_else(|| {
                CoreError::InvalidInput("crop requires the document size".to_string())
            })?;
            Translation::new("AI Crop", translate_crop(params, document)?)
        }
        OperationKind::Blur(params) => Translation::new("AI Blur", translate_blur(params)),
        OperationKind::ColorCorrection(params) => {
            Translation::new("AI Color Correction", translate_color(params))
        }
        OperationKind::Sharpness(params) => Translation::new(
            "Apply Sharpness",
            vec![HostCommand::Sharpen(SharpenCommand {
                amount: params.amount,
                radius: params.radius,
            })],
        ),
        OperationKind::SelectSubject(params) => Translation::new(
            "Select Subject and Copy",
            vec![HostCommand::CutoutSubject(CutoutCommand {
                copy_to_new_layer: params.copy_to_new_layer,
            })],
        ),
        OperationKind::MergeLayers(params) => {
            Translation::new("Merge Layers", translate_merge(params)?)
        }
        OperationKind::Unsupported { kind } => {
            tracing::debug!(kind = %kind, "ignoring unsupported operation");
            Translation::new("Ignored", Vec::new())
        }
    };
    Ok(translation)
}

fn translate_resize(params: &ResizeParams) -> CoreResult<Vec<HostCommand>> {
    let width = positive_px("resize width", params.width)?;
    let height = positive_px("resize height", params.height)?;
    Ok(vec![HostCommand::Resize(ResizeCommand {
        width,
        height,
        interpolation: params.method,
    })])
}

fn translate_crop(params: &CropParams, document: Size) -> CoreResult<Vec<HostCommand>> {
    let width = positive_px("crop width", params.width)?;
    let height = positive_px("crop height", params.height)?;
    let placement = params.placement();
    let rect = resolve_crop(document, Size::new(params.width, params.height), placement);

    let mut commands = vec![HostCommand::Crop(CropCommand { rect })];
    // A focus crop is usually larger than the target; bring it back down.
    if matches!(placement, CropPlacement::Focus { .. }) {
        commands.push(HostCommand::Resize(ResizeCommand {
            width,
            height,
            interpolation: Interpolation::Bicubic,
        }));
    }
    Ok(commands)
}

fn translate_blur(params: &BlurParams) -> Vec<HostCommand> {
    let command = match &params.blur_type {
        BlurKind::Gaussian => BlurCommand::Gaussian {
            radius: params.radius,
        },
        BlurKind::Motion => BlurCommand::Motion {
            angle: params.angle.unwrap_or(0.0).round() as i64,
            distance: params.radius.round() as i64,
        },
        BlurKind::Radial => BlurCommand::Radial {
            amount: params.radius.round().clamp(0.0, 100.0) as u32,
        },
        BlurKind::Other(name) => {
            tracing::debug!(blur_type = %name, "ignoring unknown blur type");
            return Vec::new();
        }
    };
    vec![HostCommand::Blur(command)]
}

fn translate_color(params: &ColorParams) -> Vec<HostCommand> {
    let brightness = non_zero(params.brightness);
    let contrast = non_zero(params.contrast);
    let mut adjustments = Vec::new();

    if brightness.is_some() || contrast.is_some() {
        adjustments.push(ColorAdjustment::BrightnessContrast {
            brightness: brightness.unwrap_or(0.0),
            contrast: contrast.unwrap_or(0.0),
        });
    }
    if let Some(saturation) = non_zero(params.saturation) {
        adjustments.push(ColorAdjustment::HueSaturation { saturation });
    }
    if let Some(temperature) = non_zero(params.temperature) {
        adjustments.push(temperature_balance(temperature));
    }

    if adjustments.is_empty() {
        Vec::new()
    } else {
        vec![HostCommand::AdjustColor(adjustments)]
    }
}

/// Warm/cool shift on the cyan-red axis. Highlights move half as far as
/// midtones; luminosity is preserved.
fn temperature_balance(temperature: f64) -> ColorAdjustment {
    ColorAdjustment::ColorBalance {
        shadows: [-temperature, 0.0, 0.0],
        midtones: [temperature, 0.0, 0.0],
        highlights: [temperature * 0.5, 0.0, 0.0],
        preserve_luminosity: true,
    }
}

fn translate_merge(params: &MergeParams) -> CoreResult<Vec<HostCommand>> {
    if params.layer_names.len() < 2 {
        return Err(CoreError::Validation(
            "Need at least 2 layers to merge".to_string(),
        ));
    }
    Ok(vec![HostCommand::MergeLayers(MergeCommand {
        layer_names: params.layer_names.clone(),
    })])
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|value| *value != 0.0)
}

fn positive_px(field: &str, value: f64) -> CoreResult<u32> {
    if !value.is_finite() || value.round() < 1.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive pixel count, got {value}"
        )));
    }
    Ok(value.round() as u32)
}
