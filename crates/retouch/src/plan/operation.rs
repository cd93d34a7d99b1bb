use serde::Deserialize;
use serde_json::Value;

use super::params::{
    BlurParams, ColorParams, CropParams, MergeParams, ResizeParams, SelectSubjectParams,
    SharpenParams,
};

/// Layer an operation applies to. `layerName: null` in the plan means all
/// layers, which skips layer selection before the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerTarget {
    AllLayers,
    Named(String),
}

impl LayerTarget {
    pub fn name(&self) -> Option<&str> {
        match self {
            LayerTarget::AllLayers => None,
            LayerTarget::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for LayerTarget {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) => LayerTarget::Named(name),
            None => LayerTarget::AllLayers,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationKind {
    Resize(ResizeParams),
    Crop(CropParams),
    Blur(BlurParams),
    ColorCorrection(ColorParams),
    Sharpness(SharpenParams),
    SelectSubject(SelectSubjectParams),
    MergeLayers(MergeParams),
    /// A `type` this planner does not know; executed as a no-op.
    Unsupported { kind: String },
}

impl OperationKind {
    /// The plan JSON `type` string.
    pub fn type_name(&self) -> &str {
        match self {
            OperationKind::Resize(_) => "resize",
            OperationKind::Crop(_) => "crop",
            OperationKind::Blur(_) => "blur",
            OperationKind::ColorCorrection(_) => "colorCorrection",
            OperationKind::Sharpness(_) => "sharpness",
            OperationKind::SelectSubject(_) => "selectSubject",
            OperationKind::MergeLayers(_) => "mergeLayers",
            OperationKind::Unsupported { kind } => kind,
        }
    }

    pub fn is_select_subject(&self) -> bool {
        matches!(self, OperationKind::SelectSubject(_))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawOperation")]
pub struct Operation {
    pub target: LayerTarget,
    pub kind: OperationKind,
}

impl Operation {
    pub fn new(target: LayerTarget, kind: OperationKind) -> Self {
        Self { target, kind }
    }

    pub fn on_layer(name: impl Into<String>, kind: OperationKind) -> Self {
        Self::new(LayerTarget::Named(name.into()), kind)
    }

    pub fn on_all_layers(kind: OperationKind) -> Self {
        Self::new(LayerTarget::AllLayers, kind)
    }
}

/// Wire shape: `{ "type", "layerName", "params" }`.
#[derive(Deserialize)]
struct RawOperation {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, rename = "layerName")]
    layer_name: Option<String>,
    #[serde(default)]
    params: Value,
}

impl TryFrom<RawOperation> for Operation {
    type Error = serde_json::Error;

    fn try_from(raw: RawOperation) -> Result<Self, Self::Error> {
        let params = match raw.params {
            Value::Null => Value::Object(Default::default()),
            params => params,
        };
        let kind = match raw.kind.as_str() {
            "resize" => OperationKind::Resize(serde_json::from_value(params)?),
            "crop" => OperationKind::Crop(serde_json::from_value(params)?),
            "blur" => OperationKind::Blur(serde_json::from_value(params)?),
            "colorCorrection" => OperationKind::ColorCorrection(serde_json::from_value(params)?),
            "sharpness" => OperationKind::Sharpness(serde_json::from_value(params)?),
            "selectSubject" => OperationKind::SelectSubject(serde_json::from_value(params)?),
            "mergeLayers" => OperationKind::MergeLayers(serde_json::from_value(params)?),
            _ => OperationKind::Unsupported { kind: raw.kind },
        };
        Ok(Operation {
            target: raw.layer_name.into(),
            kind,
        })
    }
}
