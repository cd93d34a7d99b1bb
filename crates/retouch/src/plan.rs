//! Edit plan produced by the vision model.

pub mod operation;
pub mod params;

use serde::Deserialize;

pub use operation::{LayerTarget, Operation, OperationKind};
pub use params::{
    BlurKind, BlurParams, ColorParams, CropParams, CropPosition, Interpolation, MergeParams,
    ResizeParams, SelectSubjectParams, SharpenParams,
};

/// Ordered operations plus the model's explanation of them.
///
/// Operation order is execution order: later steps may target layers that
/// earlier steps create.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditPlan {
    #[serde(default)]
    pub explanation: String,
    pub operations: Vec<Operation>,
}

impl EditPlan {
    pub fn new(explanation: impl Into<String>, operations: Vec<Operation>) -> Self {
        Self {
            explanation: explanation.into(),
            operations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
