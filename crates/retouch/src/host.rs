//! Host editing application seam.

pub mod batch_play;
#[cfg(test)]
pub(crate) mod recording;
pub mod types;

use async_trait::async_trait;

use crate::command::{
    BlurCommand, ColorAdjustment, CropCommand, CutoutCommand, HostCommand, MergeCommand,
    ResizeCommand, SharpenCommand,
};
use crate::error::{HostError, HostResult};
use crate::geometry::Size;

pub use batch_play::{ActionBridge, BatchPlayEditor};
pub use types::{DocumentSnapshot, LayerInfo};

/// Editing capabilities the planner needs from the host application.
///
/// Every call acts on the active document and completes before the next one
/// is issued.
#[async_trait]
pub trait HostEditor: Send + Sync {
    async fn snapshot(&self) -> HostResult<DocumentSnapshot>;

    async fn document_size(&self) -> HostResult<Size> {
        Ok(self.snapshot().await?.size())
    }

    /// Flattened JPEG rendering of the active document.
    async fn export_preview(&self) -> HostResult<Vec<u8>> {
        Err(HostError::NotImplemented)
    }

    /// Makes the layer called `name` the only selected layer.
    async fn select_layer(&self, _name: &str) -> HostResult<()> {
        Err(HostError::NotImplemented)
    }

    async fn crop(&self, _command: &CropCommand) -> HostResult<()> {
        Err(HostError::NotImplemented)
    }

    async fn resize(&self, _command: &ResizeCommand) -> HostResult<()> {
        Err(HostError::NotImplemented)
    }

    async fn blur(&self, _command: &BlurCommand) -> HostResult<()> {
        Err(HostError::NotImplemented)
    }

    async fn adjust_color(&self, _adjustments: &[ColorAdjustment]) -> HostResult<()> {
        Err(HostError::NotImplemented)
    }

    async fn sharpen(&self, _command: &SharpenCommand) -> HostResult<()> {
        Err(HostError::NotImplemented)
    }

    /// Selects the main subject, optionally copying it to a new layer that
    /// is left selected.
    async fn cutout_subject(&self, _command: &CutoutCommand) -> HostResult<()> {
        Err(HostError::NotImplemented)
    }

    async fn merge_layers(&self, _command: &MergeCommand) -> HostResult<()> {
        Err(HostError::NotImplemented)
    }
}

/// Dispatches one translated command to the matching host capability.
pub async fn apply_command(host: &dyn HostEditor, command: &HostCommand) -> HostResult<()> {
    match command {
        HostCommand::Crop(command) => host.crop(command).await,
        HostCommand::Resize(command) => host.resize(command).await,
        HostCommand::Blur(command) => host.blur(command).await,
        HostCommand::AdjustColor(adjustments) => host.adjust_color(adjustments).await,
        HostCommand::Sharpen(command) => host.sharpen(command).await,
        HostCommand::CutoutSubject(command) => host.cutout_subject(command).await,
        HostCommand::MergeLayers(command) => host.merge_layers(command).await,
    }
}
