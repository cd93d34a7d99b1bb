//! In-memory host used by tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::command::{
    BlurCommand, ColorAdjustment, CropCommand, CutoutCommand, MergeCommand, ResizeCommand,
    SharpenCommand,
};
use crate::error::{HostError, HostResult};

use super::types::{DocumentSnapshot, LayerInfo};
use super::HostEditor;

pub(crate) struct RecordingHost {
    pub snapshot: DocumentSnapshot,
    pub preview: Vec<u8>,
    /// Calls whose name starts with this prefix fail.
    pub fail_on: Option<String>,
    /// Calls whose name starts with this prefix never complete.
    pub hang_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            snapshot: DocumentSnapshot {
                name: "portrait.psd".to_string(),
                width: 2000.0,
                height: 3000.0,
                layers: vec![
                    layer(0, "Layer 1", true, 80.0),
                    layer(1, "Background", true, 100.0),
                ],
            },
            preview: vec![0xff, 0xd8, 0xff],
            fail_on: None,
            hang_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.fail_on = Some(prefix.to_string());
        self
    }

    pub fn hanging_on(mut self, prefix: &str) -> Self {
        self.hang_on = Some(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    async fn record(&self, call: String) -> HostResult<()> {
        let matches = |prefix: &Option<String>| {
            prefix
                .as_deref()
                .is_some_and(|prefix| call.starts_with(prefix))
        };
        let fails = matches(&self.fail_on);
        let hangs = matches(&self.hang_on);
        self.calls.lock().expect("calls lock").push(call.clone());
        if hangs {
            std::future::pending::<()>().await;
        }
        if fails {
            return Err(HostError::CommandFailed(format!("{call} rejected")));
        }
        Ok(())
    }
}

fn layer(index: usize, name: &str, visible: bool, opacity: f64) -> LayerInfo {
    LayerInfo {
        index,
        name: name.to_string(),
        visible,
        opacity,
        kind: "pixel".to_string(),
    }
}

#[async_trait]
impl HostEditor for RecordingHost {
    async fn snapshot(&self) -> HostResult<DocumentSnapshot> {
        self.record("snapshot".to_string()).await?;
        Ok(self.snapshot.clone())
    }

    async fn export_preview(&self) -> HostResult<Vec<u8>> {
        self.record("export_preview".to_string()).await?;
        Ok(self.preview.clone())
    }

    async fn select_layer(&self, name: &str) -> HostResult<()> {
        self.record(format!("select {name}")).await
    }

    async fn crop(&self, command: &CropCommand) -> HostResult<()> {
        let rect = command.rect;
        self.record(format!(
            "crop {},{},{},{}",
            rect.left, rect.top, rect.right, rect.bottom
        ))
        .await
    }

    async fn resize(&self, command: &ResizeCommand) -> HostResult<()> {
        self.record(format!("resize {}x{}", command.width, command.height))
            .await
    }

    async fn blur(&self, command: &BlurCommand) -> HostResult<()> {
        self.record(format!("blur {command:?}")).await
    }

    async fn adjust_color(&self, adjustments: &[ColorAdjustment]) -> HostResult<()> {
        self.record(format!("adjust_color {}", adjustments.len()))
            .await
    }

    async fn sharpen(&self, command: &SharpenCommand) -> HostResult<()> {
        self.record(format!("sharpen {}", command.amount)).await
    }

    async fn cutout_subject(&self, command: &CutoutCommand) -> HostResult<()> {
        self.record(format!("cutout copy={}", command.copy_to_new_layer))
            .await
    }

    async fn merge_layers(&self, command: &MergeCommand) -> HostResult<()> {
        self.record(format!("merge {}", command.layer_names.join("+")))
            .await
    }
}
