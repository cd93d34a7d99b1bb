//! [`HostEditor`] over a batch-play style action API.
//!
//! Hosts that accept lists of action descriptors only need to implement
//! [`ActionBridge`]; the descriptor shapes live in [`crate::command`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::command::{
    select_layer_by_name, BlurCommand, ColorAdjustment, CropCommand, CutoutCommand, MergeCommand,
    ResizeCommand, SharpenCommand,
};
use crate::error::{HostError, HostResult};

use super::types::DocumentSnapshot;
use super::HostEditor;

pub const DEFAULT_PREVIEW_QUALITY: u8 = 12;
const PREVIEW_DOCUMENT_NAME: &str = "temp_preview";
const DEFAULT_CUTOUT_SETTLE: Duration = Duration::from_millis(300);

#[async_trait]
pub trait ActionBridge: Send + Sync {
    /// Runs `descriptors` as one modal host command named `command_name`.
    async fn batch_play(&self, command_name: &str, descriptors: Vec<Value>) -> HostResult<()>;

    async fn active_document(&self) -> HostResult<DocumentSnapshot>;

    /// Saves the active document as JPEG and returns the encoded bytes.
    async fn save_active_as_jpeg(&self, quality: u8) -> HostResult<Vec<u8>>;

    async fn close_active_without_saving(&self) -> HostResult<()>;
}

pub struct BatchPlayEditor<B> {
    bridge: B,
    preview_quality: u8,
    cutout_settle: Duration,
}

impl<B: ActionBridge> BatchPlayEditor<B> {
    pub fn new(bridge: B) -> Self {
        Self {
            bridge,
            preview_quality: DEFAULT_PREVIEW_QUALITY,
            cutout_settle: DEFAULT_CUTOUT_SETTLE,
        }
    }

    pub fn with_preview_quality(mut self, quality: u8) -> Self {
        self.preview_quality = quality;
        self
    }

    /// Pause between the subject cutout and copying it to a layer.
    pub fn with_cutout_settle(mut self, settle: Duration) -> Self {
        self.cutout_settle = settle;
        self
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    async fn play(&self, command_name: &str, descriptors: Vec<Value>) -> HostResult<()> {
        tracing::debug!(command = command_name, descriptors = descriptors.len(), "batch play");
        self.bridge.batch_play(command_name, descriptors).await
    }
}

#[async_trait]
impl<B: ActionBridge> HostEditor for BatchPlayEditor<B> {
    async fn snapshot(&self) -> HostResult<DocumentSnapshot> {
        self.bridge.active_document().await
    }

    /// Duplicates and flattens the document, saves the copy as JPEG, closes
    /// it, and reselects the original.
    async fn export_preview(&self) -> HostResult<Vec<u8>> {
        let original = self.bridge.active_document().await?;

        self.play(
            "Create Preview",
            vec![json!({
                "_obj": "duplicate",
                "_target": [{ "_ref": "document", "_enum": "ordinal", "_value": "targetEnum" }],
                "name": PREVIEW_DOCUMENT_NAME,
            })],
        )
        .await?;
        self.play("Flatten Preview", vec![json!({ "_obj": "flattenImage" })])
            .await?;

        let exported = self.bridge.save_active_as_jpeg(self.preview_quality).await;
        self.bridge.close_active_without_saving().await?;
        self.play(
            "Restore Original",
            vec![json!({
                "_obj": "select",
                "_target": [{ "_ref": "document", "_name": original.name }],
            })],
        )
        .await?;

        let bytes = exported?;
        if bytes.is_empty() {
            return Err(HostError::CommandFailed("preview export was empty".to_string()));
        }
        Ok(bytes)
    }

    async fn select_layer(&self, name: &str) -> HostResult<()> {
        self.play("Select Layer", vec![select_layer_by_name(name, false)])
            .await
    }

    async fn crop(&self, command: &CropCommand) -> HostResult<()> {
        self.play("AI Crop", vec![command.descriptor()]).await
    }

    async fn resize(&self, command: &ResizeCommand) -> HostResult<()> {
        self.play("AI Resize", vec![command.descriptor()]).await
    }

    async fn blur(&self, command: &BlurCommand) -> HostResult<()> {
        self.play("AI Blur", vec![command.descriptor()]).await
    }

    async fn adjust_color(&self, adjustments: &[ColorAdjustment]) -> HostResult<()> {
        if adjustments.is_empty() {
            return Ok(());
        }
        let descriptors = adjustments.iter().map(ColorAdjustment::descriptor).collect();
        self.play("AI Color Correction", descriptors).await
    }

    async fn sharpen(&self, command: &SharpenCommand) -> HostResult<()> {
        self.play("Apply Sharpness", vec![command.descriptor()]).await
    }

    async fn cutout_subject(&self, command: &CutoutCommand) -> HostResult<()> {
        self.play("Select Subject", vec![command.select_descriptor()])
            .await?;
        // The cutout finishes asynchronously inside the host.
        tokio::time::sleep(self.cutout_settle).await;
        if command.copy_to_new_layer {
            self.play("Copy Subject to Layer", vec![command.copy_descriptor()])
                .await?;
        }
        Ok(())
    }

    async fn merge_layers(&self, command: &MergeCommand) -> HostResult<()> {
        if command.layer_names.len() < 2 {
            return Err(HostError::CommandFailed(
                "Need at least 2 layers to merge".to_string(),
            ));
        }
        self.play("Merge Layers", command.descriptors()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::host::types::LayerInfo;
    use crate::settings::RetouchSettings;

    #[derive(Default)]
    struct RecordingBridge {
        played: Mutex<Vec<(String, Vec<Value>)>>,
        closed: Mutex<usize>,
        fail_save: bool,
    }

    impl RecordingBridge {
        fn played(&self) -> Vec<(String, Vec<Value>)> {
            self.played.lock().expect("played lock").clone()
        }

        fn command_names(&self) -> Vec<String> {
            self.played().into_iter().map(|(name, _)| name).collect()
        }
    }

    #[async_trait]
    impl ActionBridge for RecordingBridge {
        async fn batch_play(&self, command_name: &str, descriptors: Vec<Value>) -> HostResult<()> {
            self.played
                .lock()
                .expect("played lock")
                .push((command_name.to_string(), descriptors));
            Ok(())
        }

        async fn active_document(&self) -> HostResult<DocumentSnapshot> {
            Ok(DocumentSnapshot {
                name: "portrait.psd".to_string(),
                width: 2000.0,
                height: 3000.0,
                layers: vec![LayerInfo {
                    index: 0,
                    name: "Background".to_string(),
                    visible: true,
                    opacity: 100.0,
                    kind: "pixel".to_string(),
                }],
            })
        }

        async fn save_active_as_jpeg(&self, quality: u8) -> HostResult<Vec<u8>> {
            if self.fail_save {
                return Err(HostError::CommandFailed("disk full".to_string()));
            }
            Ok(vec![0xff, 0xd8, quality])
        }

        async fn close_active_without_saving(&self) -> HostResult<()> {
            *self.closed.lock().expect("closed lock") += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn preview_duplicates_flattens_and_restores() {
        let editor = BatchPlayEditor::new(RecordingBridge::default());

        let bytes = editor.export_preview().await.expect("preview");

        assert_eq!(bytes, vec![0xff, 0xd8, DEFAULT_PREVIEW_QUALITY]);
        assert_eq!(
            editor.bridge().command_names(),
            vec!["Create Preview", "Flatten Preview", "Restore Original"]
        );
        let played = editor.bridge().played();
        assert_eq!(played[0].1[0]["name"], PREVIEW_DOCUMENT_NAME);
        assert_eq!(played[2].1[0]["_target"][0]["_name"], "portrait.psd");
        assert_eq!(*editor.bridge().closed.lock().expect("closed lock"), 1);
    }

    #[tokio::test]
    async fn stored_preview_quality_reaches_the_export() {
        let settings = RetouchSettings {
            preview_quality: 30,
            ..RetouchSettings::default()
        };
        let editor = settings.editor(RecordingBridge::default());

        let bytes = editor.export_preview().await.expect("preview");

        assert_eq!(bytes, vec![0xff, 0xd8, 30]);
    }

    #[tokio::test]
    async fn failed_preview_save_still_closes_the_copy() {
        let editor = BatchPlayEditor::new(RecordingBridge {
            fail_save: true,
            ..RecordingBridge::default()
        });

        let error = editor.export_preview().await.unwrap_err();

        assert!(matches!(error, HostError::CommandFailed(_)));
        assert_eq!(*editor.bridge().closed.lock().expect("closed lock"), 1);
        assert_eq!(
            editor.bridge().command_names().last().map(String::as_str),
            Some("Restore Original")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cutout_waits_before_copying_to_a_layer() {
        let editor = BatchPlayEditor::new(RecordingBridge::default());
        let started = tokio::time::Instant::now();

        editor
            .cutout_subject(&CutoutCommand {
                copy_to_new_layer: true,
            })
            .await
            .expect("cutout");

        assert!(started.elapsed() >= DEFAULT_CUTOUT_SETTLE);
        assert_eq!(
            editor.bridge().command_names(),
            vec!["Select Subject", "Copy Subject to Layer"]
        );
    }

    #[tokio::test]
    async fn color_adjustments_share_one_batch() {
        let editor = BatchPlayEditor::new(RecordingBridge::default());

        editor
            .adjust_color(&[
                ColorAdjustment::BrightnessContrast {
                    brightness: 0.0,
                    contrast: 10.0,
                },
                ColorAdjustment::HueSaturation { saturation: 20.0 },
            ])
            .await
            .expect("adjust");
        editor.adjust_color(&[]).await.expect("no-op");

        let played = editor.bridge().played();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].0, "AI Color Correction");
        assert_eq!(played[0].1.len(), 2);
    }

    #[tokio::test]
    async fn select_layer_by_name_targets_the_layer() {
        let editor = BatchPlayEditor::new(RecordingBridge::default());

        editor
            .select_layer("Layer 1")
            .await
            .expect("select");

        let played = editor.bridge().played();
        assert_eq!(played[0].1[0]["_target"][0]["_name"], "Layer 1");
        assert_eq!(played[0].1[0]["makeVisible"], false);
    }
}
