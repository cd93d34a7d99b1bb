use serde::{Deserialize, Serialize};

use crate::geometry::Size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub index: usize,
    pub name: String,
    pub visible: bool,
    pub opacity: f64,
    pub kind: String,
}

/// Read-only facts about the active document, taken just before analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub layers: Vec<LayerInfo>,
}

impl DocumentSnapshot {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn layer_named(&self, name: &str) -> Option<&LayerInfo> {
        self.layers.iter().find(|layer| layer.name == name)
    }
}
