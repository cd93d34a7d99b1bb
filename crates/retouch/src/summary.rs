//! Plain-text rendering of a plan for user confirmation.

use crate::plan::{EditPlan, LayerTarget, Operation, OperationKind};

pub fn render_summary(plan: &EditPlan) -> String {
    let mut lines = vec![format!("Plan: {}", plan.explanation), String::new()];
    lines.push("Operations:".to_string());
    lines.extend(
        plan.operations
            .iter()
            .enumerate()
            .map(|(index, operation)| operation_line(index + 1, operation)),
    );
    lines.join("\n")
}

fn operation_line(number: usize, operation: &Operation) -> String {
    let layer = match &operation.target {
        LayerTarget::Named(name) => format!("on \"{name}\""),
        LayerTarget::AllLayers => "on ALL layers".to_string(),
    };
    let head = format!(
        "{number}. {} {layer}",
        operation.kind.type_name().to_uppercase()
    );
    match operation_detail(&operation.kind) {
        Some(detail) => format!("{head}: {detail}"),
        None => head,
    }
}

fn operation_detail(kind: &OperationKind) -> Option<String> {
    let detail = match kind {
        OperationKind::Resize(params) => format!(
            "{}x{}px ({})",
            params.width,
            params.height,
            params.method.as_str()
        ),
        OperationKind::Crop(params) => match params.focus_box {
            Some(focus) => format!(
                "{}x{}px (smart crop on subject at {}%, {}%)",
                params.width, params.height, focus.x, focus.y
            ),
            None => format!(
                "{}x{}px at {}",
                params.width,
                params.height,
                params.position.as_str()
            ),
        },
        OperationKind::Blur(params) => format!(
            "{} blur, radius: {}",
            params.blur_type.as_str(),
            params.radius
        ),
        OperationKind::ColorCorrection(params) => {
            let adjustments: Vec<String> = [
                ("brightness", params.brightness),
                ("contrast", params.contrast),
                ("saturation", params.saturation),
                ("temperature", params.temperature),
            ]
            .into_iter()
            .filter_map(|(name, value)| match value {
                Some(value) if value != 0.0 => Some(format!("{name}: {value}")),
                _ => None,
            })
            .collect();
            adjustments.join(", ")
        }
        OperationKind::Sharpness(params) => {
            format!("amount: {}, radius: {}", params.amount, params.radius)
        }
        OperationKind::SelectSubject(_) => "select subject and copy to new layer".to_string(),
        OperationKind::MergeLayers(params) => {
            format!("merge layers: {}", params.layer_names.join(", "))
        }
        OperationKind::Unsupported { .. } => return None,
    };
    Some(detail)
}
