use tokio::sync::mpsc;

use super::*;
use crate::host::recording::RecordingHost;
use crate::plan::{
    BlurKind, BlurParams, ColorParams, CropParams, CropPosition, MergeParams, SelectSubjectParams,
};

fn select_subject() -> OperationKind {
    OperationKind::SelectSubject(SelectSubjectParams {
        copy_to_new_layer: true,
    })
}

fn contrast(value: f64) -> OperationKind {
    OperationKind::ColorCorrection(ColorParams {
        contrast: Some(value),
        ..ColorParams::default()
    })
}

fn gaussian(radius: f64) -> OperationKind {
    OperationKind::Blur(BlurParams {
        blur_type: BlurKind::Gaussian,
        radius,
        angle: None,
    })
}

fn merge(names: &[&str]) -> OperationKind {
    OperationKind::MergeLayers(MergeParams {
        layer_names: names.iter().map(|name| name.to_string()).collect(),
    })
}

#[tokio::test]
async fn subject_layer_stays_selected_for_the_second_step() {
    let host = RecordingHost::new();
    let plan = EditPlan::new(
        "isolate and blur background",
        vec![
            Operation::on_all_layers(select_subject()),
            Operation::on_layer("Layer 1", contrast(30.0)),
            Operation::on_layer("Background", gaussian(15.0)),
        ],
    );

    let mut interpreter = PlanInterpreter::new(&host);
    let report = interpreter.run(&plan).await.expect("run");

    assert_eq!(
        host.calls(),
        vec![
            "cutout copy=true",
            "adjust_color 1",
            "select Background",
            "blur Gaussian { radius: 15.0 }",
        ]
    );
    assert_eq!(report.steps_applied, 3);
    assert_eq!(report.skipped_selects, vec![2]);
    assert_eq!(interpreter.state(), ExecutionState::Completed);
}

#[tokio::test]
async fn later_subject_selection_does_not_skip_layer_select() {
    let host = RecordingHost::new();
    let plan = EditPlan::new(
        "",
        vec![
            Operation::on_layer("Background", contrast(10.0)),
            Operation::on_all_layers(select_subject()),
            Operation::on_layer("Layer 1", contrast(20.0)),
        ],
    );

    let report = PlanInterpreter::new(&host).run(&plan).await.expect("run");

    assert_eq!(
        host.calls(),
        vec![
            "select Background",
            "adjust_color 1",
            "cutout copy=true",
            "select Layer 1",
            "adjust_color 1",
        ]
    );
    assert!(report.skipped_selects.is_empty());
}

#[tokio::test]
async fn all_layer_steps_do_not_select() {
    let host = RecordingHost::new();
    let plan = EditPlan::new(
        "",
        vec![Operation::on_all_layers(OperationKind::Crop(CropParams {
            width: 1000.0,
            height: 1000.0,
            position: CropPosition::Center,
            focus_box: None,
            padding: None,
        }))],
    );

    PlanInterpreter::new(&host).run(&plan).await.expect("run");

    assert_eq!(host.calls(), vec!["snapshot", "crop 500,1000,1500,2000"]);
}

#[tokio::test]
async fn failure_halts_without_rollback() {
    let host = RecordingHost::new().failing_on("blur");
    let plan = EditPlan::new(
        "",
        vec![
            Operation::on_layer("Layer 1", contrast(10.0)),
            Operation::on_layer("Background", gaussian(4.0)),
            Operation::on_layer("Layer 1", contrast(-5.0)),
        ],
    );
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut interpreter = PlanInterpreter::new(&host).with_events(tx);
    let error = interpreter.run(&plan).await.unwrap_err();

    match &error {
        CoreError::OperationFailed { step, source } => {
            assert_eq!(*step, 2);
            assert!(matches!(**source, CoreError::Host(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(error.to_string().starts_with("execution failed at operation 2:"));
    assert_eq!(interpreter.state(), ExecutionState::Failed);
    assert_eq!(
        host.calls(),
        vec![
            "select Layer 1",
            "adjust_color 1",
            "select Background",
            "blur Gaussian { radius: 4.0 }",
        ]
    );

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert!(matches!(
        events.last(),
        Some(ProgressEvent::PlanFailed { step: 2, .. })
    ));
    assert!(!events
        .iter()
        .any(|event| matches!(event, ProgressEvent::PlanCompleted { .. })));
}

#[tokio::test]
async fn merge_validation_happens_before_layer_select() {
    let host = RecordingHost::new();
    let plan = EditPlan::new("", vec![Operation::on_layer("Layer 1", merge(&["Layer 1"]))]);

    let error = PlanInterpreter::new(&host).run(&plan).await.unwrap_err();

    match error {
        CoreError::OperationFailed { step, source } => {
            assert_eq!(step, 1);
            assert!(matches!(*source, CoreError::Validation(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn merge_passes_all_names_through() {
    let host = RecordingHost::new();
    let plan = EditPlan::new(
        "",
        vec![Operation::on_all_layers(merge(&["Layer 1", "Background"]))],
    );

    PlanInterpreter::new(&host).run(&plan).await.expect("run");

    assert_eq!(host.calls(), vec!["merge Layer 1+Background"]);
}

#[tokio::test]
async fn unsupported_operations_are_skipped() {
    let host = RecordingHost::new();
    let plan = EditPlan::new(
        "",
        vec![
            Operation::on_all_layers(OperationKind::Unsupported {
                kind: "noise".to_string(),
            }),
            Operation::on_all_layers(contrast(12.0)),
        ],
    );
    let (tx, mut rx) = mpsc::unbounded_channel();

    let report = PlanInterpreter::new(&host)
        .with_events(tx)
        .run(&plan)
        .await
        .expect("run");

    assert_eq!(report.ignored, vec![1]);
    assert_eq!(report.steps_applied, 2);
    assert_eq!(host.calls(), vec!["adjust_color 1"]);

    let mut last = None;
    while let Ok(event) = rx.try_recv() {
        last = Some(event);
    }
    assert_eq!(last, Some(ProgressEvent::PlanCompleted { steps: 2 }));
}

#[tokio::test]
async fn empty_plan_completes_immediately() {
    let host = RecordingHost::new();
    let report = PlanInterpreter::new(&host)
        .run(&EditPlan::new("nothing to do", Vec::new()))
        .await
        .expect("run");

    assert_eq!(report, ExecutionReport::default());
    assert!(host.calls().is_empty());
}
