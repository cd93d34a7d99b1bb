pub mod error;
pub mod events;
pub mod settings;

pub mod command;
pub mod geometry;
pub mod host;
pub mod interpreter;
pub mod plan;
pub mod prompt;
pub mod session;
pub mod summary;
pub mod translate;

pub use crate::error::{CoreError, CoreResult, HostError, HostResult};
pub use crate::events::{ProgressEvent, ProgressSender};
pub use crate::host::{ActionBridge, BatchPlayEditor, DocumentSnapshot, HostEditor, LayerInfo};
pub use crate::interpreter::{ExecutionReport, PlanInterpreter};
pub use crate::plan::{EditPlan, Operation, OperationKind};
pub use crate::session::{PendingPlan, PlanSession, SessionState};
pub use crate::settings::{RetouchSettings, SettingsStore};
pub use crate::summary::render_summary;
