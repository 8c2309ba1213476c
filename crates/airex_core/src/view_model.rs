use serde::Serialize;

use crate::task::Task;
use crate::{TaskHandle, TaskKind, TaskResult, TaskState};

/// Snapshot of one task as handed to observers and renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub handle: TaskHandle,
    pub kind: TaskKind,
    pub state: TaskState,
    pub progress: f64,
    pub label: String,
    /// Typing buffer; empty for documents.
    pub streamed: String,
    pub result: Option<TaskResult>,
}

impl TaskView {
    pub(crate) fn from_task(handle: TaskHandle, task: &Task) -> Self {
        Self {
            handle,
            kind: task.kind,
            state: task.state,
            progress: task.progress,
            label: task.payload.label().to_string(),
            streamed: task.streamed.clone(),
            result: task.result.clone(),
        }
    }

    /// Whole-number percentage for progress bars.
    pub fn percent(&self) -> u8 {
        self.progress.round().clamp(0.0, 100.0) as u8
    }

    pub fn is_document(&self) -> bool {
        matches!(self.kind, TaskKind::DocumentProcessing)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SimulatorView {
    pub tasks: Vec<TaskView>,
    pub running: usize,
    pub complete: usize,
    pub arxiv_pending: usize,
    pub typing: bool,
}

impl SimulatorView {
    pub fn find(&self, handle: TaskHandle) -> Option<&TaskView> {
        self.tasks.iter().find(|task| task.handle == handle)
    }

    /// Document payloads, newest first, the way the upload list shows them.
    pub fn documents(&self) -> impl Iterator<Item = &TaskView> {
        self.tasks.iter().rev().filter(|task| task.is_document())
    }
}
