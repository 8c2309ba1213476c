use airex_core::{SimError, TaskId, TaskKind, TaskPayload, TaskResult, TaskState, TaskView};
use serde::Serialize;

use crate::EventLoop;

/// What a real ingestion/inference service would report for a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatus {
    pub state: TaskState,
    pub progress: f64,
    pub result: Option<TaskResult>,
}

impl From<TaskView> for TaskStatus {
    fn from(view: TaskView) -> Self {
        Self {
            state: view.state,
            progress: view.progress,
            result: view.result,
        }
    }
}

/// Submit/poll surface of a task-running backend.
///
/// The simulator-backed `EventLoop` is the only implementation; a service
/// doing real work would slot in behind the same calls.
pub trait TaskBackend {
    fn submit_task(&mut self, kind: &str, payload: TaskPayload) -> Result<TaskId, SimError>;
    fn task_status(&self, id: TaskId) -> Result<TaskStatus, SimError>;
}

impl TaskBackend for EventLoop {
    fn submit_task(&mut self, kind: &str, payload: TaskPayload) -> Result<TaskId, SimError> {
        let kind = kind.parse::<TaskKind>()?;
        let handle = self.simulator_mut().start(kind, payload)?;
        let period = self.simulator().config().tick_period(kind);
        self.schedule(period, airex_core::Msg::TickElapsed(handle));
        Ok(handle.id())
    }

    fn task_status(&self, id: TaskId) -> Result<TaskStatus, SimError> {
        self.simulator()
            .lookup(id)
            .and_then(|handle| self.simulator().task(handle))
            .map(TaskStatus::from)
            .ok_or(SimError::InvalidHandle(id))
    }
}
