//! AIREX core: simulated task-progress state machine and its pure update layer.
mod catalog;
mod config;
mod effect;
mod error;
mod msg;
mod simulator;
mod task;
mod update;
mod view_model;

pub use catalog::agent_line;
pub use config::{ConfigError, SimConfig, StepPolicy};
pub use effect::{Effect, Toast, ToastLevel};
pub use error::SimError;
pub use msg::Msg;
pub use simulator::Simulator;
pub use task::{
    Agent, ChatMessage, DocumentSource, ExtractedEntities, TaskHandle, TaskId, TaskKind,
    TaskPayload, TaskResult, TaskState, TickOutcome,
};
pub use update::update;
pub use view_model::{SimulatorView, TaskView};
