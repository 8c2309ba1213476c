use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SimError;

pub type TaskId = u64;

/// Opaque reference to a registered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskHandle(TaskId);

impl TaskHandle {
    pub(crate) fn new(id: TaskId) -> Self {
        Self(id)
    }

    pub fn id(self) -> TaskId {
        self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    DocumentProcessing,
    MessageTyping,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::DocumentProcessing => "document-processing",
            TaskKind::MessageTyping => "message-typing",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = SimError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "document-processing" => Ok(TaskKind::DocumentProcessing),
            "message-typing" => Ok(TaskKind::MessageTyping),
            other => Err(SimError::InvalidKind {
                kind: other.to_string(),
                reason: "not a known task kind",
            }),
        }
    }
}

/// Lifecycle of a task. `Pending` is only observable inside `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    #[default]
    Pending,
    Running,
    Complete,
    Cancelled,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Complete | TaskState::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    Upload,
    Arxiv { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agent {
    System,
    IdeaGeneration,
    CodeImplementation,
    Benchmark,
    Refactoring,
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Agent::System => "system",
            Agent::IdeaGeneration => "idea_generation",
            Agent::CodeImplementation => "code_implementation",
            Agent::Benchmark => "benchmark",
            Agent::Refactoring => "refactoring",
        };
        f.write_str(name)
    }
}

/// Input that a task is started with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPayload {
    Document {
        name: String,
        size_bytes: u64,
        source: DocumentSource,
    },
    Message {
        content: String,
        agent: Agent,
    },
}

impl TaskPayload {
    /// The only kind this payload can be started as.
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskPayload::Document { .. } => TaskKind::DocumentProcessing,
            TaskPayload::Message { .. } => TaskKind::MessageTyping,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TaskPayload::Document { name, .. } => name,
            TaskPayload::Message { content, .. } => content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub methods: Vec<String>,
    pub datasets: Vec<String>,
    pub metrics: Vec<String>,
    /// Simulated wall time spent, i.e. ticks times the tick period.
    pub processing_time: Duration,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.datasets.is_empty() && self.metrics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: String,
    pub agent: Agent,
}

/// Terminal payload of a completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskResult {
    Entities(ExtractedEntities),
    Message(ChatMessage),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Progress moved but the task is still running.
    Progressed { progress: f64 },
    /// This tick finished the task.
    Completed,
    /// Task was already complete or cancelled; nothing changed.
    Ignored,
}

#[derive(Debug, Clone)]
pub(crate) struct Task {
    pub(crate) kind: TaskKind,
    pub(crate) state: TaskState,
    pub(crate) progress: f64,
    pub(crate) payload: TaskPayload,
    /// Characters of a message payload, pre-split so each tick reveals one.
    pub(crate) chars: Vec<char>,
    pub(crate) revealed: usize,
    pub(crate) streamed: String,
    pub(crate) ticks: u64,
    pub(crate) result: Option<TaskResult>,
}

impl Task {
    pub(crate) fn new(payload: TaskPayload) -> Self {
        let chars = match &payload {
            TaskPayload::Message { content, .. } => content.chars().collect(),
            TaskPayload::Document { .. } => Vec::new(),
        };
        Self {
            kind: payload.kind(),
            state: TaskState::Pending,
            progress: 0.0,
            payload,
            chars,
            revealed: 0,
            streamed: String::new(),
            ticks: 0,
            result: None,
        }
    }
}
