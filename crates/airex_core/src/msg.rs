use crate::{Agent, TaskHandle, TaskPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User dropped a file on the upload area.
    FileDropped {
        name: String,
        mime: String,
        size_bytes: u64,
    },
    /// User submitted the arXiv URL box.
    ArxivSubmitted(String),
    /// Simulated arXiv download finished.
    ArxivFetched { url: String },
    /// User sent a chat message.
    ChatSent(String),
    /// Simulated assistant is ready to answer the last chat message.
    ReplyReady,
    /// User clicked one of the agent quick actions.
    AgentTriggered(Agent),
    /// Start a task by external kind name.
    StartRequested { kind: String, payload: TaskPayload },
    /// A task's tick timer fired.
    TickElapsed(TaskHandle),
    /// User cancelled a task.
    CancelRequested(TaskHandle),
    /// Fallback for placeholder wiring.
    NoOp,
}
