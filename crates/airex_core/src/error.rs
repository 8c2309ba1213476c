use thiserror::Error;

use crate::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invalid task kind `{kind}`: {reason}")]
    InvalidKind { kind: String, reason: &'static str },
    #[error("no task registered for task#{0}")]
    InvalidHandle(TaskId),
}
