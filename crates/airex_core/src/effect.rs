use std::time::Duration;

use crate::{Msg, TaskHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleTick { handle: TaskHandle, after: Duration },
    StopTicks { handle: TaskHandle },
    /// Feed `msg` back into `update` once `after` has elapsed.
    Deliver { after: Duration, msg: Box<Msg> },
    Toast(Toast),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub text: String,
}

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            text: text.into(),
        }
    }
}
