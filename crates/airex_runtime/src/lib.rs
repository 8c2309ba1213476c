//! AIREX runtime: timer-driven event loop executing simulator effects.
mod backend;
mod event_loop;
mod toast;

pub use backend::{TaskBackend, TaskStatus};
pub use event_loop::EventLoop;
pub use toast::{LogToastSink, ToastSink};
