use airex_core::{Toast, ToastLevel};
use sim_logging::{sim_error, sim_info};

/// Destination for user-visible notifications.
pub trait ToastSink {
    fn show(&mut self, toast: &Toast);
}

/// Writes toasts to the log; the default when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogToastSink;

impl ToastSink for LogToastSink {
    fn show(&mut self, toast: &Toast) {
        match toast.level {
            ToastLevel::Success => sim_info!("[ok] {}", toast.text),
            ToastLevel::Error => sim_error!("[!!] {}", toast.text),
        }
    }
}
