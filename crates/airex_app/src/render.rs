use std::collections::HashMap;

use airex_core::{SimulatorView, TaskHandle, TaskResult, TaskState, TaskView};
use sim_logging::{sim_debug, sim_info};

const BAR_WIDTH: usize = 20;
/// Longest stretch of a label or typing buffer shown on one row.
const LABEL_WIDTH: usize = 48;

/// Observer that logs a row whenever a task's state changes or its
/// progress crosses another tenth.
pub fn progress_observer() -> impl FnMut(&TaskView) {
    let mut last_seen: HashMap<TaskHandle, (TaskState, u8)> = HashMap::new();
    move |view: &TaskView| {
        let bucket = view.percent() / 10;
        let changed = last_seen
            .insert(view.handle, (view.state, bucket))
            .is_none_or(|previous| previous != (view.state, bucket));
        if changed {
            sim_info!("{}", format_task_row(view));
        } else {
            sim_debug!("{} at {:.1}%", view.handle, view.progress);
        }
    }
}

pub fn format_task_row(view: &TaskView) -> String {
    let status = match view.state {
        TaskState::Pending => "PENDING",
        TaskState::Running => "RUN",
        TaskState::Complete => "OK",
        TaskState::Cancelled => "CANCEL",
    };
    let text = if view.is_document() || view.state == TaskState::Complete {
        view.label.as_str()
    } else {
        view.streamed.as_str()
    };
    let row = format!(
        "[#{id}] {status:<6} {bar} {percent:>3}% {text}",
        id = view.handle.id(),
        bar = progress_bar(view.percent()),
        percent = view.percent(),
        text = truncate(text, LABEL_WIDTH),
    );
    match &view.result {
        Some(TaskResult::Entities(entities)) => format!(
            "{row} ({:.1}s; methods: {}; datasets: {}; metrics: {})",
            entities.processing_time.as_secs_f64(),
            entities.methods.join(", "),
            entities.datasets.join(", "),
            entities.metrics.join(", "),
        ),
        Some(TaskResult::Message(message)) => format!("{row} <{}>", message.agent),
        None => row,
    }
}

pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn status_line(view: &SimulatorView) -> String {
    format!(
        "Tasks: {} | Running: {} | Complete: {} | arXiv fetching: {}{}",
        view.tasks.len(),
        view.running,
        view.complete,
        view.arxiv_pending,
        if view.typing { " | assistant typing" } else { "" }
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_in_twentieths() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(50), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(20)));
        assert_eq!(progress_bar(255), progress_bar(100));
    }

    #[test]
    fn long_labels_are_truncated_on_char_boundaries() {
        let label = "é".repeat(60);
        let out = truncate(&label, 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with("..."));
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn status_line_mentions_typing_only_when_active() {
        let mut view = SimulatorView::default();
        assert_eq!(
            status_line(&view),
            "Tasks: 0 | Running: 0 | Complete: 0 | arXiv fetching: 0"
        );
        view.typing = true;
        assert!(status_line(&view).ends_with("| assistant typing"));
    }
}
