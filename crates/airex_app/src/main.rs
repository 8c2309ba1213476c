mod config;
mod logging;
mod render;
mod session;

use std::path::PathBuf;

use airex_core::{Simulator, TaskKind};
use airex_runtime::{EventLoop, LogToastSink, TaskBackend, TaskStatus};
use anyhow::Context;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TaskReport {
    id: u64,
    kind: TaskKind,
    label: String,
    #[serde(flatten)]
    status: TaskStatus,
}

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::from_env());

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILENAME));
    let config = config::load_config(&config_path)?;
    let sim = Simulator::new(config).context("building simulator")?;

    let mut ev = EventLoop::new(sim, LogToastSink);
    ev.simulator_mut().subscribe_all(render::progress_observer());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(session::run(&mut ev));

    let mut report = Vec::new();
    for task in ev.view().tasks {
        let status = ev.task_status(task.handle.id())?;
        report.push(TaskReport {
            id: task.handle.id(),
            kind: task.kind,
            label: task.label,
            status,
        });
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing task report")?
    );
    Ok(())
}
