use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sim_logging::{sim_debug, sim_info, sim_trace};

use crate::catalog;
use crate::task::Task;
use crate::{
    ChatMessage, ConfigError, SimConfig, SimError, SimulatorView, TaskHandle, TaskId, TaskKind,
    TaskPayload, TaskResult, TaskState, TaskView, TickOutcome,
};

type Observer = Box<dyn FnMut(&TaskView)>;

/// Owns every simulated task and the callbacks watching them.
///
/// Nothing in here knows about wall-clock time: callers decide when to
/// `tick`, which keeps the simulator drivable from a real timer loop or
/// straight from a test.
pub struct Simulator {
    config: SimConfig,
    rng: StdRng,
    next_id: TaskId,
    tasks: BTreeMap<TaskId, Task>,
    observers: BTreeMap<TaskId, Vec<Observer>>,
    list_observers: Vec<Observer>,
    arxiv_pending: usize,
    dirty: bool,
}

/// Seed used by `Simulator::default`.
const DEFAULT_SEED: u64 = 0;

/// A seeded, empty simulator. Building one never touches OS entropy, so it is
/// cheap enough to use as a placeholder while the real one is moved out.
impl Default for Simulator {
    fn default() -> Self {
        Self::with_valid_config(SimConfig {
            seed: Some(DEFAULT_SEED),
            ..SimConfig::default()
        })
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("config", &self.config)
            .field("next_id", &self.next_id)
            .field("tasks", &self.tasks.len())
            .field("arxiv_pending", &self.arxiv_pending)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng,
            next_id: 1,
            tasks: BTreeMap::new(),
            observers: BTreeMap::new(),
            list_observers: Vec::new(),
            arxiv_pending: 0,
            dirty: false,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Registers a task and moves it straight to `Running`.
    ///
    /// Scheduling the first tick is the caller's job; see `update`.
    pub fn start(&mut self, kind: TaskKind, payload: TaskPayload) -> Result<TaskHandle, SimError> {
        if payload.kind() != kind {
            return Err(SimError::InvalidKind {
                kind: kind.to_string(),
                reason: "payload belongs to a different task kind",
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        let handle = TaskHandle::new(id);

        let mut task = Task::new(payload);
        sim_trace!("{} registered in state {:?}", handle, task.state);
        task.state = TaskState::Running;
        sim_info!("{} started: {} `{}`", handle, kind, task.payload.label());
        self.tasks.insert(id, task);
        self.dirty = true;
        self.notify(handle);
        Ok(handle)
    }

    /// Same as `start`, with the kind given by its external name.
    pub fn start_named(
        &mut self,
        kind: &str,
        payload: TaskPayload,
    ) -> Result<TaskHandle, SimError> {
        let kind = kind.parse::<TaskKind>()?;
        self.start(kind, payload)
    }

    pub fn tick(&mut self, handle: TaskHandle) -> Result<TickOutcome, SimError> {
        let task = self
            .tasks
            .get_mut(&handle.id())
            .ok_or(SimError::InvalidHandle(handle.id()))?;
        if task.state != TaskState::Running {
            sim_trace!("{} tick ignored in state {:?}", handle, task.state);
            return Ok(TickOutcome::Ignored);
        }

        task.ticks += 1;
        let finished = match task.kind {
            TaskKind::DocumentProcessing => {
                let delta = self.config.document_step.sample(&mut self.rng);
                task.progress = (task.progress + delta).min(100.0);
                task.progress >= 100.0
            }
            TaskKind::MessageTyping => {
                if let Some(&ch) = task.chars.get(task.revealed) {
                    task.streamed.push(ch);
                    task.revealed += 1;
                }
                let total = task.chars.len();
                if total > 0 {
                    task.progress = (task.revealed as f64 / total as f64 * 100.0).min(100.0);
                }
                task.revealed >= total
            }
        };

        let outcome = if finished {
            let elapsed = self
                .config
                .tick_period(task.kind)
                .saturating_mul(u32::try_from(task.ticks).unwrap_or(u32::MAX));
            let result = match &task.payload {
                TaskPayload::Document { .. } => {
                    TaskResult::Entities(catalog::extracted_entities(&mut self.rng, elapsed))
                }
                TaskPayload::Message { content, agent } => TaskResult::Message(ChatMessage {
                    content: content.clone(),
                    agent: *agent,
                }),
            };
            task.progress = 100.0;
            task.state = TaskState::Complete;
            task.result = Some(result);
            sim_info!("{} complete after {} ticks", handle, task.ticks);
            TickOutcome::Completed
        } else {
            sim_trace!("{} progress {:.1}", handle, task.progress);
            TickOutcome::Progressed {
                progress: task.progress,
            }
        };

        self.dirty = true;
        self.notify(handle);
        if finished {
            self.observers.remove(&handle.id());
        }
        Ok(outcome)
    }

    /// Stops a running task. Returns whether anything changed.
    pub fn cancel(&mut self, handle: TaskHandle) -> Result<bool, SimError> {
        let task = self
            .tasks
            .get_mut(&handle.id())
            .ok_or(SimError::InvalidHandle(handle.id()))?;
        if task.state != TaskState::Running {
            return Ok(false);
        }
        task.state = TaskState::Cancelled;
        sim_info!("{} cancelled at {:.1}%", handle, task.progress);

        self.dirty = true;
        self.notify(handle);
        self.observers.remove(&handle.id());
        Ok(true)
    }

    /// Adds an observer for one task. Observers run in registration order.
    pub fn subscribe<F>(&mut self, handle: TaskHandle, observer: F) -> Result<(), SimError>
    where
        F: FnMut(&TaskView) + 'static,
    {
        let task = self
            .tasks
            .get(&handle.id())
            .ok_or(SimError::InvalidHandle(handle.id()))?;
        if task.state.is_terminal() {
            sim_debug!("{} already {:?}; observer will never fire", handle, task.state);
            return Ok(());
        }
        self.observers
            .entry(handle.id())
            .or_default()
            .push(Box::new(observer));
        Ok(())
    }

    /// Adds an observer for every task, current and future.
    ///
    /// List observers run after the task's own observers.
    pub fn subscribe_all<F>(&mut self, observer: F)
    where
        F: FnMut(&TaskView) + 'static,
    {
        self.list_observers.push(Box::new(observer));
    }

    pub fn task(&self, handle: TaskHandle) -> Option<TaskView> {
        self.tasks
            .get(&handle.id())
            .map(|task| TaskView::from_task(handle, task))
    }

    /// Recovers the handle of a registered task from its raw id.
    pub fn lookup(&self, id: TaskId) -> Option<TaskHandle> {
        self.tasks.contains_key(&id).then(|| TaskHandle::new(id))
    }

    pub fn view(&self) -> SimulatorView {
        let tasks: Vec<TaskView> = self
            .tasks
            .iter()
            .map(|(id, task)| TaskView::from_task(TaskHandle::new(*id), task))
            .collect();
        SimulatorView {
            running: tasks
                .iter()
                .filter(|task| task.state == TaskState::Running)
                .count(),
            complete: tasks
                .iter()
                .filter(|task| task.state == TaskState::Complete)
                .count(),
            arxiv_pending: self.arxiv_pending,
            typing: self.is_typing(),
            tasks,
        }
    }

    /// True while any message is still being typed out.
    pub fn is_typing(&self) -> bool {
        self.tasks
            .values()
            .any(|task| task.kind == TaskKind::MessageTyping && task.state == TaskState::Running)
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_arxiv_fetch(&mut self) {
        self.arxiv_pending += 1;
        self.dirty = true;
    }

    pub(crate) fn finish_arxiv_fetch(&mut self) {
        self.arxiv_pending = self.arxiv_pending.saturating_sub(1);
        self.dirty = true;
    }

    pub(crate) fn random_reply(&mut self) -> ChatMessage {
        catalog::random_reply(&mut self.rng)
    }

    fn notify(&mut self, handle: TaskHandle) {
        let Some(task) = self.tasks.get(&handle.id()) else {
            return;
        };
        let view = TaskView::from_task(handle, task);
        if let Some(observers) = self.observers.get_mut(&handle.id()) {
            for observer in observers.iter_mut() {
                observer(&view);
            }
        }
        for observer in self.list_observers.iter_mut() {
            observer(&view);
        }
    }
}
