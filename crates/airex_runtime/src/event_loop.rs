use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use airex_core::{update, Effect, Msg, Simulator, SimulatorView};
use sim_logging::{set_sim_tick, sim_debug, sim_trace};

use crate::ToastSink;

#[derive(Debug)]
struct Timer {
    due: Duration,
    /// Insertion order; breaks ties between timers due at the same instant.
    seq: u64,
    msg: Msg,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Single-threaded timer loop that feeds messages through `update` and
/// executes the resulting effects.
///
/// Time is tracked as an offset from loop creation. `advance` moves it
/// without touching the wall clock; `run_until_idle` waits on `tokio::time`.
pub struct EventLoop {
    sim: Simulator,
    timers: BinaryHeap<Reverse<Timer>>,
    next_seq: u64,
    now: Duration,
    fired: u64,
    toasts: Box<dyn ToastSink>,
}

impl EventLoop {
    pub fn new(sim: Simulator, toasts: impl ToastSink + 'static) -> Self {
        Self {
            sim,
            timers: BinaryHeap::new(),
            next_seq: 0,
            now: Duration::ZERO,
            fired: 0,
            toasts: Box::new(toasts),
        }
    }

    pub fn simulator(&self) -> &Simulator {
        &self.sim
    }

    /// Mutable access for subscribing observers.
    pub fn simulator_mut(&mut self) -> &mut Simulator {
        &mut self.sim
    }

    pub fn view(&self) -> SimulatorView {
        self.sim.view()
    }

    /// Virtual time elapsed since the loop was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of timers fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn dispatch(&mut self, msg: Msg) {
        // The placeholder left behind is seeded, not entropy-seeded.
        let sim = std::mem::take(&mut self.sim);
        let (sim, effects) = update(sim, msg);
        self.sim = sim;
        for effect in effects {
            self.apply(effect);
        }
    }

    /// Moves virtual time forward by `by`, firing every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now.saturating_add(by);
        self.fire_due(target);
        self.now = target;
    }

    /// Fires timers in real time until none remain. Returns how many fired.
    pub async fn run_until_idle(&mut self) -> u64 {
        let fired = self.run_timers(None).await;
        sim_debug!("event loop idle after {} timers", fired);
        fired
    }

    /// Fires timers in real time for `span`, then returns with the clock at
    /// the end of the span even if timers remain.
    pub async fn run_for(&mut self, span: Duration) -> u64 {
        let end = self.now.saturating_add(span);
        let fired = self.run_timers(Some(end)).await;
        tokio::time::sleep(end.saturating_sub(self.now)).await;
        self.now = end;
        fired
    }

    async fn run_timers(&mut self, limit: Option<Duration>) -> u64 {
        let started = self.fired;
        let origin = tokio::time::Instant::now() - self.now;
        while let Some(due) = self
            .next_due()
            .filter(|due| limit.is_none_or(|end| *due <= end))
        {
            tokio::time::sleep_until(origin + due).await;
            self.fire_due(due);
        }
        self.fired - started
    }

    pub(crate) fn schedule(&mut self, after: Duration, msg: Msg) {
        let timer = Timer {
            due: self.now.saturating_add(after),
            seq: self.next_seq,
            msg,
        };
        self.next_seq += 1;
        sim_trace!("timer #{} due at {:?}: {:?}", timer.seq, timer.due, timer.msg);
        self.timers.push(Reverse(timer));
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleTick { handle, after } => {
                self.schedule(after, Msg::TickElapsed(handle));
            }
            Effect::StopTicks { handle } => {
                let stale = Msg::TickElapsed(handle);
                self.timers.retain(|Reverse(timer)| timer.msg != stale);
            }
            Effect::Deliver { after, msg } => self.schedule(after, *msg),
            Effect::Toast(toast) => self.toasts.show(&toast),
        }
    }

    fn next_due(&self) -> Option<Duration> {
        self.timers.peek().map(|Reverse(timer)| timer.due)
    }

    fn fire_due(&mut self, until: Duration) {
        while self.next_due().is_some_and(|due| due <= until) {
            let Some(Reverse(timer)) = self.timers.pop() else {
                break;
            };
            self.now = timer.due;
            self.fired += 1;
            set_sim_tick(self.fired);
            self.dispatch(timer.msg);
        }
    }
}
