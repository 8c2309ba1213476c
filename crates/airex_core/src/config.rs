use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TaskKind;

/// How far a document task advances on each tick, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepPolicy {
    /// Uniform in `(0, max]`.
    Uniform { max: f64 },
    Fixed { step: f64 },
}

impl StepPolicy {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            // `random_range` is half-open; flip it so zero is excluded and `max` included.
            StepPolicy::Uniform { max } => max - rng.random_range(0.0..max),
            StepPolicy::Fixed { step } => step,
        }
    }

    fn upper_bound(&self) -> f64 {
        match *self {
            StepPolicy::Uniform { max } => max,
            StepPolicy::Fixed { step } => step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("document step must be positive and finite, got {0}")]
    Step(f64),
    #[error("{0} tick period must be non-zero")]
    TickPeriod(TaskKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub document_tick_ms: u64,
    pub typing_tick_ms: u64,
    pub document_step: StepPolicy,
    pub arxiv_fetch_delay_ms: u64,
    pub reply_delay_ms: u64,
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            document_tick_ms: 500,
            typing_tick_ms: 20,
            document_step: StepPolicy::Uniform { max: 20.0 },
            arxiv_fetch_delay_ms: 2_000,
            reply_delay_ms: 1_000,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.document_step.upper_bound();
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::Step(step));
        }
        if self.document_tick_ms == 0 {
            return Err(ConfigError::TickPeriod(TaskKind::DocumentProcessing));
        }
        if self.typing_tick_ms == 0 {
            return Err(ConfigError::TickPeriod(TaskKind::MessageTyping));
        }
        Ok(())
    }

    pub fn tick_period(&self, kind: TaskKind) -> Duration {
        match kind {
            TaskKind::DocumentProcessing => Duration::from_millis(self.document_tick_ms),
            TaskKind::MessageTyping => Duration::from_millis(self.typing_tick_ms),
        }
    }

    pub fn arxiv_fetch_delay(&self) -> Duration {
        Duration::from_millis(self.arxiv_fetch_delay_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}
