//! Canned content standing in for extraction and inference output.

use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::{Agent, ChatMessage, ExtractedEntities};

const METHODS: &[&str] = &[
    "Transformer",
    "Self-Attention",
    "Multi-Head Attention",
    "Neural Network",
    "Deep Learning",
    "Backpropagation",
    "Prototypical Networks",
    "MAML",
];

const DATASETS: &[&str] = &[
    "WMT 2014",
    "English-German",
    "English-French",
    "CIFAR-10",
    "ImageNet",
    "GLUE",
];

const METRICS: &[&str] = &["BLEU Score", "Perplexity", "Accuracy", "F1-Score"];

const REPLIES: &[&str] = &[
    "I'm analyzing your request and consulting my knowledge base of research papers...",
    "Based on recent developments in the field, I recommend exploring transformer-based approaches with attention mechanisms. Let me implement a prototype for you.",
    "I found 3 relevant papers that address this problem. Let me extract the key methodologies and generate an optimized implementation.",
    "Running benchmark tests on the generated code... Initial results show promising improvements in accuracy and efficiency.",
];

const REPLY_AGENTS: &[Agent] = &[
    Agent::IdeaGeneration,
    Agent::CodeImplementation,
    Agent::Benchmark,
];

/// Samples a non-empty entity set for a finished document.
pub(crate) fn extracted_entities<R: Rng + ?Sized>(
    rng: &mut R,
    processing_time: Duration,
) -> ExtractedEntities {
    ExtractedEntities {
        methods: pick(rng, METHODS, 3),
        datasets: pick(rng, DATASETS, 2),
        metrics: pick(rng, METRICS, 2),
        processing_time,
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&str], amount: usize) -> Vec<String> {
    pool.choose_multiple(rng, amount)
        .map(|entry| (*entry).to_string())
        .collect()
}

pub(crate) fn random_reply<R: Rng + ?Sized>(rng: &mut R) -> ChatMessage {
    let content = REPLIES.choose(rng).copied().unwrap_or(REPLIES[0]);
    let agent = REPLY_AGENTS.choose(rng).copied().unwrap_or(Agent::System);
    ChatMessage {
        content: content.to_string(),
        agent,
    }
}

/// Fixed line an agent types when triggered from the dashboard.
pub fn agent_line(agent: Agent) -> &'static str {
    match agent {
        Agent::CodeImplementation => {
            "Implementing the discussed methodology in Python with PyTorch..."
        }
        Agent::Benchmark => "Running comprehensive benchmarks on the latest implementations...",
        Agent::System | Agent::IdeaGeneration | Agent::Refactoring => {
            "Generating new research ideas based on your recent interactions..."
        }
    }
}
