use std::sync::Once;
use std::time::Duration;

use airex_core::{
    update, Agent, DocumentSource, Effect, Msg, SimConfig, Simulator, StepPolicy, TaskHandle,
    TaskKind, TaskPayload, TaskState, Toast,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sim_logging::initialize_for_tests);
}

fn simulator() -> Simulator {
    Simulator::new(SimConfig {
        document_step: StepPolicy::Fixed { step: 50.0 },
        seed: Some(11),
        ..SimConfig::default()
    })
    .expect("valid config")
}

fn drop_pdf(sim: Simulator, name: &str) -> (Simulator, Vec<Effect>) {
    update(
        sim,
        Msg::FileDropped {
            name: name.to_string(),
            mime: "application/pdf".to_string(),
            size_bytes: 3_250_585,
        },
    )
}

fn scheduled(effects: &[Effect]) -> Vec<TaskHandle> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ScheduleTick { handle, .. } => Some(*handle),
            _ => None,
        })
        .collect()
}

#[test]
fn pdf_drop_starts_document_and_schedules_first_tick() {
    init_logging();
    let (mut sim, effects) = drop_pdf(simulator(), "BERT.pdf");

    let handle = scheduled(&effects)[0];
    assert_eq!(
        effects,
        vec![
            Effect::Toast(Toast::success("Uploaded BERT.pdf")),
            Effect::ScheduleTick {
                handle,
                after: Duration::from_millis(500),
            },
        ]
    );
    let view = sim.task(handle).unwrap();
    assert_eq!(view.state, TaskState::Running);
    assert_eq!(view.label, "BERT.pdf");
    assert!(sim.consume_dirty());
}

#[test]
fn non_pdf_drop_only_toasts() {
    init_logging();
    let (sim, effects) = update(
        simulator(),
        Msg::FileDropped {
            name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
            size_bytes: 12,
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Toast(Toast::error("Please upload PDF files only"))]
    );
    assert!(sim.view().tasks.is_empty());
}

#[test]
fn ticks_reschedule_until_complete_then_toast() {
    init_logging();
    let (sim, effects) = drop_pdf(simulator(), "GPT.pdf");
    let handle = scheduled(&effects)[0];

    let (sim, effects) = update(sim, Msg::TickElapsed(handle));
    assert_eq!(
        effects,
        vec![Effect::ScheduleTick {
            handle,
            after: Duration::from_millis(500),
        }]
    );

    let (sim, effects) = update(sim, Msg::TickElapsed(handle));
    assert_eq!(
        effects,
        vec![Effect::Toast(Toast::success("Paper processed successfully!"))]
    );
    assert_eq!(sim.task(handle).unwrap().state, TaskState::Complete);

    let (_sim, effects) = update(sim, Msg::TickElapsed(handle));
    assert!(effects.is_empty());
}

#[test]
fn blank_arxiv_url_is_refused() {
    let (sim, effects) = update(simulator(), Msg::ArxivSubmitted("   ".to_string()));

    assert_eq!(
        effects,
        vec![Effect::Toast(Toast::error("Please enter an arXiv URL"))]
    );
    assert_eq!(sim.view().arxiv_pending, 0);
}

#[test]
fn arxiv_submit_defers_the_document_start() {
    init_logging();
    let url = "https://arxiv.org/abs/1706.03762";
    let (sim, effects) = update(simulator(), Msg::ArxivSubmitted(format!(" {url} ")));

    assert_eq!(
        effects,
        vec![
            Effect::Toast(Toast::success("Fetching paper from arXiv...")),
            Effect::Deliver {
                after: Duration::from_secs(2),
                msg: Box::new(Msg::ArxivFetched {
                    url: url.to_string(),
                }),
            },
        ]
    );
    assert_eq!(sim.view().arxiv_pending, 1);
    assert!(sim.view().tasks.is_empty());

    let (sim, effects) = update(
        sim,
        Msg::ArxivFetched {
            url: url.to_string(),
        },
    );
    let handle = scheduled(&effects)[0];
    let view = sim.view();
    assert_eq!(view.arxiv_pending, 0);
    assert_eq!(view.find(handle).unwrap().label, "arXiv_1706.03762.pdf");

    for url in [
        "https://arxiv.org/pdf/1706.03762.pdf",
        "https://arxiv.org/pdf/1706.03762v5",
        "https://arxiv.org/abs/1706.03762v5/",
    ] {
        let (sim, effects) = update(
            simulator(),
            Msg::ArxivFetched {
                url: url.to_string(),
            },
        );
        let handle = scheduled(&effects)[0];
        assert_eq!(
            sim.task(handle).unwrap().label,
            "arXiv_1706.03762.pdf",
            "url {url}"
        );
    }
}

#[test]
fn chat_reply_arrives_after_delay_and_blocks_further_sends() {
    init_logging();
    let (sim, effects) = update(simulator(), Msg::ChatSent("  ".to_string()));
    assert!(effects.is_empty());

    let (sim, effects) = update(sim, Msg::ChatSent("Any ideas?".to_string()));
    assert_eq!(
        effects,
        vec![Effect::Deliver {
            after: Duration::from_secs(1),
            msg: Box::new(Msg::ReplyReady),
        }]
    );

    let (sim, effects) = update(sim, Msg::ReplyReady);
    let handle = scheduled(&effects)[0];
    assert_eq!(sim.task(handle).unwrap().kind, TaskKind::MessageTyping);
    assert!(sim.is_typing());

    let (_sim, effects) = update(sim, Msg::ChatSent("Hello?".to_string()));
    assert!(effects.is_empty());
}

#[test]
fn agent_trigger_types_the_agent_line() {
    let (sim, effects) = update(simulator(), Msg::AgentTriggered(Agent::Benchmark));

    assert_eq!(
        effects,
        vec![Effect::ScheduleTick {
            handle: scheduled(&effects)[0],
            after: Duration::from_millis(20),
        }]
    );
    let view = sim.view();
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].label, airex_core::agent_line(Agent::Benchmark));
}

#[test]
fn agents_without_a_line_fall_back_to_idea_generation() {
    for agent in [Agent::Refactoring, Agent::System] {
        let (sim, _effects) = update(simulator(), Msg::AgentTriggered(agent));

        let view = sim.view();
        assert_eq!(
            view.tasks[0].label,
            airex_core::agent_line(Agent::IdeaGeneration)
        );
        assert_eq!(
            view.tasks[0].label,
            "Generating new research ideas based on your recent interactions..."
        );
    }
}

#[test]
fn start_by_unknown_name_toasts_error() {
    init_logging();
    let payload = TaskPayload::Document {
        name: "x.pdf".to_string(),
        size_bytes: 1,
        source: DocumentSource::Upload,
    };
    let (sim, effects) = update(
        simulator(),
        Msg::StartRequested {
            kind: "benchmarking".to_string(),
            payload: payload.clone(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Toast(Toast::error(
            "invalid task kind `benchmarking`: not a known task kind"
        ))]
    );
    assert!(sim.view().tasks.is_empty());

    let (sim, effects) = update(
        sim,
        Msg::StartRequested {
            kind: "document-processing".to_string(),
            payload,
        },
    );
    assert_eq!(scheduled(&effects).len(), 1);
    assert_eq!(sim.view().tasks.len(), 1);
}

#[test]
fn cancel_stops_ticks_once() {
    init_logging();
    let (sim, effects) = drop_pdf(simulator(), "cancel.pdf");
    let handle = scheduled(&effects)[0];

    let (sim, effects) = update(sim, Msg::CancelRequested(handle));
    assert_eq!(effects, vec![Effect::StopTicks { handle }]);

    let (sim, effects) = update(sim, Msg::CancelRequested(handle));
    assert!(effects.is_empty());

    // A tick queued before the cancel landed is swallowed.
    let (sim, effects) = update(sim, Msg::TickElapsed(handle));
    assert!(effects.is_empty());
    assert_eq!(sim.task(handle).unwrap().progress, 0.0);
}

#[test]
fn tick_for_foreign_handle_toasts_error() {
    let (_, effects) = drop_pdf(simulator(), "a.pdf");
    let handle = scheduled(&effects)[0];

    let (sim, effects) = update(simulator(), Msg::TickElapsed(handle));
    assert_eq!(
        effects,
        vec![Effect::Toast(Toast::error("no task registered for task#1"))]
    );
    assert!(sim.view().tasks.is_empty());
}
