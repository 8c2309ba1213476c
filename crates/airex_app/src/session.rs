use std::time::Duration;

use airex_core::{Agent, Msg};
use airex_runtime::EventLoop;
use sim_logging::sim_info;

use crate::render;

const PDF: &str = "application/pdf";

/// User actions at the start of the scripted session.
fn opening_actions() -> Vec<Msg> {
    vec![
        Msg::FileDropped {
            name: "Attention Is All You Need.pdf".to_string(),
            mime: PDF.to_string(),
            size_bytes: 2_516_582,
        },
        Msg::FileDropped {
            name: "reviewer-notes.docx".to_string(),
            mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                .to_string(),
            size_bytes: 48_213,
        },
        Msg::FileDropped {
            name: "BERT: Pre-training of Deep Bidirectional Transformers.pdf".to_string(),
            mime: PDF.to_string(),
            size_bytes: 3_250_585,
        },
        Msg::ArxivSubmitted("https://arxiv.org/abs/2005.14165".to_string()),
        Msg::AgentTriggered(Agent::IdeaGeneration),
    ]
}

/// Plays a short dashboard session against the loop: uploads, one cancel,
/// an arXiv fetch and a chat exchange.
pub(crate) async fn run(ev: &mut EventLoop) {
    for msg in opening_actions() {
        ev.dispatch(msg);
    }

    ev.run_for(Duration::from_secs(1)).await;
    let bert = ev
        .view()
        .documents()
        .find(|task| task.label.starts_with("BERT"))
        .map(|task| task.handle);
    if let Some(handle) = bert {
        sim_info!("User cancels {}", handle);
        ev.dispatch(Msg::CancelRequested(handle));
    }

    ev.run_until_idle().await;
    sim_info!("{}", render::status_line(&ev.view()));

    ev.dispatch(Msg::ChatSent(
        "Generate ideas for improving few-shot classification accuracy in NLP tasks".to_string(),
    ));
    ev.run_until_idle().await;
    sim_info!("{}", render::status_line(&ev.view()));
}
