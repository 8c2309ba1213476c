use sim_logging::{sim_debug, sim_warn};

use crate::catalog;
use crate::{
    DocumentSource, Effect, Msg, SimError, Simulator, TaskHandle, TaskKind, TaskPayload,
    TickOutcome, Toast,
};

const PDF_MIME: &str = "application/pdf";
/// Size reported for every simulated arXiv download (1.8 MB).
const ARXIV_SIZE_BYTES: u64 = 1_887_437;

/// Pure update function: applies a message to the simulator and returns any effects.
pub fn update(mut sim: Simulator, msg: Msg) -> (Simulator, Vec<Effect>) {
    let effects = match msg {
        Msg::FileDropped {
            name,
            mime,
            size_bytes,
        } => {
            if !mime.trim().eq_ignore_ascii_case(PDF_MIME) {
                sim_debug!("rejected drop of `{}` with mime {}", name, mime);
                let toast = Toast::error("Please upload PDF files only");
                return (sim, vec![Effect::Toast(toast)]);
            }
            let mut effects = vec![Effect::Toast(Toast::success(format!("Uploaded {name}")))];
            effects.extend(start_task(
                &mut sim,
                TaskKind::DocumentProcessing,
                TaskPayload::Document {
                    name,
                    size_bytes,
                    source: DocumentSource::Upload,
                },
            ));
            effects
        }
        Msg::ArxivSubmitted(raw) => {
            let url = raw.trim();
            if url.is_empty() {
                let toast = Toast::error("Please enter an arXiv URL");
                return (sim, vec![Effect::Toast(toast)]);
            }
            sim.begin_arxiv_fetch();
            vec![
                Effect::Toast(Toast::success("Fetching paper from arXiv...")),
                Effect::Deliver {
                    after: sim.config().arxiv_fetch_delay(),
                    msg: Box::new(Msg::ArxivFetched {
                        url: url.to_string(),
                    }),
                },
            ]
        }
        Msg::ArxivFetched { url } => {
            sim.finish_arxiv_fetch();
            let name = format!("arXiv_{}.pdf", arxiv_id(&url));
            start_task(
                &mut sim,
                TaskKind::DocumentProcessing,
                TaskPayload::Document {
                    name,
                    size_bytes: ARXIV_SIZE_BYTES,
                    source: DocumentSource::Arxiv { url },
                },
            )
        }
        Msg::ChatSent(text) => {
            // The input box is disabled while the assistant types.
            if text.trim().is_empty() || sim.is_typing() {
                return (sim, Vec::new());
            }
            vec![Effect::Deliver {
                after: sim.config().reply_delay(),
                msg: Box::new(Msg::ReplyReady),
            }]
        }
        Msg::ReplyReady => {
            let reply = sim.random_reply();
            start_task(
                &mut sim,
                TaskKind::MessageTyping,
                TaskPayload::Message {
                    content: reply.content,
                    agent: reply.agent,
                },
            )
        }
        Msg::AgentTriggered(agent) => start_task(
            &mut sim,
            TaskKind::MessageTyping,
            TaskPayload::Message {
                content: catalog::agent_line(agent).to_string(),
                agent,
            },
        ),
        Msg::StartRequested { kind, payload } => match kind.parse::<TaskKind>() {
            Ok(kind) => start_task(&mut sim, kind, payload),
            Err(err) => rejected(err),
        },
        Msg::TickElapsed(handle) => tick_task(&mut sim, handle),
        Msg::CancelRequested(handle) => match sim.cancel(handle) {
            Ok(true) => vec![Effect::StopTicks { handle }],
            Ok(false) => Vec::new(),
            Err(err) => rejected(err),
        },
        Msg::NoOp => Vec::new(),
    };

    (sim, effects)
}

fn start_task(sim: &mut Simulator, kind: TaskKind, payload: TaskPayload) -> Vec<Effect> {
    match sim.start(kind, payload) {
        Ok(handle) => vec![Effect::ScheduleTick {
            handle,
            after: sim.config().tick_period(kind),
        }],
        Err(err) => rejected(err),
    }
}

fn tick_task(sim: &mut Simulator, handle: TaskHandle) -> Vec<Effect> {
    match sim.tick(handle) {
        Ok(TickOutcome::Progressed { .. }) => match sim.task(handle) {
            Some(task) => vec![Effect::ScheduleTick {
                handle,
                after: sim.config().tick_period(task.kind),
            }],
            None => Vec::new(),
        },
        Ok(TickOutcome::Completed) => match sim.task(handle) {
            Some(task) if task.is_document() => {
                vec![Effect::Toast(Toast::success("Paper processed successfully!"))]
            }
            _ => Vec::new(),
        },
        Ok(TickOutcome::Ignored) => Vec::new(),
        Err(err) => rejected(err),
    }
}

fn rejected(err: SimError) -> Vec<Effect> {
    sim_warn!("{}", err);
    vec![Effect::Toast(Toast::error(err.to_string()))]
}

/// Paper id from an `/abs/` or `/pdf/` link, without `.pdf` or a `vN` suffix.
fn arxiv_id(url: &str) -> &str {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .unwrap_or("paper");
    let segment = segment.strip_suffix(".pdf").unwrap_or(segment);
    match segment.rsplit_once('v') {
        Some((id, version))
            if !id.is_empty()
                && !version.is_empty()
                && version.bytes().all(|b| b.is_ascii_digit()) =>
        {
            id
        }
        _ => segment,
    }
}
