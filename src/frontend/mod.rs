pub mod collector;
pub mod emitter;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::common::PromptRaw;
use crate::config::FrontendConfig;
use crate::error::Result;
use crate::network::{AnswerSource, PromptSink, poll_indefinitely};

pub use collector::collect_response;
pub use emitter::{ExitPolicy, emit_prompt, publish_prompt, read_prompt};

/// Outcome of one pass through the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Answered { prompt: PromptRaw, answer: String },
    Quit,
}

/// Prompt, publish, settle, then wait for the answer.
///
/// `subscribe` is only called once the settle wait is over.
pub async fn run<R, W, P, A, F>(
    config: &FrontendConfig,
    policy: ExitPolicy,
    input: &mut R,
    output: &mut W,
    sink: &mut P,
    subscribe: F,
) -> Result<Session>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    P: PromptSink + ?Sized,
    A: AnswerSource,
    F: FnOnce(&FrontendConfig) -> Result<A>,
{
    let Some(prompt) = emit_prompt(input, output, sink, policy).await? else {
        return Ok(Session::Quit);
    };

    log::info!("Waiting {:?} for the pipeline to pick up the prompt", config.settle());
    tokio::time::sleep(config.settle()).await;

    let source = subscribe(config)?;
    let answer = collect_response(poll_indefinitely(source), output).await?;
    Ok(Session::Answered { prompt, answer })
}
