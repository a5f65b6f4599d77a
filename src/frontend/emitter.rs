use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::common::PromptRaw;
use crate::error::{FrontendError, Result};
use crate::network::PromptSink;

pub const PROMPT_TEXT: &str = "Enter your prompt here (type 'exit' to quit): ";
pub const FAREWELL_TEXT: &str = "Exiting the app...";

/// What to do after the operator types `exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Print the farewell and publish the text anyway.
    #[default]
    PublishAnyway,
    /// Print the farewell and stop before publishing.
    Quit,
}

pub fn is_exit(text: &str) -> bool {
    text.eq_ignore_ascii_case("exit")
}

pub async fn read_prompt<R, W>(input: &mut R, output: &mut W) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(PROMPT_TEXT.as_bytes()).await?;
    output.flush().await?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Err(FrontendError::EndOfInput);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Sends the record and waits for the broker to acknowledge it.
pub async fn publish_prompt<P>(sink: &mut P, record: &PromptRaw) -> Result<()>
where
    P: PromptSink + ?Sized,
{
    sink.send(record).await?;
    sink.flush().await?;
    log::info!("Published prompt {}", record.id);
    Ok(())
}

/// Reads one prompt and publishes it. `None` means the operator quit.
pub async fn emit_prompt<R, W, P>(
    input: &mut R,
    output: &mut W,
    sink: &mut P,
    policy: ExitPolicy,
) -> Result<Option<PromptRaw>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    P: PromptSink + ?Sized,
{
    let text = read_prompt(input, output).await?;
    if is_exit(&text) {
        output
            .write_all(format!("{FAREWELL_TEXT}\n").as_bytes())
            .await?;
        output.flush().await?;
        if policy == ExitPolicy::Quit {
            log::info!("Operator quit before publishing");
            return Ok(None);
        }
    }

    let record = PromptRaw::new(text);
    publish_prompt(sink, &record).await?;
    Ok(Some(record))
}
