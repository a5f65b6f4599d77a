use futures::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::common::{AnswerMessage, AnswerPoll};
use crate::error::Result;

pub const RESPONSE_BANNER: &str = "**LLM Response**";

/// Waits for the first non-empty answer, prints it and returns its content.
///
/// Empty polls are skipped. There is no id check against the published
/// prompt: whatever lands first on the topic is taken as the answer.
pub async fn collect_response<S, W>(polls: S, output: &mut W) -> Result<String>
where
    S: Stream<Item = Result<AnswerPoll>>,
    W: AsyncWrite + Unpin,
{
    futures::pin_mut!(polls);
    let mut empty_polls: u64 = 0;

    while let Some(poll) = polls.next().await {
        let value = match poll? {
            AnswerPoll::Empty => {
                empty_polls += 1;
                continue;
            }
            AnswerPoll::Message(value) => value,
        };

        log::info!("Answer received after {empty_polls} empty polls");
        let answer = AnswerMessage::from_value(value)?;
        let content = answer.content()?.to_string();
        print_answer(output, &content).await?;
        return Ok(content);
    }

    // `poll_indefinitely` never ends; only a finite test stream gets here.
    std::future::pending().await
}

async fn print_answer<W>(output: &mut W, content: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let text = format!("\n\n{RESPONSE_BANNER}\n\n{content}\n");
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::stream;
    use serde_json::json;

    use super::*;
    use crate::error::FrontendError;

    #[tokio::test]
    async fn prints_banner_then_content() {
        let polls = stream::iter(vec![Ok(AnswerPoll::Message(
            json!({"choices": [{"message": {"content": "Paris"}}]}),
        ))]);
        let mut output = Vec::new();

        let content = collect_response(polls, &mut output).await.unwrap();

        assert_eq!(content, "Paris");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "\n\n**LLM Response**\n\nParis\n"
        );
    }

    #[tokio::test]
    async fn first_message_wins() {
        let polls = stream::iter(vec![
            Ok(AnswerPoll::Message(json!({"choices": [{"message": {"content": "a"}}]}))),
            Ok(AnswerPoll::Message(json!({"choices": [{"message": {"content": "b"}}]}))),
        ]);
        let mut output = Vec::new();
        assert_eq!(collect_response(polls, &mut output).await.unwrap(), "a");
    }

    #[tokio::test]
    async fn poll_error_propagates() {
        let polls = stream::iter(vec![
            Ok(AnswerPoll::Empty),
            Err(FrontendError::MalformedAnswer("boom".to_string())),
        ]);
        let mut output = Vec::new();
        let err = collect_response(polls, &mut output).await.unwrap_err();
        assert!(matches!(err, FrontendError::MalformedAnswer(_)));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn exhausted_stream_of_empties_does_not_return() {
        let polls = stream::iter(vec![Ok(AnswerPoll::Empty), Ok(AnswerPoll::Empty)]);
        let mut output = Vec::new();
        let waited = tokio::time::timeout(
            Duration::from_millis(50),
            collect_response(polls, &mut output),
        )
        .await;
        assert!(waited.is_err());
    }
}
