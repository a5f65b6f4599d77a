use serde_json::Value;

use crate::common::AnswerPoll;
use crate::error::Result;

const MAGIC_BYTE: u8 = 0;
const HEADER_LEN: usize = 5;

/// Strips the Confluent header (magic byte + 4-byte schema id) when present.
pub fn strip_wire_header(payload: &[u8]) -> &[u8] {
    match payload {
        [MAGIC_BYTE, rest @ ..] if payload.len() >= HEADER_LEN => &rest[HEADER_LEN - 1..],
        _ => payload,
    }
}

/// Turns a raw answer payload into a poll result. A missing or blank payload
/// is an empty poll.
pub fn decode_answer(payload: Option<&[u8]>) -> Result<AnswerPoll> {
    let Some(payload) = payload else {
        return Ok(AnswerPoll::Empty);
    };
    let body = strip_wire_header(payload);
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AnswerPoll::Empty);
    }
    let value: Value = serde_json::from_slice(body)?;
    Ok(AnswerPoll::from_value(value))
}
