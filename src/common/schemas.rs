/// JSON Schema registered under `<raw prompt topic>-value`.
pub const PROMPT_RAW_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "PromptRaw",
  "type": "object",
  "properties": {
    "id": { "type": "string" },
    "prompt": { "type": "string" },
    "timestamp": { "type": "string" }
  },
  "required": ["id", "prompt", "timestamp"],
  "additionalProperties": false
}"#;
