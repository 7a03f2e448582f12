use serde_json::Value;

use super::ExtractionError;

/// Keys under which oracles have been observed to wrap the actual payload.
const WRAPPER_KEYS: &[&str] = &["message", "result", "response", "completion", "output"];

/// How much of an unparsable reply to carry in the error, for diagnostics.
const UNPARSABLE_PREVIEW_CHARS: usize = 200;

/// The three observed shapes of an oracle reply. Resolved by an explicit
/// match — no speculative key probing beyond the fixed wrapper list.
#[derive(Debug)]
pub enum OracleReply {
    /// A directly-parsable JSON object (optionally inside ```json fences).
    Direct(Value),
    /// The candidate object nested under a wrapper key, either as a JSON
    /// object or as an embedded JSON string.
    Wrapped { key: &'static str, candidate: Value },
    /// Anything else. Extraction fails rather than guessing.
    Unparsable(String),
}

/// Classify an oracle reply into one of the three observed shapes.
pub fn classify_reply(raw: &str) -> OracleReply {
    let body = strip_code_fences(raw).trim().to_string();

    let parsed: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => return OracleReply::Unparsable(preview(&body)),
    };

    let Some(object) = parsed.as_object() else {
        // JSON, but not an object — an array or scalar is not a candidate.
        return OracleReply::Unparsable(preview(&body));
    };

    for key in WRAPPER_KEYS {
        match object.get(*key) {
            Some(Value::Object(inner)) => {
                return OracleReply::Wrapped {
                    key,
                    candidate: Value::Object(inner.clone()),
                }
            }
            Some(Value::String(inner)) => {
                if let Ok(candidate @ Value::Object(_)) = serde_json::from_str::<Value>(inner) {
                    return OracleReply::Wrapped { key, candidate };
                }
            }
            _ => {}
        }
    }

    OracleReply::Direct(parsed)
}

/// Parse an oracle reply into a candidate record, or fail.
pub fn parse_oracle_response(raw: &str) -> Result<Value, ExtractionError> {
    match classify_reply(raw) {
        OracleReply::Direct(candidate) => Ok(candidate),
        OracleReply::Wrapped { key, candidate } => {
            tracing::debug!(wrapper_key = key, "oracle reply was wrapped");
            Ok(candidate)
        }
        OracleReply::Unparsable(head) => Err(ExtractionError::Unparsable(head)),
    }
}

/// Unwrap a ```json fenced block when the oracle added one; otherwise return
/// the text as-is.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(start) = trimmed.find("```json") {
        let inner_start = start + "```json".len();
        if let Some(end) = trimmed[inner_start..].find("```") {
            return &trimmed[inner_start..inner_start + end];
        }
    }
    if let Some(rest) = trimmed.strip_prefix("```") {
        if let Some(end) = rest.find("```") {
            return &rest[..end];
        }
    }
    trimmed
}

fn preview(body: &str) -> String {
    body.chars().take(UNPARSABLE_PREVIEW_CHARS).collect()
}
