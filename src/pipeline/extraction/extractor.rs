use serde_json::Value;

use crate::pipeline::guard::SanitizedTranscript;

use super::oracle::OracleClient;
use super::parser::parse_oracle_response;
use super::prompt::{build_extraction_prompt, EXTRACTION_SYSTEM_PROMPT};
use super::ExtractionError;

/// Maximum additional attempts after the first oracle call. Retries are safe
/// (the call has no side effects on failure) and capped to bound tail latency.
const MAX_ORACLE_RETRIES: usize = 1;

/// Builds the extraction request, delegates to the oracle, and parses the
/// reply into a candidate record. Failures are returned as values — the
/// orchestrator decides whether to substitute a fallback record.
pub struct ReasoningExtractor {
    oracle: Box<dyn OracleClient + Send + Sync>,
}

impl ReasoningExtractor {
    pub fn new(oracle: Box<dyn OracleClient + Send + Sync>) -> Self {
        Self { oracle }
    }

    /// Run one extraction over a sanitized transcript.
    ///
    /// Retries once on transport errors and on unparsable replies; a second
    /// failure is final.
    pub fn extract(&self, sanitized: &SanitizedTranscript) -> Result<Value, ExtractionError> {
        let prompt = build_extraction_prompt(&sanitized.text);
        let mut last_error: Option<ExtractionError> = None;

        for attempt in 0..=MAX_ORACLE_RETRIES {
            let reply = match self.oracle.complete(&prompt, EXTRACTION_SYSTEM_PROMPT) {
                Ok(reply) => reply,
                Err(e) if e.is_transport() && attempt < MAX_ORACLE_RETRIES => {
                    tracing::warn!(attempt = attempt + 1, error = %e, "oracle call failed, retrying");
                    last_error = Some(e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            match parse_oracle_response(&reply) {
                Ok(candidate) => return Ok(candidate),
                Err(e) if attempt < MAX_ORACLE_RETRIES => {
                    tracing::warn!(attempt = attempt + 1, error = %e, "oracle reply unparsable, retrying");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| ExtractionError::Unparsable("retry attempts exhausted".into())))
    }
}
