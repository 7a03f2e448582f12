use crate::config::PipelineConfig;

use super::deny::DenyList;
use super::pii::PiiScrubber;
use super::types::{InputModification, InputModificationKind, SanitizedTranscript};
use super::GuardError;

/// Run the input guard over a raw transcript.
///
/// Order is fixed: size check → deny-term check → PII scrub. The size check
/// runs first and unconditionally so no scrubbing is wasted on oversized
/// input; the PII scrub runs even on denied input (defense in depth — a
/// denied transcript must still never carry raw PII out of this function).
pub fn sanitize(raw: &str, config: &PipelineConfig) -> Result<SanitizedTranscript, GuardError> {
    let len = raw.chars().count();
    if len > config.max_input_chars {
        tracing::warn!(len, max = config.max_input_chars, "transcript rejected: too large");
        return Err(GuardError::InputTooLarge {
            len,
            max: config.max_input_chars,
        });
    }

    let mut modifications = Vec::new();

    let deny_list = DenyList::new(&config.deny_terms);
    let matched_term = deny_list.find_match(raw).map(|t| t.to_string());
    if let Some(ref term) = matched_term {
        tracing::warn!(term = %term, "deny-listed term found in transcript");
        modifications.push(InputModification {
            kind: InputModificationKind::DenyTermMatched,
            description: format!("Deny-listed term '{term}' found"),
        });
    }

    let (text, replaced) = PiiScrubber::scrub(raw);
    for (pattern, count) in replaced {
        tracing::info!(pattern, count, "PII spans replaced");
        modifications.push(InputModification {
            kind: InputModificationKind::PiiScrubbed,
            description: format!("Replaced {count} {pattern} span(s)"),
        });
    }

    Ok(SanitizedTranscript {
        text,
        denied: matched_term.is_some(),
        matched_term,
        modifications,
    })
}
