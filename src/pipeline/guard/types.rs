/// A transcript after the input guard has run: size-checked, deny-checked,
/// PII-scrubbed. The raw input is dropped once this exists — only lengths and
/// pattern names are ever logged, never the text itself.
#[derive(Debug, Clone)]
pub struct SanitizedTranscript {
    /// Transcript text with PII spans replaced by placeholder tokens.
    pub text: String,
    /// True when a deny-listed term was found. The guard does not halt on
    /// its own; the orchestrator decides to stop the run.
    pub denied: bool,
    /// The deny-listed term that matched, when `denied` is set.
    pub matched_term: Option<String>,
    /// Audit trail of what the guard changed.
    pub modifications: Vec<InputModification>,
}

impl SanitizedTranscript {
    pub fn was_modified(&self) -> bool {
        !self.modifications.is_empty()
    }
}

/// One change the guard made to the input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputModification {
    pub kind: InputModificationKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputModificationKind {
    PiiScrubbed,
    DenyTermMatched,
}
