//! The pipeline orchestrator: guard, extract, validate, reconcile, format,
//! persist. Guard and storage failures are hard errors; everything between
//! them degrades to a fallback recap so one bad oracle reply never costs the
//! caller their session record.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::config::PipelineConfig;

use super::extraction::{OracleClient, ReasoningExtractor};
use super::format;
use super::guard::{self, GuardError};
use super::schema::{self, Recap};
use super::snippets::reconcile;
use super::store::{SessionStore, StoreError};

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("chat log is empty")]
    EmptyInput,

    #[error("input too long ({len} chars). Limit is {max} characters")]
    InputTooLarge { len: usize, max: usize },

    #[error("input contains a disallowed term: {term}")]
    InputDenied { term: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What the caller gets back for one processed transcript.
#[derive(Debug, Clone, Serialize)]
pub struct RecapResponse {
    pub status: String,
    pub session_id: String,
    pub human_readable: String,
    pub structured_data: Value,
}

/// Owns the stages and runs them in order. One processor per configuration;
/// both collaborators are injected so tests run without a live oracle or a
/// real filesystem.
pub struct RecapProcessor {
    config: PipelineConfig,
    extractor: ReasoningExtractor,
    store: Box<dyn SessionStore>,
}

impl RecapProcessor {
    pub fn new(
        config: PipelineConfig,
        oracle: Box<dyn OracleClient + Send + Sync>,
        store: Box<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            extractor: ReasoningExtractor::new(oracle),
            store,
        }
    }

    /// Process one transcript end to end and persist the result.
    ///
    /// A blank or missing `session_id` gets a generated one; a caller-supplied
    /// id is authoritative and overwrites whatever the oracle puts in the
    /// record. The recap is stored exactly once per call, fallback or not.
    pub fn process_transcript(
        &self,
        chat_log: &str,
        session_id: Option<&str>,
    ) -> Result<RecapResponse, ProcessingError> {
        if chat_log.trim().is_empty() {
            return Err(ProcessingError::EmptyInput);
        }

        let session_id = match session_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        let span = tracing::info_span!("process_transcript", session_id = %session_id);
        let _guard = span.enter();

        let sanitized = guard::sanitize(chat_log, &self.config).map_err(|e| match e {
            GuardError::InputTooLarge { len, max } => ProcessingError::InputTooLarge { len, max },
        })?;

        // Denied input never reaches the oracle.
        if sanitized.denied {
            let term = sanitized.matched_term.unwrap_or_default();
            tracing::warn!("transcript denied before extraction");
            return Err(ProcessingError::InputDenied { term });
        }

        let recap = match self.extractor.extract(&sanitized) {
            Ok(candidate) => match schema::validate(&candidate, self.config.schema_strict) {
                Ok(recap) => self.finish_recap(recap, &session_id),
                Err(e) => {
                    tracing::warn!(error = %e, "candidate failed schema validation, using fallback");
                    Recap::fallback(&session_id, &format!("schema validation failed: {e}"))
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "extraction failed, using fallback");
                Recap::fallback(&session_id, &format!("extraction failed: {e}"))
            }
        };

        let formatted = format::format(&recap);
        self.store.put(&session_id, &recap)?;
        tracing::info!("transcript processed");

        Ok(RecapResponse {
            status: "success".to_string(),
            session_id,
            human_readable: formatted.narrative,
            structured_data: formatted.structured,
        })
    }

    /// Post-validation bookkeeping on the happy path: pin the session id and
    /// reconcile snippet versions.
    fn finish_recap(&self, mut recap: Recap, session_id: &str) -> Recap {
        recap.session_id = session_id.to_string();
        let snippets = std::mem::take(&mut recap.code_snippets);
        recap.code_snippets = reconcile::reconcile(snippets).into_snippets();
        recap
    }
}
