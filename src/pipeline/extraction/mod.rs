pub mod extractor;
pub mod oracle;
pub mod parser;
pub mod prompt;

pub use extractor::ReasoningExtractor;
pub use oracle::{MockOracle, OllamaOracle, OracleClient};
pub use parser::{parse_oracle_response, OracleReply};
pub use prompt::{build_extraction_prompt, EXTRACTION_SYSTEM_PROMPT};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Oracle is not reachable at {0}")]
    Connection(String),

    #[error("Oracle request timed out after {0}s")]
    Timeout(u64),

    #[error("Oracle returned error (status {status}): {body}")]
    OracleStatus { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Oracle reply was not parsable JSON: {0}")]
    Unparsable(String),
}

impl ExtractionError {
    /// Transport-level failures are worth one retry; the call has no side
    /// effects on failure, so a repeat is safe.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ExtractionError::Connection(_)
                | ExtractionError::Timeout(_)
                | ExtractionError::OracleStatus { .. }
                | ExtractionError::HttpClient(_)
        )
    }
}
