//! Closed-schema validation of extraction candidates.
//!
//! The recap schema is closed: fields the oracle invents are an error, not
//! data. Missing fields degrade to empty values ("empty over wrong, present
//! over absent") so downstream formatting never has to null-check.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::snippets::CodeSnippet;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("candidate did not match the recap schema: {0}")]
    Invalid(String),
}

/// Top-level field names accepted in non-strict mode. Must stay in sync with
/// the [`Recap`] struct.
const KNOWN_FIELDS: &[&str] = &[
    "session_id",
    "summary",
    "aha_moments",
    "mvp_changes",
    "code_snippets",
    "design_tradeoffs",
    "scope_creep",
    "readme_notes",
    "post_mvp_ideas",
    "quality_flags",
    "quality_scores",
];

/// The validated record of one builder session.
///
/// Every field is optional on input and defaults to its empty value. Unknown
/// fields are rejected by serde.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recap {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub aha_moments: Vec<String>,
    #[serde(default)]
    pub mvp_changes: Vec<String>,
    #[serde(default)]
    pub code_snippets: Vec<CodeSnippet>,
    #[serde(default)]
    pub design_tradeoffs: Vec<String>,
    #[serde(default)]
    pub scope_creep: Vec<String>,
    #[serde(default)]
    pub readme_notes: Vec<String>,
    #[serde(default)]
    pub post_mvp_ideas: Vec<String>,
    #[serde(default)]
    pub quality_flags: Vec<QualityFlag>,
    #[serde(default)]
    pub quality_scores: Vec<QualityScore>,
}

impl Recap {
    /// Degraded record substituted when extraction or validation fails. The
    /// failure is recorded as a quality flag so the caller still gets a
    /// well-formed recap that says what went wrong.
    pub fn fallback(session_id: &str, issue: &str) -> Self {
        Recap {
            session_id: session_id.to_string(),
            summary: "processing completed with warnings".to_string(),
            quality_flags: vec![QualityFlag {
                issue: issue.to_string(),
                severity: Severity::High,
                file: None,
            }],
            ..Recap::default()
        }
    }
}

/// A concern the oracle raised about the session's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualityFlag {
    pub issue: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

/// A self-assessed score for one component of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualityScore {
    pub component: String,
    /// Oracles emit scores as strings or bare numbers; both are accepted and
    /// stored as text. This is the only type coercion the schema performs.
    #[serde(default, deserialize_with = "score_as_string")]
    pub score: String,
    #[serde(default)]
    pub rationale: String,
}

fn score_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Validate a candidate record against the closed recap schema.
///
/// In strict mode (the default) any unknown top-level field is an error. In
/// lenient mode unknown top-level fields are stripped with a warning before
/// deserialization; nested objects stay strict either way.
pub fn validate(candidate: &Value, strict: bool) -> Result<Recap, SchemaError> {
    let Value::Object(map) = candidate else {
        return Err(SchemaError::Invalid(format!(
            "expected a JSON object, got {}",
            type_name(candidate)
        )));
    };

    let candidate = if strict {
        candidate.clone()
    } else {
        let mut map = map.clone();
        map.retain(|key, _| {
            let known = KNOWN_FIELDS.contains(&key.as_str());
            if !known {
                tracing::warn!(field = %key, "dropping unknown top-level field");
            }
            known
        });
        Value::Object(map)
    };

    let mut recap: Recap =
        serde_json::from_value(candidate).map_err(|e| SchemaError::Invalid(e.to_string()))?;

    // A snippet with nothing in it carries no information worth keeping.
    let before = recap.code_snippets.len();
    recap.code_snippets
        .retain(|s| !s.content.trim().is_empty());
    if recap.code_snippets.len() < before {
        tracing::warn!(
            dropped = before - recap.code_snippets.len(),
            "dropped snippets with empty content"
        );
    }

    Ok(recap)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
