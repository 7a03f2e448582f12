use serde::{Deserialize, Serialize};

/// One candidate code block pulled out of a transcript.
///
/// The oracle supplies the first five fields; `status`, `reject_reason` and
/// `diff_summary` are derived by reconciliation and absent in candidate
/// input. Unknown fields are rejected — snippets are covered by the same
/// closed-schema policy as the recap they live in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeSnippet {
    pub content: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub user_marked_final: bool,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub file_hint: Option<String>,
    #[serde(default)]
    pub status: SnippetStatus,
    #[serde(default)]
    pub reject_reason: Option<String>,
    #[serde(default)]
    pub diff_summary: Option<String>,
}

/// Where a snippet ended up after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetStatus {
    /// Not yet reconciled. Never appears in a stored recap.
    #[default]
    Candidate,
    /// The authoritative version for this session.
    Final,
    /// Superseded, invalid, or duplicated — `reject_reason` says why.
    Rejected,
}

/// Per-snippet syntax-check outcome. A pure function of the snippet's
/// content and declared language; never persisted on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    /// Populated only when invalid.
    pub reason: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Languages the validator can actually parse. Anything else passes with no
/// claim made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetLanguage {
    Python,
    Rust,
    TypeScript,
    Go,
}

impl SnippetLanguage {
    /// Map a best-effort language tag from the oracle to a known grammar.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "python" | "python3" | "py" => Some(SnippetLanguage::Python),
            "rust" | "rs" => Some(SnippetLanguage::Rust),
            "typescript" | "ts" => Some(SnippetLanguage::TypeScript),
            "go" | "golang" => Some(SnippetLanguage::Go),
            _ => None,
        }
    }

    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            SnippetLanguage::Python => tree_sitter_python::LANGUAGE.into(),
            SnippetLanguage::Rust => tree_sitter_rust::LANGUAGE.into(),
            SnippetLanguage::TypeScript => {
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
            }
            SnippetLanguage::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }
}
