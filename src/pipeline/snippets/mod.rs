pub mod reconcile;
pub mod types;
pub mod validate;

pub use reconcile::{reconcile, Reconciliation};
pub use types::{CodeSnippet, SnippetLanguage, SnippetStatus, ValidationResult};
pub use validate::validate;
