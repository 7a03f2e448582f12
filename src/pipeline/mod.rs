pub mod extraction;
pub mod format;
pub mod guard;
pub mod processor; // Recap Processing Orchestrator
pub mod schema;
pub mod snippets;
pub mod store;
