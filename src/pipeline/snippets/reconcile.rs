use std::collections::HashSet;

use similar::TextDiff;

use super::types::{CodeSnippet, SnippetStatus, ValidationResult};
use super::validate::validate;

/// Outcome of reconciling one transcript's snippets: at most one final
/// version, everything else rejected with a stated reason. Conversation
/// order is preserved.
#[derive(Debug)]
pub struct Reconciliation {
    snippets: Vec<CodeSnippet>,
}

impl Reconciliation {
    /// The authoritative snippet for the session, if any survived.
    pub fn final_snippet(&self) -> Option<&CodeSnippet> {
        self.snippets
            .iter()
            .find(|s| s.status == SnippetStatus::Final)
    }

    /// Every rejected snippet, in conversation order. Each carries a
    /// non-empty `reject_reason`.
    pub fn rejected(&self) -> impl Iterator<Item = &CodeSnippet> {
        self.snippets
            .iter()
            .filter(|s| s.status == SnippetStatus::Rejected)
    }

    pub fn into_snippets(self) -> Vec<CodeSnippet> {
        self.snippets
    }
}

/// Determine the most likely "final" snippet and label the rest rejected.
///
/// Tie-break, first decisive rule wins:
/// 1. latest snippet that is both `user_marked_final` and syntactically
///    valid ("most recent intent wins");
/// 2. latest valid snippet;
/// 3. none valid → no final, everything rejected with its validator reason.
///
/// Exact-duplicate content is rejected up front (first occurrence kept), and
/// each surviving version carries a unified diff against its predecessor.
pub fn reconcile(snippets: Vec<CodeSnippet>) -> Reconciliation {
    let mut snippets = snippets;
    let n = snippets.len();

    // Exact duplicates never compete for final.
    let mut duplicate = vec![false; n];
    let mut seen = HashSet::new();
    for (i, snippet) in snippets.iter().enumerate() {
        if !seen.insert(snippet.content.clone()) {
            duplicate[i] = true;
        }
    }

    // The version chain: unique snippets in conversation order.
    let chain: Vec<usize> = (0..n).filter(|&i| !duplicate[i]).collect();

    let mut results: Vec<Option<ValidationResult>> = vec![None; n];
    for &i in &chain {
        results[i] = Some(validate(&snippets[i]));
    }
    let is_valid = |i: usize| results[i].as_ref().is_some_and(|r| r.valid);

    let final_idx = chain
        .iter()
        .copied()
        .filter(|&i| snippets[i].user_marked_final && is_valid(i))
        .last()
        .or_else(|| chain.iter().copied().filter(|&i| is_valid(i)).last());
    let final_is_marked = final_idx.is_some_and(|i| snippets[i].user_marked_final);

    // Diff each chain version against its predecessor.
    let mut diffs: Vec<Option<String>> = vec![None; n];
    let mut prev: Option<usize> = None;
    for &i in &chain {
        diffs[i] = Some(match prev {
            None => "initial version".to_string(),
            Some(p) => unified_diff(&snippets[p].content, &snippets[i].content),
        });
        prev = Some(i);
    }

    for i in 0..n {
        snippets[i].diff_summary = diffs[i].take();

        if Some(i) == final_idx {
            snippets[i].status = SnippetStatus::Final;
            snippets[i].reject_reason = None;
            continue;
        }

        snippets[i].status = SnippetStatus::Rejected;
        snippets[i].reject_reason = Some(if duplicate[i] {
            "duplicate of an earlier snippet".to_string()
        } else {
            rejection_reason(&results[i], final_idx.is_some(), final_is_marked)
        });
    }

    if let Some(i) = final_idx {
        tracing::debug!(
            final_index = i,
            rejected = n.saturating_sub(1),
            "snippet reconciliation complete"
        );
    } else if n > 0 {
        tracing::info!(count = n, "no valid snippet survived reconciliation");
    }

    Reconciliation { snippets }
}

fn rejection_reason(
    result: &Option<ValidationResult>,
    has_final: bool,
    final_is_marked: bool,
) -> String {
    match result {
        Some(r) if !r.valid => format!(
            "failed syntax validation: {}",
            r.reason
                .clone()
                .unwrap_or_else(|| "unvalidated (no parser for this language)".to_string())
        ),
        _ if has_final && final_is_marked => {
            "superseded by a later version marked final".to_string()
        }
        _ if has_final => "superseded by the latest valid version".to_string(),
        // Rule 3 with no validator reason available.
        _ => "unvalidated (no parser for this language)".to_string(),
    }
}

fn unified_diff(previous: &str, current: &str) -> String {
    let diff = TextDiff::from_lines(previous, current);
    diff.unified_diff()
        .context_radius(2)
        .header("previous", "current")
        .to_string()
}
