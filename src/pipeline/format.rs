//! Presentation of a validated recap: a structured JSON view for machines
//! and a fixed-section narrative for people. Formatting never adds, drops,
//! or reorders content relative to the validated record.

use serde_json::Value;

use super::schema::Recap;
use super::snippets::SnippetStatus;

/// Both views of one recap. `structured` re-validates against the recap
/// schema by construction since it is serialized straight from [`Recap`].
#[derive(Debug, Clone)]
pub struct FormattedRecap {
    pub structured: Value,
    pub narrative: String,
}

/// Render a validated recap. Section order is fixed so output is stable for
/// the same input.
pub fn format(recap: &Recap) -> FormattedRecap {
    // Recap is Serialize over plain data types; this cannot fail.
    let structured = serde_json::to_value(recap).expect("recap serializes to JSON");

    let mut out = String::new();

    section(&mut out, "Summary");
    if recap.summary.is_empty() {
        out.push_str("None\n");
    } else {
        out.push_str(&escape(&recap.summary));
        out.push('\n');
    }

    list_section(&mut out, "Key Insights", &recap.aha_moments);
    list_section(&mut out, "Design Decisions", &recap.design_tradeoffs);
    list_section(&mut out, "MVP Changes", &recap.mvp_changes);
    list_section(&mut out, "Post-MVP Ideas", &recap.post_mvp_ideas);

    // Scope creep only appears when there is something to report.
    if !recap.scope_creep.is_empty() {
        list_section(&mut out, "Scope Creep", &recap.scope_creep);
    }

    section(&mut out, "Quality Flags");
    if recap.quality_flags.is_empty() {
        out.push_str("None\n");
    } else {
        for flag in &recap.quality_flags {
            let location = flag
                .file
                .as_deref()
                .map(|f| format!(" ({})", escape(f)))
                .unwrap_or_default();
            out.push_str(&format!(
                "- [{:?}] {}{}\n",
                flag.severity,
                escape(&flag.issue),
                location
            ));
        }
    }

    // Code goes last so the prose reads top to bottom without interruption.
    section(&mut out, "Code");
    let final_snippet = recap
        .code_snippets
        .iter()
        .find(|s| s.status == SnippetStatus::Final);
    match final_snippet {
        Some(snippet) => {
            let hint = snippet
                .file_hint
                .as_deref()
                .map(|f| format!(" ({})", escape(f)))
                .unwrap_or_default();
            out.push_str(&format!(
                "Final snippet: {}{}\n",
                escape(&snippet.language),
                hint
            ));
            out.push_str(&escape(&snippet.content));
            if !snippet.content.ends_with('\n') {
                out.push('\n');
            }
        }
        None => out.push_str("No final snippet selected\n"),
    }
    let rejected = recap
        .code_snippets
        .iter()
        .filter(|s| s.status == SnippetStatus::Rejected)
        .count();
    if rejected > 0 {
        out.push_str(&format!("Rejected versions: {rejected}\n"));
    }

    FormattedRecap {
        structured,
        narrative: out,
    }
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str("## ");
    out.push_str(title);
    out.push('\n');
}

fn list_section(out: &mut String, title: &str, items: &[String]) {
    section(out, title);
    if items.is_empty() {
        out.push_str("None\n");
        return;
    }
    for item in items {
        out.push_str("- ");
        out.push_str(&escape(item));
        out.push('\n');
    }
}

/// Transcript and oracle text is untrusted; neutralize markup-significant
/// characters before it reaches a rendered surface.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::schema;
    use crate::pipeline::snippets::CodeSnippet;

    fn recap_with(summary: &str) -> Recap {
        Recap {
            session_id: "s1".into(),
            summary: summary.into(),
            ..Recap::default()
        }
    }

    #[test]
    fn empty_lists_render_none() {
        let formatted = format(&recap_with("did things"));
        assert!(formatted.narrative.contains("## Key Insights\nNone"));
        assert!(formatted.narrative.contains("## Quality Flags\nNone"));
        assert!(formatted
            .narrative
            .contains("No final snippet selected"));
    }

    #[test]
    fn scope_creep_section_only_appears_when_populated() {
        let empty = format(&recap_with("x"));
        assert!(!empty.narrative.contains("Scope Creep"));

        let mut recap = recap_with("x");
        recap.scope_creep = vec!["added a dashboard nobody asked for".into()];
        let populated = format(&recap);
        assert!(populated.narrative.contains("## Scope Creep"));
        assert!(populated.narrative.contains("dashboard"));
    }

    #[test]
    fn markup_in_untrusted_text_is_escaped() {
        let mut recap = recap_with("use <script>alert(1)</script> & friends");
        recap.aha_moments = vec!["a < b".into()];
        let formatted = format(&recap);
        assert!(!formatted.narrative.contains("<script>"));
        assert!(formatted.narrative.contains("&lt;script&gt;"));
        assert!(formatted.narrative.contains("a &lt; b"));
        assert!(formatted.narrative.contains("&amp; friends"));
    }

    #[test]
    fn final_snippet_and_rejection_count_are_reported() {
        let mut recap = recap_with("auth work");
        recap.code_snippets = vec![
            CodeSnippet {
                content: "x = 1\n".into(),
                language: "python".into(),
                user_marked_final: false,
                context: String::new(),
                file_hint: None,
                status: SnippetStatus::Rejected,
                reject_reason: Some("superseded by the latest valid version".into()),
                diff_summary: Some("initial version".into()),
            },
            CodeSnippet {
                content: "x = 2\n".into(),
                language: "python".into(),
                user_marked_final: true,
                context: String::new(),
                file_hint: Some("app.py".into()),
                status: SnippetStatus::Final,
                reject_reason: None,
                diff_summary: None,
            },
        ];
        let formatted = format(&recap);
        assert!(formatted.narrative.contains("Final snippet: python (app.py)"));
        assert!(formatted.narrative.contains("x = 2"));
        assert!(formatted.narrative.contains("Rejected versions: 1"));
    }

    #[test]
    fn structured_view_revalidates_to_the_same_recap() {
        let mut recap = recap_with("round trip");
        recap.post_mvp_ideas = vec!["add rate limiting".into()];
        let formatted = format(&recap);
        let back = schema::validate(&formatted.structured, true).unwrap();
        assert_eq!(back, recap);
    }

    #[test]
    fn same_input_formats_identically() {
        let recap = recap_with("stable output");
        assert_eq!(format(&recap).narrative, format(&recap).narrative);
    }
}
