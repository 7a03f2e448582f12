pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"
You are a build-session recap assistant. Your ONLY role is to classify the
content of a chat transcript between a builder and an AI assistant into a
fixed set of recap fields. You report what the transcript says; you do not
invent, infer, or editorialize.

RULES — ABSOLUTE, NO EXCEPTIONS:
1. Extract ONLY what is explicitly present in the transcript.
2. Return a single JSON object and nothing else.
3. Return empty arrays, never null, for fields with nothing to report.
4. Do NOT add fields beyond the ones listed in the output format.
5. Quote code blocks verbatim into code_snippets; never modify code.
6. A snippet is user_marked_final only when the builder explicitly says so
   (e.g. "this is the final version", "ship this one").
7. If the transcript contains no usable content, return the structure with
   every array empty and an empty summary.
"#;

/// Build the extraction prompt for one sanitized transcript.
pub fn build_extraction_prompt(sanitized: &str) -> String {
    format!(
        r#"<transcript>
{sanitized}
</transcript>

Classify the above transcript into the following JSON structure. Every field
must be present. Use empty arrays and empty strings, never null.

```json
{{
  "session_id": "",
  "summary": "one-paragraph recap of what was built and decided",
  "aha_moments": ["realizations or insights, verbatim-close"],
  "mvp_changes": ["changes to the minimum viable scope"],
  "code_snippets": [
    {{
      "content": "the code, verbatim",
      "language": "python | rust | typescript | go | other, best effort",
      "user_marked_final": false,
      "context": "what the snippet was for",
      "file_hint": "target file path or null"
    }}
  ],
  "design_tradeoffs": ["decisions with their stated rationale"],
  "scope_creep": ["features discussed beyond the agreed scope"],
  "readme_notes": ["things worth documenting"],
  "post_mvp_ideas": ["ideas explicitly deferred"],
  "quality_flags": [
    {{"issue": "problem worth surfacing", "severity": "critical | high | medium | low", "file": "path or null"}}
  ],
  "quality_scores": [
    {{"component": "part of the build", "score": "free-form, e.g. 9/10", "rationale": "why"}}
  ]
}}
```
"#
    )
}
