//! Terminal rendering for analysis results
//!
//! Everything rendered here may contain backend-controlled text. It all goes
//! through `sanitize`/`sanitize_inline` first: control bytes (ESC included)
//! are replaced so a hostile response renders as literal text and can never
//! smuggle escape sequences into the terminal. Markup-significant characters
//! like `<`, `&` and `"` pass through unchanged, as visible text.

use crate::repl::colors::{self, ansi::*};
use crate::types::{AnalyzeResponse, FunctionRecord};

/// Sanitize multi-line service text: keep newlines and tabs, replace every
/// other control character with U+FFFD so tampering stays visible.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c == '\n' || c == '\t' || !c.is_control() {
                c
            } else {
                '\u{FFFD}'
            }
        })
        .collect()
}

/// Sanitize service text destined for a single display line
pub fn sanitize_inline(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}

/// The designated empty state: zero functions is a result, not an error
pub fn empty_state() -> String {
    colors::status("No functions found in this file.")
}

/// Render the function list, one numbered entry per record, in input order
pub fn function_list(analysis: &AnalyzeResponse) -> String {
    if analysis.functions.is_empty() {
        return empty_state();
    }
    let mut out = String::new();
    for (i, function) in analysis.functions.iter().enumerate() {
        out.push_str(&function_entry(i + 1, function));
        out.push('\n');
    }
    out
}

fn function_entry(index: usize, function: &FunctionRecord) -> String {
    let name = sanitize_inline(&function.name);
    let reason = sanitize_inline(&function.risk_score.risk_reason);
    format!(
        "  {}{:>3}.{} {}{}(){}  {}\n       {}Line: {} | Params: {}{}\n       {}{}{}\n",
        DIM,
        index,
        RESET,
        BOLD,
        name,
        RESET,
        colors::risk_badge(function.risk_score.risk_level),
        DIM,
        function.line_number,
        function.parameter_count,
        RESET,
        GRAY,
        reason,
        RESET,
    )
}

/// One-line header for the currently selected function
pub fn selection_header(function: &FunctionRecord) -> String {
    format!(
        "{}{}(){}  line {}, {} param(s)  {}",
        BOLD,
        sanitize_inline(&function.name),
        RESET,
        function.line_number,
        function.parameter_count,
        colors::risk_badge(function.risk_score.risk_level),
    )
}

/// Source text with line numbers
pub fn source_view(source: &str) -> String {
    let clean = sanitize(source);
    let mut out = String::new();
    for (i, line) in clean.lines().enumerate() {
        out.push_str(&format!("{}{:>4}{}  {}\n", DIM, i + 1, RESET, line));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RiskLevel, RiskScore};

    fn record(name: &str, reason: &str) -> FunctionRecord {
        FunctionRecord {
            name: name.into(),
            line_number: 12,
            parameter_count: 2,
            risk_score: RiskScore {
                risk_level: RiskLevel::High,
                risk_reason: reason.into(),
            },
        }
    }

    #[test]
    fn test_sanitize_strips_escape_sequences() {
        let hostile = "evil\x1b[31mred\x07bell";
        let clean = sanitize_inline(hostile);
        assert!(!clean.contains('\x1b'));
        assert!(!clean.contains('\x07'));
        assert!(clean.contains("evil"));
        assert!(clean.contains("red"));
    }

    #[test]
    fn test_sanitize_keeps_markup_characters_literal() {
        let name = "<script>&\"quote\"";
        assert_eq!(sanitize_inline(name), name);
        assert_eq!(sanitize(name), name);
    }

    #[test]
    fn test_sanitize_preserves_newlines_in_block_text() {
        let text = "line one\nline two\tend";
        assert_eq!(sanitize(text), text);
        assert!(!sanitize_inline(text).contains('\n'));
    }

    #[test]
    fn test_function_list_renders_each_entry_in_order() {
        let analysis = AnalyzeResponse {
            functions: vec![record("parse", "uses eval"), record("emit", "writes files")],
            ..Default::default()
        };
        let out = function_list(&analysis);
        let parse_at = out.find("parse()").expect("first entry rendered");
        let emit_at = out.find("emit()").expect("second entry rendered");
        assert!(parse_at < emit_at);
        assert!(out.contains("Line: 12 | Params: 2"));
        assert!(out.contains("[HIGH]"));
        assert!(out.contains("uses eval"));
    }

    #[test]
    fn test_function_list_empty_state() {
        let out = function_list(&AnalyzeResponse::default());
        assert!(out.contains("No functions found"));
    }

    #[test]
    fn test_hostile_function_name_renders_literally() {
        let analysis = AnalyzeResponse {
            functions: vec![record("<img onerror=x>", "a\x1b[2Jb")],
            ..Default::default()
        };
        let out = function_list(&analysis);
        assert!(out.contains("<img onerror=x>()"));
        assert!(!out.contains("\x1b[2J"));
    }

    #[test]
    fn test_source_view_numbers_lines() {
        let out = source_view("def parse():\n    pass\n");
        assert!(out.contains("1"));
        assert!(out.contains("def parse():"));
        assert!(out.contains("2"));
    }
}
