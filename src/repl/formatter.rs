//! Explanation renderer: Markdown to ANSI terminal output
//!
//! The backend returns Markdown. Level-3 headings are section boundaries:
//! each one opens a visually distinct block grouping the heading with all
//! content up to the next heading. Literal HIGH/MEDIUM/LOW tokens in body
//! text are tagged as risk indicators. Text runs through the same sanitizer
//! as the rest of the service output.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::repl::colors::{self, ansi::*};
use crate::repl::render::sanitize;

const SECTION_WIDTH: usize = 50;

/// One section of an explanation: a heading (absent for any preamble before
/// the first heading) plus its rendered body
#[derive(Debug, Default)]
struct Section {
    heading: Option<String>,
    body: String,
}

/// Render a Markdown explanation for the terminal
pub fn render_explanation(markdown: &str) -> String {
    let mut out = String::new();
    for section in split_sections(markdown) {
        let body = section.body.trim_end();
        if section.heading.is_none() && body.is_empty() {
            continue;
        }
        if let Some(heading) = &section.heading {
            out.push_str(&colors::separator(SECTION_WIDTH));
            out.push('\n');
            out.push_str(&format!("{}{}{}{}\n", BOLD, CYAN, heading, RESET));
        }
        if !body.is_empty() {
            out.push_str(body);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Walk the Markdown event stream, cutting a new section at every H3
fn split_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::default();
    // Some while inside an H3 heading; collects the heading's text
    let mut heading_text: Option<String> = None;
    let mut in_code_block = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H3,
                ..
            }) => {
                sections.push(std::mem::take(&mut current));
                heading_text = Some(String::new());
            }
            Event::End(TagEnd::Heading(HeadingLevel::H3)) => {
                current.heading = heading_text.take();
            }
            // Other heading levels render inline as bold lines
            Event::Start(Tag::Heading { .. }) => current.body.push_str(BOLD),
            Event::End(TagEnd::Heading(_)) => {
                current.body.push_str(RESET);
                current.body.push('\n');
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                current.body.push_str(DIM);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                current.body.push_str(RESET);
            }
            Event::Start(Tag::Strong) => {
                if heading_text.is_none() {
                    current.body.push_str(BOLD);
                }
            }
            Event::End(TagEnd::Strong) => {
                if heading_text.is_none() {
                    current.body.push_str(RESET);
                }
            }
            Event::Start(Tag::Item) => current.body.push_str("  - "),
            Event::End(TagEnd::Item) => current.body.push('\n'),
            Event::End(TagEnd::Paragraph) => current.body.push('\n'),
            Event::Text(text) => {
                let clean = sanitize(&text);
                match heading_text.as_mut() {
                    Some(heading) => heading.push_str(&clean),
                    None if in_code_block => current.body.push_str(&clean),
                    None => current.body.push_str(&tag_risk_tokens(&clean)),
                }
            }
            Event::Code(code) => {
                let clean = sanitize(&code);
                match heading_text.as_mut() {
                    Some(heading) => heading.push_str(&clean),
                    None => {
                        current.body.push_str(CYAN);
                        current.body.push_str(&clean);
                        current.body.push_str(RESET);
                    }
                }
            }
            Event::SoftBreak | Event::HardBreak => current.body.push('\n'),
            _ => {}
        }
    }
    sections.push(current);
    sections
}

/// Wrap literal HIGH/MEDIUM/LOW tokens in risk colors.
/// Only whole words count; HIGHER or LOWEST stay untouched.
fn tag_risk_tokens(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut word = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            flush_word(&mut out, &mut word);
            out.push(c);
        }
    }
    flush_word(&mut out, &mut word);
    out
}

fn flush_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    match word.as_str() {
        "HIGH" | "MEDIUM" | "LOW" => out.push_str(&colors::risk_token(word)),
        _ => out.push_str(word),
    }
    word.clear();
}
