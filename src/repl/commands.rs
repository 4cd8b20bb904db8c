//! Slash command handlers for the REPL
//!
//! Handles /open, /functions, /select, /explain, /source, /status, /help.

use std::path::Path;

use anyhow::Result;

use crate::controller::{AnalysisOutcome, ExplainOutcome, SelectOutcome, SessionController};
use crate::repl::colors;
use crate::repl::formatter;
use crate::repl::render;

/// Command handler with access to REPL state
pub struct CommandHandler<'a> {
    pub controller: &'a mut SessionController,
}

impl<'a> CommandHandler<'a> {
    /// Handle a slash command. Returns false when the REPL should exit.
    pub async fn handle(&mut self, cmd: &str) -> Result<bool> {
        let parts: Vec<&str> = cmd.splitn(2, ' ').collect();
        let command = parts[0];
        let arg = parts.get(1).copied().unwrap_or("").trim();

        match command {
            "/help" => {
                println!("Commands:");
                println!("  /help              - Show this help");
                println!("  /open <path>       - Upload a file for analysis (or drop it on the terminal)");
                println!("  /functions         - Show the analyzed function list");
                println!("  /select <n|name>   - Select a function (bare number/name works too)");
                println!("  /explain           - Explain the selected function (repeats re-fetch)");
                println!("  /source            - Show the analyzed source text");
                println!("  /status            - Show session state");
                println!("  /quit              - Exit");
            }
            "/open" | "/load" => {
                if arg.is_empty() {
                    println!("Usage: /open <path>");
                } else {
                    self.cmd_open(arg).await;
                }
            }
            "/functions" | "/list" => self.cmd_functions(),
            "/select" => {
                if arg.is_empty() {
                    println!("Usage: /select <number or name>");
                } else {
                    self.cmd_select(arg);
                }
            }
            "/explain" => self.cmd_explain().await,
            "/source" => self.cmd_source(),
            "/status" => self.cmd_status(),
            "/quit" | "/exit" => return Ok(false),
            _ => {
                println!("Unknown command: {}. Try /help", command);
            }
        }
        Ok(true)
    }

    /// /open - upload a file and analyze it
    pub async fn cmd_open(&mut self, path: &str) {
        let path = Path::new(path);
        println!(
            "{}",
            colors::status(&format!("Analyzing {}...", path.display()))
        );
        match self.controller.open(path).await {
            Ok(outcome) => self.render_analysis(outcome),
            Err(e) => println!("{}", colors::error(&format!("{:#}", e))),
        }
    }

    fn render_analysis(&self, outcome: AnalysisOutcome) {
        match outcome {
            AnalysisOutcome::Ready { function_count } => {
                println!(
                    "{}",
                    colors::success(&format!("{} function(s) found", function_count))
                );
                println!();
                self.cmd_functions();
                println!(
                    "{}",
                    colors::status("Select a function by number or name, then /explain.")
                );
            }
            AnalysisOutcome::Empty => println!("{}", render::empty_state()),
            AnalysisOutcome::Failed(reason) => {
                println!(
                    "{}",
                    colors::error(&format!("Analysis failed: {}", render::sanitize_inline(&reason)))
                );
                println!(
                    "{}",
                    colors::status("The file stayed loaded; /open it again to retry.")
                );
            }
            // A response for an older upload; newer state already rendered
            AnalysisOutcome::Stale => {}
        }
    }

    /// /functions - render the current function list
    pub fn cmd_functions(&self) {
        match self.controller.session().analysis() {
            Some(analysis) => print!("{}", render::function_list(analysis)),
            None => println!("{}", colors::status("No file analyzed yet. /open a file first.")),
        }
    }

    /// /select - pick a function by index or name
    pub fn cmd_select(&mut self, key: &str) {
        match self.controller.select(key) {
            SelectOutcome::Selected { cached } => {
                if let Some(function) = self.controller.session().selected() {
                    println!("{}", render::selection_header(function));
                }
                if cached {
                    let session = self.controller.session();
                    if let Some(text) = session
                        .selected()
                        .and_then(|f| session.cached_explanation(&f.name))
                    {
                        println!();
                        print!("{}", formatter::render_explanation(text));
                    }
                } else {
                    println!(
                        "{}",
                        colors::status("No explanation yet. Run /explain to request one.")
                    );
                }
            }
            SelectOutcome::NotFound => println!(
                "{}",
                colors::warning(&format!("No function matching '{}'", key))
            ),
            SelectOutcome::NoAnalysis => {
                println!("{}", colors::status("No file analyzed yet. /open a file first."))
            }
        }
    }

    /// /explain - fetch (or re-fetch) the explanation for the selection
    pub async fn cmd_explain(&mut self) {
        // Unreachable without a selection in the intended flow; stay quiet.
        let name = match self.controller.session().selected() {
            Some(function) => function.name.clone(),
            None => return,
        };
        println!(
            "{}",
            colors::status(&format!(
                "Explaining {}...",
                render::sanitize_inline(&name)
            ))
        );
        match self.controller.explain().await {
            ExplainOutcome::Explained => {
                if let Some(text) = self.controller.session().cached_explanation(&name) {
                    println!();
                    print!("{}", formatter::render_explanation(text));
                }
            }
            ExplainOutcome::Failed(reason) => {
                println!(
                    "{}",
                    colors::error(&format!(
                        "Explanation failed: {}",
                        render::sanitize_inline(&reason)
                    ))
                );
                println!("{}", colors::status("Run /explain to retry."));
            }
            ExplainOutcome::NotReady | ExplainOutcome::Stale => {}
        }
    }

    /// /source - show the analyzed source text, when the backend returned it
    pub fn cmd_source(&self) {
        match self
            .controller
            .session()
            .analysis()
            .and_then(|a| a.source_code.as_deref())
        {
            Some(source) => print!("{}", render::source_view(source)),
            None => println!(
                "{}",
                colors::status("No source text available for this file.")
            ),
        }
    }

    /// /status - show session state
    pub fn cmd_status(&self) {
        let session = self.controller.session();
        match session.file() {
            Some(file) => println!(
                "File: {} ({} bytes)",
                render::sanitize_inline(&file.name),
                file.bytes.len()
            ),
            None => println!("File: (none)"),
        }
        match session.analysis() {
            Some(analysis) => {
                println!("Functions: {}", analysis.functions.len());
                if !analysis.imports.is_empty() {
                    println!("Imports: {}", analysis.imports.len());
                }
                if !analysis.file_dependencies.is_empty() {
                    println!(
                        "Dependencies: {}",
                        render::sanitize_inline(&analysis.file_dependencies.join(", "))
                    );
                }
            }
            None => println!("Functions: (not analyzed)"),
        }
        match session.selected() {
            Some(function) => println!("Selected: {}", render::sanitize_inline(&function.name)),
            None => println!("Selected: (none)"),
        }
        println!("Cached explanations: {}", session.explanation_count());
    }
}
