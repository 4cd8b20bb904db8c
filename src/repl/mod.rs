//! Interactive REPL for the ExplainIt client
//!
//! Readline-based interface over the session controller:
//! - command history under ~/.explainit/history
//! - slash commands for the analysis flow
//! - bare input doubles as file drop (a path) or function selection

pub mod colors;
pub mod commands;
pub mod formatter;
pub mod render;

use std::path::Path;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::controller::SessionController;
use commands::CommandHandler;

/// REPL state
pub struct Repl {
    /// Readline editor with history
    editor: DefaultEditor,
    /// Session controller driving the backend
    controller: SessionController,
    /// History file path
    history_path: std::path::PathBuf,
}

impl Repl {
    pub fn new(controller: SessionController) -> Result<Self> {
        let editor = DefaultEditor::new()?;

        // History file in ~/.explainit/history
        let history_path = dirs::home_dir()
            .unwrap_or_default()
            .join(".explainit")
            .join("history");

        Ok(Self {
            editor,
            controller,
            history_path,
        })
    }

    /// Load command history
    fn load_history(&mut self) {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }
    }

    /// Save command history
    fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = self.editor.save_history(&self.history_path);
    }

    /// Analyze a file handed over on the command line before the loop starts
    pub async fn open_on_startup(&mut self, path: &Path) {
        let mut handler = CommandHandler {
            controller: &mut self.controller,
        };
        handler.cmd_open(&path.to_string_lossy()).await;
    }

    /// Run the REPL loop
    pub async fn run(&mut self) -> Result<()> {
        self.load_history();

        println!("Drop a file onto the terminal (or /open <path>) to analyze it. /help for commands.");
        println!();

        loop {
            match self.editor.readline(">>> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(&line)?;
                    if !self.handle_line(trimmed).await? {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.save_history();
        println!("Goodbye!");
        Ok(())
    }

    /// Dispatch one line of input. Returns false to exit.
    async fn handle_line(&mut self, line: &str) -> Result<bool> {
        let mut handler = CommandHandler {
            controller: &mut self.controller,
        };

        if line.starts_with('/') {
            return handler.handle(line).await;
        }

        // Bare input: a dropped or typed path analyzes that file (terminals
        // quote dropped paths, so strip that first); anything else tries to
        // select a function from the current list.
        let candidate = line.trim_matches(|c| c == '\'' || c == '"');
        if Path::new(candidate).is_file() {
            handler.cmd_open(candidate).await;
        } else {
            handler.cmd_select(line);
        }
        Ok(true)
    }
}
