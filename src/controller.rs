//! Analysis session controller
//!
//! Owns the session and the backend client and drives the upload, analyze,
//! select and explain flow. Network responses are applied through tickets
//! that carry the generation (and selection) captured at send time: a
//! response arriving after the session moved on is dropped instead of
//! clobbering newer state.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::session::{LoadedFile, Session};
use crate::types::AnalyzeResponse;

/// Ticket for an in-flight analysis request
#[derive(Debug, Clone, Copy)]
pub struct AnalysisTicket {
    generation: u64,
}

/// Ticket for an in-flight explanation request
#[derive(Debug, Clone)]
pub struct ExplainTicket {
    generation: u64,
    pub function: String,
}

/// Result of an analysis round
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// Functions found and stored in the session
    Ready { function_count: usize },
    /// Zero functions detected: a legitimate terminal state, not an error
    Empty,
    /// Request failed; the loaded file stays in the session for a retry
    Failed(String),
    /// Response belonged to an older generation and was dropped
    Stale,
}

/// Result of selecting a function
#[derive(Debug)]
pub enum SelectOutcome {
    /// Selected; `cached` is true when an explanation can render immediately
    Selected { cached: bool },
    /// No function with that index or name in the current analysis
    NotFound,
    /// Nothing analyzed yet
    NoAnalysis,
}

/// Result of an explanation round
#[derive(Debug)]
pub enum ExplainOutcome {
    /// Explanation fetched and cached under the function name
    Explained,
    /// Request failed; the user retries by repeating the command
    Failed(String),
    /// No file or no selection: defensive no-op, nothing was sent
    NotReady,
    /// Response no longer matches the session and was dropped
    Stale,
}

/// Orchestrates the session against the backend client
pub struct SessionController {
    client: ApiClient,
    session: Session,
}

impl SessionController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Load a file from disk into a fresh session and analyze it.
    /// Exactly one request is issued per call; there is no automatic retry.
    pub async fn open(&mut self, path: &Path) -> Result<AnalysisOutcome> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());

        let file = LoadedFile { name, bytes };
        let ticket = self.begin_analysis(file.clone());
        let result = self.client.analyze(&file).await;
        Ok(self.apply_analysis(ticket, result))
    }

    /// Put a new file into the session and hand out the request ticket.
    /// Resets selection and explanation cache as a side effect.
    pub fn begin_analysis(&mut self, file: LoadedFile) -> AnalysisTicket {
        let generation = self.session.load_file(file);
        AnalysisTicket { generation }
    }

    /// Apply an analysis response if the session is still on the ticket's
    /// generation; otherwise drop it.
    pub fn apply_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<AnalyzeResponse, ApiError>,
    ) -> AnalysisOutcome {
        if ticket.generation != self.session.generation() {
            debug!(
                "dropping stale analysis response (generation {})",
                ticket.generation
            );
            return AnalysisOutcome::Stale;
        }
        match result {
            Ok(analysis) => {
                let function_count = analysis.functions.len();
                self.session.set_analysis(analysis);
                if function_count == 0 {
                    AnalysisOutcome::Empty
                } else {
                    AnalysisOutcome::Ready { function_count }
                }
            }
            Err(e) => AnalysisOutcome::Failed(e.to_string()),
        }
    }

    /// Select a function by 1-based index or name. Selection alone never
    /// issues a network call; a cached explanation renders from the cache.
    pub fn select(&mut self, key: &str) -> SelectOutcome {
        if self.session.analysis().is_none() {
            return SelectOutcome::NoAnalysis;
        }
        let name = match self.session.find_function(key) {
            Some(f) => f.name.clone(),
            None => return SelectOutcome::NotFound,
        };
        self.session.select(&name);
        let cached = self.session.cached_explanation(&name).is_some();
        SelectOutcome::Selected { cached }
    }

    /// Start an explanation request for the current selection. Returns None
    /// (and issues nothing) when no file or no selection is active.
    pub fn begin_explain(&mut self) -> Option<ExplainTicket> {
        let function = self.session.selected()?.name.clone();
        self.session.file()?;
        Some(ExplainTicket {
            generation: self.session.generation(),
            function,
        })
    }

    /// Apply an explanation response if the session still points at the
    /// ticket's generation and selection; otherwise drop it without touching
    /// the cache.
    pub fn apply_explanation(
        &mut self,
        ticket: ExplainTicket,
        result: Result<String, ApiError>,
    ) -> ExplainOutcome {
        if ticket.generation != self.session.generation()
            || self.session.selected_name() != Some(ticket.function.as_str())
        {
            debug!("dropping stale explanation for {}", ticket.function);
            return ExplainOutcome::Stale;
        }
        match result {
            Ok(text) => {
                self.session.store_explanation(&ticket.function, text);
                ExplainOutcome::Explained
            }
            Err(e) => ExplainOutcome::Failed(e.to_string()),
        }
    }

    /// Fetch (or re-fetch) the explanation for the selected function.
    /// Always hits the backend; the cache entry is overwritten on success.
    pub async fn explain(&mut self) -> ExplainOutcome {
        let Some(ticket) = self.begin_explain() else {
            return ExplainOutcome::NotReady;
        };
        let result = match self.session.file() {
            Some(file) => self.client.explain(file, &ticket.function).await,
            None => return ExplainOutcome::NotReady,
        };
        self.apply_explanation(ticket, result)
    }
}
