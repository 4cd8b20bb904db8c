//! Session state for one loaded file
//!
//! Exactly one session exists per run: the loaded file, its latest analysis,
//! the current selection, and the per-session explanation cache. Loading a
//! new file resets everything and bumps the generation; in-flight responses
//! tagged with an older generation are stale and must be dropped by the
//! controller.

use std::collections::HashMap;

use crate::types::{AnalyzeResponse, FunctionRecord};

/// A file picked up from disk, held as an opaque blob for upload
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// State for the currently loaded file
///
/// The explanation cache maps function name to Markdown text. It is
/// unbounded and has no TTL: analyzed files are small in practice, and the
/// cache dies with the session.
#[derive(Debug, Default)]
pub struct Session {
    file: Option<LoadedFile>,
    analysis: Option<AnalyzeResponse>,
    selected: Option<String>,
    explanations: HashMap<String, String>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded file. Clears the previous analysis, the selection
    /// and the explanation cache, and returns the new generation.
    pub fn load_file(&mut self, file: LoadedFile) -> u64 {
        self.file = Some(file);
        self.analysis = None;
        self.selected = None;
        self.explanations.clear();
        self.generation += 1;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn file(&self) -> Option<&LoadedFile> {
        self.file.as_ref()
    }

    pub fn set_analysis(&mut self, analysis: AnalyzeResponse) {
        self.analysis = Some(analysis);
    }

    pub fn analysis(&self) -> Option<&AnalyzeResponse> {
        self.analysis.as_ref()
    }

    /// Functions from the latest analysis, in backend order
    pub fn functions(&self) -> &[FunctionRecord] {
        self.analysis
            .as_ref()
            .map(|a| a.functions.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a function by 1-based list index or by name.
    /// Names are assumed unique per analysis; the first match wins.
    pub fn find_function(&self, key: &str) -> Option<&FunctionRecord> {
        if let Ok(index) = key.parse::<usize>() {
            if index >= 1 {
                return self.functions().get(index - 1);
            }
        }
        self.functions().iter().find(|f| f.name == key)
    }

    /// Mark a function as selected. Returns the record, or None if the name
    /// is not part of the current analysis.
    pub fn select(&mut self, name: &str) -> Option<&FunctionRecord> {
        let index = self.functions().iter().position(|f| f.name == name)?;
        self.selected = Some(name.to_string());
        self.functions().get(index)
    }

    pub fn selected(&self) -> Option<&FunctionRecord> {
        let name = self.selected.as_deref()?;
        self.functions().iter().find(|f| f.name == name)
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn cached_explanation(&self, name: &str) -> Option<&str> {
        self.explanations.get(name).map(String::as_str)
    }

    /// Store an explanation, overwriting any prior entry for the name
    pub fn store_explanation(&mut self, name: &str, text: String) {
        self.explanations.insert(name.to_string(), text);
    }

    pub fn explanation_count(&self) -> usize {
        self.explanations.len()
    }
}
