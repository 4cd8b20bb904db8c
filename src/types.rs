//! Wire types for the ExplainIt analysis backend

use serde::{Deserialize, Serialize};

/// Coarse risk classification assigned by the analysis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Risk level plus the backend's rationale text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScore {
    pub risk_level: RiskLevel,
    pub risk_reason: String,
}

/// One analyzed function's metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub line_number: u32,
    pub parameter_count: u32,
    pub risk_score: RiskScore,
}

/// Response body of `POST /analyze`
///
/// Only `functions` is guaranteed; the backend may also include the original
/// source text and its import/dependency scan. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,

    /// Original source text, for display
    #[serde(default)]
    pub source_code: Option<String>,

    /// Import records as reported by the backend (shape varies by analyzer)
    #[serde(default)]
    pub imports: Vec<serde_json::Value>,

    /// Sibling files the analyzed file depends on
    #[serde(default)]
    pub file_dependencies: Vec<String>,
}

/// Response body of `POST /explain`
#[derive(Debug, Clone, Deserialize)]
pub struct ExplainResponse {
    /// Markdown-formatted explanation text
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_response_deserialize() {
        let body = r#"{
            "functions": [{
                "name": "parse",
                "line_number": 12,
                "parameter_count": 2,
                "risk_score": {"risk_level": "high", "risk_reason": "uses eval"}
            }],
            "source_code": "def parse(a, b): ..."
        }"#;
        let parsed: AnalyzeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.functions.len(), 1);
        assert_eq!(parsed.functions[0].name, "parse");
        assert_eq!(parsed.functions[0].line_number, 12);
        assert_eq!(parsed.functions[0].risk_score.risk_level, RiskLevel::High);
        assert_eq!(parsed.source_code.as_deref(), Some("def parse(a, b): ..."));
        assert!(parsed.imports.is_empty());
    }

    #[test]
    fn test_analyze_response_minimal_body() {
        let parsed: AnalyzeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.functions.is_empty());
        assert!(parsed.source_code.is_none());
    }

    #[test]
    fn test_risk_level_round_trip() {
        for (level, text) in [
            (RiskLevel::Low, "\"low\""),
            (RiskLevel::Medium, "\"medium\""),
            (RiskLevel::High, "\"high\""),
        ] {
            assert_eq!(serde_json::to_string(&level).unwrap(), text);
            let back: RiskLevel = serde_json::from_str(text).unwrap();
            assert_eq!(back, level);
        }
        assert!(serde_json::from_str::<RiskLevel>("\"critical\"").is_err());
    }
}
