//! AI analysis result model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder title for entries whose analysis came back blank.
pub const FALLBACK_TITLE: &str = "بدون عنوان";
/// Placeholder brief summary.
pub const FALLBACK_DESCRIPTION: &str = "لا يوجد ملخص متاح.";
/// Placeholder detailed analysis.
pub const FALLBACK_FULL_ANALYSIS: &str = "لا يوجد تحليل متاح.";

/// Structured output of the content analysis service.
///
/// All three fields are required by the response schema sent to the model;
/// a degraded result substitutes explanatory text but keeps the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Short, catchy title (max 6 words)
    pub title: String,

    /// Very brief summary (1-2 sentences)
    pub description: String,

    /// Detailed description covering key topics, main points, and audience
    #[serde(rename = "fullAnalysis")]
    pub full_analysis: String,
}

impl AnalysisResult {
    /// Replace blank fields with placeholder text.
    ///
    /// Catalog entries must never carry empty analysis fields, even when the
    /// model returned an empty string for a required field.
    pub fn with_fallbacks(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = FALLBACK_TITLE.to_string();
        }
        if self.description.trim().is_empty() {
            self.description = FALLBACK_DESCRIPTION.to_string();
        }
        if self.full_analysis.trim().is_empty() {
            self.full_analysis = FALLBACK_FULL_ANALYSIS.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_analysis_uses_camel_case_wire_name() {
        let json = r#"{"title":"t","description":"d","fullAnalysis":"f"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.full_analysis, "f");

        let out = serde_json::to_string(&result).unwrap();
        assert!(out.contains("fullAnalysis"));
    }

    #[test]
    fn test_with_fallbacks_fills_blanks_only() {
        let result = AnalysisResult {
            title: "kept".to_string(),
            description: String::new(),
            full_analysis: "   ".to_string(),
        }
        .with_fallbacks();

        assert_eq!(result.title, "kept");
        assert_eq!(result.description, FALLBACK_DESCRIPTION);
        assert_eq!(result.full_analysis, FALLBACK_FULL_ANALYSIS);
    }
}
