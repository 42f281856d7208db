//! Response text normalization.
//!
//! Model output is untrusted: it may be wrapped in markdown code fences or
//! surrounded by prose. The raw text is cleaned, the first balanced JSON
//! object is extracted, and only a successful parse into the expected shape
//! counts as `Ok` — anything else is tagged `Malformed` with an excerpt.

use vidsmart_models::AnalysisResult;

/// How much raw text the malformed-response excerpt keeps.
pub const RAW_EXCERPT_CHARS: usize = 100;

/// Outcome of validating raw model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAnalysis {
    /// Response parsed into the expected three-field shape
    Ok(AnalysisResult),
    /// Response was not valid JSON of the expected shape
    Malformed { excerpt: String },
}

/// Normalize and validate raw model output.
pub fn parse_analysis(raw: &str) -> ParsedAnalysis {
    let cleaned = strip_code_fences(raw);
    let candidate = extract_first_object(&cleaned).unwrap_or_else(|| cleaned.clone());

    match serde_json::from_str::<AnalysisResult>(&candidate) {
        Ok(result) => ParsedAnalysis::Ok(result),
        Err(_) => ParsedAnalysis::Malformed {
            excerpt: cleaned.chars().take(RAW_EXCERPT_CHARS).collect(),
        },
    }
}

/// Remove markdown code fences around the payload.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Extract the first balanced `{ ... }` object, string-aware.
fn extract_first_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + offset + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
