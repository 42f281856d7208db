//! Gemini API client.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use vidsmart_models::{AnalysisResult, ImageSignal};

use crate::error::AnalysisError;
use crate::failure::{key_missing_reason, key_missing_result, ServiceFailure};
use crate::parse::{parse_analysis, ParsedAnalysis};

/// Production endpoint of the Gemini API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for content analysis.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Fixed instruction establishing tone, language, and output format.
const SYSTEM_INSTRUCTION: &str = "\
You are an intelligent video assistant specialized in analyzing visual content for an Arabic audience.
Your task is to analyze the provided image (video frame or thumbnail) or text info and provide a structured summary in Arabic.

Output must be strictly JSON with the following fields:
1. title: A short, catchy title (max 6 words).
2. description: A very brief summary (1-2 sentences).
3. fullAnalysis: A detailed description covering key topics, main points, and target audience (bullet points allowed).

Tone: Professional, helpful, and concise. Language: Arabic.
IMPORTANT: Return ONLY raw JSON. Do not wrap in markdown code blocks.";

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline_image(signal: &ImageSignal) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: signal.mime_type().to_string(),
                data: signal.base64_data().to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Outcome of the credential probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStatus {
    pub valid: bool,
    pub reason: Option<String>,
}

/// Gemini content analysis client.
pub struct GeminiClient {
    api_key: Option<String>,
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into().trim().to_string();
        Self {
            api_key: if api_key.is_empty() { None } else { Some(api_key) },
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    ///
    /// A missing key is not an error here: `analyze` degrades and
    /// `check_credential` reports invalid, matching the status-indicator flow.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GEMINI_API_KEY").unwrap_or_default())
    }

    /// Point the client at a custom endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Analyze an image signal and/or text context.
    ///
    /// Fails only with [`AnalysisError::NoContent`] when both inputs are
    /// absent, before any network activity. Every service-side failure is
    /// absorbed into a degraded result.
    pub async fn analyze(
        &self,
        image: Option<&ImageSignal>,
        context: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let context = context.trim();
        if image.is_none() && context.is_empty() {
            return Err(AnalysisError::NoContent);
        }

        let Some(ref api_key) = self.api_key else {
            warn!("No API key configured; returning degraded analysis");
            return Ok(key_missing_result());
        };

        let mut parts = Vec::new();
        if let Some(signal) = image {
            parts.push(Part::inline_image(signal));
        }
        if !context.is_empty() {
            parts.push(Part::text(format!(
                "Context/URL/Title: {}. Please analyze the visual content or infer from the context provided.",
                context
            )));
        }

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            system_instruction: Some(Content {
                parts: vec![Part::text(SYSTEM_INSTRUCTION)],
            }),
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(analysis_response_schema()),
                max_output_tokens: None,
            },
        };

        match self.call_generate(api_key, &request).await {
            Ok(raw) => match parse_analysis(&raw) {
                ParsedAnalysis::Ok(result) => {
                    info!("Analysis completed");
                    Ok(result)
                }
                ParsedAnalysis::Malformed { excerpt } => {
                    warn!("Analysis response was not valid JSON");
                    Ok(AnalysisResult {
                        title: "فشل تحليل الرد".to_string(),
                        description: "تم استلام رد ولكن تنسيقه غير صحيح.".to_string(),
                        full_analysis: format!("النص الخام المستلم: {}...", excerpt),
                    })
                }
            },
            Err(failure) => {
                warn!("Analysis failed ({:?}): {}", failure.kind, failure.detail);
                Ok(failure.degraded_result())
            }
        }
    }

    /// Probe whether the configured credential is accepted.
    ///
    /// Issues a minimal one-token request; used only for a status indicator,
    /// never to gate ingestion.
    pub async fn check_credential(&self) -> CredentialStatus {
        let Some(ref api_key) = self.api_key else {
            return CredentialStatus {
                valid: false,
                reason: Some(key_missing_reason()),
            };
        };

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text("ping")],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                max_output_tokens: Some(1),
            },
        };

        match self.call_generate(api_key, &request).await {
            Ok(_) => {
                info!("API key validation successful");
                CredentialStatus {
                    valid: true,
                    reason: None,
                }
            }
            Err(failure) => {
                warn!("API key validation failed: {}", failure.detail);
                CredentialStatus {
                    valid: false,
                    reason: Some(failure.credential_reason()),
                }
            }
        }
    }

    /// Call the generateContent endpoint and return the first candidate text.
    async fn call_generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, ServiceFailure> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, GEMINI_MODEL, api_key
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ServiceFailure::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceFailure::from_status(status, body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ServiceFailure::unknown(format!("Failed to parse API response: {}", e)))?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| ServiceFailure::unknown("No content in API response"))?;

        debug!("Received {} chars of model output", text.len());
        Ok(text)
    }
}

/// Strict output schema sent with every analysis request.
fn analysis_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "fullAnalysis": { "type": "STRING" },
        },
        "required": ["title", "description", "fullAnalysis"],
    })
}
