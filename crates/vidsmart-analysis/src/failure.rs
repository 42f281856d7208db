//! Classification of analysis-service failures into degraded results.

use reqwest::StatusCode;
use vidsmart_models::AnalysisResult;

/// Classified analysis-service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Request rejected (oversized image, bad payload)
    BadRequest,
    /// Credential rejected
    AuthError,
    /// Transport-level failure (DNS, refused connection, timeout)
    NetworkError,
    /// Service overloaded or down
    ServiceUnavailable,
    /// Anything else
    Unknown,
}

/// A failure observed while talking to the analysis service, with enough
/// detail to build the user-visible degraded result.
#[derive(Debug, Clone)]
pub struct ServiceFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ServiceFailure {
    /// Classify a transport error from the HTTP client.
    pub fn from_transport(err: reqwest::Error) -> Self {
        Self {
            kind: FailureKind::NetworkError,
            detail: err.to_string(),
        }
    }

    /// Classify a non-success HTTP status and its body.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let kind = match status {
            StatusCode::BAD_REQUEST => FailureKind::BadRequest,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureKind::AuthError,
            StatusCode::SERVICE_UNAVAILABLE => FailureKind::ServiceUnavailable,
            // Some key problems come back as generic errors naming the key
            _ if body.contains("API key") => FailureKind::AuthError,
            _ => FailureKind::Unknown,
        };

        Self {
            kind,
            detail: format!("{}: {}", status, body),
        }
    }

    /// A failure with no better classification.
    pub fn unknown(detail: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Unknown,
            detail: detail.into(),
        }
    }

    /// Build the user-visible degraded result for this failure.
    pub fn degraded_result(&self) -> AnalysisResult {
        let (title, description) = match self.kind {
            FailureKind::BadRequest => ("ملف غير مدعوم", "حجم الصورة أو الطلب غير مقبول."),
            FailureKind::AuthError => ("خطأ في مفتاح API", "المفتاح المستخدم غير صالح."),
            FailureKind::NetworkError => ("خطأ في الاتصال", "يرجى التحقق من اتصال الإنترنت."),
            FailureKind::ServiceUnavailable => ("الخدمة مشغولة", "يرجى المحاولة بعد قليل."),
            FailureKind::Unknown => ("تحليل غير متاح", "حدث خطأ أثناء محاولة تحليل هذا المحتوى."),
        };

        AnalysisResult {
            title: title.to_string(),
            description: description.to_string(),
            full_analysis: format!("تفاصيل الخطأ: {}", self.detail),
        }
    }

    /// Short reason string for the credential status indicator.
    pub fn credential_reason(&self) -> String {
        match self.kind {
            FailureKind::AuthError => "المفتاح غير صالح (403)".to_string(),
            FailureKind::NetworkError => "خطأ في الاتصال بالإنترنت".to_string(),
            FailureKind::BadRequest => "طلب غير صالح (400)".to_string(),
            _ => "خطأ غير معروف".to_string(),
        }
    }
}

/// Degraded result when no API key is configured at all.
pub fn key_missing_result() -> AnalysisResult {
    AnalysisResult {
        title: "مفتاح API مفقود".to_string(),
        description: "لم يتم العثور على مفتاح API.".to_string(),
        full_analysis: "يرجى ضبط متغير البيئة GEMINI_API_KEY".to_string(),
    }
}

/// Reason string when no API key is configured.
pub fn key_missing_reason() -> String {
    "المفتاح مفقود".to_string()
}
