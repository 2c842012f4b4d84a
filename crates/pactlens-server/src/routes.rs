//! HTTP routes and handlers

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{FormRejection, JsonRejection},
        DefaultBodyLimit, FromRequest, Multipart, Request, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use pactlens_classifiers::{ClassificationResult, Classifier};
use pactlens_core::{AnalysisResult, ClassificationDetail};
use pactlens_extract::{export_docx, export_pdf, DocumentKind};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        .route("/active", get(active))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/enhanced_analysis", post(enhanced_analysis))
        .route("/classify", post(classify))
        .route("/analyze", post(analyze))
        .route("/export/pdf", post(export_pdf_handler))
        .route("/export/docx", post(export_docx_handler))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
        .with_state(state)
}

async fn active() -> &'static str {
    "active"
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "ai_mode": state.ai_mode_label(),
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Agreement decision and its explanation
#[derive(Debug, Serialize, Deserialize)]
pub struct Classification {
    pub accepted: bool,
    pub details: ClassificationDetail,
}

/// Upload analysis response
#[derive(Debug, Serialize, Deserialize)]
pub struct EnhancedAnalysisResponse {
    pub filename: String,
    pub extracted_text: String,
    pub analysis: AnalysisResult,
    pub classification: Classification,
    pub document_type: String,
    pub timestamp: String,
}

/// Extract, classify, and analyze an uploaded document
async fn enhanced_analysis(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<EnhancedAnalysisResponse>, AppError> {
    metrics::counter!("pactlens_requests_total", "route" => "enhanced_analysis").increment(1);

    let Ok(mut multipart) = multipart else {
        return Err(AppError::BadRequest("No file uploaded".to_string()));
    };

    let (filename, bytes) = loop {
        let Some(field) = multipart.next_field().await? else {
            return Err(AppError::BadRequest("No file uploaded".to_string()));
        };
        if field.name() != Some("file") {
            continue;
        }
        // a plain form value named "file" is not an upload
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(AppError::BadRequest("No file selected".to_string()));
        }
        break (filename, field.bytes().await?);
    };

    info!(filename = %filename, bytes = bytes.len(), "Received upload");

    let Some(kind) = DocumentKind::from_filename(&filename) else {
        warn!(filename = %filename, "Unsupported file type");
        return Err(AppError::BadRequest("Unsupported file type".to_string()));
    };

    let text = state.extractor.extract(kind, bytes.to_vec()).await;
    debug!(kind = kind.as_str(), chars = text.len(), "Extraction finished");

    let classification = run_classification(&state, &text);
    if !classification.accepted {
        warn!(
            reason = classification.details.reason.map(|r| r.as_str()),
            "Low confidence agreement classification, proceeding anyway"
        );
    }

    let outcome = state.analyzer.analyze_with_source(&text, None).await;
    record_analysis(outcome.source.as_str(), outcome.latency.as_millis() as f64);

    Ok(Json(EnhancedAnalysisResponse {
        filename,
        extracted_text: text,
        analysis: outcome.result,
        classification,
        document_type: outcome.document_type,
        timestamp: chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
    }))
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub accepted: bool,
    pub details: ClassificationDetail,
    pub document_type: String,
    /// Keyword hits per document category, in category order
    pub category_scores: Vec<(String, f32)>,
}

/// Classify raw text without analysis
async fn classify(
    State(state): State<AppState>,
    request: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, AppError> {
    metrics::counter!("pactlens_requests_total", "route" => "classify").increment(1);
    let Json(request) = request?;

    let Classification { accepted, details } = run_classification(&state, &request.text);
    let detected = run_classifier(state.detector.as_ref(), &request.text);

    Ok(Json(ClassifyResponse {
        accepted,
        details,
        document_type: detected.label,
        category_scores: detected.metadata.all_scores.unwrap_or_default(),
    }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: String,
    #[serde(default)]
    document_type: Option<String>,
}

/// Analyze raw text
async fn analyze(
    State(state): State<AppState>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    metrics::counter!("pactlens_requests_total", "route" => "analyze").increment(1);
    let Json(request) = request?;

    let outcome = state
        .analyzer
        .analyze_with_source(&request.text, request.document_type.as_deref())
        .await;
    record_analysis(outcome.source.as_str(), outcome.latency.as_millis() as f64);

    Ok(Json(outcome.result))
}

#[derive(Debug, Default, Deserialize)]
struct ExportForm {
    #[serde(default)]
    text: String,
}

async fn export_pdf_handler(request: Request) -> Result<Response, AppError> {
    metrics::counter!("pactlens_requests_total", "route" => "export_pdf").increment(1);
    let text = export_text(request).await?;

    let bytes = export_pdf(&text).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(attachment("application/pdf", "output.pdf", bytes))
}

async fn export_docx_handler(request: Request) -> Result<Response, AppError> {
    metrics::counter!("pactlens_requests_total", "route" => "export_docx").increment(1);
    let text = export_text(request).await?;

    let bytes = export_docx(&text).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(attachment(
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "output.docx",
        bytes,
    ))
}

/// The `text` form field, from a urlencoded or multipart body
async fn export_text(request: Request) -> Result<String, AppError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Rejected(e.status(), e.body_text()))?;
        while let Some(field) = multipart.next_field().await? {
            if field.name() == Some("text") {
                return Ok(field.text().await?);
            }
        }
        return Ok(String::new());
    }

    let Form(form) = Form::<ExportForm>::from_request(request, &()).await?;
    Ok(form.text)
}

fn attachment(content_type: &'static str, filename: &'static str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn run_classification(state: &AppState, text: &str) -> Classification {
    let start = Instant::now();
    let (accepted, details) = state.agreement.assess(text);

    metrics::histogram!("pactlens_classification_latency_us")
        .record(start.elapsed().as_micros() as f64);
    let outcome = if accepted { "accepted" } else { "rejected" };
    metrics::counter!("pactlens_classifications_total", "outcome" => outcome).increment(1);

    Classification { accepted, details }
}

fn run_classifier(classifier: &dyn Classifier, text: &str) -> ClassificationResult {
    let result = classifier.classify(text);
    metrics::histogram!("pactlens_classifier_latency_us", "classifier" => classifier.name().to_string())
        .record(result.latency_us as f64);
    result
}

fn record_analysis(source: &'static str, latency_ms: f64) {
    metrics::counter!("pactlens_analyses_total", "source" => source).increment(1);
    metrics::histogram!("pactlens_analysis_latency_ms").record(latency_ms);
}

async fn fallback() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Rejected(StatusCode, String),
    Upload(MultipartError),
    Internal(String),
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Upload(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Rejected(err.status(), err.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(err: FormRejection) -> Self {
        AppError::Rejected(err.status(), err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "bad_request"),
            AppError::Rejected(status, msg) => (status, msg, "bad_request"),
            AppError::Upload(err) => (err.status(), err.body_text(), "upload"),
            AppError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal server error: {}", msg),
                    "internal",
                )
            }
        };
        metrics::counter!("pactlens_errors_total", "kind" => kind).increment(1);

        (status, Json(json!({ "error": message }))).into_response()
    }
}
