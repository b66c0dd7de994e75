//! Host Commands - API for the hosting UI
//!
//! Plain async handlers over an explicit `AppContext`. Every handler returns
//! `Result<T, String>` with a user-facing error message.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::logic::config::AppConfig;
use crate::logic::dashboard::DashboardSummary;
use crate::logic::emergency::{EmergencyAction, EmergencyOverlay, EmergencyResponse, OverlayStatus};
use crate::logic::inference::{InferenceBackend, InferenceClient, DEFAULT_IMAGE_CONTENT_TYPE};
use crate::logic::storage::{credential, FileStore, HistoryLog, KeyValueStore, ScoreRecord};
use crate::logic::workflow::{Analyzer, ImageAnalysis, TextAnalysis};

// ============================================================================
// CONTEXT
// ============================================================================

/// Everything the handlers need, built once by the host
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub history: HistoryLog,
    pub overlay: Arc<EmergencyOverlay>,
    pub analyzer: Analyzer,
}

impl AppContext {
    /// File-backed context with the HTTP inference client
    pub fn init(config: AppConfig) -> Result<Self, String> {
        let store: Arc<dyn KeyValueStore> = Arc::new(
            FileStore::open(&config.data_dir).map_err(|e| format!("Failed to open store: {}", e))?,
        );
        let token = credential::resolve_token(config.env_token.clone(), store.as_ref());
        let client = InferenceClient::new(config.inference_config(token)).map_err(|e| e.to_string())?;

        log::info!(
            "Context ready (inference: {}, credential: {})",
            config.inference_base_url,
            if client.has_token() { "configured" } else { "none" }
        );
        Ok(Self::with_parts(config, store, Arc::new(client)))
    }

    /// Context over explicit collaborators
    pub fn with_parts(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn InferenceBackend>,
    ) -> Self {
        let history = HistoryLog::new(store.clone());
        let overlay = Arc::new(EmergencyOverlay::new());
        let analyzer = Analyzer::new(backend, history.clone(), overlay.clone());

        Self {
            config,
            store,
            history,
            overlay,
            analyzer,
        }
    }
}

/// Credential state, never the token itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenStatus {
    pub configured: bool,
    /// "environment", "store" or "none"
    pub source: &'static str,
    pub masked: Option<String>,
}

// ============================================================================
// ANALYSIS
// ============================================================================

/// Analyze a piece of free text
pub async fn analyze_text(ctx: &AppContext, text: &str) -> Result<TextAnalysis, String> {
    ctx.analyzer.analyze_text(text).await.map_err(|e| e.user_message())
}

/// Analyze raw image bytes
pub async fn analyze_image(
    ctx: &AppContext,
    bytes: Vec<u8>,
    content_type: Option<String>,
) -> Result<ImageAnalysis, String> {
    ctx.analyzer
        .analyze_image(bytes, content_type)
        .await
        .map_err(|e| e.user_message())
}

/// Analyze an image file from disk
pub async fn analyze_image_file(ctx: &AppContext, path: &Path) -> Result<ImageAnalysis, String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let content_type = content_type_for_path(path).to_string();
    analyze_image(ctx, bytes, Some(content_type)).await
}

/// Cancel the running analysis
pub fn cancel_analysis(ctx: &AppContext) -> bool {
    ctx.analyzer.cancel()
}

/// Image MIME type by file extension
pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => DEFAULT_IMAGE_CONTENT_TYPE,
    }
}

// ============================================================================
// HISTORY / DASHBOARD
// ============================================================================

/// Newest first
pub fn get_score_history(ctx: &AppContext) -> Vec<ScoreRecord> {
    ctx.history.read_all()
}

pub fn get_dashboard_summary(ctx: &AppContext) -> DashboardSummary {
    DashboardSummary::from_history(&ctx.history.read_all())
}

// ============================================================================
// EMERGENCY OVERLAY
// ============================================================================

pub fn get_emergency_status(ctx: &AppContext) -> OverlayStatus {
    ctx.overlay.status()
}

/// `motivation`, `breathing`, `helpline` or `dismiss`
pub fn emergency_action(ctx: &AppContext, action: &str) -> Result<EmergencyResponse, String> {
    let action: EmergencyAction = action.parse()?;
    Ok(ctx.overlay.handle(action))
}

pub fn dismiss_emergency(ctx: &AppContext) {
    ctx.overlay.dismiss();
}

// ============================================================================
// CREDENTIAL
// ============================================================================

/// Store (or clear, with an empty value) the inference token and apply it
pub fn set_token(ctx: &AppContext, token: &str) -> Result<TokenStatus, String> {
    credential::save_token(ctx.store.as_ref(), token).map_err(|e| e.to_string())?;

    let resolved = credential::resolve_token(ctx.config.env_token.clone(), ctx.store.as_ref());
    let client = InferenceClient::new(ctx.config.inference_config(resolved)).map_err(|e| e.to_string())?;
    ctx.analyzer.replace_backend(Arc::new(client));

    log::info!("Inference credential updated");
    Ok(get_token_status(ctx))
}

pub fn get_token_status(ctx: &AppContext) -> TokenStatus {
    if let Some(token) = ctx.config.env_token.as_deref() {
        return TokenStatus {
            configured: true,
            source: "environment",
            masked: Some(credential::mask_token(token)),
        };
    }

    match credential::resolve_token(None, ctx.store.as_ref()) {
        Some(token) => TokenStatus {
            configured: true,
            source: "store",
            masked: Some(credential::mask_token(&token)),
        },
        None => TokenStatus {
            configured: false,
            source: "none",
            masked: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::storage::MemoryStore;
    use std::path::PathBuf;

    fn test_context() -> AppContext {
        let config = AppConfig {
            inference_base_url: "http://127.0.0.1:9".to_string(),
            env_token: None,
            request_timeout_secs: 1,
            data_dir: PathBuf::from("unused"),
        };
        let client = InferenceClient::new(config.inference_config(None)).unwrap();
        AppContext::with_parts(config, Arc::new(MemoryStore::new()), Arc::new(client))
    }

    #[test]
    fn test_content_type_for_path() {
        assert_eq!(content_type_for_path(Path::new("face.PNG")), "image/png");
        assert_eq!(content_type_for_path(Path::new("face.jpg")), "image/jpeg");
        assert_eq!(content_type_for_path(Path::new("noext")), "image/jpeg");
    }

    #[test]
    fn test_token_status_follows_store() {
        let ctx = test_context();
        assert_eq!(get_token_status(&ctx).source, "none");

        let status = set_token(&ctx, "hf_secret_value").unwrap();
        assert!(status.configured);
        assert_eq!(status.source, "store");
        assert_eq!(status.masked.as_deref(), Some("hf_se..."));

        let cleared = set_token(&ctx, "").unwrap();
        assert!(!cleared.configured);
    }

    #[test]
    fn test_emergency_commands() {
        let ctx = test_context();
        assert!(!get_emergency_status(&ctx).visible);
        assert!(emergency_action(&ctx, "shout").is_err());

        match emergency_action(&ctx, "helpline").unwrap() {
            EmergencyResponse::Helpline { helplines, .. } => assert_eq!(helplines.len(), 3),
            other => panic!("unexpected response: {:?}", other),
        }
        dismiss_emergency(&ctx);
        assert!(!get_emergency_status(&ctx).visible);
    }

    #[tokio::test]
    async fn test_blank_text_and_missing_file() {
        let ctx = test_context();
        assert_eq!(analyze_text(&ctx, "  ").await.unwrap_err(), "Please provide some text.");

        let err = analyze_image_file(&ctx, Path::new("/definitely/not/here.png")).await.unwrap_err();
        assert!(err.starts_with("Failed to read"));
        assert!(get_score_history(&ctx).is_empty());
        assert_eq!(get_dashboard_summary(&ctx).highest, 0);
        assert!(!cancel_analysis(&ctx));
    }
}
