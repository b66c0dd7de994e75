//! Analysis Orchestrator
//!
//! One run = serial classifier calls -> adapt -> aggregate -> recommend ->
//! history append -> intervention check. A transport failure aborts the run
//! before anything is written.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::types::{ImageAnalysis, TextAnalysis, WorkflowError, TEXT_EXPLANATION};
use crate::logic::adapter::{ImageSignals, TextSignals};
use crate::logic::emergency::EmergencyNotifier;
use crate::logic::inference::{InferenceBackend, ModelEndpoints, Payload};
use crate::logic::risk::{aggregate_with_breakdown, recommend, requires_intervention, RiskScore};
use crate::logic::storage::HistoryLog;

/// Clears the busy flag when a run ends, however it ends
struct RunGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Workflow orchestrator. At most one run at a time.
pub struct Analyzer {
    backend: RwLock<Arc<dyn InferenceBackend>>,
    history: HistoryLog,
    notifier: Arc<dyn EmergencyNotifier>,
    models: ModelEndpoints,
    busy: AtomicBool,
    cancel: Mutex<CancellationToken>,
}

impl Analyzer {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        history: HistoryLog,
        notifier: Arc<dyn EmergencyNotifier>,
    ) -> Self {
        Self::with_models(backend, history, notifier, ModelEndpoints::default())
    }

    pub fn with_models(
        backend: Arc<dyn InferenceBackend>,
        history: HistoryLog,
        notifier: Arc<dyn EmergencyNotifier>,
        models: ModelEndpoints,
    ) -> Self {
        Self {
            backend: RwLock::new(backend),
            history,
            notifier,
            models,
            busy: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Swap the inference backend (e.g. after the credential changed)
    pub fn replace_backend(&self, backend: Arc<dyn InferenceBackend>) {
        *self.backend.write() = backend;
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Cancel the running analysis, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        // Same lock as `begin`: a run is never busy with a stale token
        let current = self.cancel.lock();
        if !self.is_busy() {
            return false;
        }
        current.cancel();
        log::info!("Analysis cancellation requested");
        true
    }

    /// Text workflow: emotion -> toxicity -> self-harm proxy
    pub async fn analyze_text(&self, text: &str) -> Result<TextAnalysis, WorkflowError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(WorkflowError::EmptyInput("some text"));
        }

        let (_guard, token) = self.begin()?;
        let run_id = Uuid::new_v4().to_string();
        log::info!("[{}] Text analysis started ({} chars)", run_id, text.chars().count());

        let emotion = self.call(&token, &self.models.text_emotion, Payload::text(text)).await?;
        let toxicity = self.call(&token, &self.models.toxicity, Payload::text(text)).await?;
        let self_harm = self.call(&token, &self.models.self_harm_proxy, Payload::text(text)).await?;

        let signals = TextSignals::from_responses(&emotion, &toxicity, &self_harm);
        let assessment = aggregate_with_breakdown(&signals.to_bundle());
        let (timestamp, intervention_triggered) = self.conclude(&run_id, &token, assessment.score).await?;

        Ok(TextAnalysis {
            run_id,
            timestamp,
            emotion: signals.emotion,
            polarity: signals.polarity,
            toxicity: signals.toxicity,
            self_harm_probability: signals.self_harm_probability,
            score: assessment.score,
            recommendation: recommend(assessment.score),
            breakdown: assessment.breakdown,
            explanation: TEXT_EXPLANATION.to_string(),
            intervention_triggered,
        })
    }

    /// Image workflow: facial emotion -> scene labels, same bytes for both
    pub async fn analyze_image(
        &self,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ImageAnalysis, WorkflowError> {
        if bytes.is_empty() {
            return Err(WorkflowError::EmptyInput("an image"));
        }

        let (_guard, token) = self.begin()?;
        let run_id = Uuid::new_v4().to_string();
        log::info!("[{}] Image analysis started ({} bytes)", run_id, bytes.len());

        let facial = self
            .call(&token, &self.models.facial_emotion, Payload::image(bytes.clone(), content_type.clone()))
            .await?;
        let labels = self
            .call(&token, &self.models.image_labels, Payload::image(bytes, content_type))
            .await?;

        let signals = ImageSignals::from_responses(&facial, &labels);
        let assessment = aggregate_with_breakdown(&signals.to_bundle());
        let (timestamp, intervention_triggered) = self.conclude(&run_id, &token, assessment.score).await?;

        Ok(ImageAnalysis {
            run_id,
            timestamp,
            depressive_indicators: signals.has_depressive_indicators(),
            facial_emotion: signals.emotion,
            sentiment: signals.sentiment,
            score: assessment.score,
            recommendation: recommend(assessment.score),
            breakdown: assessment.breakdown,
            intervention_triggered,
        })
    }

    /// Claim the run slot and arm a fresh cancellation token
    fn begin(&self) -> Result<(RunGuard<'_>, CancellationToken), WorkflowError> {
        let mut current = self.cancel.lock();
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::warn!("Analysis rejected: another run is in progress");
            return Err(WorkflowError::Busy);
        }

        let token = CancellationToken::new();
        *current = token.clone();
        Ok((RunGuard { busy: &self.busy }, token))
    }

    async fn call(
        &self,
        token: &CancellationToken,
        model: &str,
        payload: Payload,
    ) -> Result<Value, WorkflowError> {
        let backend = self.backend.read().clone();
        log::debug!("Calling classifier {}", model);

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(WorkflowError::Cancelled),
            result = backend.invoke(model, payload) => result.map_err(|e| {
                log::error!("Classifier {} failed: {}", model, e);
                WorkflowError::Inference(e)
            }),
        }
    }

    /// Persist and maybe raise the overlay. Storage failures are logged; the
    /// intervention still fires.
    async fn conclude(
        &self,
        run_id: &str,
        token: &CancellationToken,
        score: RiskScore,
    ) -> Result<(i64, bool), WorkflowError> {
        if token.is_cancelled() {
            return Err(WorkflowError::Cancelled);
        }

        // The file store writes synchronously
        let history = self.history.clone();
        let timestamp = match tokio::task::spawn_blocking(move || history.append(score)).await {
            Ok(Ok(record)) => record.timestamp,
            Ok(Err(e)) => {
                log::error!("[{}] Failed to record score: {}", run_id, e);
                Utc::now().timestamp_millis()
            }
            Err(e) => {
                log::error!("[{}] History task failed: {}", run_id, e);
                Utc::now().timestamp_millis()
            }
        };

        let intervention = requires_intervention(score);
        log::info!(
            "[{}] Final score {} ({}){}",
            run_id,
            score,
            recommend(score).as_str(),
            if intervention { " - intervention" } else { "" }
        );
        if intervention {
            self.notifier.show(score);
        }

        Ok((timestamp, intervention))
    }
}
