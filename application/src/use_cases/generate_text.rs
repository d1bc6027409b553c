//! Generate Text use case
//!
//! Drives the provider cascade:
//!
//! 1. **Primary**: every ranked model, retrying a model once after a
//!    rate-limit signal
//! 2. **Secondary**: a single call to the fixed fallback model
//! 3. **Tertiary**: a single call to the credential-free endpoint
//!
//! Each tier runs only when the previous one failed. Failures are folded
//! into an ordered log that is returned only after the last tier fails.

use crate::ports::llm_gateway::{ModelGateway, ProviderError, TextGateway};
use crate::ports::progress::{GenerationProgress, NoProgress};
use crate::use_cases::select_models::ModelSelector;
use std::sync::Arc;
use std::time::Duration;
use studybuddy_domain::study::NO_PROVIDER_ATTEMPTED;
use studybuddy_domain::{GeneratedText, GenerationPolicy, GenerationRequest, RankingPolicy};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Every tier failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("ALL AI SYSTEMS BUSY (Quota Exceeded). Errors: {}", join_log(.errors))]
    QuotaExceeded { errors: Vec<ProviderError> },

    #[error("All AI Providers Failed. Details: {}", join_log(.errors))]
    AllProvidersFailed { errors: Vec<ProviderError> },
}

fn join_log(errors: &[ProviderError]) -> String {
    if errors.is_empty() {
        return NO_PROVIDER_ATTEMPTED.to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl GenerationError {
    /// Tag the error log: any rate-limit entry makes it a quota failure.
    pub fn from_log(errors: Vec<ProviderError>) -> Self {
        if errors.iter().any(ProviderError::is_rate_limited) {
            Self::QuotaExceeded { errors }
        } else {
            Self::AllProvidersFailed { errors }
        }
    }

    pub fn errors(&self) -> &[ProviderError] {
        match self {
            Self::QuotaExceeded { errors } | Self::AllProvidersFailed { errors } => errors,
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

/// Same-model retry behavior of the primary tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per model, counting the first. Zero is treated as one.
    pub attempts_per_model: u32,
    /// Pause before a rate-limited retry
    pub rate_limit_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&GenerationPolicy::default())
    }
}

impl From<&GenerationPolicy> for RetryPolicy {
    fn from(policy: &GenerationPolicy) -> Self {
        Self {
            attempts_per_model: policy.attempts_per_model,
            rate_limit_delay: Duration::from_millis(policy.rate_limit_delay_ms),
        }
    }
}

impl RetryPolicy {
    fn attempts(&self) -> u32 {
        self.attempts_per_model.max(1)
    }
}

/// A tier is either wired to a gateway or disabled with a reason that
/// is reported in the error log without making a call.
enum Tier<T: ?Sized> {
    Enabled(Arc<T>),
    Disabled(ProviderError),
}

struct PrimaryTier {
    gateway: Arc<dyn ModelGateway>,
    selector: ModelSelector,
}

/// Use case for generating text through the provider cascade
pub struct GenerationOrchestrator {
    primary: Tier<PrimaryTier>,
    secondary: Tier<dyn TextGateway>,
    tertiary: Arc<dyn TextGateway>,
    retry: RetryPolicy,
}

impl GenerationOrchestrator {
    /// Orchestrator with only the tertiary tier enabled
    pub fn new(tertiary: Arc<dyn TextGateway>) -> Self {
        Self {
            primary: Tier::Disabled(ProviderError::auth_missing(
                "gemini",
                "no credential configured",
            )),
            secondary: Tier::Disabled(ProviderError::auth_missing(
                "huggingface",
                "no credential configured",
            )),
            tertiary,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_primary(mut self, gateway: Arc<dyn ModelGateway>, ranking: RankingPolicy) -> Self {
        let selector = ModelSelector::new(Arc::clone(&gateway), ranking);
        self.primary = Tier::Enabled(Arc::new(PrimaryTier { gateway, selector }));
        self
    }

    pub fn without_primary(mut self, reason: ProviderError) -> Self {
        self.primary = Tier::Disabled(reason);
        self
    }

    pub fn with_secondary(mut self, gateway: Arc<dyn TextGateway>) -> Self {
        self.secondary = Tier::Enabled(gateway);
        self
    }

    pub fn without_secondary(mut self, reason: ProviderError) -> Self {
        self.secondary = Tier::Disabled(reason);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Model selector of the primary tier, if enabled
    pub fn selector(&self) -> Option<&ModelSelector> {
        match &self.primary {
            Tier::Enabled(primary) => Some(&primary.selector),
            Tier::Disabled(_) => None,
        }
    }

    /// Execute the cascade with default (no-op) progress
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedText, GenerationError> {
        self.generate_with_progress(request, &NoProgress).await
    }

    /// Execute the cascade with progress callbacks
    pub async fn generate_with_progress(
        &self,
        request: &GenerationRequest,
        progress: &dyn GenerationProgress,
    ) -> Result<GeneratedText, GenerationError> {
        let mut errors = Vec::new();

        match &self.primary {
            Tier::Enabled(primary) => {
                progress.on_tier_start(primary.gateway.name());
                match self.run_primary(primary, request, progress).await {
                    Ok(text) => return Ok(Self::finish(text, progress)),
                    Err(tier_errors) => {
                        warn!(
                            "{} tier failed after {} model(s)",
                            primary.gateway.name(),
                            tier_errors.len()
                        );
                        errors.extend(tier_errors);
                    }
                }
            }
            Tier::Disabled(reason) => {
                debug!("Skipping primary tier: {}", reason);
                errors.push(reason.clone());
            }
        }

        match &self.secondary {
            Tier::Enabled(gateway) => {
                info!("Attempting {} fallback", gateway.name());
                match Self::run_single(gateway.as_ref(), request, progress).await {
                    Ok(text) => return Ok(Self::finish(text, progress)),
                    Err(e) => errors.push(e),
                }
            }
            Tier::Disabled(reason) => {
                debug!("Skipping secondary tier: {}", reason);
                errors.push(reason.clone());
            }
        }

        info!("Attempting {} fallback", self.tertiary.name());
        match Self::run_single(self.tertiary.as_ref(), request, progress).await {
            Ok(text) => return Ok(Self::finish(text, progress)),
            Err(e) => errors.push(e),
        }

        let error = GenerationError::from_log(errors);
        warn!("{}", error);
        progress.on_exhausted();
        Err(error)
    }

    /// Try each ranked model in order. Returns the per-model errors when
    /// none succeeded.
    async fn run_primary(
        &self,
        primary: &PrimaryTier,
        request: &GenerationRequest,
        progress: &dyn GenerationProgress,
    ) -> Result<GeneratedText, Vec<ProviderError>> {
        let models = primary.selector.ranked_models().await;
        let attempts = self.retry.attempts();
        let mut errors = Vec::new();

        for model in &models {
            let mut last_error = None;

            for attempt in 1..=attempts {
                progress.on_model_attempt(&model.identifier, attempt);
                debug!("Trying {} (attempt {})", model.identifier, attempt);

                match primary.gateway.generate(&model.identifier, request).await {
                    Ok(text) => {
                        info!("{} answered", model.identifier);
                        return Ok(text);
                    }
                    Err(e) if e.is_rate_limited() && attempt < attempts => {
                        warn!(
                            "{} rate limited, retrying in {:?}",
                            model.identifier, self.retry.rate_limit_delay
                        );
                        progress.on_rate_limited(&model.identifier, self.retry.rate_limit_delay);
                        tokio::time::sleep(self.retry.rate_limit_delay).await;
                        last_error = Some(e);
                    }
                    Err(e) => {
                        warn!("{} failed: {}", model.identifier, e);
                        last_error = Some(e);
                        break;
                    }
                }
            }

            if let Some(e) = last_error {
                errors.push(e);
            }
        }

        if let Some(last) = errors.last() {
            progress.on_tier_failed(primary.gateway.name(), last);
        }
        Err(errors)
    }

    async fn run_single(
        gateway: &dyn TextGateway,
        request: &GenerationRequest,
        progress: &dyn GenerationProgress,
    ) -> Result<GeneratedText, ProviderError> {
        progress.on_tier_start(gateway.name());
        gateway.generate(request).await.inspect_err(|e| {
            warn!("{} failed: {}", gateway.name(), e);
            progress.on_tier_failed(gateway.name(), e);
        })
    }

    fn finish(text: GeneratedText, progress: &dyn GenerationProgress) -> GeneratedText {
        progress.on_complete(&text.provider);
        text
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use studybuddy_domain::CatalogModel;

    // ==================== Test Mocks ====================

    /// Primary-tier double that replays scripted outcomes per call
    pub(crate) struct ScriptedModelGateway {
        catalog: Vec<CatalogModel>,
        outcomes: Mutex<VecDeque<Result<String, ProviderError>>>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl ScriptedModelGateway {
        pub(crate) fn new(models: &[&str], outcomes: Vec<Result<String, ProviderError>>) -> Self {
            Self {
                catalog: models
                    .iter()
                    .map(|m| CatalogModel::new(*m, &["generateContent"]))
                    .collect(),
                outcomes: Mutex::new(VecDeque::from(outcomes)),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn call_log(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelGateway for ScriptedModelGateway {
        fn name(&self) -> &str {
            "gemini"
        }

        async fn list_models(&self) -> Result<Vec<CatalogModel>, ProviderError> {
            Ok(self.catalog.clone())
        }

        async fn generate(
            &self,
            model: &str,
            _request: &GenerationRequest,
        ) -> Result<GeneratedText, ProviderError> {
            self.calls.lock().unwrap().push(model.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::unavailable("gemini", "script exhausted")))
                .map(|text| GeneratedText::new(text, "gemini"))
        }
    }

    /// Fallback-tier double with a fixed outcome and a call counter
    pub(crate) struct FixedTextGateway {
        name: &'static str,
        outcome: Result<String, ProviderError>,
        pub(crate) calls: AtomicUsize,
        pub(crate) last_prompt: Mutex<Option<GenerationRequest>>,
    }

    impl FixedTextGateway {
        pub(crate) fn ok(name: &'static str, text: &str) -> Self {
            Self {
                name,
                outcome: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        pub(crate) fn failing(name: &'static str, error: ProviderError) -> Self {
            Self {
                name,
                outcome: Err(error),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGateway for FixedTextGateway {
        fn name(&self) -> &str {
            self.name
        }

        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GeneratedText, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(request.clone());
            self.outcome
                .clone()
                .map(|text| GeneratedText::new(text, self.name))
        }
    }

    fn no_delay() -> RetryPolicy {
        RetryPolicy {
            attempts_per_model: 2,
            rate_limit_delay: Duration::ZERO,
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::text("Explain osmosis")
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_primary_success_short_circuits() {
        let primary = Arc::new(ScriptedModelGateway::new(
            &["models/gemini-1.5-flash"],
            vec![Ok("primary answer".to_string())],
        ));
        let secondary = Arc::new(FixedTextGateway::ok("huggingface", "secondary"));
        let tertiary = Arc::new(FixedTextGateway::ok("pollinations", "tertiary"));

        let orchestrator = GenerationOrchestrator::new(tertiary.clone())
            .with_primary(primary.clone(), RankingPolicy::default())
            .with_secondary(secondary.clone())
            .with_retry_policy(no_delay());

        let result = orchestrator.generate(&request()).await.unwrap();
        assert_eq!(result.text, "primary answer");
        assert_eq!(result.provider, "gemini");
        assert_eq!(secondary.call_count(), 0);
        assert_eq!(tertiary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_secondary_answers_when_primary_fails() {
        let primary = Arc::new(ScriptedModelGateway::new(
            &["models/gemini-pro"],
            vec![
                Err(ProviderError::unavailable("gemini", "HTTP 500")),
                Err(ProviderError::unavailable("gemini", "HTTP 500")),
            ],
        ));
        let secondary = Arc::new(FixedTextGateway::ok("huggingface", "secondary answer"));
        let tertiary = Arc::new(FixedTextGateway::ok("pollinations", "tertiary"));

        let orchestrator = GenerationOrchestrator::new(tertiary.clone())
            .with_primary(primary.clone(), RankingPolicy::default())
            .with_secondary(secondary.clone())
            .with_retry_policy(no_delay());

        let result = orchestrator.generate(&request()).await.unwrap();
        assert_eq!(result.text, "secondary answer");
        assert_eq!(secondary.call_count(), 1);
        assert_eq!(tertiary.call_count(), 0);
        // Non-rate-limit failure moves on without a same-model retry
        assert_eq!(primary.call_log(), vec!["models/gemini-pro"]);
    }

    #[tokio::test]
    async fn test_rate_limit_retries_same_model_once() {
        let primary = Arc::new(ScriptedModelGateway::new(
            &["models/gemini-2.0-flash", "models/gemini-pro"],
            vec![
                Err(ProviderError::rate_limited("gemini", "429 quota")),
                Err(ProviderError::rate_limited("gemini", "429 quota")),
                Ok("second model".to_string()),
            ],
        ));
        let tertiary = Arc::new(FixedTextGateway::ok("pollinations", "tertiary"));

        let orchestrator = GenerationOrchestrator::new(tertiary.clone())
            .with_primary(primary.clone(), RankingPolicy::default())
            .with_retry_policy(no_delay());

        let result = orchestrator.generate(&request()).await.unwrap();
        assert_eq!(result.text, "second model");
        assert_eq!(
            primary.call_log(),
            vec![
                "models/gemini-2.0-flash",
                "models/gemini-2.0-flash",
                "models/gemini-pro"
            ]
        );
        assert_eq!(tertiary.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_waits_before_retry() {
        let primary = Arc::new(ScriptedModelGateway::new(
            &["models/gemini-1.5-pro"],
            vec![
                Err(ProviderError::rate_limited("gemini", "429")),
                Ok("after wait".to_string()),
            ],
        ));
        let tertiary = Arc::new(FixedTextGateway::ok("pollinations", "tertiary"));
        let orchestrator = GenerationOrchestrator::new(tertiary)
            .with_primary(primary, RankingPolicy::default());

        let started = tokio::time::Instant::now();
        let result = orchestrator.generate(&request()).await.unwrap();
        assert_eq!(result.text, "after wait");
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_disabled_tiers_fall_through_to_tertiary() {
        let tertiary = Arc::new(FixedTextGateway::ok("pollinations", "free answer"));
        let orchestrator = GenerationOrchestrator::new(tertiary.clone());

        let result = orchestrator.generate(&request()).await.unwrap();
        assert_eq!(result.text, "free answer");
        assert_eq!(tertiary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_without_rate_limit() {
        let tertiary = Arc::new(FixedTextGateway::failing(
            "pollinations",
            ProviderError::unavailable("pollinations", "HTTP 502"),
        ));
        let orchestrator = GenerationOrchestrator::new(tertiary)
            .without_secondary(ProviderError::auth_missing(
                "huggingface",
                "HUGGINGFACE_API_KEY is not set",
            ));

        let err = orchestrator.generate(&request()).await.unwrap_err();
        assert!(!err.is_quota_exceeded());
        assert_eq!(err.errors().len(), 3);
        assert_eq!(
            err.to_string(),
            "All AI Providers Failed. Details: gemini disabled: no credential configured; \
             huggingface disabled: HUGGINGFACE_API_KEY is not set; \
             pollinations unavailable: HTTP 502"
        );
    }

    #[tokio::test]
    async fn test_exhaustion_with_rate_limit_is_quota_exceeded() {
        let primary = Arc::new(ScriptedModelGateway::new(
            &["models/gemini-1.5-flash"],
            vec![
                Err(ProviderError::rate_limited("gemini", "429 quota")),
                Err(ProviderError::rate_limited("gemini", "429 quota")),
            ],
        ));
        let secondary = Arc::new(FixedTextGateway::failing(
            "huggingface",
            ProviderError::unavailable("huggingface", "HTTP 503"),
        ));
        let tertiary = Arc::new(FixedTextGateway::failing(
            "pollinations",
            ProviderError::unavailable("pollinations", "timeout"),
        ));

        let orchestrator = GenerationOrchestrator::new(tertiary)
            .with_primary(primary, RankingPolicy::default())
            .with_secondary(secondary)
            .with_retry_policy(no_delay());

        let err = orchestrator.generate(&request()).await.unwrap_err();
        assert!(err.is_quota_exceeded());
        assert!(
            err.to_string()
                .starts_with("ALL AI SYSTEMS BUSY (Quota Exceeded). Errors: gemini rate limited")
        );
    }

    #[test]
    fn test_empty_log_reports_sentinel() {
        let err = GenerationError::from_log(Vec::new());
        assert_eq!(
            err.to_string(),
            "All AI Providers Failed. Details: no provider attempted"
        );
    }
}
