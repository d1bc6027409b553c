//! Select Models use case
//!
//! Ranks the primary provider's catalog for the cascade. Ranking is
//! recomputed on every call; nothing is cached between requests.

use crate::ports::llm_gateway::{ModelGateway, ProviderError};
use std::sync::Arc;
use studybuddy_domain::{ModelDescriptor, RankingPolicy};
use tracing::{debug, warn};

/// Produces the ordered candidate models of the primary tier
pub struct ModelSelector {
    gateway: Arc<dyn ModelGateway>,
    policy: RankingPolicy,
}

impl ModelSelector {
    pub fn new(gateway: Arc<dyn ModelGateway>, policy: RankingPolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Ranked models, or the catalog error.
    ///
    /// An empty result is possible when no catalog entry is eligible.
    pub async fn try_ranked_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        let catalog = self.gateway.list_models().await?;
        let ranked = self.policy.rank_catalog(&catalog);
        debug!(
            "Ranked {} of {} catalog models: {:?}",
            ranked.len(),
            catalog.len(),
            ranked.iter().map(|m| m.identifier.as_str()).collect::<Vec<_>>()
        );
        Ok(ranked)
    }

    /// Ranked models, never empty.
    ///
    /// A failed catalog call or an empty ranking yields the single
    /// fallback model instead.
    pub async fn ranked_models(&self) -> Vec<ModelDescriptor> {
        match self.try_ranked_models().await {
            Ok(ranked) if !ranked.is_empty() => ranked,
            Ok(_) => {
                warn!(
                    "No eligible {} models in catalog, using {}",
                    self.gateway.name(),
                    self.policy.fallback_model
                );
                self.policy.fallback()
            }
            Err(e) => {
                warn!(
                    "Listing {} models failed ({}), using {}",
                    self.gateway.name(),
                    e,
                    self.policy.fallback_model
                );
                self.policy.fallback()
            }
        }
    }
}
