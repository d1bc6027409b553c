//! Ranking of the primary provider's model catalog.
//!
//! Pure logic: the catalog is fetched by an adapter, filtered and ordered
//! here. The resulting order decides which model the cascade tries first.

/// Generation method a catalog entry must advertise to be eligible
pub const GENERATE_CONTENT: &str = "generateContent";

/// One entry of the provider's model catalog, as listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogModel {
    pub name: String,
    pub supported_methods: Vec<String>,
}

impl CatalogModel {
    pub fn new(name: impl Into<String>, supported_methods: &[&str]) -> Self {
        Self {
            name: name.into(),
            supported_methods: supported_methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn supports_generation(&self) -> bool {
        self.supported_methods.iter().any(|m| m == GENERATE_CONTENT)
    }
}

/// A ranked candidate model. Lower rank is tried first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub identifier: String,
    pub rank: usize,
}

/// Filtering and ordering rules for the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingPolicy {
    /// Preference substrings, most preferred first
    pub preferred: Vec<String>,
    /// Substring every eligible model name must contain
    pub family_marker: String,
    /// Substring that disqualifies a model (no JSON mode support)
    pub excluded_family: String,
    /// Used when the catalog cannot be fetched or yields nothing
    pub fallback_model: String,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            preferred: [
                "gemini-2.0-flash",
                "gemini-1.5-pro",
                "gemini-1.5-flash",
                "gemini-pro",
                "gemini-1.0-pro",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            family_marker: "gemini".to_string(),
            excluded_family: "gemma".to_string(),
            fallback_model: "models/gemini-1.5-flash".to_string(),
        }
    }
}

impl RankingPolicy {
    /// Whether a model name belongs to the usable family (case-insensitive)
    pub fn is_eligible(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        let excluded = self.excluded_family.trim().to_lowercase();
        lower.contains(&self.family_marker.to_lowercase())
            && (excluded.is_empty() || !lower.contains(&excluded))
    }

    /// Rank catalog entries that support content generation.
    pub fn rank_catalog(&self, catalog: &[CatalogModel]) -> Vec<ModelDescriptor> {
        let names: Vec<&str> = catalog
            .iter()
            .filter(|m| m.supports_generation())
            .map(|m| m.name.as_str())
            .collect();
        self.rank_names(&names)
    }

    /// Rank model names.
    ///
    /// 1. For each preference, the first not-yet-taken eligible name that
    ///    contains it.
    /// 2. Every other eligible name, in catalog order.
    pub fn rank_names<S: AsRef<str>>(&self, names: &[S]) -> Vec<ModelDescriptor> {
        let eligible: Vec<&str> = names
            .iter()
            .map(|name| -> &str { name.as_ref() })
            .filter(|name| self.is_eligible(name))
            .collect();

        let mut taken = vec![false; eligible.len()];
        let mut ordered: Vec<&str> = Vec::with_capacity(eligible.len());

        for preference in &self.preferred {
            if let Some(idx) = eligible
                .iter()
                .enumerate()
                .position(|(i, name)| !taken[i] && name.contains(preference.as_str()))
            {
                taken[idx] = true;
                ordered.push(eligible[idx]);
            }
        }

        for (i, name) in eligible.iter().enumerate() {
            if !taken[i] {
                ordered.push(name);
            }
        }

        ordered
            .into_iter()
            .enumerate()
            .map(|(rank, identifier)| ModelDescriptor {
                identifier: identifier.to_string(),
                rank,
            })
            .collect()
    }

    /// Single-element candidate list used when ranking is impossible
    pub fn fallback(&self) -> Vec<ModelDescriptor> {
        vec![ModelDescriptor {
            identifier: self.fallback_model.clone(),
            rank: 0,
        }]
    }
}
