//! # Recipe Provider Module
//!
//! Read access to the external recipe catalog. Every operation reports where
//! its data came from: the live provider, or the fallback dataset together with
//! the reason the provider was bypassed.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::circuit_breaker::CircuitBreaker;
use crate::fallback_data::{fallback_recipe, fallback_recipes};
use crate::provider_config::{ProviderConfig, ProviderMode};
use crate::provider_errors::ProviderError;
use crate::recipe_model::{Recipe, RecipeId};

/// Why the fallback dataset was served instead of live data
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// Demo mode is configured
    DemoMode,
    /// No usable API key is configured
    MissingCredential,
    /// Too many recent failures; the provider is not being called
    CircuitOpen,
    /// The provider call failed
    ProviderFailure(ProviderError),
}

/// Provenance of fetched data
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Live,
    Fallback(FallbackReason),
}

impl DataSource {
    /// Whether the data came from the fallback dataset
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataSource::Fallback(_))
    }
}

/// Data returned by a provider together with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Fetched<T> {
    pub fn live(data: T) -> Self {
        Self { data, source: DataSource::Live }
    }

    pub fn fallback(data: T, reason: FallbackReason) -> Self {
        Self {
            data,
            source: DataSource::Fallback(reason),
        }
    }

    /// Transform the data, keeping the provenance
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            source: self.source,
        }
    }
}

/// Read operations against a recipe catalog
///
/// An `Err` is a rejection the caller must handle; implementations that can
/// degrade gracefully report that through [`DataSource::Fallback`] instead.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Recipes using the given ingredients
    async fn search_by_ingredients(&self, ingredients: &[String]) -> Result<Fetched<Vec<Recipe>>, ProviderError>;

    /// A random selection of recipes
    async fn list_random(&self) -> Result<Fetched<Vec<Recipe>>, ProviderError>;

    /// Full information for one recipe
    async fn get_by_id(&self, id: &RecipeId) -> Result<Fetched<Recipe>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct RandomRecipes {
    recipes: Vec<Recipe>,
}

/// HTTP client for Spoonacular-compatible recipe APIs
///
/// Never rejects: demo mode, a missing credential, an open circuit, and any
/// request failure all result in the fallback dataset.
pub struct SpoonacularClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
    config: ProviderConfig,
    circuit_breaker: CircuitBreaker,
}

impl SpoonacularClient {
    /// Create a client for the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: ProviderConfig) -> anyhow::Result<Self> {
        let base_url = reqwest::Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid provider base URL {}: {}", config.base_url, e))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Provider base URL cannot carry a path: {}", config.base_url));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.recovery.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        info!(
            mode = %config.mode,
            base_url = %base_url,
            has_credential = config.has_credential(),
            "Recipe provider client initialized"
        );

        Ok(Self {
            http,
            base_url,
            circuit_breaker: CircuitBreaker::new(config.recovery.clone()),
            config,
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Credential to use for a live call, or the reason not to make one
    fn credential(&self) -> Result<&str, FallbackReason> {
        if self.config.mode == ProviderMode::Demo {
            return Err(FallbackReason::DemoMode);
        }
        let api_key = self.config.api_key.as_deref().ok_or(FallbackReason::MissingCredential)?;
        if self.circuit_breaker.is_open() {
            return Err(FallbackReason::CircuitOpen);
        }
        Ok(api_key)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Transport(format!("Invalid provider base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
        api_key: &str,
    ) -> Result<T, ProviderError> {
        let url = self.endpoint(segments)?;
        debug!(path = %url.path(), "Requesting recipes from provider");

        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("apiKey", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        Ok(response.json::<T>().await?)
    }

    async fn fetch_or_fallback<T, F>(
        &self,
        operation: &'static str,
        segments: &[&str],
        params: &[(&str, String)],
        fallback: F,
    ) -> Fetched<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let api_key = match self.credential() {
            Ok(api_key) => api_key,
            Err(reason) => {
                info!(operation, reason = ?reason, "Using fallback recipes");
                return Fetched::fallback(fallback(), reason);
            }
        };

        match self.get_json(segments, params, api_key).await {
            Ok(data) => {
                self.circuit_breaker.record_success();
                Fetched::live(data)
            }
            Err(e) => {
                self.circuit_breaker.record_failure();
                warn!(
                    operation,
                    error = %e,
                    failures = self.circuit_breaker.failure_count(),
                    "Provider request failed, using fallback recipes"
                );
                Fetched::fallback(fallback(), FallbackReason::ProviderFailure(e))
            }
        }
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn search_by_ingredients(&self, ingredients: &[String]) -> Result<Fetched<Vec<Recipe>>, ProviderError> {
        let params = [
            ("ingredients", ingredients.join(",")),
            ("number", self.config.result_count.to_string()),
        ];
        Ok(self
            .fetch_or_fallback(
                "search_by_ingredients",
                &["recipes", "findByIngredients"],
                &params,
                fallback_recipes,
            )
            .await)
    }

    async fn list_random(&self) -> Result<Fetched<Vec<Recipe>>, ProviderError> {
        let params = [("number", self.config.result_count.to_string())];
        let fetched = self
            .fetch_or_fallback("list_random", &["recipes", "random"], &params, || RandomRecipes {
                recipes: fallback_recipes(),
            })
            .await;
        Ok(fetched.map(|random| random.recipes))
    }

    async fn get_by_id(&self, id: &RecipeId) -> Result<Fetched<Recipe>, ProviderError> {
        let id_segment = id.to_string();
        Ok(self
            .fetch_or_fallback(
                "get_by_id",
                &["recipes", id_segment.as_str(), "information"],
                &[],
                || fallback_recipe(id),
            )
            .await)
    }
}
