//! # Recipe Box
//!
//! Recipe browsing core: search a recipe catalog by ingredients, keep a personal
//! collection of recipes, mark favorites, and filter results by ingredient.
//! State lives in memory for the session only. The catalog comes from a
//! Spoonacular-compatible API, or from a bundled dataset when the API is not
//! configured or not reachable.

pub mod circuit_breaker;
pub mod fallback_data;
pub mod ingredient_matcher;
pub mod markup;
pub mod provider;
pub mod provider_config;
pub mod provider_errors;
pub mod recipe_model;
pub mod recipe_state;
pub mod store;

pub use provider::{DataSource, FallbackReason, Fetched, RecipeProvider, SpoonacularClient};
pub use provider_config::{ProviderConfig, ProviderMode};
pub use provider_errors::ProviderError;
pub use recipe_model::{Ingredient, Recipe, RecipeDraft, RecipeId};
pub use recipe_state::{LoadOutcome, RecipeState};
pub use store::RecipeStore;
