//! # Recipe Store Module
//!
//! The store owns the [`RecipeState`] and a [`RecipeProvider`]. It is the only
//! way callers read or change recipe state: synchronous operations apply
//! immediately, and the async loads await the provider between two short
//! critical sections. The state lock is never held across an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::provider::{Fetched, RecipeProvider, SpoonacularClient};
use crate::provider_errors::ProviderError;
use crate::recipe_model::{Recipe, RecipeId};
use crate::recipe_state::{LoadOutcome, LoadTicket, RecipeState};

pub struct RecipeStore<P = SpoonacularClient> {
    provider: P,
    state: Mutex<RecipeState>,
}

impl<P: RecipeProvider> RecipeStore<P> {
    /// Create a store with empty state
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: Mutex::new(RecipeState::new()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn state(&self) -> MutexGuard<'_, RecipeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> RecipeState {
        self.state().clone()
    }

    /// Read from the current state without copying it
    pub fn read<R>(&self, f: impl FnOnce(&RecipeState) -> R) -> R {
        f(&self.state())
    }

    pub fn set_recipes(&self, recipes: Vec<Recipe>) {
        self.state().set_recipes(recipes);
    }

    pub fn add_user_recipe(&self, recipe: Recipe) -> RecipeId {
        self.state().add_user_recipe(recipe)
    }

    pub fn update_user_recipe(&self, recipe: Recipe) -> bool {
        self.state().update_user_recipe(recipe)
    }

    pub fn delete_user_recipe(&self, id: &RecipeId) -> bool {
        self.state().delete_user_recipe(id)
    }

    pub fn toggle_favorite(&self, recipe: &Recipe) -> bool {
        self.state().toggle_favorite(recipe)
    }

    pub fn set_selected_recipe(&self, recipe: Option<Recipe>) {
        self.state().set_selected_recipe(recipe);
    }

    pub fn filter_recipes_by_ingredients(&self, ingredients: Vec<String>) {
        self.state().filter_recipes_by_ingredients(ingredients);
    }

    pub fn add_filter_ingredient(&self, ingredient: &str) -> bool {
        self.state().add_filter_ingredient(ingredient)
    }

    pub fn remove_filter_ingredient(&self, ingredient: &str) -> bool {
        self.state().remove_filter_ingredient(ingredient)
    }

    pub fn clear_filter(&self) {
        self.state().clear_filter();
    }

    /// Load catalog recipes matching `ingredients`
    ///
    /// Sets `loading` and clears `error` before calling the provider. The result
    /// is committed only if no newer load was started in the meantime.
    pub async fn fetch_by_ingredients(&self, ingredients: Vec<String>) -> LoadOutcome {
        let ticket = self.state().begin_load();
        info!(
            ticket = ticket.sequence(),
            ingredients = ?ingredients,
            "Fetching recipes by ingredients"
        );

        let result = self.provider.search_by_ingredients(&ingredients).await;
        self.settle(ticket, result)
    }

    /// Load a random selection of catalog recipes
    pub async fn fetch_random(&self) -> LoadOutcome {
        let ticket = self.state().begin_load();
        info!(ticket = ticket.sequence(), "Fetching random recipes");

        let result = self.provider.list_random().await;
        self.settle(ticket, result)
    }

    fn settle(&self, ticket: LoadTicket, result: Result<Fetched<Vec<Recipe>>, ProviderError>) -> LoadOutcome {
        let outcome = self.state().finish_load(ticket, result.map_err(|e| e.to_string()));
        match &outcome {
            LoadOutcome::Applied(source) if source.is_fallback() => {
                warn!(ticket = ticket.sequence(), source = ?source, "Recipes loaded from fallback dataset");
            }
            LoadOutcome::Applied(_) => {
                info!(ticket = ticket.sequence(), "Recipes loaded from provider");
            }
            LoadOutcome::Failed(message) => {
                warn!(ticket = ticket.sequence(), error = %message, "Recipe load failed");
            }
            LoadOutcome::Superseded => {
                debug!(ticket = ticket.sequence(), "Recipe load superseded by a newer request");
            }
        }
        outcome
    }

    /// Resolve a recipe for the detail view and select it
    ///
    /// Looks in the user's recipes first, then the current catalog result, and
    /// only then asks the provider. A provider rejection leaves the selection
    /// unchanged.
    pub async fn load_recipe_detail(&self, id: &RecipeId) -> Result<Recipe, ProviderError> {
        let local = self.state().find_local(&id.to_string());
        if let Some(recipe) = local {
            debug!(recipe_id = %id, "Recipe detail resolved locally");
            self.set_selected_recipe(Some(recipe.clone()));
            return Ok(recipe);
        }

        let fetched = self.provider.get_by_id(id).await.map_err(|e| {
            warn!(recipe_id = %id, error = %e, "Failed to load recipe details");
            e
        })?;
        if fetched.source.is_fallback() {
            warn!(recipe_id = %id, source = ?fetched.source, "Recipe detail served from fallback dataset");
        }

        let mut state = self.state();
        state.set_selected_recipe(Some(fetched.data));
        state
            .selected_recipe()
            .ok_or_else(|| ProviderError::Rejected("Selected recipe disappeared".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback_data::fallback_recipes;
    use crate::provider_config::ProviderConfig;

    fn offline_store() -> RecipeStore {
        RecipeStore::new(SpoonacularClient::new(ProviderConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_random_without_credential_uses_fallback() {
        let store = offline_store();

        let outcome = store.fetch_random().await;
        assert!(matches!(outcome, LoadOutcome::Applied(ref source) if source.is_fallback()));

        let state = store.snapshot();
        assert_eq!(state.recipes().len(), 4);
        assert!(!state.is_loading());
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_load_recipe_detail_prefers_user_recipe() {
        let store = offline_store();
        let id = store.add_user_recipe(Recipe::new("x", "Family Chili", "img").with_ingredients(vec!["beans"]));

        let recipe = store.load_recipe_detail(&id).await.unwrap();
        assert_eq!(recipe.title, "Family Chili");
        assert_eq!(store.read(|s| s.selected_recipe().map(|r| r.title)), Some("Family Chili".to_string()));
    }

    #[tokio::test]
    async fn test_load_recipe_detail_falls_through_to_provider() {
        let store = offline_store();

        let recipe = store.load_recipe_detail(&RecipeId::Number(2)).await.unwrap();
        assert_eq!(recipe.title, "Avocado Toast");
        assert_eq!(recipe.favorite, Some(false));
    }

    #[test]
    fn test_sync_operations_delegate_to_state() {
        let store = offline_store();
        store.set_recipes(fallback_recipes());
        store.filter_recipes_by_ingredients(vec!["feta".to_string()]);
        assert_eq!(store.read(|s| s.filtered_recipes().len()), 1);

        let salad = store.read(|s| s.filtered_recipes()[0].clone());
        assert!(store.toggle_favorite(&salad));
        assert!(store.read(|s| s.is_favorite(&salad.id)));

        store.clear_filter();
        assert_eq!(store.read(|s| s.filtered_recipes().len()), 4);
    }
}
