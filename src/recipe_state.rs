//! # Recipe State Module
//!
//! All recipe-related application state and the synchronous operations that
//! mutate it. Favorite status has a single source of truth, membership of an id
//! in the favorites list; the `favorite` flag on recipes returned by the read
//! accessors is computed from that membership.
//!
//! Asynchronous loads are split into [`RecipeState::begin_load`] and
//! [`RecipeState::finish_load`] so the store can await the provider between
//! them. Each load is tagged with a [`LoadTicket`]; only the newest ticket may
//! commit its result.

use log::{debug, info};

use crate::ingredient_matcher::{matches, title_matches};
use crate::provider::{DataSource, Fetched};
use crate::recipe_model::{Recipe, RecipeId};

/// Message stored when a load is rejected without a message of its own
pub const DEFAULT_LOAD_ERROR: &str = "Failed to fetch recipes";

/// Sequence tag of an in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Result of settling a load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The result was committed; carries its provenance
    Applied(DataSource),
    /// The load was rejected; carries the stored error message
    Failed(String),
    /// A newer load was started, so this result was discarded
    Superseded,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeState {
    recipes: Vec<Recipe>,
    filtered_recipes: Vec<Recipe>,
    user_recipes: Vec<Recipe>,
    favorite_recipes: Vec<Recipe>,
    selected_recipe: Option<Recipe>,
    ingredients: Vec<String>,
    loading: bool,
    error: Option<String>,
    last_source: Option<DataSource>,
    next_user_id: u64,
    latest_ticket: u64,
}

impl RecipeState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- read accessors ----

    /// Last fetched catalog result
    pub fn recipes(&self) -> Vec<Recipe> {
        self.annotate_all(&self.recipes)
    }

    /// Catalog recipes passing the active ingredient filter
    pub fn filtered_recipes(&self) -> Vec<Recipe> {
        self.annotate_all(&self.filtered_recipes)
    }

    /// User-authored recipes in insertion order
    pub fn user_recipes(&self) -> Vec<Recipe> {
        self.annotate_all(&self.user_recipes)
    }

    /// Favorited recipes, as copied when they were favorited
    pub fn favorite_recipes(&self) -> &[Recipe] {
        &self.favorite_recipes
    }

    pub fn selected_recipe(&self) -> Option<Recipe> {
        self.selected_recipe.as_ref().map(|recipe| self.annotate(recipe))
    }

    /// Active ingredient filter in insertion order
    pub fn active_ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Provenance of the last committed load
    pub fn last_source(&self) -> Option<&DataSource> {
        self.last_source.as_ref()
    }

    pub fn is_favorite(&self, id: &RecipeId) -> bool {
        self.favorite_recipes.iter().any(|recipe| &recipe.id == id)
    }

    /// User recipe with the given id
    pub fn find_user_recipe(&self, id: &RecipeId) -> Option<Recipe> {
        self.user_recipes
            .iter()
            .find(|recipe| &recipe.id == id)
            .map(|recipe| self.annotate(recipe))
    }

    /// Recipe already held locally whose id renders as `id`
    ///
    /// User recipes are searched before the catalog result.
    pub fn find_local(&self, id: &str) -> Option<Recipe> {
        self.user_recipes
            .iter()
            .chain(self.recipes.iter())
            .find(|recipe| recipe.id.to_string() == id)
            .map(|recipe| self.annotate(recipe))
    }

    /// User recipes whose title contains `query`, ignoring case
    pub fn search_user_recipes(&self, query: &str) -> Vec<Recipe> {
        self.user_recipes
            .iter()
            .filter(|recipe| title_matches(recipe, query))
            .map(|recipe| self.annotate(recipe))
            .collect()
    }

    /// Favorites whose title contains `query`, ignoring case
    pub fn search_favorites(&self, query: &str) -> Vec<Recipe> {
        self.favorite_recipes
            .iter()
            .filter(|recipe| title_matches(recipe, query))
            .cloned()
            .collect()
    }

    fn annotate(&self, recipe: &Recipe) -> Recipe {
        let mut annotated = recipe.clone();
        annotated.favorite = Some(self.is_favorite(&recipe.id));
        annotated
    }

    fn annotate_all(&self, recipes: &[Recipe]) -> Vec<Recipe> {
        recipes.iter().map(|recipe| self.annotate(recipe)).collect()
    }

    // ---- mutations ----

    /// Replace the catalog result; the active filter is not reapplied
    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) {
        debug!("Setting {} catalog recipes", recipes.len());
        self.filtered_recipes = recipes.clone();
        self.recipes = recipes;
    }

    /// Store a user-authored recipe under a freshly assigned id
    ///
    /// Any id on `recipe` is replaced. Returns the assigned id.
    pub fn add_user_recipe(&mut self, mut recipe: Recipe) -> RecipeId {
        self.next_user_id += 1;
        let id = RecipeId::Text(format!("user-{}", self.next_user_id));

        recipe.id = id.clone();
        recipe.user_added = Some(true);
        recipe.favorite = None;

        info!("Adding user recipe {} with ID: {}", recipe.title, id);
        self.user_recipes.push(recipe);
        id
    }

    /// Replace the user recipe with the same id in place
    ///
    /// Returns `false` without changing anything when no user recipe has that id.
    pub fn update_user_recipe(&mut self, recipe: Recipe) -> bool {
        match self.user_recipes.iter().position(|existing| existing.id == recipe.id) {
            Some(index) => {
                info!("Updating user recipe with ID: {}", recipe.id);
                self.user_recipes[index] = recipe;
                true
            }
            None => {
                info!("No user recipe found with ID: {}", recipe.id);
                false
            }
        }
    }

    /// Remove a user recipe and its favorite entry
    ///
    /// Returns whether anything was removed.
    pub fn delete_user_recipe(&mut self, id: &RecipeId) -> bool {
        let before = self.user_recipes.len() + self.favorite_recipes.len();
        self.user_recipes.retain(|recipe| &recipe.id != id);
        self.favorite_recipes.retain(|recipe| &recipe.id != id);
        let removed = before != self.user_recipes.len() + self.favorite_recipes.len();

        if removed {
            info!("Deleted user recipe with ID: {}", id);
        } else {
            info!("No user recipe found with ID: {}", id);
        }
        removed
    }

    /// Flip the favorite status of `recipe`
    ///
    /// Returns the new status.
    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> bool {
        if let Some(index) = self.favorite_recipes.iter().position(|fav| fav.id == recipe.id) {
            self.favorite_recipes.remove(index);
            info!("Removed recipe {} from favorites", recipe.id);
            false
        } else {
            let mut favorite = recipe.clone();
            favorite.favorite = Some(true);
            self.favorite_recipes.push(favorite);
            info!("Added recipe {} to favorites", recipe.id);
            true
        }
    }

    pub fn set_selected_recipe(&mut self, recipe: Option<Recipe>) {
        self.selected_recipe = recipe;
    }

    /// Replace the active ingredient filter and recompute the filtered recipes
    pub fn filter_recipes_by_ingredients(&mut self, ingredients: Vec<String>) {
        self.ingredients = ingredients;
        self.apply_filter();
    }

    /// Add one ingredient to the active filter
    ///
    /// The input is trimmed. Blank input and exact duplicates are rejected with
    /// `false`.
    pub fn add_filter_ingredient(&mut self, ingredient: &str) -> bool {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() || self.ingredients.iter().any(|existing| existing == ingredient) {
            return false;
        }
        let mut updated = self.ingredients.clone();
        updated.push(ingredient.to_string());
        self.filter_recipes_by_ingredients(updated);
        true
    }

    /// Remove one ingredient from the active filter
    pub fn remove_filter_ingredient(&mut self, ingredient: &str) -> bool {
        if !self.ingredients.iter().any(|existing| existing == ingredient) {
            return false;
        }
        let updated = self
            .ingredients
            .iter()
            .filter(|existing| existing.as_str() != ingredient)
            .cloned()
            .collect();
        self.filter_recipes_by_ingredients(updated);
        true
    }

    pub fn clear_filter(&mut self) {
        self.filter_recipes_by_ingredients(Vec::new());
    }

    fn apply_filter(&mut self) {
        if self.ingredients.is_empty() {
            self.filtered_recipes = self.recipes.clone();
            return;
        }

        self.filtered_recipes = self
            .recipes
            .iter()
            .filter(|recipe| matches(recipe, &self.ingredients))
            .cloned()
            .collect();
        debug!(
            "Filter {:?} kept {} of {} recipes",
            self.ingredients,
            self.filtered_recipes.len(),
            self.recipes.len()
        );
    }

    // ---- load lifecycle ----

    /// Mark a load as started and return its ticket
    ///
    /// Clears any previous error. Any earlier ticket becomes superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.latest_ticket)
    }

    /// Whether `ticket` belongs to the newest load
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Settle a load
    ///
    /// Results for superseded tickets are discarded and leave every field
    /// untouched, including `loading`, which stays set until the newest load
    /// settles.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Fetched<Vec<Recipe>>, String>) -> LoadOutcome {
        if !self.is_current(ticket) {
            debug!(
                "Discarding result of load {} superseded by load {}",
                ticket.0, self.latest_ticket
            );
            return LoadOutcome::Superseded;
        }

        self.loading = false;
        match result {
            Ok(fetched) => {
                self.set_recipes(fetched.data);
                self.last_source = Some(fetched.source.clone());
                LoadOutcome::Applied(fetched.source)
            }
            Err(message) => {
                let message = if message.is_empty() {
                    DEFAULT_LOAD_ERROR.to_string()
                } else {
                    message
                };
                self.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }
}
