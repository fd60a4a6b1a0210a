//! # Ingredient Matcher
//!
//! Pure predicates deciding whether a recipe satisfies an ingredient filter or a
//! title query. Matching is case-insensitive substring matching; no stemming or
//! unit normalization is attempted.

use log::trace;

use crate::recipe_model::Recipe;

/// Ingredient names a recipe exposes for filtering
///
/// User-authored `ingredients` take priority over provider
/// `extended_ingredients`, even when the user list is empty. Returns `None` when
/// the recipe has neither field.
pub fn ingredient_names(recipe: &Recipe) -> Option<Vec<&str>> {
    if let Some(lines) = &recipe.ingredients {
        return Some(lines.iter().map(String::as_str).collect());
    }
    recipe
        .extended_ingredients
        .as_ref()
        .map(|extended| extended.iter().map(|ingredient| ingredient.name.as_str()).collect())
}

/// Check whether `recipe` satisfies every filter ingredient
///
/// Returns `true` for an empty filter. Otherwise each filter string must be a
/// case-insensitive substring of at least one ingredient name on the recipe.
///
/// # Examples
///
/// ```rust
/// use recipe_box::ingredient_matcher::matches;
/// use recipe_box::recipe_model::{Ingredient, Recipe};
///
/// let carbonara = Recipe::new(1, "Spaghetti Carbonara", "img").with_extended_ingredients(vec![
///     Ingredient::new("spaghetti"),
///     Ingredient::new("eggs"),
/// ]);
///
/// assert!(matches(&carbonara, &["EGG"]));
/// assert!(!matches(&carbonara, &["pasta"]));
/// ```
pub fn matches<S: AsRef<str>>(recipe: &Recipe, filters: &[S]) -> bool {
    if filters.is_empty() {
        return true;
    }

    let Some(names) = ingredient_names(recipe) else {
        trace!("Recipe {} has no ingredient fields, excluding from filter", recipe.id);
        return false;
    };
    let names: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();

    filters.iter().all(|filter| {
        let needle = filter.as_ref().to_lowercase();
        names.iter().any(|name| name.contains(&needle))
    })
}

/// Check whether a recipe title contains `query`, ignoring case
///
/// An empty query matches every recipe.
pub fn title_matches(recipe: &Recipe, query: &str) -> bool {
    recipe.title.to_lowercase().contains(&query.to_lowercase())
}
