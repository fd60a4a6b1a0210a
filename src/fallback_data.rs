//! # Fallback Dataset Module
//!
//! The fixed catalog served whenever the live provider is unconfigured,
//! degraded, or deliberately bypassed in demo mode.

use lazy_static::lazy_static;

use crate::recipe_model::{Ingredient, Recipe, RecipeId};

fn ingredient(id: i64, name: &str, amount: &str, unit: &str) -> Ingredient {
    Ingredient::new(name).with_id(id).with_amount(amount, unit)
}

lazy_static! {
    /// Sample recipes, ids 1 through 4
    pub static ref FALLBACK_RECIPES: Vec<Recipe> = vec![
        Recipe::new(
            1,
            "Spaghetti Carbonara",
            "https://images.unsplash.com/photo-1546549032-9571cd6b27df?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=387&q=80",
        )
        .with_timing(30, 4)
        .with_text(
            "A classic Italian pasta dish with eggs, cheese, pancetta, and black pepper.",
            "1. Cook spaghetti according to package directions. 2. In a separate pan, cook pancetta until crispy. 3. Beat eggs and mix with grated cheese. 4. Drain pasta and immediately add to the pan with pancetta. 5. Remove from heat and add egg mixture, stirring quickly. 6. Add black pepper and serve immediately.",
        )
        .with_extended_ingredients(vec![
            ingredient(1, "spaghetti", "400", "g"),
            ingredient(2, "eggs", "4", ""),
            ingredient(3, "pancetta", "150", "g"),
            ingredient(4, "Parmesan cheese", "50", "g"),
            ingredient(5, "black pepper", "1", "tsp"),
        ]),
        Recipe::new(
            2,
            "Avocado Toast",
            "https://images.unsplash.com/photo-1588137378633-dea1336ce1e3?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=387&q=80",
        )
        .with_timing(10, 2)
        .with_text(
            "A simple and nutritious breakfast toast topped with mashed avocado.",
            "1. Toast bread slices. 2. Mash avocado and spread on toast. 3. Season with salt, pepper, and red pepper flakes. 4. Optionally top with a poached egg.",
        )
        .with_extended_ingredients(vec![
            ingredient(1, "bread", "2", "slices"),
            ingredient(2, "avocado", "1", ""),
            ingredient(3, "salt", "1", "pinch"),
            ingredient(4, "pepper", "1", "pinch"),
            ingredient(5, "red pepper flakes", "1", "pinch"),
        ]),
        Recipe::new(
            3,
            "Chicken Curry",
            "https://images.unsplash.com/photo-1565557623262-b51c2513a641?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=387&q=80",
        )
        .with_timing(45, 4)
        .with_text(
            "A flavorful Indian-inspired curry dish with tender chicken pieces.",
            "1. Sauté onions, garlic, and ginger. 2. Add curry powder and cook until fragrant. 3. Add chicken pieces and brown. 4. Add coconut milk and simmer until chicken is cooked through. 5. Serve with rice.",
        )
        .with_extended_ingredients(vec![
            ingredient(1, "chicken thighs", "500", "g"),
            ingredient(2, "onion", "1", ""),
            ingredient(3, "garlic", "3", "cloves"),
            ingredient(4, "ginger", "1", "inch"),
            ingredient(5, "curry powder", "2", "tbsp"),
            ingredient(6, "coconut milk", "400", "ml"),
        ]),
        Recipe::new(
            4,
            "Greek Salad",
            "https://images.unsplash.com/photo-1608032077018-c921cc15d541?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=387&q=80",
        )
        .with_timing(15, 2)
        .with_text(
            "A fresh Mediterranean salad with crisp vegetables and feta cheese.",
            "1. Chop cucumber, tomatoes, and red onion. 2. Combine with olives and feta cheese. 3. Dress with olive oil, lemon juice, oregano, salt, and pepper.",
        )
        .with_extended_ingredients(vec![
            ingredient(1, "cucumber", "1", ""),
            ingredient(2, "tomatoes", "2", ""),
            ingredient(3, "red onion", "1/2", ""),
            ingredient(4, "olives", "1/4", "cup"),
            ingredient(5, "feta cheese", "100", "g"),
            ingredient(6, "olive oil", "2", "tbsp"),
            ingredient(7, "lemon juice", "1", "tbsp"),
        ]),
    ];
}

/// The full fallback catalog
pub fn fallback_recipes() -> Vec<Recipe> {
    FALLBACK_RECIPES.clone()
}

/// Fallback record for a by-id lookup
///
/// Returns the record whose numeric id equals the numeric reading of `id`,
/// otherwise the first record. Never fails.
pub fn fallback_recipe(id: &RecipeId) -> Recipe {
    let wanted = id.as_number();
    FALLBACK_RECIPES
        .iter()
        .find(|recipe| wanted.is_some() && recipe.id.as_number() == wanted)
        .unwrap_or(&FALLBACK_RECIPES[0])
        .clone()
}
