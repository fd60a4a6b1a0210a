//! # Recipe Data Model
//!
//! This module defines the data structures shared by the provider client and the
//! state container: catalog and user-authored recipes, their ingredients, and the
//! draft type used when a user creates or edits a recipe.
//!
//! ## Core Concepts
//!
//! - **Recipe**: a dish, either from the catalog or written by the user
//! - **RecipeId**: numeric (catalog) or textual (user-authored) identity
//! - **Ingredient**: provider-format ingredient with free-form amount and unit
//! - **RecipeDraft**: unvalidated user input for a new or edited recipe
//!
//! ## Usage
//!
//! ```rust
//! use recipe_box::recipe_model::{Ingredient, Recipe, RecipeId};
//!
//! let toast = Recipe::new(RecipeId::Number(2), "Avocado Toast", "https://example.com/toast.jpg")
//!     .with_extended_ingredients(vec![
//!         Ingredient::new("bread").with_amount("2", "slices"),
//!         Ingredient::new("avocado").with_amount("1", ""),
//!     ]);
//!
//! assert_eq!(toast.extended_ingredients.as_ref().map(Vec::len), Some(2));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Maximum accepted length for a recipe title
pub const MAX_TITLE_LENGTH: usize = 255;

/// Identity of a recipe within its owning collection.
///
/// Catalog recipes carry provider integers; user-authored recipes carry strings.
/// Equality is strict: `Number(1)` and `Text("1")` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    /// Provider catalog id
    Number(i64),
    /// Locally assigned or otherwise textual id
    Text(String),
}

impl RecipeId {
    /// Numeric reading of the id, parsing textual ids when they hold a number
    pub fn as_number(&self) -> Option<i64> {
        match self {
            RecipeId::Number(n) => Some(*n),
            RecipeId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{n}"),
            RecipeId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecipeId {
    fn from(id: i64) -> Self {
        RecipeId::Number(id)
    }
}

impl From<i32> for RecipeId {
    fn from(id: i32) -> Self {
        RecipeId::Number(i64::from(id))
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        RecipeId::Text(id.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        RecipeId::Text(id)
    }
}

/// An ingredient in provider format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Provider ingredient id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Ingredient name (e.g., "spaghetti", "black pepper")
    pub name: String,

    /// Free-form amount; the live provider sends numbers, the fallback dataset strings
    #[serde(
        default,
        deserialize_with = "deserialize_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<String>,

    /// Free-form unit (e.g., "g", "tbsp", "")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A catalog or user-authored recipe
///
/// `summary` and `instructions` may contain HTML from the provider and are kept
/// exactly as received. Render them through [`crate::markup::to_plain_text`] or a
/// real sanitizer, never as raw markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,

    pub title: String,

    #[serde(default)]
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Provider-format ingredient records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_ingredients: Option<Vec<Ingredient>>,

    /// User-authored free-text ingredient lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,

    /// Display flag; favorite membership is tracked by the state container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_added: Option<bool>,
}

impl Ingredient {
    /// Create a new ingredient with just a name
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            amount: None,
            unit: None,
        }
    }

    /// Set the provider id of this ingredient
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Add an amount and unit to this ingredient
    pub fn with_amount(mut self, amount: &str, unit: &str) -> Self {
        self.amount = Some(amount.to_string());
        self.unit = Some(unit.to_string());
        self
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [self.amount.as_deref(), self.unit.as_deref(), Some(self.name.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl Recipe {
    /// Create a recipe with only the required fields set
    pub fn new(id: impl Into<RecipeId>, title: &str, image: &str) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            image: image.to_string(),
            ready_in_minutes: None,
            servings: None,
            source_url: None,
            summary: None,
            instructions: None,
            extended_ingredients: None,
            ingredients: None,
            favorite: None,
            user_added: None,
        }
    }

    /// Set user-authored ingredient lines
    pub fn with_ingredients<S: Into<String>>(mut self, ingredients: Vec<S>) -> Self {
        self.ingredients = Some(ingredients.into_iter().map(Into::into).collect());
        self
    }

    /// Set provider-format ingredients
    pub fn with_extended_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.extended_ingredients = Some(ingredients);
        self
    }

    /// Set preparation time and servings
    pub fn with_timing(mut self, ready_in_minutes: u32, servings: u32) -> Self {
        self.ready_in_minutes = Some(ready_in_minutes);
        self.servings = Some(servings);
        self
    }

    /// Set summary and instructions
    pub fn with_text(mut self, summary: &str, instructions: &str) -> Self {
        self.summary = Some(summary.to_string());
        self.instructions = Some(instructions.to_string());
        self
    }

    /// Whether this recipe belongs to the local user
    pub fn is_user_added(&self) -> bool {
        self.user_added.unwrap_or(false)
    }

    /// Ingredient lines suitable for editing
    ///
    /// User-authored lines are returned as-is; provider ingredients are rendered
    /// as `amount unit name`.
    pub fn editable_ingredient_lines(&self) -> Vec<String> {
        match (&self.ingredients, &self.extended_ingredients) {
            (Some(lines), _) if !lines.is_empty() => lines.clone(),
            (_, Some(extended)) if !extended.is_empty() => {
                extended.iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Reasons a recipe draft is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Title is empty after trimming
    MissingTitle,
    /// Title exceeds [`MAX_TITLE_LENGTH`]
    TitleTooLong,
    /// Image URL is empty after trimming
    MissingImage,
    /// No non-blank ingredient line
    MissingIngredients,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingTitle => write!(f, "Please provide a recipe title."),
            DraftError::TitleTooLong => {
                write!(f, "Recipe title must be at most {MAX_TITLE_LENGTH} characters.")
            }
            DraftError::MissingImage => write!(f, "Please provide an image URL for your recipe."),
            DraftError::MissingIngredients => write!(f, "Please add at least one ingredient."),
        }
    }
}

impl std::error::Error for DraftError {}

/// User input for creating or editing a recipe, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub image: String,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub summary: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
}

impl RecipeDraft {
    /// Pre-fill a draft from an existing recipe for editing
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            summary: recipe.summary.clone().unwrap_or_default(),
            instructions: recipe.instructions.clone().unwrap_or_default(),
            ingredients: recipe.editable_ingredient_lines(),
        }
    }

    /// Validate the draft, trimming fields and dropping blank ingredient lines
    pub fn validate(&self) -> Result<RecipeDraft, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(DraftError::TitleTooLong);
        }

        let image = self.image.trim();
        if image.is_empty() {
            return Err(DraftError::MissingImage);
        }

        let ingredients: Vec<String> = self
            .ingredients
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if ingredients.is_empty() {
            return Err(DraftError::MissingIngredients);
        }

        Ok(RecipeDraft {
            title: title.to_string(),
            image: image.to_string(),
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
            summary: self.summary.clone(),
            instructions: self.instructions.clone(),
            ingredients,
        })
    }

    /// Validate and build a user-owned recipe carrying `id`
    pub fn into_recipe(self, id: impl Into<RecipeId>) -> Result<Recipe, DraftError> {
        let draft = self.validate()?;
        let mut recipe = Recipe::new(id, &draft.title, &draft.image).with_ingredients(draft.ingredients);
        recipe.ready_in_minutes = draft.ready_in_minutes;
        recipe.servings = draft.servings;
        recipe.summary = Some(draft.summary);
        recipe.instructions = Some(draft.instructions);
        recipe.user_added = Some(true);
        Ok(recipe)
    }
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Number(f64),
    }

    Ok(Option::<RawAmount>::deserialize(deserializer)?.map(|raw| match raw {
        RawAmount::Text(text) => text,
        RawAmount::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", n as i64),
        RawAmount::Number(n) => format!("{n}"),
    }))
}
