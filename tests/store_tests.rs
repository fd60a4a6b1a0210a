//! # Store Tests
//!
//! Integration tests for the recipe store driven by a scripted provider,
//! covering the load lifecycle, request sequencing, and the user collection.

use async_trait::async_trait;
use recipe_box::fallback_data::{fallback_recipe, fallback_recipes};
use recipe_box::{
    DataSource, FallbackReason, Fetched, LoadOutcome, ProviderError, Recipe, RecipeId, RecipeProvider, RecipeStore,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

type ListResult = Result<Fetched<Vec<Recipe>>, ProviderError>;

enum Reply {
    Ready(ListResult),
    Gated(oneshot::Receiver<ListResult>),
}

/// Provider that answers list calls from a queue of scripted replies
#[derive(Default)]
struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    reject_lookups: bool,
}

impl ScriptedProvider {
    fn with_replies(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            reject_lookups: false,
        }
    }

    fn next_reply(&self) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected provider call")
    }

    async fn reply(&self) -> ListResult {
        match self.next_reply() {
            Reply::Ready(result) => result,
            Reply::Gated(receiver) => receiver.await.expect("gate dropped"),
        }
    }
}

#[async_trait]
impl RecipeProvider for ScriptedProvider {
    async fn search_by_ingredients(&self, _ingredients: &[String]) -> ListResult {
        self.reply().await
    }

    async fn list_random(&self) -> ListResult {
        self.reply().await
    }

    async fn get_by_id(&self, id: &RecipeId) -> Result<Fetched<Recipe>, ProviderError> {
        if self.reject_lookups {
            return Err(ProviderError::Rejected("lookup refused".to_string()));
        }
        Ok(Fetched::live(fallback_recipe(id)))
    }
}

fn titled(titles: &[&str]) -> Vec<Recipe> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Recipe::new(i as i64 + 100, title, "img"))
        .collect()
}

fn titles(recipes: &[Recipe]) -> Vec<String> {
    recipes.iter().map(|r| r.title.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_load_clears_previous_error() {
        let store = RecipeStore::new(ScriptedProvider::with_replies(vec![
            Reply::Ready(Err(ProviderError::Rejected("Network response was not ok".to_string()))),
            Reply::Ready(Ok(Fetched::live(fallback_recipes()))),
        ]));

        let outcome = store.fetch_by_ingredients(vec!["egg".to_string()]).await;
        assert_eq!(outcome, LoadOutcome::Failed("Network response was not ok".to_string()));
        assert_eq!(store.read(|s| s.error().map(str::to_string)), Some("Network response was not ok".to_string()));
        assert!(!store.read(|s| s.is_loading()));

        let outcome = store.fetch_random().await;
        assert_eq!(outcome, LoadOutcome::Applied(DataSource::Live));

        let state = store.snapshot();
        assert!(state.error().is_none());
        assert!(!state.is_loading());
        assert_eq!(state.recipes().len(), 4);
        assert_eq!(state.filtered_recipes(), state.recipes());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_recipes() {
        let store = RecipeStore::new(ScriptedProvider::with_replies(vec![
            Reply::Ready(Ok(Fetched::live(titled(&["Kept"])))),
            Reply::Ready(Err(ProviderError::Status(500))),
        ]));

        store.fetch_random().await;
        let outcome = store.fetch_random().await;

        assert_eq!(outcome, LoadOutcome::Failed("Network response was not ok (status 500)".to_string()));
        assert_eq!(titles(&store.read(|s| s.recipes())), vec!["Kept"]);
    }

    #[tokio::test]
    async fn test_loading_is_set_while_request_in_flight() {
        let (sender, receiver) = oneshot::channel();
        let store = RecipeStore::new(ScriptedProvider::with_replies(vec![Reply::Gated(receiver)]));

        let observer = async {
            tokio::task::yield_now().await;
            let loading = store.read(|s| s.is_loading());
            sender
                .send(Ok(Fetched::live(titled(&["Done"]))))
                .unwrap_or_else(|_| panic!("load future dropped"));
            loading
        };

        let (outcome, loading_during_request) = tokio::join!(store.fetch_random(), observer);

        assert!(loading_during_request);
        assert_eq!(outcome, LoadOutcome::Applied(DataSource::Live));
        assert!(!store.read(|s| s.is_loading()));
    }

    #[tokio::test]
    async fn test_overlapping_loads_keep_newest_result() {
        let (older_sender, older_receiver) = oneshot::channel();
        let (newer_sender, newer_receiver) = oneshot::channel();
        let store = RecipeStore::new(ScriptedProvider::with_replies(vec![
            Reply::Gated(older_receiver),
            Reply::Gated(newer_receiver),
        ]));

        let controller = async {
            tokio::task::yield_now().await;
            newer_sender
                .send(Ok(Fetched::live(titled(&["Newer"]))))
                .unwrap_or_else(|_| panic!("newer load dropped"));
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            older_sender
                .send(Ok(Fetched::live(titled(&["Older"]))))
                .unwrap_or_else(|_| panic!("older load dropped"));
        };

        let (first, second, ()) = tokio::join!(
            store.fetch_by_ingredients(vec!["egg".to_string()]),
            store.fetch_random(),
            controller
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|o| **o == LoadOutcome::Superseded).count(), 1);
        assert_eq!(
            outcomes.iter().filter(|o| **o == LoadOutcome::Applied(DataSource::Live)).count(),
            1
        );

        let state = store.snapshot();
        assert_eq!(titles(&state.recipes()), vec!["Newer"]);
        assert!(!state.is_loading());
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_fallback_provenance_is_recorded() {
        let store = RecipeStore::new(ScriptedProvider::with_replies(vec![Reply::Ready(Ok(Fetched::fallback(
            fallback_recipes(),
            FallbackReason::ProviderFailure(ProviderError::Status(503)),
        )))]));

        let outcome = store.fetch_random().await;
        assert!(matches!(outcome, LoadOutcome::Applied(DataSource::Fallback(_))));
        assert_eq!(
            store.read(|s| s.last_source().cloned()),
            Some(DataSource::Fallback(FallbackReason::ProviderFailure(ProviderError::Status(503))))
        );
        // Degraded provider is not a user-visible error
        assert!(store.read(|s| s.error().is_none()));
    }

    #[tokio::test]
    async fn test_ingredient_filter_against_sample_dataset() {
        let store = RecipeStore::new(ScriptedProvider::with_replies(vec![Reply::Ready(Ok(Fetched::live(
            fallback_recipes(),
        )))]));
        store.fetch_random().await;

        store.filter_recipes_by_ingredients(vec!["egg".to_string()]);
        assert_eq!(titles(&store.read(|s| s.filtered_recipes())), vec!["Spaghetti Carbonara"]);

        store.filter_recipes_by_ingredients(vec!["pasta".to_string()]);
        assert!(store.read(|s| s.filtered_recipes()).is_empty());

        store.filter_recipes_by_ingredients(vec!["egg".to_string(), "pasta".to_string()]);
        assert!(store.read(|s| s.filtered_recipes()).is_empty());

        store.filter_recipes_by_ingredients(Vec::new());
        let state = store.snapshot();
        assert_eq!(state.filtered_recipes(), state.recipes());
    }

    #[test]
    fn test_user_recipe_lifecycle() {
        let store = RecipeStore::new(ScriptedProvider::default());

        let draft = Recipe::new("client-supplied", "X", "Y").with_ingredients(vec!["a"]);
        let id = store.add_user_recipe(draft);
        assert_ne!(id, RecipeId::from("client-supplied"));

        let stored = store.read(|s| s.find_user_recipe(&id)).unwrap();
        assert_eq!(stored.user_added, Some(true));

        assert!(store.toggle_favorite(&stored));
        assert_eq!(store.read(|s| s.favorite_recipes().len()), 1);
        assert_eq!(store.read(|s| s.user_recipes()[0].favorite), Some(true));

        assert!(!store.delete_user_recipe(&RecipeId::from("absent")));
        assert_eq!(store.read(|s| s.user_recipes().len()), 1);
        assert_eq!(store.read(|s| s.favorite_recipes().len()), 1);

        assert!(store.delete_user_recipe(&id));
        assert!(store.read(|s| s.user_recipes().is_empty()));
        assert!(store.read(|s| s.favorite_recipes().is_empty()));
    }

    #[test]
    fn test_update_missing_user_recipe_is_noop() {
        let store = RecipeStore::new(ScriptedProvider::default());
        let id = store.add_user_recipe(Recipe::new(0, "Original", "img").with_ingredients(vec!["a"]));

        let mut stranger = Recipe::new("not-there", "Changed", "img");
        stranger.user_added = Some(true);
        assert!(!store.update_user_recipe(stranger));
        assert_eq!(store.read(|s| s.find_user_recipe(&id)).unwrap().title, "Original");
    }

    #[test]
    fn test_toggle_favorite_twice_restores_state() {
        let store = RecipeStore::new(ScriptedProvider::default());
        store.set_recipes(fallback_recipes());
        let before = store.snapshot();
        let curry = before.recipes()[2].clone();

        store.toggle_favorite(&curry);
        store.toggle_favorite(&curry);

        let after = store.snapshot();
        assert_eq!(after.favorite_recipes(), before.favorite_recipes());
        assert_eq!(after.recipes(), before.recipes());
        assert_eq!(after.filtered_recipes(), before.filtered_recipes());
    }

    #[tokio::test]
    async fn test_detail_rejection_leaves_selection() {
        let store = RecipeStore::new(ScriptedProvider {
            reject_lookups: true,
            ..Default::default()
        });
        store.set_selected_recipe(Some(Recipe::new(7, "Current", "img")));

        let result = store.load_recipe_detail(&RecipeId::Number(2)).await;
        assert_eq!(result, Err(ProviderError::Rejected("lookup refused".to_string())));
        assert_eq!(store.read(|s| s.selected_recipe().map(|r| r.title)), Some("Current".to_string()));

        store.set_selected_recipe(None);
        assert!(store.read(|s| s.selected_recipe().is_none()));
    }

    #[tokio::test]
    async fn test_detail_resolves_catalog_recipe_by_string_id() {
        let store = RecipeStore::new(ScriptedProvider {
            reject_lookups: true,
            ..Default::default()
        });
        store.set_recipes(fallback_recipes());

        // Catalog ids are numeric; a textual route parameter still resolves locally
        let recipe = store.load_recipe_detail(&RecipeId::from("4")).await.unwrap();
        assert_eq!(recipe.title, "Greek Salad");
    }
}
