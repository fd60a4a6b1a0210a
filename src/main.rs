use anyhow::{Context, Result};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_box::markup::to_plain_text;
use recipe_box::{LoadOutcome, ProviderConfig, Recipe, RecipeId, RecipeStore, SpoonacularClient};

const USAGE: &str = "Usage: recipe_box <command>

Commands:
  random                         List random recipes
  search <ingredient>...         Search recipes using all given ingredients
  filter <ingredient>...         List random recipes, then filter them locally
  show <id>                      Show one recipe";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = ProviderConfig::from_env().context("Failed to load provider configuration")?;
    info!(config = ?config, "Starting Recipe Box");

    let client = SpoonacularClient::new(config).context("Failed to create recipe provider client")?;
    let store = RecipeStore::new(client);

    match command.as_str() {
        "random" => {
            report_load(store.fetch_random().await);
            print_list(&store.read(|s| s.recipes()));
        }
        "search" => {
            report_load(store.fetch_by_ingredients(rest.to_vec()).await);
            print_list(&store.read(|s| s.recipes()));
        }
        "filter" => {
            report_load(store.fetch_random().await);
            store.filter_recipes_by_ingredients(rest.to_vec());
            print_list(&store.read(|s| s.filtered_recipes()));
        }
        "show" => {
            let raw = rest.first().context("show needs a recipe id")?;
            let id = raw
                .parse::<i64>()
                .map(RecipeId::Number)
                .unwrap_or_else(|_| RecipeId::from(raw.as_str()));
            let recipe = store
                .load_recipe_detail(&id)
                .await
                .context("Failed to load recipe details")?;
            print_detail(&recipe);
        }
        other => {
            eprintln!("Unknown command: {other}\n\n{USAGE}");
        }
    }

    Ok(())
}

fn report_load(outcome: LoadOutcome) {
    match outcome {
        LoadOutcome::Applied(source) if source.is_fallback() => {
            eprintln!("(showing bundled sample recipes: {source:?})");
        }
        LoadOutcome::Failed(message) => eprintln!("Error: {message}"),
        _ => {}
    }
}

fn print_list(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found.");
        return;
    }
    for recipe in recipes {
        let minutes = recipe
            .ready_in_minutes
            .map(|m| format!(" ({m} min)"))
            .unwrap_or_default();
        println!("{:>8}  {}{}", recipe.id.to_string(), recipe.title, minutes);
    }
}

fn print_detail(recipe: &Recipe) {
    println!("{}", recipe.title);
    if let (Some(minutes), Some(servings)) = (recipe.ready_in_minutes, recipe.servings) {
        println!("Ready in {minutes} min, serves {servings}");
    }
    if let Some(summary) = &recipe.summary {
        println!("\n{}", to_plain_text(summary));
    }

    let lines = recipe.editable_ingredient_lines();
    if !lines.is_empty() {
        println!("\nIngredients:");
        for line in lines {
            println!("  - {line}");
        }
    }

    if let Some(instructions) = &recipe.instructions {
        println!("\nInstructions:\n{}", to_plain_text(instructions));
    }
}
