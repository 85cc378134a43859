//! Mealscore - indexed food search and nutrient scoring.
//!
//! Builds a hash grouping and a character trie over a nutrition catalog,
//! answers exact/prefix/contains queries with side-by-side timing, scores
//! foods and meals on the 1..=10 ladder scale, and manages a session meal
//! with named snapshots.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mealscore_cli::output::{format_count, format_duration, Status};
use mealscore_core::config::Config;
use mealscore_core::ingest::load_catalog;
use mealscore_core::Record;
use mealscore_meal::{scale, JsonFileStore, Meal, MealSnapshot, MealStore};
use mealscore_search::{
    CatalogIndex, IndexHandle, IndexStructure, SearchMode, SearchOutcome, SearchResults,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mealscore")]
#[command(about = "Meal quality scorer: indexed food search and nutrient scoring")]
#[command(version)]
struct Cli {
    /// Path to a mealscore.toml config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the catalog CSV (overrides config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Exact,
    Prefix,
    Contains,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Exact => SearchMode::Exact,
            ModeArg::Prefix => SearchMode::Prefix,
            ModeArg::Contains => SearchMode::Contains,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StructureArg {
    Hash,
    Trie,
    Both,
}

impl From<StructureArg> for IndexStructure {
    fn from(structure: StructureArg) -> Self {
        match structure {
            StructureArg::Hash => IndexStructure::Hash,
            StructureArg::Trie => IndexStructure::Trie,
            StructureArg::Both => IndexStructure::Both,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog, optionally comparing both index structures
    Search {
        /// Search text
        query: String,

        /// Match mode
        #[arg(short, long, value_enum, default_value = "contains")]
        mode: ModeArg,

        /// Index structure to query
        #[arg(short, long, value_enum, default_value = "both")]
        structure: StructureArg,

        /// Maximum results per structure
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Score a single food by exact name
    Score {
        /// Food name (case-insensitive)
        name: String,
    },

    /// Show index size and build-cost statistics
    Stats,

    /// Manage the session meal
    Meal {
        #[command(subcommand)]
        command: MealCommands,

        /// Path of the session meal file
        #[arg(long, default_value = ".mealscore-meal.json")]
        meal_file: PathBuf,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Add a food to the meal by name
    Add {
        /// Food name to look up (first match wins)
        name: String,

        /// Serving size in grams
        #[arg(short, long)]
        grams: Option<f64>,
    },

    /// Remove an item by its position (1-based, as listed)
    Remove {
        /// Position from `meal show`
        position: usize,
    },

    /// Discard every item in the meal
    Clear,

    /// Show meal contents, total nutrition and score
    Show,

    /// Save the meal as a named snapshot
    Save {
        /// Display name for the snapshot
        name: String,

        /// Snapshot id (generated if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Replace the session meal with a saved snapshot
    Load {
        /// Snapshot id
        id: String,
    },

    /// List saved snapshots
    List,

    /// Delete a saved snapshot
    Delete {
        /// Snapshot id
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| config.schema.catalog.path.clone());

    match cli.command {
        Commands::Search {
            query,
            mode,
            structure,
            limit,
        } => {
            let index = build_index(&catalog_path, limit.unwrap_or(config.schema.search.max_results))?;
            run_search(&index, &query, mode.into(), structure.into())
        }
        Commands::Score { name } => {
            let index = build_index(&catalog_path, config.schema.search.max_results)?;
            run_score(&index, &name)
        }
        Commands::Stats => {
            let index = build_index(&catalog_path, config.schema.search.max_results)?;
            run_stats(&index)
        }
        Commands::Meal { command, meal_file } => {
            run_meal(command, &meal_file, &catalog_path, &config)
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_target(false)
        .init();
}

/// Load the catalog and build both structures on a worker thread; queries
/// are only answered once the build has completed or failed as a whole.
fn build_index(catalog_path: &PathBuf, max_results: usize) -> Result<Arc<CatalogIndex>> {
    let records = load_catalog(catalog_path)
        .with_context(|| format!("failed to load catalog from {}", catalog_path.display()))?;
    let index = IndexHandle::spawn(records, max_results).wait()?;
    Ok(index)
}

fn run_search(
    index: &CatalogIndex,
    query: &str,
    mode: SearchMode,
    structure: IndexStructure,
) -> Result<()> {
    match index.search(query, mode, structure)? {
        SearchResults::Single(outcome) => print_outcome(&outcome, None),
        SearchResults::Both { hash, trie } => {
            print_outcome(&hash, Some("Hash results"));
            print_outcome(&trie, Some("Trie results"));

            Status::subheader("Performance comparison");
            if trie.elapsed < hash.elapsed {
                Status::info(&format!(
                    "Trie was faster by {}",
                    format_duration(hash.elapsed - trie.elapsed)
                ));
            } else if hash.elapsed < trie.elapsed {
                Status::info(&format!(
                    "Hash was faster by {}",
                    format_duration(trie.elapsed - hash.elapsed)
                ));
            } else {
                Status::info("Both performed equally");
            }
        }
    }
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, header: Option<&str>) {
    if let Some(header) = header {
        Status::header(header);
    }

    if outcome.hits.is_empty() {
        println!("No results found.");
    } else {
        println!(
            "Found {} (showing {})",
            format_count(outcome.total_hits, "result", "results"),
            outcome.hits.len()
        );
        for (i, record) in outcome.hits.iter().enumerate() {
            let score = mealscore_score::score(record);
            println!(
                "{}. {} - {}/10, {}",
                i + 1,
                record.name,
                score,
                mealscore_score::feedback(score)
            );
        }
    }
    println!("Search time: {}", format_duration(outcome.elapsed));
}

fn run_score(index: &CatalogIndex, name: &str) -> Result<()> {
    let results = index.search(name, SearchMode::Exact, IndexStructure::Hash)?;
    let SearchResults::Single(outcome) = results else {
        unreachable!("single-structure query");
    };

    let Some(record) = outcome.hits.first() else {
        Status::warning(&format!("No food named '{name}' in the catalog"));
        return Ok(());
    };

    print_nutrition(record);
    let breakdown = mealscore_score::breakdown(record);
    Status::subheader("Score breakdown");
    println!(
        "Negative: energy {} + satfat {} + sugar {} + sodium {} = {}",
        breakdown.energy,
        breakdown.satfat,
        breakdown.sugar,
        breakdown.sodium,
        breakdown.negative()
    );
    println!(
        "Positive: protein {} + fiber {} = {}",
        breakdown.protein,
        breakdown.fiber,
        breakdown.positive()
    );
    let score = breakdown.score();
    Status::success(&format!(
        "Score: {}/10 - {}",
        score,
        mealscore_score::feedback(score)
    ));
    Ok(())
}

fn print_nutrition(record: &Record) {
    Status::header(&record.name);
    println!(
        "Energy: {:.2} kcal ({:.2} kJ)",
        record.kcal,
        record.energy_kj()
    );
    println!("Protein: {:.2}g", record.protein);
    println!("Fat: {:.2}g (Saturated: {:.2}g)", record.fat, record.satfat);
    println!("Carbs: {:.2}g (Sugars: {:.2}g)", record.carbs, record.sugar);
    println!("Fiber: {:.2}g", record.fiber);
    println!("Sodium: {:.2}mg", record.sodium);
}

fn run_stats(index: &CatalogIndex) -> Result<()> {
    let stats = index.stats();

    Status::header("Hash index");
    println!("Records: {}", stats.records);
    println!("Distinct names: {}", stats.distinct_names);
    println!("Max group length: {}", stats.max_group_len);
    println!("Build time: {}", format_duration(stats.hash_build));

    Status::header("Trie index");
    println!("Nodes: {}", stats.trie_nodes);
    println!("Build time: {}", format_duration(stats.trie_build));
    Ok(())
}

fn run_meal(
    command: MealCommands,
    meal_file: &PathBuf,
    catalog_path: &PathBuf,
    config: &Config,
) -> Result<()> {
    let mut meal = load_meal(meal_file)?;

    match command {
        MealCommands::Add { name, grams } => {
            let index = build_index(catalog_path, config.schema.search.max_results)?;
            let results = index.search(&name, SearchMode::Contains, IndexStructure::Hash)?;
            let SearchResults::Single(outcome) = results else {
                unreachable!("single-structure query");
            };

            let Some(record) = outcome.hits.first() else {
                Status::warning(&format!("No foods found matching '{name}'"));
                return Ok(());
            };

            let grams = grams.unwrap_or(config.schema.meal.default_serving_grams);
            meal.add(scale(record, grams)?);
            save_meal(meal_file, &meal)?;
            Status::success(&format!("Added to meal: {} ({grams}g)", record.name));
        }
        MealCommands::Remove { position } => {
            match position.checked_sub(1).and_then(|i| meal.remove(i)) {
                Some(removed) => {
                    save_meal(meal_file, &meal)?;
                    Status::success(&format!("Removed {}", removed.record.name));
                }
                None => Status::warning(&format!("No meal item at position {position}")),
            }
        }
        MealCommands::Clear => {
            meal.clear();
            save_meal(meal_file, &meal)?;
            Status::success("Meal cleared");
        }
        MealCommands::Show => {
            if meal.is_empty() {
                Status::warning("No items in meal. Add some foods first.");
                return Ok(());
            }

            Status::header("Meal contents");
            for (i, item) in meal.items().iter().enumerate() {
                println!("{}. {} ({}g)", i + 1, item.record.name, item.serving_grams);
            }

            let scored = meal.score()?;
            print_nutrition(&scored.total);
            Status::success(&format!(
                "Meal score: {}/10 - {}",
                scored.score, scored.feedback
            ));
        }
        MealCommands::Save { name, id } => {
            let snapshot = MealSnapshot::capture(&mut meal, id, name)?;
            open_store(config)?.put(&snapshot)?;
            Status::success(&format!("Saved meal snapshot '{}'", snapshot.id));
        }
        MealCommands::Load { id } => {
            let snapshot = open_store(config)?.get(&id)?;
            let restored = snapshot.restore();
            save_meal(meal_file, &restored)?;
            Status::success(&format!(
                "Loaded '{}' with {}",
                snapshot.name,
                format_count(restored.len(), "item", "items")
            ));
        }
        MealCommands::List => {
            let snapshots = open_store(config)?.list()?;
            if snapshots.is_empty() {
                Status::info("No saved meal snapshots");
                return Ok(());
            }
            for snapshot in snapshots {
                println!(
                    "{} - {} ({}, score {}/10, saved {})",
                    snapshot.id,
                    snapshot.name,
                    format_count(snapshot.items.len(), "item", "items"),
                    snapshot.score,
                    snapshot.saved_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        MealCommands::Delete { id } => {
            open_store(config)?.remove(&id)?;
            Status::success(&format!("Deleted snapshot '{id}'"));
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<JsonFileStore> {
    let store = match &config.schema.meal.store_dir {
        Some(dir) => JsonFileStore::open(dir.clone())?,
        None => JsonFileStore::open_default()?,
    };
    Ok(store)
}

fn load_meal(path: &PathBuf) -> Result<Meal> {
    if !path.exists() {
        return Ok(Meal::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read meal file {}", path.display()))?;
    let meal = serde_json::from_str(&json)
        .with_context(|| format!("malformed meal file {}", path.display()))?;
    Ok(meal)
}

fn save_meal(path: &PathBuf, meal: &Meal) -> Result<()> {
    let json = serde_json::to_string_pretty(meal)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write meal file {}", path.display()))?;
    Ok(())
}
