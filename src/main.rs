use anyhow::Result;
use clap::{Parser, Subcommand};
use pantry::cli::{inventory, inventory::CatalogKind, parse_date_or_today, planning, print_json};
use pantry::{Config, HouseholdSnapshot};

/// pantry - Household stock, recipes and meal planning
#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Recipe fulfillment and week planning over a household snapshot", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Household snapshot (JSON)
    #[arg(long, global = true, default_value = "snapshot.json")]
    snapshot: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes by due score, flagging what can be made now
    Recipes {
        /// Reference day, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<String>,

        /// Desired servings (defaults to each recipe's base servings)
        #[arg(long)]
        servings: Option<f64>,
    },
    /// Per-ingredient stock check for one recipe
    Fulfillment {
        recipe_id: String,

        #[arg(long)]
        servings: Option<f64>,

        /// Reference day for the due score, YYYY-MM-DD
        #[arg(long)]
        today: Option<String>,
    },
    /// Missing ingredients, shopping list and kcal for the planned week
    Week {
        /// First day, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        start: Option<String>,
    },
    /// Resolve free text against a catalog
    Match {
        #[arg(long, value_enum, default_value_t = CatalogKind::Product)]
        kind: CatalogKind,

        query: String,
    },
    /// Reconcile untrusted purchase lines (JSON array) against the catalogs
    Reconcile {
        #[arg(long)]
        lines: String,
    },
    /// Normalize a purchase into the product's stock unit
    Purchase {
        /// Product id or name
        #[arg(long)]
        product: String,

        #[arg(long, default_value_t = 1.0)]
        amount: f64,

        /// Unit id or name (defaults to the product's stock unit)
        #[arg(long)]
        unit: Option<String>,

        /// Total price paid for the line
        #[arg(long)]
        price: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    pantry::observability::init_observability(&config.observability)?;

    let snapshot = HouseholdSnapshot::load(&cli.snapshot).await?;

    match cli.command {
        Commands::Recipes { today, servings } => {
            let today = parse_date_or_today(today.as_deref())?;
            print_json(&planning::recipes(&config, &snapshot, today, servings))?;
        }
        Commands::Fulfillment {
            recipe_id,
            servings,
            today,
        } => {
            let today = parse_date_or_today(today.as_deref())?;
            let view = planning::fulfillment(&config, &snapshot, &recipe_id, today, servings)?;
            print_json(&view)?;
        }
        Commands::Week { start } => {
            let start = parse_date_or_today(start.as_deref())?;
            print_json(&planning::week(&config, &snapshot, start))?;
        }
        Commands::Match { kind, query } => {
            print_json(&inventory::match_catalog(&config, &snapshot, kind, &query))?;
        }
        Commands::Reconcile { lines } => {
            let reconciled = inventory::reconcile(&config, &snapshot, &lines).await?;
            print_json(&reconciled)?;
        }
        Commands::Purchase {
            product,
            amount,
            unit,
            price,
        } => {
            let view = inventory::purchase(
                &config,
                &snapshot,
                &product,
                amount,
                unit.as_deref(),
                price,
            )?;
            print_json(&view)?;
        }
    }

    Ok(())
}
