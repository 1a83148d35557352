//! Catalog Application CLI

use std::process;

use catalog_app::{
    config::{DatabaseConfig, LoggingConfig},
    context::AppContext,
    database,
    domain::products::{Category, DataValidationError, IntoPrice, Product, ProductId},
    logging,
};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "catalog-app", about = "Product catalog CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,

    /// Manage products
    ///
    /// Without `DATABASE_URL` the products live in memory for this one command.
    Products(ProductsCommand),
}

#[derive(Debug, Args)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products, optionally filtered by one field
    List(ListArgs),

    /// Show a single product
    Get { id: i64 },

    /// Create a product
    Create(CreateArgs),

    /// Update fields of a stored product
    Update(UpdateArgs),

    /// Delete a product
    Delete { id: i64 },
}

#[derive(Debug, Args)]
#[group(multiple = false)]
struct ListArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    price: Option<String>,

    #[arg(long)]
    available: Option<bool>,

    /// Category name, e.g. CLOTHS
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Decimal price, e.g. 12.50
    #[arg(long)]
    price: String,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    available: bool,

    /// Category name, e.g. CLOTHS
    #[arg(long)]
    category: String,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: i64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    price: Option<String>,

    #[arg(long)]
    available: Option<bool>,

    #[arg(long)]
    category: Option<String>,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init_subscriber(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        error!(%error, "command failed");
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let Cli {
        database, command, ..
    } = cli;

    match command {
        Commands::Migrate => migrate(database).await,
        Commands::Products(ProductsCommand { command }) => {
            let ctx = AppContext::from_config(&database)
                .await
                .map_err(|error| format!("failed to initialise: {error}"))?;

            let result = products(&ctx, command).await;

            ctx.shutdown().await;

            result.map_err(|error| error.to_string())
        }
    }
}

async fn migrate(database: DatabaseConfig) -> Result<(), String> {
    let url = database
        .database_url
        .ok_or_else(|| "DATABASE_URL is required to migrate".to_string())?;

    let pool = database::connect(&url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    pool.close().await;

    println!("migrations applied");

    Ok(())
}

async fn products(
    ctx: &AppContext,
    command: ProductsSubcommand,
) -> Result<(), DataValidationError> {
    let repository = ctx.products.as_ref();

    match command {
        ProductsSubcommand::List(args) => {
            let products = if let Some(name) = args.name {
                Product::find_by_name(repository, &name).await?
            } else if let Some(price) = args.price {
                Product::find_by_price(repository, price).await?
            } else if let Some(available) = args.available {
                Product::find_by_availability(repository, available).await?
            } else if let Some(category) = args.category {
                Product::find_by_category(repository, parse_category(&category)?).await?
            } else {
                Product::all(repository).await?
            };

            print_json(&Value::Array(
                products.iter().map(Product::serialize).collect(),
            ));
        }
        ProductsSubcommand::Get { id } => {
            let product = Product::find(repository, ProductId::from_i64(id))
                .await?
                .ok_or(DataValidationError::NotFound)?;

            print_json(&product.serialize());
        }
        ProductsSubcommand::Create(args) => {
            let mut product = Product::new(
                args.name,
                args.description,
                args.price.as_str().into_price()?,
                args.available,
                parse_category(&args.category)?,
            );

            product.create(repository).await?;

            print_json(&product.serialize());
        }
        ProductsSubcommand::Update(args) => {
            let mut product = Product::find(repository, ProductId::from_i64(args.id))
                .await?
                .ok_or(DataValidationError::NotFound)?;

            if let Some(name) = args.name {
                product.name = name;
            }
            if let Some(description) = args.description {
                product.description = description;
            }
            if let Some(price) = args.price {
                product.price = price.into_price()?;
            }
            if let Some(available) = args.available {
                product.available = available;
            }
            if let Some(category) = args.category {
                product.category = parse_category(&category)?;
            }

            product.update(repository).await?;

            print_json(&product.serialize());
        }
        ProductsSubcommand::Delete { id } => {
            let mut product = Product::find(repository, ProductId::from_i64(id))
                .await?
                .ok_or(DataValidationError::NotFound)?;

            product.delete(repository).await?;

            println!("deleted product {id}");
        }
    }

    Ok(())
}

fn parse_category(name: &str) -> Result<Category, DataValidationError> {
    name.parse()
        .map_err(|_err| DataValidationError::UnknownCategory(name.to_string()))
}

fn print_json(value: &Value) {
    println!("{value:#}");
}
