//! Command-line driver for the product catalog core.
//!
//! Every subcommand maps to one `ProductService` operation and prints the
//! result as JSON on stdout.

use std::process;

use catalog_core::{Product, ProductId, ProductService, SqliteProductRepository};
use clap::{Args, Parser, Subcommand};
use log::debug;

mod config;

use config::{DatabaseConfig, LoggingConfig};

#[derive(Debug, Parser)]
#[command(name = "catalog", about = "Product catalog CLI", version, long_about = None)]
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
    /// List every product
    List,
    /// Show one product
    Get { id: ProductId },
    /// Create a product
    Create(ProductArgs),
    /// Replace name, price, description and stock of a product
    Update {
        id: ProductId,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete { id: ProductId },
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Integer price
    #[arg(long, allow_negative_numbers = true)]
    price: i64,

    /// Free-form description
    #[arg(long)]
    description: Option<String>,

    /// On-hand stock count
    #[arg(long, allow_negative_numbers = true)]
    stock_quantity: Option<i32>,
}

impl From<ProductArgs> for Product {
    fn from(args: ProductArgs) -> Self {
        Product::new(args.name, args.price, args.description, args.stock_quantity)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    cli.logging.init()?;
    debug!(
        "event=cli_start module=cli status=ok version={}",
        catalog_core::core_version()
    );

    let conn = cli.database.open()?;
    let repo = SqliteProductRepository::try_new(&conn)
        .map_err(|error| format!("failed to prepare repository: {error}"))?;
    let service = ProductService::new(repo);

    match cli.command {
        Commands::List => {
            let products = service
                .list_all()
                .map_err(|error| format!("failed to list products: {error}"))?;
            print_json(&products)
        }
        Commands::Get { id } => {
            let product = service.find_by_id(id).map_err(|error| error.to_string())?;
            print_json(&product)
        }
        Commands::Create(args) => {
            let created = service
                .create(&args.into())
                .map_err(|error| format!("failed to create product: {error}"))?;
            print_json(&created)
        }
        Commands::Update { id, fields } => {
            let updated = service
                .update(id, &fields.into())
                .map_err(|error| format!("failed to update product: {error}"))?;
            print_json(&updated)
        }
        Commands::Delete { id } => {
            service
                .delete(id)
                .map_err(|error| format!("failed to delete product: {error}"))?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|error| format!("failed to render output: {error}"))?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn update_parses_fields_and_global_db_flag() {
        let cli = Cli::try_parse_from([
            "catalog",
            "update",
            "1",
            "--name",
            "Pen",
            "--price",
            "1200",
            "--stock-quantity",
            "-2",
            "--db",
            "/tmp/catalog.db",
        ])
        .unwrap();

        assert_eq!(
            cli.database.db_path.as_deref(),
            Some(std::path::Path::new("/tmp/catalog.db"))
        );
        match cli.command {
            Commands::Update { id, fields } => {
                assert_eq!(id, 1);
                assert_eq!(fields.name, "Pen");
                assert_eq!(fields.price, 1200);
                assert_eq!(fields.description, None);
                assert_eq!(fields.stock_quantity, Some(-2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn in_memory_flag_conflicts_with_db_path() {
        let cli = Cli::try_parse_from(["catalog", "list", "--in-memory"]).unwrap();
        assert!(cli.database.in_memory);
        assert!(matches!(cli.command, Commands::List));

        let err = Cli::try_parse_from(["catalog", "list", "--in-memory", "--db", "/tmp/c.db"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
