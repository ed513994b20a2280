//! Multilingual CLI - translation planning and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the metafield writes a French save would make, without a store
//! ml-cli plan -m metafields.json -l fr --set name="Produit" --set description="Un produit"
//!
//! # Save a translation to a live store (reads BIGCOMMERCE_* from the environment)
//! ml-cli apply -p 111 -l fr --set name="Produit" --set description="Un produit"
//!
//! # List translation metafields left over from the other storage mode
//! ml-cli orphans -p 111
//! ```
//!
//! # Commands
//!
//! - `plan` - Reconcile a saved metafield list offline and print the writes
//! - `apply` - Save a translation through the BigCommerce API
//! - `orphans` - List metafields written in the unused storage layout

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use multilingual_core::{LocaleCode, ProductId, StorageMode};

mod commands;

#[derive(Parser)]
#[command(name = "ml-cli")]
#[command(author, version, about = "Multilingual catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the metafield writes a translation save would make
    Plan {
        /// JSON file with the product's metafields (array or `{"data": [...]}`)
        #[arg(short, long)]
        metafields: PathBuf,

        /// Locale being translated
        #[arg(short, long)]
        locale: LocaleCode,

        /// Store default locale
        #[arg(short, long, default_value = "en")]
        default_locale: LocaleCode,

        /// Storage layout (`concise`, `legacy`)
        #[arg(long, default_value = "concise")]
        mode: StorageMode,

        /// Field value as `key=value`; repeat per field
        #[arg(short, long = "set", value_parser = commands::parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Save a translation to the store
    Apply {
        /// Product ID
        #[arg(short, long)]
        product: ProductId,

        /// Locale being translated
        #[arg(short, long)]
        locale: LocaleCode,

        /// Storage layout; defaults to `CONCISE_METAFIELD_STORAGE`
        #[arg(long)]
        mode: Option<StorageMode>,

        /// Field value as `key=value`; repeat per field
        #[arg(short, long = "set", value_parser = commands::parse_field)]
        fields: Vec<(String, String)>,
    },
    /// List translation metafields in the unused storage layout
    Orphans {
        /// Product ID
        #[arg(short, long)]
        product: ProductId,

        /// Storage layout; defaults to `CONCISE_METAFIELD_STORAGE`
        #[arg(long)]
        mode: Option<StorageMode>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Plan {
            metafields,
            locale,
            default_locale,
            mode,
            fields,
        } => {
            commands::plan::run(
                &metafields,
                mode,
                &locale,
                &default_locale,
                &fields.into_iter().collect(),
            )
            .await?;
        }
        Commands::Apply {
            product,
            locale,
            mode,
            fields,
        } => {
            commands::store::apply(product, &locale, mode, &fields.into_iter().collect()).await?;
        }
        Commands::Orphans { product, mode } => {
            commands::store::orphans(product, mode).await?;
        }
    }
    Ok(())
}
