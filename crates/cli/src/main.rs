//! Sandpiper CLI - drive the cart from the command line.
//!
//! Stands in for the storefront's rendering layer: every subcommand maps
//! to one cart operation, and failed operations surface the same notices
//! a UI toast would show.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of product 3 to the cart
//! sandpiper add 3
//!
//! # Set product 3 to five units
//! sandpiper update 3 5
//!
//! # Remove product 3 from the cart
//! sandpiper remove 3
//!
//! # Print the cart
//! sandpiper show
//!
//! # Empty the cart
//! sandpiper clear
//! ```
//!
//! # Environment Variables
//!
//! - `SANDPIPER_CATALOG_URL` - Base URL of the product/stock service
//! - `SANDPIPER_DATA_DIR` - Directory holding the durable cart slot

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sandpiper")]
#[command(author, version, about = "Sandpiper cart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product id
        product_id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        product_id: i32,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Catalog product id
        product_id: i32,
        /// Requested absolute quantity
        amount: i32,
    },
    /// Print the cart contents
    Show,
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Defaults to warnings for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sandpiper=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    match commands::run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
