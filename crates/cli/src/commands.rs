//! Cart command implementations.

use thiserror::Error;

use sandpiper_cart::notice::{self, CartOp, NoticeSink};
use sandpiper_cart::storage::StorageSlot;
use sandpiper_cart::{CartConfig, CartOutcome, CartStore, CatalogClient, FileSlot};
use sandpiper_core::{Product, ProductId, subtotal};

use crate::Commands;

/// Errors that abort an invocation before the store can run.
///
/// Operation failures never land here; those come back as outcomes and
/// are shown as notices.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] sandpiper_cart::ConfigError),

    /// The catalog client could not be built.
    #[error("Catalog client error: {0}")]
    Catalog(#[from] sandpiper_cart::CatalogError),

    /// The cart slot could not be cleared.
    #[error("Storage error: {0}")]
    Storage(#[from] sandpiper_cart::StorageError),
}

/// Notice sink that prints to stderr, the CLI's toast stand-in.
struct StderrNotices;

impl NoticeSink for StderrNotices {
    #[allow(clippy::print_stderr)]
    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Dispatch a parsed subcommand.
pub async fn run(command: Commands) -> Result<(), CliError> {
    let config = CartConfig::from_env()?;

    if matches!(command, Commands::Clear) {
        let mut slot = FileSlot::new(&config.data_dir);
        slot.clear()?;
        return Ok(());
    }

    let catalog = CatalogClient::new(&config)?;
    let slot = FileSlot::new(&config.data_dir);
    let mut store = CartStore::load(catalog.clone(), catalog, slot);
    let mut notices = StderrNotices;

    match command {
        Commands::Add { product_id } => {
            let outcome = store.add_product(ProductId::new(product_id)).await;
            report(&mut notices, CartOp::Add, &outcome);
        }
        Commands::Remove { product_id } => {
            let outcome = store.remove_product(ProductId::new(product_id));
            report(&mut notices, CartOp::Remove, &outcome);
        }
        Commands::Update { product_id, amount } => {
            let outcome = store
                .update_product_amount(ProductId::new(product_id), amount)
                .await;
            report(&mut notices, CartOp::UpdateAmount, &outcome);
        }
        Commands::Show => show(store.cart()),
        Commands::Clear => {}
    }

    Ok(())
}

/// Forward the notice for an outcome, if one is due.
fn report(sink: &mut impl NoticeSink, op: CartOp, outcome: &CartOutcome) {
    if let Some(message) = notice::for_outcome(op, outcome) {
        sink.error(message);
    }
}

/// Render the cart as a table with line totals and the subtotal.
#[allow(clippy::print_stdout)]
fn show(items: &[Product]) {
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }

    println!(
        "{:>6}  {:<32} {:>10} {:>5} {:>10}",
        "ID", "PRODUCT", "PRICE", "QTY", "TOTAL"
    );
    for item in items {
        println!(
            "{:>6}  {:<32} {:>10} {:>5} {:>10}",
            item.id.as_i32(),
            item.name,
            item.price.to_string(),
            item.amount,
            item.line_total().to_string()
        );
    }
    println!("Subtotal: {}", subtotal(items));
}
