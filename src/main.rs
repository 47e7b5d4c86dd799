//! Library Lookup - bootstrap binary
//!
//! Loads configuration, opens the catalog and the borrow ledger, and reports what was
//! loaded. Front ends embed [`Library`] directly.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_lookup::{config::AppConfig, models::SortKey, Library};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_lookup={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Library Lookup v{}", env!("CARGO_PKG_VERSION"));

    let library = Library::open(&config);

    tracing::info!(
        "Catalog: {} books from {}",
        library.catalog.len(),
        config.storage.catalog_file.display()
    );
    tracing::info!(
        "Ledger: {} history records from {}",
        library.ledger.history().len(),
        config.storage.borrow_records_file.display()
    );

    for book in library.sorted_books(SortKey::Title) {
        let status = match library.ledger.current_borrower(&book.title) {
            Some(user) => format!("borrowed by {}", user),
            None => "available".to_string(),
        };
        tracing::info!(
            "{:>6}  {} ({}, {}) - {}",
            book.id,
            book.title,
            book.author,
            book.year,
            status
        );
    }

    Ok(())
}
