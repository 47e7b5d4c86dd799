use std::fs;

use library_lookup::{
    config::{AppConfig, StorageConfig},
    models::SortKey,
    Library,
};

fn config_in(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        storage: StorageConfig {
            catalog_file: dir.join("book.csv"),
            borrow_records_file: dir.join("borrow_records.csv"),
        },
        ..AppConfig::default()
    }
}

#[test]
fn test_open_populates_every_service() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(
        &config.storage.catalog_file,
        "ID,Title,Author,Year,Publisher\n\
         1,Apple Pie Recipes,Baker,2020,Oven\n\
         2,Application Design,Smith,2018,Tech\n\
         3,Banana Republic,Henry,2022,Fruit\n\
         4,Apples of Gold,Lane,2018,Orchard\n",
    )
    .unwrap();
    fs::write(
        &config.storage.borrow_records_file,
        "alice,Banana Republic,2024-01-01,borrow\n",
    )
    .unwrap();

    let library = Library::open(&config);

    assert_eq!(library.catalog.len(), 4);
    assert_eq!(
        library.auto_complete("app"),
        vec!["apple pie recipes", "apples of gold", "application design"]
    );
    assert!(library.auto_complete("").is_empty());
    assert_eq!(library.ledger.current_borrower("Banana Republic"), Some("alice"));

    let years: Vec<(i32, i32)> = library
        .sorted_books(SortKey::Year)
        .iter()
        .map(|b| (b.year, b.id))
        .collect();
    assert_eq!(years[0].0, 2018);
    assert_eq!(years[1].0, 2018);
    assert_eq!(years[2], (2020, 1));
    assert_eq!(years[3], (2022, 3));
}

#[test]
fn test_borrow_requires_catalog_title() {
    let mut library = Library::in_memory();
    library.add_book(1, "Dune", "Herbert", 1965, Some("Ace"));

    assert!(!library.borrow_book("alice", "Hyperion", "2024-01-01"));
    assert!(library.borrow_book("alice", "Dune", "2024-01-01"));
    assert!(!library.borrow_book("bob", "Dune", "2024-01-02"));
    assert!(library.return_book("alice", "Dune", "2024-01-15"));
    assert!(library.borrow_book("bob", "Dune", "2024-01-16"));
}

#[test]
fn test_add_book_feeds_autocomplete() {
    let mut library = Library::in_memory();
    assert!(library.add_book(1, "Snow Crash", "Stephenson", 1992, None));
    assert!(!library.add_book(1, "Snowfall", "Nobody", 2000, None));

    assert_eq!(library.auto_complete("Snow"), vec!["Snow crash"]);
    assert_eq!(library.search_books_by_title("crash").len(), 1);
}
