use std::fs;

use library_lookup::{models::SortKey, Catalog, SearchIndex};

#[test]
fn test_duplicate_id_in_file_keeps_first_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.csv");
    fs::write(
        &path,
        "ID,Title,Author,Year,Publisher\n1,Dune,Herbert,1965,Ace\n1,Clone,X,2000,Y\n",
    )
    .unwrap();

    let mut catalog = Catalog::new();
    catalog.load_from_file(&path).unwrap();

    let all = catalog.all_books();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].0, 1);
    assert_eq!(all[0].1.title, "Dune");
}

#[test]
fn test_malformed_rows_do_not_abort_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.csv");
    fs::write(
        &path,
        "ID,Title,Author,Year,Publisher\n\
         1,Dune,Herbert,1965,Ace\n\
         two,Emma,Austen,1815,Murray\n\
         3,Beloved,Morrison\n\
         4,Anathem,Stephenson,2008\n",
    )
    .unwrap();

    let mut catalog = Catalog::new();
    assert_eq!(catalog.load_from_file(&path).unwrap(), 2);
    assert!(catalog.search_book(1).is_some());
    assert_eq!(catalog.search_book(4).unwrap().publisher, "Unknown");
}

#[test]
fn test_missing_file_then_first_add_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("book.csv");

    let mut catalog = Catalog::new();
    assert_eq!(catalog.load_from_file(&path).unwrap(), 0);
    assert!(!path.exists());

    assert!(catalog.add_book(10, "Solaris", "Lem", 1961, None));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "ID,Title,Author,Year,Publisher\n10,Solaris,Lem,1961,Unknown\n"
    );
}

#[test]
fn test_autosave_round_trips_through_a_fresh_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.csv");

    let mut catalog = Catalog::new();
    catalog.load_from_file(&path).unwrap();
    catalog.add_book(1, "Dune", "Herbert", 1965, Some("Ace"));
    catalog.add_book(2, "Emma", "Austen", 1815, None);
    catalog.add_book(3, "Beloved", "Morrison", 1987, Some("Knopf"));
    catalog.update_book(2, "Emma", "Jane Austen", 1815);
    catalog.delete_book(3);

    let mut reopened = Catalog::new();
    assert_eq!(reopened.load_from_file(&path).unwrap(), 2);
    assert_eq!(reopened.search_book(2).unwrap().author, "Jane Austen");
    assert!(reopened.search_book(3).is_none());

    let index = SearchIndex::new();
    let mut books = index.search_books_by_title(&reopened, "e");
    SearchIndex::sort_books(&mut books, SortKey::Year);
    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Emma", "Dune"]);
}
