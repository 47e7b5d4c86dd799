use std::fs;

use library_lookup::{
    models::{HistoryRecord, LoanAction},
    repository::BorrowRecordFile,
    Ledger,
};

#[test]
fn test_borrow_then_return_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("borrow_records.csv");
    let mut ledger = Ledger::open(BorrowRecordFile::new(&path));

    assert!(ledger.borrow_book(None, "alice", "Dune", "2024-01-01"));
    assert!(ledger.return_book("alice", "Dune", "2024-02-01"));

    let still_holding = ledger
        .user_active_borrows("alice")
        .unwrap_or_default()
        .iter()
        .any(|loan| loan.counterpart == "Dune");
    assert!(!still_holding);

    assert_eq!(
        ledger.history(),
        &[
            HistoryRecord::new("alice", "Dune", "2024-01-01", LoanAction::Borrow),
            HistoryRecord::new("alice", "Dune", "2024-02-01", LoanAction::Return),
        ]
    );
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("borrow_records.csv");

    {
        let mut ledger = Ledger::open(BorrowRecordFile::new(&path));
        ledger.borrow_book(None, "alice", "Dune", "2024-01-01");
        ledger.borrow_book(None, "bob", "Emma", "2024-01-02");
        ledger.return_book("alice", "Dune", "2024-01-20");
        ledger.borrow_book(None, "alice", "Beloved", "2024-01-21");
    }

    let mut ledger = Ledger::open(BorrowRecordFile::new(&path));
    assert_eq!(ledger.history().len(), 4);
    assert_eq!(ledger.current_borrower("Dune"), None);
    assert_eq!(ledger.current_borrower("Emma"), Some("bob"));
    assert_eq!(ledger.current_borrower("Beloved"), Some("alice"));

    // Returning after a restart finds the borrow even with a different date
    assert!(ledger.return_book("bob", "Emma", "2024-03-03"));
    assert!(!ledger.borrow_book(None, "carol", "Beloved", "2024-03-04"));
    assert!(ledger.borrow_book(None, "carol", "Emma", "2024-03-04"));

    let lines = fs::read_to_string(&path).unwrap().lines().count();
    assert_eq!(lines, 6);
}

#[test]
fn test_unmatched_return_lands_in_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("borrow_records.csv");
    let mut ledger = Ledger::open(BorrowRecordFile::new(&path));

    assert!(!ledger.return_book("zoe", "Ulysses", "2024-06-01"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "zoe,Ulysses,2024-06-01,return\n"
    );

    let reopened = Ledger::open(BorrowRecordFile::new(&path));
    assert_eq!(reopened.history().len(), 1);
    assert!(reopened.user_active_borrows("zoe").is_none());
}
