//! Integration tests over real files in temporary directories

mod catalog_flow;
mod ledger_flow;
mod library_flow;
