//! Shared application state.

use minimart_core::IdGenerator;
use minimart_db::Database;

/// State handed to every handler.
///
/// Both fields are cheap to clone (pool handle, shared RNG).
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub ids: IdGenerator,
}

impl AppState {
    pub fn new(db: Database, ids: IdGenerator) -> Self {
        AppState { db, ids }
    }
}
