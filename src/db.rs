//! Salsa database definition.

/// Database trait for the fragment renderer.
#[salsa::db]
pub trait UiDatabase: salsa::Database {}

/// Concrete database implementation.
#[salsa::db]
#[derive(Clone, Default)]
pub struct UiDatabaseImpl {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for UiDatabaseImpl {}

#[salsa::db]
impl UiDatabase for UiDatabaseImpl {}
