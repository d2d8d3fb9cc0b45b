//! UI layer for the admin panel: app shell, product table, and modal windows.

pub mod app;
pub mod modals;
pub mod table;

pub use app::CatalogAdminApp;

pub const WINDOW_TITLE: &str = "FakeStoreAPI Product CRUD";
