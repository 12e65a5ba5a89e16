// Wardrobe Catalog - Core Library
// Exposes the catalog engine, query layer and interactive session for the
// CLI binary and tests

pub mod catalog;
pub mod entities;
pub mod error;
pub mod logging;
pub mod query;
pub mod render;
pub mod session;

// Only compile the full-screen browser when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogSnapshot};
pub use entities::{
    amount_to_cents, cents_to_amount, name_key, parse_wear_date, Category, Garment,
    NOT_WORN_MARKER, WEAR_DATE_FORMAT,
};
pub use error::{CatalogError, Result};
pub use logging::{active_log_dir, default_log_level, init_logging};
pub use query::{
    list_all, list_category, list_least_recently_worn, list_unworn, search_by_name,
    search_by_notes, CategorySection, ClosetListing, GarmentRow, UnwornListing,
    DEFAULT_LEAST_RECENT_LIMIT,
};
pub use session::{MainAction, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
