//! Shopping list aggregation: merges the ingredient lines of a recipe
//! selection into one deduplicated, exactly summed list and exports it.

pub mod aggregation;
pub mod commands;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod store;

pub use aggregation::{AggregatedEntry, Aggregator, ShoppingList};
pub use commands::{Export, ShoppingService};
pub use export::{ExportFormat, FormatOptions};
pub use normalize::{AggregationKey, UnitVocabulary, normalize};
#[cfg(feature = "full")]
pub use store::SqliteStore;
pub use store::{CartStore, MemoryStore, RecipeStore};
