mod memory;
#[cfg(feature = "full")]
mod sqlite;

use larder_shared::{Ingredient, Result};

pub use memory::MemoryStore;
#[cfg(feature = "full")]
pub use sqlite::SqliteStore;

/// Read access to the recipe subsystem.
#[async_trait::async_trait]
pub trait RecipeStore: Send + Sync {
    /// Ingredient lines of a recipe, in declaration order.
    ///
    /// Fails with `RecipeNotFound` when the recipe does not exist.
    async fn recipe_ingredients(&self, recipe_id: &str) -> Result<Vec<Ingredient>>;

    /// Unit strings the recipe subsystem accepts on ingredient lines.
    async fn unit_vocabulary(&self) -> Result<Vec<String>>;
}

/// Recipes a user has put in their shopping cart.
#[async_trait::async_trait]
pub trait CartStore: Send + Sync {
    async fn cart_recipes(&self, user_id: &str) -> Result<Vec<String>>;
}
