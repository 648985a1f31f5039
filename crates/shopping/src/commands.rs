use larder_shared::{Error, Result};

use crate::aggregation::{Aggregator, ShoppingList};
use crate::export::{self, ExportFormat, FormatOptions};
use crate::store::{CartStore, RecipeStore};

/// A rendered shopping list, ready to be sent as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub content: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: &'static str,
}

#[derive(Clone)]
pub struct ShoppingService<S> {
    aggregator: Aggregator<S>,
    options: FormatOptions,
}

impl<S: RecipeStore> ShoppingService<S> {
    pub fn new(store: S) -> Self {
        Self {
            aggregator: Aggregator::new(store),
            options: FormatOptions::default(),
        }
    }

    pub fn max_concurrent_reads(mut self, value: usize) -> Self {
        self.aggregator = self.aggregator.max_concurrent_reads(value);
        self
    }

    pub fn format_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn shopping_list<I, T>(&self, recipe_ids: I) -> Result<ShoppingList>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.aggregator.aggregate(recipe_ids).await
    }

    /// Aggregate the selected recipes and render the result.
    ///
    /// The format is validated before any recipe is read.
    #[tracing::instrument(skip(self, recipe_ids))]
    pub async fn generate<I, T>(
        &self,
        user_id: &str,
        recipe_ids: I,
        target_format: &str,
    ) -> Result<Export>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let target = ExportFormat::parse(target_format)?;
        let list = match self.aggregator.aggregate(recipe_ids).await {
            Ok(list) => list,
            Err(err) => {
                if err.is_user_error() {
                    tracing::info!(err = %err, "shopping list rejected");
                } else {
                    tracing::error!(err = %err, "failed to aggregate shopping list");
                }

                return Err(err);
            }
        };

        let content = export::format(&list, target, &self.options)?;

        tracing::info!(
            entries = list.len(),
            format = %target,
            bytes = content.len(),
            "shopping list generated"
        );

        Ok(Export {
            content,
            content_type: target.content_type(),
            file_name: target.file_name(),
        })
    }
}

impl<S: RecipeStore + CartStore> ShoppingService<S> {
    /// Export every recipe the user put in their shopping cart.
    pub async fn generate_from_cart(&self, user_id: &str, target_format: &str) -> Result<Export> {
        ExportFormat::parse(target_format)?;

        let recipe_ids = self.aggregator.store().cart_recipes(user_id).await?;
        if recipe_ids.is_empty() {
            tracing::info!(user = user_id, "shopping cart is empty");
            return Err(Error::EmptySelection);
        }

        self.generate(user_id, recipe_ids, target_format).await
    }
}
