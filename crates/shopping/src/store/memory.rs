use std::collections::HashMap;

use larder_shared::{Error, Ingredient, MeasurementUnit, Result};
use serde::Deserialize;
use strum::VariantArray;

use super::{CartStore, RecipeStore};

/// In-process recipe store.
///
/// Can be loaded from a JSON catalog:
///
/// ```json
/// {
///   "recipes": { "borscht": [{ "name": "Beet", "unit": "g", "amount": "500" }] },
///   "carts": { "alice": ["borscht"] },
///   "units": ["g", "kg"]
/// }
/// ```
///
/// `units` is optional and defaults to every [`MeasurementUnit`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    recipes: HashMap<String, Vec<Ingredient>>,
    #[serde(default)]
    carts: HashMap<String, Vec<String>>,
    #[serde(default)]
    units: Option<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(content: &[u8]) -> Result<Self> {
        serde_json::from_slice(content).map_err(|err| Error::Unknown(err.into()))
    }

    pub fn with_recipe(
        mut self,
        recipe_id: impl Into<String>,
        ingredients: impl IntoIterator<Item = Ingredient>,
    ) -> Self {
        self.recipes
            .insert(recipe_id.into(), ingredients.into_iter().collect());
        self
    }

    pub fn with_cart<T: Into<String>>(
        mut self,
        user_id: impl Into<String>,
        recipe_ids: impl IntoIterator<Item = T>,
    ) -> Self {
        self.carts.insert(
            user_id.into(),
            recipe_ids.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_units<T: Into<String>>(mut self, units: impl IntoIterator<Item = T>) -> Self {
        self.units = Some(units.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait::async_trait]
impl RecipeStore for MemoryStore {
    async fn recipe_ingredients(&self, recipe_id: &str) -> Result<Vec<Ingredient>> {
        let Some(ingredients) = self.recipes.get(recipe_id) else {
            larder_shared::not_found!(recipe_id);
        };

        Ok(ingredients.clone())
    }

    async fn unit_vocabulary(&self) -> Result<Vec<String>> {
        Ok(match &self.units {
            Some(units) => units.clone(),
            None => MeasurementUnit::VARIANTS
                .iter()
                .map(|unit| unit.as_ref().to_owned())
                .collect(),
        })
    }
}

#[async_trait::async_trait]
impl CartStore for MemoryStore {
    async fn cart_recipes(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self.carts.get(user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use larder_shared::Fraction;

    use super::*;

    #[tokio::test]
    async fn test_memory_store_from_json() -> anyhow::Result<()> {
        let store = MemoryStore::from_json(
            br#"{
                "recipes": {
                    "pancakes": [
                        { "name": "Flour", "unit": "g", "amount": 250 },
                        { "name": "Milk", "unit": "ml", "amount": "1 1/2" }
                    ]
                },
                "carts": { "alice": ["pancakes"] },
                "units": ["g", "ml"]
            }"#,
        )?;

        let lines = store.recipe_ingredients("pancakes").await?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], Ingredient::new("Flour", "g", Fraction::new(250u64, 1u64)));
        assert_eq!(lines[1].amount, Fraction::new(3u64, 2u64));

        assert_eq!(store.cart_recipes("alice").await?, ["pancakes"]);
        assert!(store.cart_recipes("bob").await?.is_empty());
        assert_eq!(store.unit_vocabulary().await?, ["g", "ml"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_memory_store_missing_recipe() {
        let store = MemoryStore::new();
        let err = store.recipe_ingredients("ghost").await.unwrap_err();
        assert!(matches!(err, Error::RecipeNotFound(ref id) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_memory_store_default_vocabulary() -> anyhow::Result<()> {
        let units = MemoryStore::new().unit_vocabulary().await?;
        assert_eq!(units.len(), MeasurementUnit::VARIANTS.len());
        assert!(units.iter().any(|u| u == "to taste"));

        Ok(())
    }

    #[test]
    fn test_memory_store_rejects_bad_amount() {
        let result = MemoryStore::from_json(
            br#"{ "recipes": { "x": [{ "name": "Salt", "unit": "g", "amount": "-1" }] } }"#,
        );
        assert!(result.is_err());
    }
}
