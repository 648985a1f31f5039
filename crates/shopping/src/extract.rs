use larder_shared::{RecipeIngredientLine, Result};

use crate::store::RecipeStore;

/// Read the ingredient lines of one recipe, in declaration order.
///
/// Duplicate mentions inside the recipe are kept as separate lines.
pub async fn extract<S: RecipeStore + ?Sized>(
    store: &S,
    recipe_id: &str,
) -> Result<Vec<RecipeIngredientLine>> {
    let ingredients = store.recipe_ingredients(recipe_id).await?;

    tracing::debug!(
        recipe = recipe_id,
        lines = ingredients.len(),
        "extracted recipe ingredients"
    );

    Ok(ingredients
        .into_iter()
        .enumerate()
        .map(|(position, ingredient)| RecipeIngredientLine {
            recipe_id: recipe_id.to_owned(),
            position,
            ingredient,
        })
        .collect())
}
