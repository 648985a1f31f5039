use larder_db::table::{MeasurementUnit, Recipe, RecipeIngredient, ShoppingCartRecipe};
use larder_shared::{Ingredient, Result, parse_amount};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use super::{CartStore, RecipeStore};

/// Reads recipes from the recipe subsystem's SQLite tables.
///
/// Amounts are stored as text (`"200"`, `"0.5"`, `"1 1/2"`) to keep them
/// exact.
#[derive(Clone)]
pub struct SqliteStore(pub SqlitePool);

#[derive(FromRow)]
struct IngredientRow {
    name: String,
    unit: String,
    amount: String,
}

impl SqliteStore {
    async fn recipe_exists(&self, recipe_id: &str) -> Result<bool> {
        let statement = Query::select()
            .column(Recipe::Id)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(recipe_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        Ok(row.is_some())
    }
}

#[async_trait::async_trait]
impl RecipeStore for SqliteStore {
    async fn recipe_ingredients(&self, recipe_id: &str) -> Result<Vec<Ingredient>> {
        if !self.recipe_exists(recipe_id).await? {
            larder_shared::not_found!(recipe_id);
        }

        let statement = Query::select()
            .columns([
                RecipeIngredient::Name,
                RecipeIngredient::Unit,
                RecipeIngredient::Amount,
            ])
            .from(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
            .order_by(RecipeIngredient::Position, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(Ingredient {
                    amount: parse_amount(&row.amount)?,
                    name: row.name,
                    unit: row.unit,
                })
            })
            .collect()
    }

    async fn unit_vocabulary(&self) -> Result<Vec<String>> {
        let statement = Query::select()
            .column(MeasurementUnit::Name)
            .from(MeasurementUnit::Table)
            .order_by(MeasurementUnit::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

#[async_trait::async_trait]
impl CartStore for SqliteStore {
    async fn cart_recipes(&self, user_id: &str) -> Result<Vec<String>> {
        let statement = Query::select()
            .column(ShoppingCartRecipe::RecipeId)
            .from(ShoppingCartRecipe::Table)
            .and_where(Expr::col(ShoppingCartRecipe::UserId).eq(user_id))
            .order_by(ShoppingCartRecipe::RecipeId, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(recipe_id,)| recipe_id).collect())
    }
}
