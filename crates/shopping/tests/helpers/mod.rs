use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::{path::PathBuf, str::FromStr};

/// Tables owned by the recipe subsystem, as the store reads them.
const SCHEMA: &[&str] = &[
    "CREATE TABLE recipe (id TEXT PRIMARY KEY, author_id TEXT NOT NULL, name TEXT NOT NULL)",
    "CREATE TABLE recipe_ingredient (
        recipe_id TEXT NOT NULL REFERENCES recipe(id),
        position INTEGER NOT NULL,
        name TEXT NOT NULL,
        unit TEXT NOT NULL,
        amount TEXT NOT NULL,
        PRIMARY KEY (recipe_id, position)
    )",
    "CREATE TABLE measurement_unit (name TEXT PRIMARY KEY)",
    "CREATE TABLE shopping_cart_recipe (
        user_id TEXT NOT NULL,
        recipe_id TEXT NOT NULL REFERENCES recipe(id),
        PRIMARY KEY (user_id, recipe_id)
    )",
];

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

pub async fn insert_units(pool: &SqlitePool, units: &[&str]) -> anyhow::Result<()> {
    for unit in units {
        sqlx::query("INSERT INTO measurement_unit (name) VALUES (?)")
            .bind(*unit)
            .execute(pool)
            .await?;
    }

    Ok(())
}

pub async fn insert_recipe(
    pool: &SqlitePool,
    id: &str,
    ingredients: &[(&str, &str, &str)],
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO recipe (id, author_id, name) VALUES (?, ?, ?)")
        .bind(id)
        .bind("author")
        .bind(format!("recipe {id}"))
        .execute(pool)
        .await?;

    for (position, (name, unit, amount)) in ingredients.iter().enumerate() {
        sqlx::query(
            "INSERT INTO recipe_ingredient (recipe_id, position, name, unit, amount) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(position as i64)
        .bind(*name)
        .bind(*unit)
        .bind(*amount)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn add_to_cart(pool: &SqlitePool, user_id: &str, recipe_id: &str) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO shopping_cart_recipe (user_id, recipe_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(())
}
