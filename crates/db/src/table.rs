use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    Position,
    Name,
    Unit,
    Amount,
}

#[derive(Iden, Clone)]
pub enum MeasurementUnit {
    Table,
    Name,
}

#[derive(Iden, Clone)]
pub enum ShoppingCartRecipe {
    Table,
    UserId,
    RecipeId,
}
