pub mod amount;
mod error;
pub mod recipe;

pub use amount::parse_amount;
pub use error::*;
pub use fraction::Fraction;
pub use recipe::{Ingredient, MeasurementUnit, RecipeIngredientLine};
