use fraction::Fraction;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Closed set of measurement units an ingredient line may use.
///
/// Each variant has exactly one canonical spelling, used for comparison,
/// ordering and rendering. Units are never converted into each other.
#[derive(
    EnumString, Display, VariantArray, Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr,
)]
pub enum MeasurementUnit {
    #[strum(serialize = "g")]
    Gram,
    #[strum(serialize = "kg")]
    Kilogram,
    #[strum(serialize = "mg")]
    Milligram,
    #[strum(serialize = "ml")]
    Milliliter,
    #[strum(serialize = "l")]
    Liter,
    #[strum(serialize = "tsp")]
    Teaspoon,
    #[strum(serialize = "tbsp")]
    Tablespoon,
    #[strum(serialize = "cup")]
    Cup,
    #[strum(serialize = "pcs")]
    Piece,
    #[strum(serialize = "clove")]
    Clove,
    #[strum(serialize = "pinch")]
    Pinch,
    #[strum(serialize = "slice")]
    Slice,
    #[strum(serialize = "bunch")]
    Bunch,
    #[strum(serialize = "can")]
    Can,
    #[strum(serialize = "drop")]
    Drop,
    #[strum(serialize = "to taste")]
    ToTaste,
}

/// One ingredient mention as declared on a recipe.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub unit: String,
    #[serde(deserialize_with = "crate::amount::deserialize")]
    pub amount: Fraction,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, amount: Fraction) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            amount,
        }
    }
}

/// An ingredient line together with the recipe that owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeIngredientLine {
    pub recipe_id: String,
    /// Declaration order inside the recipe, starting at 0.
    pub position: usize,
    pub ingredient: Ingredient,
}
