#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("ingredient name is empty")]
    InvalidName,

    #[error("unknown measurement unit `{0}`")]
    InvalidUnit(String),

    #[error("invalid ingredient amount `{0}`")]
    InvalidAmount(String),

    #[error("total of `{name}` in `{unit}` exceeds the representable range")]
    AmountOverflow { name: String, unit: String },

    #[error("recipe `{0}` not found")]
    RecipeNotFound(String),

    #[error("no recipe selected")]
    EmptySelection,

    #[error("unsupported export format `{0}`")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl Error {
    /// Errors caused by the caller's input or the recipe data, as opposed to
    /// a failing store.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

#[macro_export]
macro_rules! not_found {
    ($recipe_id:expr $(,)?) => {
        return Err($crate::Error::RecipeNotFound(format!("{}", $recipe_id)))
    };
}
