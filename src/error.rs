use thiserror::Error;

/// Reasons a bookmark field set is rejected before it reaches the store.
///
/// The `Display` text is exactly what clients see in `error.message`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing 'title' in request body")]
    MissingTitle,

    #[error("'url' must be a valid URL")]
    InvalidUrl,

    #[error("Missing 'description' in request body")]
    MissingDescription,

    #[error("'rating' must be a number between 1 and 5")]
    InvalidRating,

    #[error("Request body must contain either 'title', 'url', 'description', or 'rating'")]
    EmptyPatch,
}

impl ValidationError {
    /// Name of the offending field, for logs.
    pub fn field(&self) -> Option<&'static str> {
        use ValidationError::*;
        match self {
            MissingTitle => Some("title"),
            InvalidUrl => Some("url"),
            MissingDescription => Some("description"),
            InvalidRating => Some("rating"),
            EmptyPatch => None,
        }
    }
}
