use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_html;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i64,
}

impl Bookmark {
    /// Copy of this bookmark that is safe to echo back to a browser.
    ///
    /// Every bookmark leaving the API goes through here.
    pub fn sanitized(&self) -> Self {
        Bookmark {
            id: self.id,
            title: sanitize_html(&self.title),
            url: sanitize_html(&self.url),
            description: sanitize_html(&self.description),
            rating: self.rating,
        }
    }
}

/// A fully validated bookmark, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: i64,
}

/// Validated replacement values for a partial update. `None` leaves the
/// column as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i64>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.description.is_none() && self.rating.is_none()
    }
}
