//! Parse-then-validate for bookmark request bodies.
//!
//! Request bodies are read into [`BookmarkFields`] without any type
//! expectations, so a wrongly typed field is reported by the same rule (and
//! in the same order) as a missing one.

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::ValidationError;
use crate::model::{BookmarkPatch, NewBookmark};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Raw field set as sent by the client. Unknown keys are ignored and
/// `null` reads as absent.
#[derive(Debug, Default, Deserialize)]
pub struct BookmarkFields {
    pub title: Option<Value>,
    pub url: Option<Value>,
    pub description: Option<Value>,
    pub rating: Option<Value>,
}

impl BookmarkFields {
    /// Picks the known keys out of a JSON object.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());
        BookmarkFields {
            title: take("title"),
            url: take("url"),
            description: take("description"),
            rating: take("rating"),
        }
    }
}

/// Checks a create request. The first failing rule wins, in the order
/// title, url, description, rating.
pub fn validate_new(fields: BookmarkFields) -> Result<NewBookmark, ValidationError> {
    let title = required_text(fields.title.as_ref()).ok_or(ValidationError::MissingTitle)?;
    let url = web_url(fields.url.as_ref()).ok_or(ValidationError::InvalidUrl)?;
    let description =
        required_text(fields.description.as_ref()).ok_or(ValidationError::MissingDescription)?;
    let rating = fields
        .rating
        .as_ref()
        .ok_or(ValidationError::InvalidRating)
        .and_then(parse_rating)?;

    Ok(NewBookmark {
        title,
        url,
        description,
        rating,
    })
}

/// Checks a partial update. At least one field must be supplied, and every
/// supplied field must pass the rule it would on create.
pub fn validate_patch(fields: BookmarkFields) -> Result<BookmarkPatch, ValidationError> {
    let title = supplied(fields.title);
    let url = supplied(fields.url);
    let description = supplied(fields.description);
    let rating = supplied(fields.rating);

    if title.is_none() && url.is_none() && description.is_none() && rating.is_none() {
        return Err(ValidationError::EmptyPatch);
    }

    let mut patch = BookmarkPatch::default();
    if let Some(title) = title {
        patch.title = Some(required_text(Some(&title)).ok_or(ValidationError::MissingTitle)?);
    }
    if let Some(url) = url {
        patch.url = Some(web_url(Some(&url)).ok_or(ValidationError::InvalidUrl)?);
    }
    if let Some(description) = description {
        patch.description =
            Some(required_text(Some(&description)).ok_or(ValidationError::MissingDescription)?);
    }
    if let Some(rating) = rating {
        patch.rating = Some(parse_rating(&rating)?);
    }

    Ok(patch)
}

/// Absent, `null` and `""` all count as "not supplied" in a patch.
fn supplied(value: Option<Value>) -> Option<Value> {
    match value {
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Null) | None => None,
        other => other,
    }
}

fn required_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn web_url(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if is_web_url(s) => Some(s.clone()),
        _ => None,
    }
}

/// True for absolute `http`/`https` URLs with a host.
///
/// Whitespace and control characters are rejected outright rather than
/// percent-encoded, since the stored string is what gets echoed back.
pub fn is_web_url(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Reads a rating from a JSON number or numeric string and range-checks it.
pub fn parse_rating(value: &Value) -> Result<i64, ValidationError> {
    let rating = match value {
        Value::Number(n) => number_to_integer(n),
        Value::String(s) => string_to_integer(s.trim()),
        _ => None,
    }
    .ok_or(ValidationError::InvalidRating)?;

    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ValidationError::InvalidRating)
    }
}

fn number_to_integer(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| n.as_f64().and_then(integral_float))
}

fn string_to_integer(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(integral_float))
}

fn integral_float(f: f64) -> Option<i64> {
    // anything outside this window fails the range check anyway
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        Some(f as i64)
    } else {
        None
    }
}
