use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::environment::types::{Post, UserId};
use crate::error::{Error, Result};

/// Narrow `posts` down to the ones matching the search text and author.
///
/// A missing or blank `search` matches everything, otherwise the trimmed
/// text has to appear (case-insensitive) in the title or the body. The
/// order of `posts` is kept.
pub fn filter_posts(posts: &[Post], search: Option<&str>, user_id: Option<UserId>) -> Vec<Post> {
    let query = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    posts
        .iter()
        .filter(|post| match &query {
            Some(query) => {
                post.title.to_lowercase().contains(query) || post.body.to_lowercase().contains(query)
            }
            None => true,
        })
        .filter(|post| user_id.map_or(true, |id| post.user_id == id))
        .cloned()
        .collect()
}

/// One page worth of items
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_pages: usize,
}

/// Cut page number `page` (1-based) out of `items`.
///
/// Pages past the end, and page 0, are empty. A `limit` of 0 is an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Result<Page<T>> {
    if limit == 0 {
        return Err(Error::InvalidArgument(
            "page size must be greater than zero".to_string(),
        ));
    }
    let total_pages = items.len().div_ceil(limit);
    let data = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(limit))
        .and_then(|start| items.get(start..))
        .map(|rest| rest.iter().take(limit).cloned().collect())
        .unwrap_or_default();
    Ok(Page { data, total_pages })
}

/// `<unix millis>-<random suffix>`
pub fn generate_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple())
}

/// e.g. `Jan 5, 2024`
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// Accepts RFC 3339 timestamps
pub fn format_date_str(date: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(date)
        .map_err(|e| Error::InvalidArgument(format!("Invalid date {date:?}: {e}")))?;
    Ok(format_date(&parsed))
}
