//! Case-insensitive substring search over posts.

use super::post::{Post, Posts};
use std::sync::Arc;

/// Whether `post` matches an already-lowercased, non-empty query.
pub fn matches(post: &Post, query_lower: &str) -> bool {
    post.search_text().contains(query_lower)
}

/// Posts whose `title + " " + body` contains `query`, ignoring case.
///
/// An empty query returns `posts` itself (same allocation). Otherwise the
/// result keeps the relative order of `posts`.
pub fn filter_posts(posts: &Posts, query: &str) -> Posts {
    if query.is_empty() {
        return Arc::clone(posts);
    }

    let query_lower = query.to_lowercase();
    posts
        .iter()
        .filter(|post| matches(post, &query_lower))
        .cloned()
        .collect()
}
