use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// A shared, immutable, ordered list of posts. Newest first.
pub type Posts = Arc<[Post]>;

/// A single post. Immutable once built.
///
/// Posts carry no identifier; two posts with equal text are still two
/// entries in the list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Post {
    title: String,
    body: String,
}

impl Post {
    /// Build a post. Any text is accepted, including empty strings.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Short headline, matched before the body.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Post text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Lowercased `title + " " + body`, the text a search query is matched
    /// against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.body).to_lowercase()
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}
