use super::filter::filter_posts;
use super::post::{Post, Posts};
use crate::runtime::ReactiveRuntime;
use crate::signal::{Effect, Memo, Signal};
use std::sync::Arc;

/// Every value a consumer can read, taken at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct PostSnapshot {
    pub posts: Posts,
    pub visible: Posts,
    pub search_query: String,
}

/// Owns the post list and search query and derives the visible posts.
///
/// `posts` and `search_query` are signals; `visible_posts` is a memo over
/// both, so it is recomputed only after one of them changes and at most
/// once per change. Handles are cheap to clone and share state.
///
/// # Examples
///
/// ```
/// use postboard::{Post, PostStore};
///
/// let store = PostStore::new(vec![
///     Post::new("Optimized bandwidth", "Try to hack the SQL interface!"),
/// ]);
///
/// store.set_search_query("hack");
/// assert_eq!(store.visible_posts().len(), 1);
///
/// store.set_search_query("zzz");
/// assert!(store.visible_posts().is_empty());
/// ```
#[derive(Clone)]
pub struct PostStore {
    posts: Signal<Posts>,
    search_query: Signal<String>,
    visible: Memo<Posts>,
    runtime: Arc<ReactiveRuntime>,
}

impl PostStore {
    /// Create a store in its own runtime with `posts` and an empty query.
    pub fn new(posts: impl IntoIterator<Item = Post>) -> Self {
        Self::with_query(posts, String::new())
    }

    /// Create a store in its own runtime with an initial search query.
    pub fn with_query(posts: impl IntoIterator<Item = Post>, search_query: String) -> Self {
        let posts: Posts = posts.into_iter().collect();
        let runtime = ReactiveRuntime::new();

        ReactiveRuntime::with_runtime(Arc::clone(&runtime), || {
            let posts = Signal::new(posts);
            let search_query = Signal::new(search_query);
            let visible = Memo::new({
                let posts = posts.clone();
                let search_query = search_query.clone();
                move || posts.with(|p| search_query.with(|q| filter_posts(p, q)))
            });

            Self {
                posts,
                search_query,
                visible,
                runtime: Arc::clone(&runtime),
            }
        })
    }

    /// The posts matching the current search query, in list order.
    pub fn visible_posts(&self) -> Posts {
        self.visible.get()
    }

    /// All posts, newest first.
    pub fn posts(&self) -> Posts {
        self.posts.get()
    }

    /// The current search query.
    pub fn search_query(&self) -> String {
        self.search_query.get()
    }

    /// Replace the search query. An empty query disables filtering.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        if self.search_query.set_if_changed(query) {
            tracing::debug!(
                query = %self.search_query.with_untracked(String::clone),
                "search query changed"
            );
        }
    }

    /// Put `post` at the front of the list.
    pub fn add_post(&self, post: Post) {
        tracing::debug!(title = post.title(), "adding post");
        self.posts.update(|posts| {
            *posts = std::iter::once(post).chain(posts.iter().cloned()).collect();
        });
    }

    /// Remove every post. Clearing an empty list changes nothing.
    pub fn clear_posts(&self) {
        if self.posts.with_untracked(|posts| posts.is_empty()) {
            return;
        }
        tracing::debug!("clearing posts");
        self.posts.set(Posts::from(Vec::new()));
    }

    /// Read all values together.
    pub fn snapshot(&self) -> PostSnapshot {
        PostSnapshot {
            posts: self.posts(),
            visible: self.visible_posts(),
            search_query: self.search_query(),
        }
    }

    /// Run `callback` now and again whenever anything it reads through
    /// `store` changes. Dropping the returned [`Effect`] unsubscribes.
    pub fn watch<F>(&self, callback: F) -> Effect
    where
        F: Fn(&PostStore) + Send + Sync + 'static,
    {
        let store = self.clone();
        ReactiveRuntime::with_runtime(Arc::clone(&self.runtime), || {
            Effect::new(move || callback(&store))
        })
    }

    /// The runtime this store's signals live in.
    pub fn runtime(&self) -> &Arc<ReactiveRuntime> {
        &self.runtime
    }
}

impl std::fmt::Debug for PostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostStore")
            .field("posts", &self.posts.with_untracked(|p| p.len()))
            .field(
                "search_query",
                &self.search_query.with_untracked(String::clone),
            )
            .finish()
    }
}
