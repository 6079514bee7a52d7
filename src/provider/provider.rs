use crate::config::ProviderConfig;
use crate::error::PostError;
use crate::store::{HackerPosts, Post, PostGenerator, PostStore};
use std::cell::RefCell;

thread_local! {
    static PROVIDER_STACK: RefCell<Vec<PostStore>> = const { RefCell::new(Vec::new()) };
}

/// Owns a [`PostStore`] and makes it reachable through [`use_posts`] while
/// [`provide`](PostProvider::provide) runs.
///
/// # Examples
///
/// ```
/// use postboard::{use_posts, Post, PostError, PostProvider};
///
/// let provider = PostProvider::new();
///
/// provider.provide(|| -> Result<(), PostError> {
///     let posts = use_posts()?;
///     assert_eq!(posts.visible_posts().len(), 30);
///
///     posts.clear_posts();
///     posts.add_post(Post::new("A", "B"));
///     assert_eq!(posts.visible_posts().len(), 1);
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(use_posts().unwrap_err(), PostError::UsedOutsideProvider);
/// ```
#[derive(Debug)]
pub struct PostProvider {
    store: PostStore,
}

impl PostProvider {
    /// A provider seeded with the default number of random posts.
    pub fn new() -> Self {
        Self::from_config(&ProviderConfig::default())
    }

    /// A provider seeded with random posts as `config` describes.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::with_generator(config, HackerPosts)
    }

    /// A provider whose initial posts come from `generator`.
    pub fn with_generator(config: &ProviderConfig, mut generator: impl PostGenerator) -> Self {
        let posts: Vec<Post> = (0..config.initial_posts)
            .map(|_| generator.generate())
            .collect();
        tracing::debug!(
            posts = posts.len(),
            query = %config.search_query,
            "creating post provider"
        );
        Self {
            store: PostStore::with_query(posts, config.search_query.clone()),
        }
    }

    /// A provider over exactly `posts`, with an empty query.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            store: PostStore::new(posts),
        }
    }

    /// Run `f` with this provider's store as the innermost active store.
    ///
    /// Nested providers shadow outer ones. The store is popped again when
    /// `f` returns or panics.
    pub fn provide<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        PROVIDER_STACK.with(|stack| stack.borrow_mut().push(self.store.clone()));
        tracing::trace!("entered post provider scope");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        PROVIDER_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
        tracing::trace!("left post provider scope");

        match result {
            Ok(r) => r,
            Err(e) => std::panic::resume_unwind(e),
        }
    }

    /// Direct access for the owner of the provider.
    pub fn store(&self) -> &PostStore {
        &self.store
    }
}

impl Default for PostProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// The store of the innermost active [`PostProvider`].
///
/// Fails with [`PostError::UsedOutsideProvider`] when called outside any
/// [`PostProvider::provide`] scope.
pub fn use_posts() -> Result<PostStore, PostError> {
    PROVIDER_STACK
        .with(|stack| stack.borrow().last().cloned())
        .ok_or_else(|| {
            tracing::error!("post store was used outside of a PostProvider");
            PostError::UsedOutsideProvider
        })
}
