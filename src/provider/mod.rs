//! Scoped access to a post store.
//!
//! A [`PostProvider`] makes its store the current one for the duration of
//! [`PostProvider::provide`]; consumers inside reach it with [`use_posts`].

mod provider;

pub use provider::{use_posts, PostProvider};
