//! # Postboard
//!
//! A reactive, in-memory post store for UI code.
//!
//! Postboard keeps a list of posts and a search query, derives the posts
//! that match the query, and lets any number of consumers read and mutate
//! that state without passing it around by hand.
//!
//! ## Store
//!
//! - [`PostStore`] - Post list, search query and the memoized filtered view
//! - [`PostProvider`] / [`use_posts`] - Scoped access to a store
//! - [`PostGenerator`] - Source of synthetic posts
//!
//! ## Signals
//!
//! The reactive primitives the store is built on:
//! - `Signal<T>` - Reactive values that notify dependents when changed
//! - `Memo<T>` - Computed values that automatically track dependencies
//! - `Effect` - Side effects that run when dependencies change

pub mod config;
pub mod error;
pub mod provider;
pub mod runtime;
pub mod signal;
pub mod store;

// Re-export main types for convenience
pub use config::ProviderConfig;
pub use error::{ConfigError, PostError};
pub use provider::{use_posts, PostProvider};
pub use signal::{Effect, Memo, Signal};
pub use store::{
    filter_posts, random_post, HackerPosts, Post, PostGenerator, PostSnapshot, PostStore, Posts,
};
