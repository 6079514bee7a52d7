//! The post store and the pieces it is built from.
//!
//! [`PostStore`] holds the canonical post list and search query as signals
//! and derives the visible posts as a memo over both.

mod filter;
mod generator;
mod post;
mod store;

pub use filter::{filter_posts, matches};
pub use generator::{random_post, HackerPosts, PostGenerator};
pub use post::{Post, Posts};
pub use store::{PostSnapshot, PostStore};
