//! A small feed: a post list, a search box and a counter all reading the
//! same provider.
//!
//! Run with `RUST_LOG=postboard=debug cargo run --example post_feed` to see
//! the store's own events.

use postboard::{random_post, use_posts, PostError, PostProvider, ProviderConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ProviderConfig::load(path)?,
        None => ProviderConfig {
            initial_posts: 5,
            ..ProviderConfig::default()
        },
    };
    tracing::info!(initial_posts = config.initial_posts, "starting post feed");

    let provider = PostProvider::from_config(&config);

    provider.provide(|| -> Result<(), PostError> {
        let posts = use_posts()?;

        let _counter = posts.watch(|store| {
            println!("[counter] {} posts found", store.visible_posts().len());
        });
        let _search = posts.watch(|store| {
            println!("[search] query = {:?}", store.search_query());
        });
        let _list = posts.watch(|store| {
            for post in store.visible_posts().iter().take(3) {
                println!("[list]   {post}");
            }
        });

        println!("\n-- adding a post");
        posts.add_post(random_post());

        println!("\n-- searching for \"the\"");
        posts.set_search_query("the");

        println!("\n-- clearing");
        posts.clear_posts();
        Ok(())
    })?;

    // Outside the provider scope the store is gone.
    if let Err(e) = use_posts() {
        println!("\n{e}");
    }
    Ok(())
}
