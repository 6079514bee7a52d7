//! Integration tests for Postboard

use postboard::runtime::ReactiveRuntime;
use postboard::{
    use_posts, Effect, Memo, Post, PostError, PostProvider, PostStore, ProviderConfig, Signal,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

#[test]
fn fresh_provider_then_clear_and_add() {
    let provider = PostProvider::new();

    provider.provide(|| {
        let posts = use_posts().unwrap();
        assert_eq!(posts.visible_posts().len(), 30);

        posts.clear_posts();
        assert!(posts.visible_posts().is_empty());

        posts.add_post(Post::new("A", "B"));
        assert_eq!(&*posts.posts(), &[Post::new("A", "B")]);
    });
}

#[test]
fn search_example() {
    let provider = PostProvider::with_posts(vec![Post::new(
        "Optimized bandwidth",
        "Try to hack the SQL interface!",
    )]);
    let store = provider.store();

    store.set_search_query("hack");
    assert_eq!(store.visible_posts().len(), 1);

    store.set_search_query("zzz");
    assert!(store.visible_posts().is_empty());

    store.set_search_query("");
    assert!(Arc::ptr_eq(&store.visible_posts(), &store.posts()));
}

#[test]
fn consumer_fails_outside_provider() {
    fn render_post_count() -> Result<usize, PostError> {
        Ok(use_posts()?.visible_posts().len())
    }

    assert_eq!(render_post_count(), Err(PostError::UsedOutsideProvider));

    let provider = PostProvider::with_posts(vec![Post::new("one", "post")]);
    assert_eq!(provider.provide(render_post_count), Ok(1));

    // Torn down once the scope ends.
    assert_eq!(render_post_count(), Err(PostError::UsedOutsideProvider));
    assert_eq!(
        PostError::UsedOutsideProvider.to_string(),
        "post store was used outside of a PostProvider"
    );
}

#[test]
fn consumers_are_notified_synchronously() {
    let provider = PostProvider::with_posts(Vec::new());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let _list = provider.provide(|| {
        use_posts().unwrap().watch({
            let seen = seen.clone();
            move |store| {
                let titles: Vec<String> = store
                    .visible_posts()
                    .iter()
                    .map(|p| p.title().to_string())
                    .collect();
                seen.lock().unwrap().push(titles);
            }
        })
    });

    let store = provider.store();
    store.add_post(Post::new("rust", "is fun"));
    store.add_post(Post::new("go", "is fine"));
    store.set_search_query("FUN");
    store.clear_posts();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            vec![],
            vec!["rust".to_string()],
            vec!["go".to_string(), "rust".to_string()],
            vec!["rust".to_string()],
            vec![],
        ]
    );
}

#[test]
fn query_only_consumer_ignores_post_changes() {
    let store = PostStore::new(Vec::new());
    let runs = Arc::new(AtomicUsize::new(0));

    let _search_box = store.watch({
        let runs = runs.clone();
        move |store| {
            let _ = store.search_query();
            runs.fetch_add(1, Ordering::SeqCst);
        }
    });

    store.add_post(Post::new("a", "b"));
    store.clear_posts();
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    store.set_search_query("x");
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn provider_from_config_file() {
    let dir = std::env::temp_dir().join(format!("postboard-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("postboard.toml");
    std::fs::write(&path, "initial_posts = 5\n").unwrap();

    let config = ProviderConfig::load(&path).unwrap();
    let provider = PostProvider::from_config(&config);
    assert_eq!(provider.store().posts().len(), 5);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn complex_reactive_chain() {
    ReactiveRuntime::scope(|| {
        let input = Signal::new(1);

        let doubled = Memo::new({
            let input = input.clone();
            move || input.get() * 2
        });

        let quadrupled = Memo::new({
            let doubled = doubled.clone();
            move || doubled.get() * 2
        });

        let last = Arc::new(AtomicUsize::new(0));
        let _effect = Effect::new({
            let quadrupled = quadrupled.clone();
            let last = last.clone();
            move || last.store(quadrupled.get(), Ordering::SeqCst)
        });

        assert_eq!(last.load(Ordering::SeqCst), 4);

        input.set(5);
        assert_eq!(quadrupled.get(), 20);
        assert_eq!(last.load(Ordering::SeqCst), 20);
    });
}
