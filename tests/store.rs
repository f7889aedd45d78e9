use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use statelab::{
    Api, Config, CreatePost, Environment, Error, Post, PostId, PostsStore, Result, ToastKind,
    UpdatePost, User, UserId,
};
use tokio::time::sleep;

/// Clones share their data, so tests can keep a handle after giving
/// one to the store
#[derive(Clone, Default)]
struct FakeApi {
    posts: Arc<Mutex<Vec<Post>>>,
    users: Vec<User>,
    offline: Arc<AtomicBool>,
    deletes: Arc<AtomicUsize>,
}

impl FakeApi {
    fn check(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(Error::Network("offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Api for FakeApi {
    async fn posts(&self) -> Result<Vec<Post>> {
        self.check()?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn post(&self, id: PostId) -> Result<Post> {
        self.check()?;
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(Error::Api {
                status: 404,
                status_text: "Not Found".to_string(),
            })
    }

    async fn create_post(&self, data: &CreatePost) -> Result<Post> {
        self.check()?;
        Ok(Post {
            id: 101,
            title: data.title.clone(),
            body: data.body.clone(),
            user_id: data.user_id,
        })
    }

    async fn update_post(&self, id: PostId, data: &UpdatePost) -> Result<Post> {
        self.check()?;
        // like the real api, the author is not echoed back
        Ok(Post {
            id,
            title: data.title.clone(),
            body: data.body.clone(),
            user_id: 0,
        })
    }

    async fn delete_post(&self, _id: PostId) -> Result<()> {
        self.check()?;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn users(&self) -> Result<Vec<User>> {
        self.check()?;
        Ok(self.users.clone())
    }

    async fn user(&self, id: UserId) -> Result<User> {
        self.check()?;
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(Error::Request("unknown user".to_string()))
    }
}

fn post(id: u64, title: &str, body: &str, user_id: u64) -> Post {
    Post {
        id,
        title: title.to_string(),
        body: body.to_string(),
        user_id,
    }
}

fn fake() -> FakeApi {
    let posts = (1..=30)
        .map(|i| post(i, &format!("Post {i}"), "lorem ipsum", (i - 1) / 10 + 1))
        .collect();
    FakeApi {
        posts: Arc::new(Mutex::new(posts)),
        users: vec![
            User {
                id: 1,
                name: "Leanne Graham".to_string(),
            },
            User {
                id: 2,
                name: "Ervin Howell".to_string(),
            },
        ],
        ..Default::default()
    }
}

fn store(api: FakeApi, confirmed: bool) -> PostsStore {
    statelab::init_logging();
    let environment = Environment::new(api, move |_: &str| confirmed, Config::default());
    PostsStore::new(environment)
}

fn messages(store: &PostsStore) -> Vec<(String, ToastKind)> {
    store
        .toasts()
        .into_iter()
        .map(|t| (t.message, t.kind))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_fetch_posts_and_paginate() {
    let store = store(fake(), true);
    store.fetch_posts().await;

    let state = store.state();
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.posts.len(), 30);

    let page = store.page().unwrap();
    assert_eq!(page.data.len(), 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(store.total_pages().unwrap(), 3);

    store.set_page(3).await;
    let ids: Vec<_> = store.page().unwrap().data.iter().map(|p| p.id).collect();
    assert_eq!(ids, (25..=30).collect::<Vec<_>>());

    store.set_page(9).await;
    assert!(store.page().unwrap().data.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_shows_error_toast() {
    let api = fake();
    api.offline.store(true, Ordering::SeqCst);
    let store = store(api, true);
    store.fetch_posts().await;

    let state = store.state();
    assert!(!state.loading);
    assert!(state.posts.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("Network Error: No response from server (offline)")
    );
    assert_eq!(
        messages(&store),
        vec![("Failed to fetch posts".to_string(), ToastKind::Error)]
    );

    sleep(Duration::from_millis(3001)).await;
    assert!(store.toasts().is_empty());

    store.clear_error().await;
    assert_eq!(store.state().error, None);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_users_builds_options() {
    let store = store(fake(), true);
    store.fetch_users().await;
    let options = store.user_options();
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["All Users", "Leanne Graham", "Ervin Howell"]);
    assert_eq!(options[0].value, "");
    assert_eq!(options[2].value, "2");
}

#[tokio::test(start_paused = true)]
async fn test_failed_users_fetch_is_reported() {
    let api = fake();
    api.offline.store(true, Ordering::SeqCst);
    let store = store(api, true);
    store.fetch_users().await;
    assert_eq!(store.user_options().len(), 1);
    assert_eq!(
        messages(&store),
        vec![("Failed to fetch users".to_string(), ToastKind::Error)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_search_resets_page_after_debounce() {
    let store = store(fake(), true);
    store.fetch_posts().await;
    store.set_page(2).await;

    store.search("post 1").await;
    store.search("post 2").await;
    // filtering applies right away, the page reset waits for typing to stop
    assert_eq!(store.state().query.page, 2);
    assert_eq!(store.filtered_posts().len(), 11);

    sleep(Duration::from_millis(299)).await;
    assert_eq!(store.state().query.page, 2);
    sleep(Duration::from_millis(2)).await;
    assert_eq!(store.state().query.page, 1);
    assert_eq!(store.page().unwrap().total_pages, 1);
}

#[tokio::test(start_paused = true)]
async fn test_select_user_and_page_size_reset_page() {
    let store = store(fake(), true);
    store.fetch_posts().await;

    store.set_page(3).await;
    store.select_user(Some(2)).await;
    assert_eq!(store.state().query.page, 1);
    assert!(store.filtered_posts().iter().all(|p| p.user_id == 2));
    assert_eq!(store.total_pages().unwrap(), 1);

    store.select_user(None).await;
    store.set_page(2).await;
    store.set_page_size(5).await;
    let state = store.state();
    assert_eq!(state.query.page, 1);
    assert_eq!(state.query.page_size, 5);
    assert_eq!(store.total_pages().unwrap(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_zero_page_size_is_rejected() {
    let store = store(fake(), true);
    store.fetch_posts().await;
    store.set_page(2).await;
    store.set_page_size(0).await;

    let state = store.state();
    assert_eq!(state.query.page_size, 12);
    assert_eq!(state.query.page, 2);
    assert!(state.error.is_some());
    assert!(store.page().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_delete_needs_confirmation() {
    let api = fake();
    let store = store(api.clone(), false);
    store.fetch_posts().await;
    store.delete(1).await;

    assert_eq!(api.deletes.load(Ordering::SeqCst), 0);
    assert_eq!(store.state().posts.len(), 30);
    assert!(store.toasts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_delete_removes_post() {
    let api = fake();
    let store = store(api.clone(), true);
    store.fetch_posts().await;
    store.delete(1).await;

    assert_eq!(api.deletes.load(Ordering::SeqCst), 1);
    let state = store.state();
    assert_eq!(state.posts.len(), 29);
    assert!(state.posts.iter().all(|p| p.id != 1));
    assert_eq!(
        messages(&store),
        vec![("Post deleted successfully".to_string(), ToastKind::Success)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_delete_keeps_posts() {
    let api = fake();
    let store = store(api.clone(), true);
    store.fetch_posts().await;
    api.offline.store(true, Ordering::SeqCst);
    store.delete(1).await;

    assert_eq!(store.state().posts.len(), 30);
    assert_eq!(
        messages(&store),
        vec![("Failed to delete post".to_string(), ToastKind::Error)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_create_prepends_post() {
    let store = store(fake(), true);
    store.fetch_posts().await;
    store
        .save(
            CreatePost {
                title: "Fresh".to_string(),
                body: "news".to_string(),
                user_id: 2,
            },
            None,
        )
        .await;

    let state = store.state();
    assert_eq!(state.posts.len(), 31);
    assert_eq!(state.posts[0], post(101, "Fresh", "news", 2));
    assert_eq!(
        messages(&store),
        vec![("Post created successfully".to_string(), ToastKind::Success)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_update_replaces_post_in_place() {
    let store = store(fake(), true);
    store.fetch_posts().await;
    let editing = store.state().posts[4].clone();
    store
        .save(
            CreatePost {
                title: "Edited".to_string(),
                body: "changed".to_string(),
                user_id: editing.user_id,
            },
            Some(editing.clone()),
        )
        .await;

    let state = store.state();
    assert_eq!(state.posts.len(), 30);
    assert_eq!(state.posts[4], post(editing.id, "Edited", "changed", editing.user_id));
    assert_eq!(
        messages(&store),
        vec![("Post updated successfully".to_string(), ToastKind::Success)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_save_keeps_posts() {
    let api = fake();
    let store = store(api.clone(), true);
    store.fetch_posts().await;
    let before = store.state().posts;
    api.offline.store(true, Ordering::SeqCst);
    store
        .save(
            CreatePost {
                title: "Lost".to_string(),
                body: "".to_string(),
                user_id: 1,
            },
            None,
        )
        .await;

    assert_eq!(store.state().posts, before);
    assert_eq!(
        messages(&store),
        vec![("Failed to save post".to_string(), ToastKind::Error)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_manual_toasts() {
    let store = store(fake(), true);
    store.show_toast("Hi", ToastKind::Info).await;
    let id = store.toasts()[0].id.clone();
    store.remove_toast(id.clone()).await;
    assert!(store.toasts().is_empty());
    // removing twice does nothing
    store.remove_toast(id).await;
    sleep(Duration::from_secs(4)).await;
    assert!(store.toasts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_every_change() {
    let store = store(fake(), true);
    let states = store.subscribe();
    let toasts = store.subscribe_toasts();
    store.fetch_posts().await;

    let seen: Vec<_> = states.drain().collect();
    // loading, then loaded
    assert_eq!(seen.len(), 2);
    assert!(seen[0].loading);
    assert!(!seen[1].loading);
    assert_eq!(seen[1].posts.len(), 30);
    assert!(toasts.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_confirmation_can_read_the_store() {
    let api = fake();
    let slot: Arc<OnceLock<PostsStore>> = Arc::default();
    let seen = Arc::new(AtomicUsize::new(0));

    let (cloned_slot, cloned_seen) = (slot.clone(), seen.clone());
    let confirm = move |_: &str| {
        if let Some(store) = cloned_slot.get() {
            cloned_seen.store(store.state().posts.len(), Ordering::SeqCst);
        }
        true
    };
    let store = PostsStore::new(Environment::new(api.clone(), confirm, Config::default()));
    let _ = slot.set(store.clone());

    store.fetch_posts().await;
    tokio::time::timeout(Duration::from_secs(3), store.delete(1))
        .await
        .expect("delete finished");

    assert_eq!(seen.load(Ordering::SeqCst), 30);
    assert_eq!(api.deletes.load(Ordering::SeqCst), 1);
    assert_eq!(store.state().posts.len(), 29);
}
