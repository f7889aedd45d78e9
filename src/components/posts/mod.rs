mod action;
mod reducer;
mod state;

pub use action::PostsAction;
pub use reducer::{confirm, reduce, Context};
pub use state::{Query, State};

use flume::Receiver;

use crate::behaviours::{Debouncer, ToastManager};
use crate::effect::Effect;
use crate::environment::storage::Publisher;
use crate::environment::types::{CreatePost, Post, PostId, Toast, ToastKind, UserId, UserOption};
use crate::environment::Environment;
use crate::error::Result;
use crate::helper::Page;

/// The one store holding posts, users and the current query.
///
/// Construct it once and hand clones around, they all share the same
/// state. Every action goes through [`reduce`], futures returned as
/// effects are awaited inside [`PostsStore::send`].
#[derive(Clone, Debug)]
pub struct PostsStore {
    state: Publisher<State>,
    toasts: ToastManager,
    search_debounce: Debouncer,
    environment: Environment,
}

impl PostsStore {
    /// Actions have to be sent from within a tokio runtime
    pub fn new(environment: Environment) -> Self {
        let state = Publisher::new(State::new(environment.config.page_size));
        let toasts = ToastManager::new(environment.config.toast_duration());

        let debounced = state.clone();
        let search_debounce = Debouncer::new(environment.config.search_debounce(), move || {
            log::trace!("search settled, back to page 1");
            debounced.with_mutation(|state| state.query.page = 1);
        });

        Self {
            state,
            toasts,
            search_debounce,
            environment,
        }
    }

    /// Reduce `action` and everything its effects resolve to
    pub async fn send(&self, action: PostsAction) {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            if !confirm(&action, &self.environment) {
                log::debug!("declined {action:?}");
                continue;
            }
            let context = Context {
                toasts: &self.toasts,
                search_debounce: &self.search_debounce,
            };
            let effect = self
                .state
                .with_mutation(|state| reduce(&context, action, state, &self.environment));
            next = match effect {
                Effect::None => None,
                Effect::Action(action) => Some(action),
                Effect::Future(future) => Some(future.await),
            };
        }
    }

    pub async fn fetch_posts(&self) {
        self.send(PostsAction::FetchPosts).await
    }

    pub async fn fetch_users(&self) {
        self.send(PostsAction::FetchUsers).await
    }

    pub async fn search(&self, text: impl Into<String>) {
        self.send(PostsAction::Search(text.into())).await
    }

    pub async fn select_user(&self, user_id: Option<UserId>) {
        self.send(PostsAction::SelectUser(user_id)).await
    }

    pub async fn set_page(&self, page: usize) {
        self.send(PostsAction::SetPage(page)).await
    }

    pub async fn set_page_size(&self, size: usize) {
        self.send(PostsAction::SetPageSize(size)).await
    }

    pub async fn delete(&self, id: PostId) {
        self.send(PostsAction::Delete(id)).await
    }

    /// Creates a new post, or updates `editing` if given
    pub async fn save(&self, data: CreatePost, editing: Option<Post>) {
        self.send(PostsAction::Save(data, editing)).await
    }

    pub async fn show_toast(&self, message: impl Into<String>, kind: ToastKind) {
        self.send(PostsAction::ShowToast(message.into(), kind)).await
    }

    pub async fn remove_toast(&self, id: impl Into<String>) {
        self.send(PostsAction::RemoveToast(id.into())).await
    }

    pub async fn clear_error(&self) {
        self.send(PostsAction::ClearError).await
    }

    // Views

    pub fn state(&self) -> State {
        self.state.value()
    }

    pub fn filtered_posts(&self) -> Vec<Post> {
        self.state.with(State::filtered_posts)
    }

    pub fn page(&self) -> Result<Page<Post>> {
        self.state.with(State::page)
    }

    pub fn total_pages(&self) -> Result<usize> {
        self.state.with(State::total_pages)
    }

    pub fn user_options(&self) -> Vec<UserOption> {
        self.state.with(State::user_options)
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.toasts()
    }

    /// A snapshot after every state change
    pub fn subscribe(&self) -> Receiver<State> {
        self.state.subscribe()
    }

    pub fn subscribe_toasts(&self) -> Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }
}
