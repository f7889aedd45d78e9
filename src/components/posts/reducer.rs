use crate::behaviours::{Debouncer, ToastManager};
use crate::effect::Effect;
use crate::environment::types::{Post, ToastKind, UpdatePost};
use crate::environment::Environment;
use crate::loc;

use super::{PostsAction, State};

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this post?";

/// The side channels a reducer may poke besides the state
pub struct Context<'a> {
    pub toasts: &'a ToastManager,
    pub search_debounce: &'a Debouncer,
}

/// Asks the user about destructive actions. Runs before the state is
/// locked, the confirmation may read the store.
pub fn confirm(action: &PostsAction, environment: &Environment) -> bool {
    match action {
        PostsAction::Delete(_) => environment.confirm.confirm(loc!(DELETE_CONFIRMATION)),
        _ => true,
    }
}

/// Expects [`confirm`] to have approved `action`
pub fn reduce(
    context: &Context<'_>,
    action: PostsAction,
    state: &mut State,
    environment: &Environment,
) -> Effect<PostsAction> {
    log::trace!("{action:?}");
    let model = environment.model.clone();

    match action {
        PostsAction::FetchPosts => {
            state.loading = true;
            state.error = None;
            Effect::future(async move { model.posts().await }, PostsAction::FetchedPosts)
        }
        PostsAction::FetchedPosts(result) => {
            state.loading = false;
            match result {
                Ok(posts) => {
                    log::debug!("loaded {} posts", posts.len());
                    state.posts = posts;
                }
                Err(e) => {
                    state.error = Some(e.to_string());
                    context
                        .toasts
                        .show(loc!("Failed to fetch posts"), ToastKind::Error);
                }
            }
            Effect::NONE
        }
        PostsAction::FetchUsers => {
            Effect::future(async move { model.users().await }, PostsAction::FetchedUsers)
        }
        PostsAction::FetchedUsers(result) => {
            match result {
                Ok(users) => state.users = users,
                Err(e) => {
                    log::error!("Failed to fetch users: {e}");
                    state.error = Some(e.to_string());
                    context
                        .toasts
                        .show(loc!("Failed to fetch users"), ToastKind::Error);
                }
            }
            Effect::NONE
        }
        PostsAction::Search(text) => {
            state.query.search = text;
            context.search_debounce.trigger();
            Effect::NONE
        }
        PostsAction::SelectUser(user_id) => {
            state.query.user_id = user_id;
            state.query.page = 1;
            Effect::NONE
        }
        PostsAction::SetPage(page) => {
            state.query.page = page;
            Effect::NONE
        }
        PostsAction::SetPageSize(0) => {
            log::warn!("Ignoring page size of 0");
            state.error = Some(loc!("Page size must be greater than zero").to_string());
            Effect::NONE
        }
        PostsAction::SetPageSize(size) => {
            state.query.page_size = size;
            state.query.page = 1;
            Effect::NONE
        }
        PostsAction::Delete(id) => {
            Effect::future(async move { model.delete_post(id).await }, move |result| {
                PostsAction::Deleted(id, result)
            })
        }
        PostsAction::Deleted(id, result) => {
            match result {
                Ok(()) => {
                    state.posts.retain(|post| post.id != id);
                    context
                        .toasts
                        .show(loc!("Post deleted successfully"), ToastKind::Success);
                }
                Err(_) => {
                    context
                        .toasts
                        .show(loc!("Failed to delete post"), ToastKind::Error);
                }
            }
            Effect::NONE
        }
        PostsAction::Save(data, Some(editing)) => {
            let update = UpdatePost::from(&data);
            Effect::future(
                async move {
                    // updates don't carry the author, keep the one we know
                    model
                        .update_post(editing.id, &update)
                        .await
                        .map(|updated| Post {
                            user_id: editing.user_id,
                            ..updated
                        })
                },
                PostsAction::Updated,
            )
        }
        PostsAction::Save(data, None) => Effect::future(
            async move { model.create_post(&data).await },
            PostsAction::Created,
        ),
        PostsAction::Created(result) => {
            match result {
                Ok(post) => {
                    state.posts.insert(0, post);
                    context
                        .toasts
                        .show(loc!("Post created successfully"), ToastKind::Success);
                }
                Err(_) => {
                    context
                        .toasts
                        .show(loc!("Failed to save post"), ToastKind::Error);
                }
            }
            Effect::NONE
        }
        PostsAction::Updated(result) => {
            match result {
                Ok(updated) => {
                    if let Some(post) = state.posts.iter_mut().find(|p| p.id == updated.id) {
                        *post = updated;
                    }
                    context
                        .toasts
                        .show(loc!("Post updated successfully"), ToastKind::Success);
                }
                Err(_) => {
                    context
                        .toasts
                        .show(loc!("Failed to save post"), ToastKind::Error);
                }
            }
            Effect::NONE
        }
        PostsAction::ShowToast(message, kind) => {
            context.toasts.show(message, kind);
            Effect::NONE
        }
        PostsAction::RemoveToast(id) => {
            context.toasts.remove(&id);
            Effect::NONE
        }
        PostsAction::ClearError => {
            state.error = None;
            Effect::NONE
        }
    }
}
