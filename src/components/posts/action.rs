use crate::environment::types::{CreatePost, Post, PostId, ToastKind, User, UserId};
use crate::error::Result;

#[derive(Clone, Debug)]
pub enum PostsAction {
    FetchPosts,
    FetchedPosts(Result<Vec<Post>>),
    FetchUsers,
    FetchedUsers(Result<Vec<User>>),
    /// The search text changed, the page resets once typing stops
    Search(String),
    SelectUser(Option<UserId>),
    SetPage(usize),
    SetPageSize(usize),
    Delete(PostId),
    Deleted(PostId, Result<()>),
    Save(CreatePost, Option<Post>),
    Created(Result<Post>),
    Updated(Result<Post>),
    ShowToast(String, ToastKind),
    RemoveToast(String),
    ClearError,
}
