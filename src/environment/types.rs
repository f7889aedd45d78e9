use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

// Api Types

pub type PostId = u64;
pub type UserId = u64;

#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    /// Missing in update responses
    #[serde(default)]
    pub user_id: UserId,
}

/// Only the fields we display, the api sends a lot more
#[derive(Default, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub user_id: UserId,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UpdatePost {
    pub title: String,
    pub body: String,
}

impl From<&CreatePost> for UpdatePost {
    fn from(value: &CreatePost) -> Self {
        Self {
            title: value.title.clone(),
            body: value.body.clone(),
        }
    }
}

/// An entry in the author selection
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserOption {
    pub value: String,
    pub label: String,
}

impl UserOption {
    pub fn all_users() -> Self {
        Self {
            value: String::new(),
            label: crate::loc!("All Users").to_string(),
        }
    }
}

impl From<&User> for UserOption {
    fn from(value: &User) -> Self {
        Self {
            value: value.id.to_string(),
            label: value.name.clone(),
        }
    }
}

// Toasts

#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub duration_ms: u64,
}
