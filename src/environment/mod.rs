pub mod config;
pub mod model;
pub mod storage;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;

pub use config::Config;
pub use model::Model;

use crate::error::Result;
use types::{CreatePost, Post, PostId, UpdatePost, User, UserId};

/// The remote side of the posts store
#[async_trait]
pub trait Api: Send + Sync {
    async fn posts(&self) -> Result<Vec<Post>>;
    async fn post(&self, id: PostId) -> Result<Post>;
    async fn create_post(&self, data: &CreatePost) -> Result<Post>;
    async fn update_post(&self, id: PostId, data: &UpdatePost) -> Result<Post>;
    async fn delete_post(&self, id: PostId) -> Result<()>;
    async fn users(&self) -> Result<Vec<User>>;
    async fn user(&self, id: UserId) -> Result<User>;
}

/// Asks the user before destructive actions
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool + Send + Sync> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Clone)]
pub struct Environment {
    pub model: Arc<dyn Api>,
    pub confirm: Arc<dyn Confirm>,
    pub config: Config,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .finish()
    }
}

impl Environment {
    pub fn new(model: impl Api + 'static, confirm: impl Confirm + 'static, config: Config) -> Self {
        Self {
            model: Arc::new(model),
            confirm: Arc::new(confirm),
            config,
        }
    }

    /// Talk to the configured api
    pub fn with_config(config: Config, confirm: impl Confirm + 'static) -> Result<Self> {
        let model = Model::new(&config)?;
        Ok(Self::new(model, confirm, config))
    }
}
