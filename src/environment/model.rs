use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::config::Config;
use super::types::{CreatePost, Post, PostId, UpdatePost, User, UserId};
use super::Api;
use crate::error::{Error, Result};

/// The JSONPlaceholder client
#[derive(Clone)]
pub struct Model {
    pub url: Url,
    client: Client,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model").field("url", &self.url.as_str()).finish()
    }
}

/// The request body for an update carries the id next to the fields
#[derive(Serialize)]
struct UpdateBody<'a> {
    #[serde(flatten)]
    data: &'a UpdatePost,
    id: PostId,
}

impl Model {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .api_error("client")?;
        Ok(Self {
            url: base_url(&config.api_url),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.url
            .join(path)
            .map_err(|e| Error::Request(format!("Invalid path {path}: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, call: &'static str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self.client.get(url).send().await.api_error(call)?;
        decode(response, call).await
    }
}

#[async_trait]
impl Api for Model {
    async fn posts(&self) -> Result<Vec<Post>> {
        log::trace!("Posts");
        let posts: Vec<Post> = self.get("posts", "posts").await?;
        log::debug!("posts arrived {}", posts.len());
        Ok(posts)
    }

    async fn post(&self, id: PostId) -> Result<Post> {
        self.get(&format!("posts/{id}"), "post").await
    }

    async fn create_post(&self, data: &CreatePost) -> Result<Post> {
        log::trace!("Create post");
        let url = self.endpoint("posts")?;
        let response = self
            .client
            .post(url)
            .json(data)
            .send()
            .await
            .api_error("create_post")?;
        decode(response, "create_post").await
    }

    async fn update_post(&self, id: PostId, data: &UpdatePost) -> Result<Post> {
        log::trace!("Update post {id}");
        let url = self.endpoint(&format!("posts/{id}"))?;
        let response = self
            .client
            .put(url)
            .json(&UpdateBody { data, id })
            .send()
            .await
            .api_error("update_post")?;
        decode(response, "update_post").await
    }

    async fn delete_post(&self, id: PostId) -> Result<()> {
        log::trace!("Delete post {id}");
        let url = self.endpoint(&format!("posts/{id}"))?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .api_error("delete_post")?;
        check_status(response, "delete_post")?;
        Ok(())
    }

    async fn users(&self) -> Result<Vec<User>> {
        log::trace!("Users");
        self.get("users", "users").await
    }

    async fn user(&self, id: UserId) -> Result<User> {
        self.get(&format!("users/{id}"), "user").await
    }
}

/// `join` replaces the last path segment unless the base ends in `/`
fn base_url(url: &Url) -> Url {
    let mut url = url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn check_status(response: Response, call: &'static str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error = Error::Api {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
    };
    log::error!("API Error: {call} {error}");
    Err(error)
}

async fn decode<T: DeserializeOwned>(response: Response, call: &'static str) -> Result<T> {
    let response = check_status(response, call)?;
    response.json::<T>().await.api_error(call)
}

trait ResultExt {
    type Output;
    fn api_error(self, call: &'static str) -> Result<Self::Output>;
}

impl<T, E: Into<Error>> ResultExt for std::result::Result<T, E> {
    type Output = T;
    fn api_error(self, call: &'static str) -> Result<T> {
        self.map_err(|e| {
            let error: Error = e.into();
            log::error!("API Error: {call} {error}");
            error
        })
    }
}
