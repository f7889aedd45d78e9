use crate::environment::types::{Post, User, UserId, UserOption};
use crate::helper::{filter_posts, paginate, Page};
use crate::error::Result;

/// What the user is currently looking at
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub search: String,
    pub user_id: Option<UserId>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Query {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            user_id: None,
            page: 1,
            page_size,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    pub posts: Vec<Post>,
    pub users: Vec<User>,
    /// Are the posts loading
    pub loading: bool,
    pub error: Option<String>,
    pub query: Query,
}

impl State {
    pub fn new(page_size: usize) -> Self {
        Self {
            posts: Vec::new(),
            users: Vec::new(),
            loading: false,
            error: None,
            query: Query::new(page_size),
        }
    }

    pub fn filtered_posts(&self) -> Vec<Post> {
        filter_posts(&self.posts, Some(&self.query.search), self.query.user_id)
    }

    pub fn page(&self) -> Result<Page<Post>> {
        paginate(&self.filtered_posts(), self.query.page, self.query.page_size)
    }

    pub fn total_pages(&self) -> Result<usize> {
        self.page().map(|page| page.total_pages)
    }

    pub fn user_options(&self) -> Vec<UserOption> {
        std::iter::once(UserOption::all_users())
            .chain(self.users.iter().map(UserOption::from))
            .collect()
    }
}
