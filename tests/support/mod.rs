#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use plainblog::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use plainblog::config::SiteSettings;
use plainblog::domain::posts::PostRecord;
use plainblog::infra::http::{HttpState, build_router};

/// `PostsRepo` kept in memory, with the same unique-title rule as the table.
#[derive(Default)]
pub struct MemoryPostsRepo {
    state: Mutex<MemoryState>,
    broken: bool,
}

#[derive(Default)]
struct MemoryState {
    posts: Vec<PostRecord>,
    next_id: i64,
}

impl MemoryPostsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails like an unreachable database.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub async fn snapshot(&self) -> Vec<PostRecord> {
        self.state.lock().await.posts.clone()
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.broken {
            Err(RepoError::from_persistence("connection refused"))
        } else {
            Ok(())
        }
    }
}

fn duplicate() -> RepoError {
    RepoError::Duplicate {
        constraint: "posts_title_key".to_string(),
    }
}

#[async_trait]
impl PostsRepo for MemoryPostsRepo {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        self.check()?;
        Ok(self.state.lock().await.posts.clone())
    }

    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        self.check()?;
        let mut state = self.state.lock().await;
        if state.posts.iter().any(|post| post.title == params.title) {
            return Err(duplicate());
        }

        state.next_id += 1;
        let post = PostRecord {
            id: state.next_id,
            title: params.title,
            subtitle: params.subtitle,
            date: params.date,
            body: params.body,
            author: params.author,
            img_url: params.img_url,
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostRecord>, RepoError> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state.posts.iter().find(|post| post.id == id).cloned())
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        self.check()?;
        let mut state = self.state.lock().await;
        if state
            .posts
            .iter()
            .any(|post| post.id != params.id && post.title == params.title)
        {
            return Err(duplicate());
        }

        let post = state
            .posts
            .iter_mut()
            .find(|post| post.id == params.id)
            .ok_or(RepoError::NotFound)?;
        post.title = params.title;
        post.subtitle = params.subtitle;
        post.body = params.body;
        post.author = params.author;
        post.img_url = params.img_url;
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        self.check()?;
        let mut state = self.state.lock().await;
        let before = state.posts.len();
        state.posts.retain(|post| post.id != id);
        if state.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        self.check()
    }
}

pub fn app_with(repo: Arc<MemoryPostsRepo>, site: &SiteSettings) -> Router {
    build_router(HttpState::new(repo, site))
}

pub fn app(repo: Arc<MemoryPostsRepo>) -> Router {
    app_with(repo, &SiteSettings::default())
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.clone().oneshot(request).await.expect("router response")
}

pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response {
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encoded))
        .expect("build request");
    app.clone().oneshot(request).await.expect("router response")
}

pub async fn body_to_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub fn hello_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("title", "Hello"),
        ("subtitle", "World"),
        ("author", "A"),
        ("img_url", "http://x/y.png"),
        ("body", "<p>...</p>"),
    ]
}

pub fn with_field(
    mut form: Vec<(&'static str, &'static str)>,
    name: &str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    for entry in form.iter_mut() {
        if entry.0 == name {
            entry.1 = value;
        }
    }
    form
}
