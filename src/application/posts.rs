use std::sync::Arc;

use chrono_tz::Tz;
use thiserror::Error;
use tracing::{debug, info};

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use crate::domain::posts::{PostDraft, PostRecord};
use crate::util::timing::current_post_date_in;

const LOG_TARGET: &str = "plainblog::posts";

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error("a post titled `{title}` already exists")]
    DuplicateTitle { title: String },
    #[error("post {id} not found")]
    NotFound { id: i64 },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Post lifecycle on top of a [`PostsRepo`].
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostsRepo>,
    timezone: Tz,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostsRepo>, timezone: Tz) -> Self {
        Self { repo, timezone }
    }

    pub async fn list_all(&self) -> Result<Vec<PostRecord>, PostServiceError> {
        Ok(self.repo.list_posts().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PostRecord>, PostServiceError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Store a new post stamped with today's date in the site time zone.
    pub async fn create(&self, draft: PostDraft) -> Result<PostRecord, PostServiceError> {
        let params = CreatePostParams {
            date: current_post_date_in(self.timezone),
            title: draft.title,
            subtitle: draft.subtitle,
            body: draft.body,
            author: draft.author,
            img_url: draft.img_url,
        };
        let title = params.title.clone();

        let post = self
            .repo
            .create_post(params)
            .await
            .map_err(|err| map_write_error(err, title, None))?;

        info!(target: LOG_TARGET, id = post.id, title = %post.title, "post created");
        Ok(post)
    }

    /// Replace the editable fields of post `id`. The creation date is kept.
    pub async fn update(&self, id: i64, draft: PostDraft) -> Result<(), PostServiceError> {
        let params = UpdatePostParams {
            id,
            title: draft.title,
            subtitle: draft.subtitle,
            body: draft.body,
            author: draft.author,
            img_url: draft.img_url,
        };
        let title = params.title.clone();

        let post = self
            .repo
            .update_post(params)
            .await
            .map_err(|err| map_write_error(err, title, Some(id)))?;

        info!(target: LOG_TARGET, id = post.id, title = %post.title, "post updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), PostServiceError> {
        match self.repo.delete_post(id).await {
            Ok(()) => {
                info!(target: LOG_TARGET, id, "post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => {
                debug!(target: LOG_TARGET, id, "delete requested for missing post");
                Err(PostServiceError::NotFound { id })
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn health_check(&self) -> Result<(), PostServiceError> {
        Ok(self.repo.health_check().await?)
    }
}

fn map_write_error(err: RepoError, title: String, id: Option<i64>) -> PostServiceError {
    match (err, id) {
        (RepoError::Duplicate { .. }, _) => PostServiceError::DuplicateTitle { title },
        (RepoError::NotFound, Some(id)) => PostServiceError::NotFound { id },
        (err, _) => PostServiceError::Repo(err),
    }
}
