use async_trait::async_trait;
use sqlx::{query, query_as};

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use crate::domain::posts::PostRecord;
use crate::infra::db::map_sqlx_error;

use super::super::PostgresRepositories;
use super::POST_COLUMNS;
use super::types::PostRow;

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        self.select_all_posts().await
    }

    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let CreatePostParams {
            title,
            subtitle,
            date,
            body,
            author,
            img_url,
        } = params;

        let sql = format!(
            "INSERT INTO posts (title, subtitle, date, body, author, img_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {POST_COLUMNS}"
        );
        let row = query_as::<_, PostRow>(&sql)
            .bind(title)
            .bind(subtitle)
            .bind(date)
            .bind(body)
            .bind(author)
            .bind(img_url)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostRecord>, RepoError> {
        self.select_post(id).await
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let UpdatePostParams {
            id,
            title,
            subtitle,
            body,
            author,
            img_url,
        } = params;

        let sql = format!(
            "UPDATE posts \
             SET title = $2, subtitle = $3, body = $4, author = $5, img_url = $6 \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        );
        // `fetch_one` turns a missing row into `RowNotFound`, i.e. `RepoError::NotFound`.
        let row = query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(title)
            .bind(subtitle)
            .bind(body)
            .bind(author)
            .bind(img_url)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        let result = query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        query("SELECT 1")
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}
