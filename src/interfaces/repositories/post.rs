use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use std::borrow::Cow;
use uuid::Uuid;

use crate::{
    entities::post::{Post, PostInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxPostRepo,
};

#[cfg(test)]
use mockall::automock;

/// Helper to compute OFFSET safely from 1-based `page` and `per_page`.
fn page_offset(page: u32, per_page: u32) -> i64 {
    let page = page.saturating_sub(1);
    (page as i64) * (per_page as i64)
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: &PostInsert) -> Result<Uuid, AppError>;
    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError>;
    async fn list_published(&self, page: u32, per_page: u32) -> Result<Vec<Post>, AppError>;
    async fn list_by_author(&self, author_id: &Uuid) -> Result<Vec<Post>, AppError>;
}

impl SqlxPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPostRepo { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepo {
    async fn create_post(&self, post: &PostInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO posts (
                author_id, title, slug, content_markdown, published, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(post.author_id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content_markdown)
        .bind(post.published)
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Slug already exists".into())
            }
            _ => AppError::from(e),
        })?;

        Ok(id)
    }

    async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, title, slug, content_markdown, published, created_at, updated_at
            FROM posts
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_published(&self, page: u32, per_page: u32) -> Result<Vec<Post>, AppError> {
        let limit = per_page as i64;
        let offset = page_offset(page, per_page);

        let mut builder = QueryBuilder::new(
            "SELECT id, author_id, title, slug, content_markdown, published, created_at, updated_at \
             FROM posts WHERE published = TRUE ORDER BY created_at DESC",
        );
        builder.push(" LIMIT ").push_bind(limit);
        builder.push(" OFFSET ").push_bind(offset);

        let posts: Vec<Post> = builder.build_query_as::<Post>().fetch_all(&self.pool).await?;

        Ok(posts)
    }

    async fn list_by_author(&self, author_id: &Uuid) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, title, slug, content_markdown, published, created_at, updated_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based_from_one_based_pages() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(0, 10), 0);
    }
}
