use async_trait::async_trait;
use std::borrow::Cow;
use uuid::Uuid;

use crate::{
    entities::image::ImageInsert, errors::AppError, repositories::sqlx_repo::SqlxImageRepo,
};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Reserves an image record with an empty path and zero size. Honors a
    /// client-supplied identifier; otherwise one is generated.
    async fn create_pending(&self, image: &ImageInsert) -> Result<Uuid, AppError>;

    /// Sets the record's final object path. Called exactly once per record.
    async fn finalize_path(&self, id: &Uuid, path: &str) -> Result<(), AppError>;
}

impl SqlxImageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxImageRepo { pool }
    }
}

#[async_trait]
impl ImageRepository for SqlxImageRepo {
    async fn create_pending(&self, image: &ImageInsert) -> Result<Uuid, AppError> {
        let id = image.id.unwrap_or_else(Uuid::new_v4);

        let created: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO images (id, user_id, path, filesize, category, created_at)
            VALUES ($1, $2, '', 0, $3, NOW())
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(image.user_id)
        .bind(&image.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Image with this identifier already exists".to_string())
            }
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23503")) => {
                AppError::Conflict("Owning user does not exist".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(created)
    }

    async fn finalize_path(&self, id: &Uuid, path: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE images
            SET path = $2
            WHERE id = $1 AND path = ''
            "#,
        )
        .bind(id)
        .bind(path)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pending image record not found".into()));
        }

        Ok(())
    }
}
