use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::utils::markdown::safe_markdown_to_html;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content_markdown: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewPostRequest {
    #[validate(length(min = 1, max = 200, message = "Must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 200, message = "Must be 1-200 characters"))]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content_markdown: String,

    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Validate)]
pub struct PostInsert {
    pub author_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub slug: String,
    pub content_markdown: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostInsert {
    pub fn from_request(request: NewPostRequest, author_id: Uuid) -> Result<Self, AppError> {
        request.validate()?;

        let slug = match &request.slug {
            Some(slug) if !slug.trim().is_empty() => slug::slugify(slug),
            _ => slug::slugify(&request.title),
        };

        Ok(PostInsert {
            author_id,
            title: request.title,
            slug,
            content_markdown: request.content_markdown,
            published: request.published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PostCreatedResponse {
    pub id: Uuid,
    pub slug: String,
    pub url: String,
}

/// A post as served to readers: raw markdown plus the sanitized
/// HTML rendering.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content_markdown: String,
    pub content_html: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        let content_html = safe_markdown_to_html(&post.content_markdown);
        PostView {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content_markdown: post.content_markdown,
            content_html,
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PreviewRequest {
    #[validate(length(max = 2_097_152, message = "Markdown too large"))]
    pub markdown: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_generated_from_title_when_missing() {
        let request = NewPostRequest {
            title: "Hello, Plog World!".into(),
            slug: None,
            content_markdown: "# hi".into(),
            published: false,
        };
        let insert = PostInsert::from_request(request, Uuid::new_v4()).unwrap();
        assert_eq!(insert.slug, "hello-plog-world");
    }

    #[test]
    fn explicit_slug_is_normalized() {
        let request = NewPostRequest {
            title: "A Title".into(),
            slug: Some("My Custom Slug".into()),
            content_markdown: "body".into(),
            published: true,
        };
        let insert = PostInsert::from_request(request, Uuid::new_v4()).unwrap();
        assert_eq!(insert.slug, "my-custom-slug");
    }

    #[test]
    fn empty_title_is_rejected() {
        let request = NewPostRequest {
            title: "".into(),
            slug: None,
            content_markdown: "body".into(),
            published: false,
        };
        assert!(PostInsert::from_request(request, Uuid::new_v4()).is_err());
    }
}
