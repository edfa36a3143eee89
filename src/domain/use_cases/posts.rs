use validator::Validate;

use crate::{
    entities::post::{
        NewPostRequest, PostCreatedResponse, PostInsert, PostView, PreviewRequest, PreviewResponse,
    },
    errors::AppError,
    repositories::post::PostRepository,
    use_cases::extractors::AuthenticatedUser,
    utils::markdown::safe_markdown_to_html,
};

pub struct PostHandler<R>
where
    R: PostRepository,
{
    pub post_repo: R,
}

impl<R> PostHandler<R>
where
    R: PostRepository,
{
    pub fn new(post_repo: R) -> Self {
        PostHandler { post_repo }
    }

    /// Creates a new post owned by the authenticated author
    pub async fn create_post(
        &self,
        identity: &AuthenticatedUser,
        request: NewPostRequest,
    ) -> Result<PostCreatedResponse, AppError> {
        let insert_post = PostInsert::from_request(request, identity.id)?;

        let id = self.post_repo.create_post(&insert_post).await?;

        Ok(PostCreatedResponse {
            id,
            slug: insert_post.slug.clone(),
            url: format!("/posts/{}", insert_post.slug),
        })
    }

    /// Fetches a published post by slug, rendered for readers
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<PostView, AppError> {
        let post = self
            .post_repo
            .get_post_by_slug(slug)
            .await?
            .filter(|p| p.published)
            .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

        Ok(PostView::from(post))
    }

    /// Lists published posts, newest first
    pub async fn list_published(&self, page: u32, per_page: u32) -> Result<Vec<PostView>, AppError> {
        let posts = self.post_repo.list_published(page, per_page).await?;
        Ok(posts.into_iter().map(PostView::from).collect())
    }

    /// Lists every post of the authenticated author, drafts included
    pub async fn list_own_posts(
        &self,
        identity: &AuthenticatedUser,
    ) -> Result<Vec<PostView>, AppError> {
        let posts = self.post_repo.list_by_author(&identity.id).await?;
        Ok(posts.into_iter().map(PostView::from).collect())
    }

    /// Renders editor markdown to sanitized HTML for previewing
    pub fn preview(&self, request: PreviewRequest) -> Result<PreviewResponse, AppError> {
        request.validate()?;

        Ok(PreviewResponse {
            html: safe_markdown_to_html(&request.markdown),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::post::Post;
    use crate::repositories::post::MockPostRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn identity() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            username: "alice".into(),
        }
    }

    fn post(slug: &str, published: bool) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "A post".into(),
            slug: slug.to_string(),
            content_markdown: "# Hello\n\nworld".into(),
            published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn unpublished_posts_are_hidden_from_readers() {
        let mut repo = MockPostRepository::new();
        repo.expect_get_post_by_slug()
            .returning(|_| Ok(Some(post("draft", false))));

        let handler = PostHandler::new(repo);
        let result = handler.get_post_by_slug("draft").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn published_posts_render_to_html() {
        let mut repo = MockPostRepository::new();
        repo.expect_get_post_by_slug()
            .returning(|_| Ok(Some(post("hello", true))));

        let handler = PostHandler::new(repo);
        let view = handler.get_post_by_slug("hello").await.unwrap();
        assert!(view.content_html.contains("<h1>"));
    }

    #[test]
    fn preview_sanitizes_scripts() {
        let handler = PostHandler::new(MockPostRepository::new());
        let response = handler
            .preview(PreviewRequest {
                markdown: "hi <script>alert(1)</script>".into(),
            })
            .unwrap();
        assert!(!response.html.contains("<script>"));
    }
}
