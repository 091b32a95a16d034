use std::sync::Arc;

use crate::application::post_service::parse_post_id;
use crate::data::comment_repository::CommentRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::presentation::dto::{CreateCommentRequest, UpdateCommentRequest};
use mongodb::bson::oid::ObjectId;
use tracing::instrument;

#[derive(Clone)]
pub struct CommentService<P, C>
where
    P: PostRepository + 'static,
    C: CommentRepository + 'static,
{
    posts: Arc<P>,
    comments: Arc<C>,
}

impl<P, C> CommentService<P, C>
where
    P: PostRepository + 'static,
    C: CommentRepository + 'static,
{
    pub fn new(posts: Arc<P>, comments: Arc<C>) -> Self {
        Self { posts, comments }
    }

    #[instrument(skip(self, payload))]
    pub async fn create_comment(
        &self,
        post_id: &str,
        payload: CreateCommentRequest,
    ) -> Result<Comment, DomainError> {
        let post_id = parse_post_id(post_id)?;
        let mut post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound)?;

        let comment = self
            .comments
            .create(Comment::new(payload.user, payload.password, payload.content))
            .await?;

        // Second write; a failure here leaves the comment document orphaned.
        post.comments.push(comment.id);
        self.posts.save(&post).await?;

        Ok(comment)
    }

    pub async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, DomainError> {
        let post_id = parse_post_id(post_id)?;
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound)?;

        if post.comments.is_empty() {
            return Ok(Vec::new());
        }
        self.comments.find_by_ids(&post.comments).await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        payload: UpdateCommentRequest,
    ) -> Result<Comment, DomainError> {
        let (_post, mut comment) = self.fetch_pair(post_id, comment_id).await?;
        if comment.password != payload.password {
            return Err(DomainError::Unauthorized);
        }

        // Empty content is accepted here; only creation rejects it.
        comment.content = payload.content;
        self.comments.save(&comment).await?;

        Ok(comment)
    }

    #[instrument(skip(self, password))]
    pub async fn delete_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        let (mut post, comment) = self.fetch_pair(post_id, comment_id).await?;
        if comment.password != password {
            return Err(DomainError::Unauthorized);
        }

        // Comment document first, then the parent's reference list. The two
        // writes are not atomic.
        self.comments.delete_by_id(comment.id).await?;
        post.comments.retain(|id| *id != comment.id);
        self.posts.save(&post).await?;

        Ok(())
    }

    // The two lookups are independent, so they are issued concurrently.
    async fn fetch_pair(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<(Post, Comment), DomainError> {
        let post_id = parse_post_id(post_id)?;
        let comment_id =
            ObjectId::parse_str(comment_id).map_err(|_| DomainError::CommentNotFound)?;

        let (post, comment) = tokio::try_join!(
            self.posts.find_by_id(post_id),
            self.comments.find_by_id(comment_id),
        )?;

        let post = post.ok_or(DomainError::PostNotFound)?;
        let comment = comment.ok_or(DomainError::CommentNotFound)?;
        Ok((post, comment))
    }
}
