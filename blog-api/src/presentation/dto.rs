use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MALFORMED_BODY: &str = "request data is not well formed";

fn require_non_empty(fields: &[&str]) -> Result<(), DomainError> {
    if fields.iter().any(|f| f.is_empty()) {
        return Err(DomainError::Validation(MALFORMED_BODY));
    }
    Ok(())
}

// ======================= POSTS =======================

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub user: String,
    pub password: String,
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty(&[&self.user, &self.password, &self.title, &self.content])
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub user: String,
    pub password: String,
    pub title: String,
    pub content: String,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty(&[&self.user, &self.password, &self.title, &self.content])
    }
}

#[derive(Debug, Deserialize)]
pub struct DeletePostRequest {
    pub password: String,
}

impl DeletePostRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty(&[&self.password])
    }
}

// ======================= COMMENTS =======================

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub user: String,
    pub password: String,
    pub content: String,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty(&[&self.user, &self.password])?;
        if self.content.is_empty() {
            return Err(DomainError::Validation("comment content must not be empty"));
        }
        Ok(())
    }
}

// Updates carry no validation at all: empty content is accepted here, and a
// wrong password is already answered with 401.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub password: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCommentRequest {
    pub password: String,
}

// ======================= RESPONSES =======================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryResponse {
    pub user: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<PostSummary> for PostSummaryResponse {
    fn from(summary: PostSummary) -> Self {
        Self {
            user: summary.user,
            title: summary.title,
            created_at: summary.created_at,
        }
    }
}

/// The full stored document, password included, as the detail endpoint
/// returns it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub user: String,
    pub password: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<String>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_hex(),
            user: post.user,
            password: post.password,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            comments: post.comments.iter().map(|c| c.to_hex()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub user: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            user: comment.user,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_post_rejects_any_empty_field() {
        for (user, password, title, content) in [
            ("", "p", "t", "c"),
            ("u", "", "t", "c"),
            ("u", "p", "", "c"),
            ("u", "p", "t", ""),
        ] {
            let request = CreatePostRequest {
                user: user.into(),
                password: password.into(),
                title: title.into(),
                content: content.into(),
            };
            assert!(matches!(
                request.validate(),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn create_post_accepts_full_payload() {
        let request = CreatePostRequest {
            user: "u".into(),
            password: "p".into(),
            title: "t".into(),
            content: "c".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_comment_rejects_empty_content() {
        let request = CreateCommentRequest {
            user: "u".into(),
            password: "p".into(),
            content: String::new(),
        };
        assert!(matches!(
            request.validate(),
            Err(DomainError::Validation("comment content must not be empty"))
        ));
    }

    #[test]
    fn delete_post_requires_a_password() {
        let request = DeletePostRequest {
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
