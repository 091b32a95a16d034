use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostSummary};
use crate::presentation::dto::{CreatePostRequest, UpdatePostRequest};
use mongodb::bson::oid::ObjectId;
use tracing::instrument;

#[derive(Clone)]
pub struct PostService<R: PostRepository + 'static> {
    repo: Arc<R>,
}

impl<R> PostService<R>
where
    R: PostRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        let id = parse_post_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound)
    }

    #[instrument(skip(self, payload))]
    pub async fn create_post(&self, payload: CreatePostRequest) -> Result<Post, DomainError> {
        let post = Post::new(payload.user, payload.password, payload.title, payload.content);
        self.repo.create(post).await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_post(
        &self,
        id: &str,
        payload: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let mut post = self.get_post(id).await?;
        if post.password != payload.password {
            return Err(DomainError::Unauthorized);
        }

        post.user = payload.user;
        post.title = payload.title;
        post.content = payload.content;
        self.repo.save(&post).await?;

        Ok(post)
    }

    #[instrument(skip(self, password))]
    pub async fn delete_post(&self, id: &str, password: &str) -> Result<(), DomainError> {
        let post = self.get_post(id).await?;
        if post.password != password {
            return Err(DomainError::Unauthorized);
        }

        self.repo.delete_by_id(post.id).await
    }
}

// A string that does not parse as an ObjectId addresses no document, so it
// behaves like a missing one.
pub(crate) fn parse_post_id(raw: &str) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(raw).map_err(|_| DomainError::PostNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::InMemoryPostRepository;
    use crate::presentation::dto::{CreatePostRequest, UpdatePostRequest};
    use chrono::{Duration, Utc};

    fn service() -> PostService<InMemoryPostRepository> {
        PostService::new(Arc::new(InMemoryPostRepository::default()))
    }

    fn create_request(user: &str, password: &str, title: &str, content: &str) -> CreatePostRequest {
        CreatePostRequest {
            user: user.into(),
            password: password.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn created_post_is_retrievable_with_submitted_fields() {
        let service = service();
        let created = service
            .create_post(create_request("a", "p", "t", "c"))
            .await
            .unwrap();

        let fetched = service.get_post(&created.id.to_hex()).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.user, "a");
        assert_eq!(fetched.title, "t");
        assert_eq!(fetched.content, "c");
        assert!(fetched.comments.is_empty());
    }

    #[tokio::test]
    async fn get_post_with_malformed_id_is_not_found() {
        let service = service();
        let err = service.get_post("not-an-object-id").await.unwrap_err();
        assert!(matches!(err, DomainError::PostNotFound));
    }

    #[tokio::test]
    async fn update_with_wrong_password_leaves_post_unchanged() {
        let service = service();
        let created = service
            .create_post(create_request("a", "p", "t", "c"))
            .await
            .unwrap();

        let err = service
            .update_post(
                &created.id.to_hex(),
                UpdatePostRequest {
                    user: "a".into(),
                    password: "wrong".into(),
                    title: "t2".into(),
                    content: "c2".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));

        let fetched = service.get_post(&created.id.to_hex()).await.unwrap();
        assert_eq!(fetched.title, "t");
        assert_eq!(fetched.content, "c");
    }

    #[tokio::test]
    async fn update_overwrites_fields_but_not_created_at() {
        let service = service();
        let created = service
            .create_post(create_request("a", "p", "t", "c"))
            .await
            .unwrap();

        let updated = service
            .update_post(
                &created.id.to_hex(),
                UpdatePostRequest {
                    user: "b".into(),
                    password: "p".into(),
                    title: "t2".into(),
                    content: "c2".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.user, "b");
        assert_eq!(updated.title, "t2");
        assert_eq!(updated.content, "c2");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn delete_requires_matching_password() {
        let repo = Arc::new(InMemoryPostRepository::default());
        let service = PostService::new(Arc::clone(&repo));
        let created = service
            .create_post(create_request("a", "p", "t", "c"))
            .await
            .unwrap();
        let id = created.id.to_hex();

        let err = service.delete_post(&id, "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
        assert_eq!(repo.len(), 1);

        service.delete_post(&id, "p").await.unwrap();
        assert_eq!(repo.len(), 0);
        assert!(matches!(
            service.get_post(&id).await.unwrap_err(),
            DomainError::PostNotFound
        ));
    }

    #[tokio::test]
    async fn listing_is_sorted_by_creation_time_ascending() {
        let repo = Arc::new(InMemoryPostRepository::default());
        let service = PostService::new(Arc::clone(&repo));

        let base = Utc::now();
        for (title, offset) in [("second", 10), ("first", 0), ("third", 20)] {
            let mut post = Post::new("a".into(), "p".into(), title.into(), "c".into());
            post.created_at = base + Duration::seconds(offset);
            repo.create(post).await.unwrap();
        }

        let titles: Vec<String> = service
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}
