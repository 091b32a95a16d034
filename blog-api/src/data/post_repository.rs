use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostSummary};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tracing::{error, info};

pub const POSTS_COLLECTION: &str = "posts";

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<PostSummary>, DomainError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, DomainError>;
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
    async fn save(&self, post: &Post) -> Result<(), DomainError>;
    async fn delete_by_id(&self, id: ObjectId) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct MongoPostRepository {
    collection: Collection<Post>,
}

impl MongoPostRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(POSTS_COLLECTION),
        }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn list_all(&self) -> Result<Vec<PostSummary>, DomainError> {
        // Unbounded on purpose: there is no pagination on this endpoint.
        let options = FindOptions::builder()
            .projection(doc! { "user": 1, "title": 1, "createdAt": 1 })
            .sort(doc! { "createdAt": 1 })
            .build();
        let cursor = self
            .collection
            .clone_with_type::<PostSummary>()
            .find(doc! {}, options)
            .await
            .map_err(|e| {
                error!("failed to query posts: {}", e);
                DomainError::Internal(e.to_string())
            })?;

        cursor.try_collect().await.map_err(|e| {
            error!("failed to read posts cursor: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, DomainError> {
        self.collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                error!("db error find_by_id {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })
    }

    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        self.collection
            .insert_one(&post, None)
            .await
            .map_err(|e| {
                error!("failed to create post: {}", e);
                DomainError::Internal(e.to_string())
            })?;

        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn save(&self, post: &Post) -> Result<(), DomainError> {
        self.collection
            .replace_one(doc! { "_id": post.id }, post, None)
            .await
            .map_err(|e| {
                error!("failed to save post {}: {}", post.id, e);
                DomainError::Internal(e.to_string())
            })?;

        info!(post_id = %post.id, "post saved");
        Ok(())
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<(), DomainError> {
        // Comments referencing this post are left in place.
        self.collection
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        info!(post_id = %id, "post deleted");
        Ok(())
    }
}
