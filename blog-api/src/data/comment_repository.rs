use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use tracing::{error, info};

pub const COMMENTS_COLLECTION: &str = "comments";

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Comment>, DomainError>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Comment>, DomainError>;
    async fn create(&self, comment: Comment) -> Result<Comment, DomainError>;
    async fn save(&self, comment: &Comment) -> Result<(), DomainError>;
    async fn delete_by_id(&self, id: ObjectId) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct MongoCommentRepository {
    collection: Collection<Comment>,
}

impl MongoCommentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COMMENTS_COLLECTION),
        }
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Comment>, DomainError> {
        self.collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                error!("db error find_by_id {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Comment>, DomainError> {
        let options = FindOptions::builder().sort(doc! { "createdAt": 1 }).build();
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } }, options)
            .await
            .map_err(|e| {
                error!("failed to query comments: {}", e);
                DomainError::Internal(e.to_string())
            })?;

        cursor.try_collect().await.map_err(|e| {
            error!("failed to read comments cursor: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn create(&self, comment: Comment) -> Result<Comment, DomainError> {
        self.collection
            .insert_one(&comment, None)
            .await
            .map_err(|e| {
                error!("failed to create comment: {}", e);
                DomainError::Internal(e.to_string())
            })?;

        info!(comment_id = %comment.id, "comment created");
        Ok(comment)
    }

    async fn save(&self, comment: &Comment) -> Result<(), DomainError> {
        self.collection
            .replace_one(doc! { "_id": comment.id }, comment, None)
            .await
            .map_err(|e| {
                error!("failed to save comment {}: {}", comment.id, e);
                DomainError::Internal(e.to_string())
            })?;

        info!(comment_id = %comment.id, "comment saved");
        Ok(())
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<(), DomainError> {
        self.collection
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                error!("failed to delete comment {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        info!(comment_id = %id, "comment deleted");
        Ok(())
    }
}
