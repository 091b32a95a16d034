//! In-memory repository doubles for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::data::comment_repository::CommentRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostSummary};

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<HashMap<ObjectId, Post>>,
}

impl InMemoryPostRepository {
    pub fn get(&self, id: ObjectId) -> Option<Post> {
        self.posts.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<PostSummary>, DomainError> {
        let mut posts: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts
            .into_iter()
            .map(|p| PostSummary {
                user: p.user,
                title: p.title,
                created_at: p.created_at,
            })
            .collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn save(&self, post: &Post) -> Result<(), DomainError> {
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<(), DomainError> {
        self.posts.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: Mutex<HashMap<ObjectId, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn get(&self, id: ObjectId) -> Option<Comment> {
        self.comments.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.comments.lock().unwrap().len()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Comment>, DomainError> {
        Ok(self.comments.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Comment>, DomainError> {
        let store = self.comments.lock().unwrap();
        let mut found: Vec<Comment> = ids.iter().filter_map(|id| store.get(id).cloned()).collect();
        found.sort_by_key(|c| c.created_at);
        Ok(found)
    }

    async fn create(&self, comment: Comment) -> Result<Comment, DomainError> {
        self.comments
            .lock()
            .unwrap()
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn save(&self, comment: &Comment) -> Result<(), DomainError> {
        self.comments
            .lock()
            .unwrap()
            .insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<(), DomainError> {
        self.comments.lock().unwrap().remove(&id);
        Ok(())
    }
}
