use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// A blog post as stored in the `posts` collection. The `comments` array
/// holds the ids of this post's comments, in creation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: String,
    // Stored and compared in plaintext. Matches the wire contract; do not hash.
    pub password: String,
    pub title: String,
    pub content: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    pub comments: Vec<ObjectId>,
}

impl Post {
    pub fn new(user: String, password: String, title: String, content: String) -> Self {
        Self {
            id: ObjectId::new(),
            user,
            password,
            title,
            content,
            created_at: Utc::now(),
            comments: Vec::new(),
        }
    }
}

/// Listing projection of a post: `{user, title, createdAt}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub user: String,
    pub title: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}
