use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// A comment as stored in the `comments` collection. The parent post is not
/// recorded here; membership lives in the post's `comments` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: String,
    // Plaintext, same as Post.
    pub password: String,
    pub content: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(user: String, password: String, content: String) -> Self {
        Self {
            id: ObjectId::new(),
            user,
            password,
            content,
            created_at: Utc::now(),
        }
    }
}
