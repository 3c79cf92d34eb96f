use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::Document;

/// A post as stored in the `posts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDoc {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
}

impl PostDoc {
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            author: author.into(),
        }
    }
}

impl Document for PostDoc {
    const KIND: &'static str = "post";
}

/// Request body accepted by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
}

impl From<PostPayload> for PostDoc {
    fn from(payload: PostPayload) -> Self {
        PostDoc::new(payload.content, payload.author)
    }
}

/// JSON representation returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: String,
    pub content: String,
    pub author: String,
}

impl From<PostDoc> for PostView {
    fn from(doc: PostDoc) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            content: doc.content,
            author: doc.author,
        }
    }
}
