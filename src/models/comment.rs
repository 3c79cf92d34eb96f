use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{parse_object_id, Document};
use crate::error::AppResult;

/// A comment as stored in the `comments` collection.
///
/// `post_id` references a document in `posts`. The store does not enforce it;
/// the create handler checks that the post exists before inserting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDoc {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "post")]
    pub post_id: ObjectId,
}

impl CommentDoc {
    pub fn new(content: impl Into<String>, author: impl Into<String>, post_id: ObjectId) -> Self {
        Self {
            id: None,
            content: content.into(),
            author: author.into(),
            post_id,
        }
    }
}

impl Document for CommentDoc {
    const KIND: &'static str = "comment";
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub post_id: String,
}

impl CommentPayload {
    /// Validate the post reference and build the document to store.
    pub fn into_doc(self) -> AppResult<CommentDoc> {
        let post_id = parse_object_id(&self.post_id)?;
        Ok(CommentDoc::new(self.content, self.author, post_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub content: String,
    pub author: String,
    pub post_id: String,
}

impl From<CommentDoc> for CommentView {
    fn from(doc: CommentDoc) -> Self {
        Self {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            content: doc.content,
            author: doc.author,
            post_id: doc.post_id.to_hex(),
        }
    }
}
