// Document shapes persisted by the service - posts and the comments attached to them

pub mod comment;
pub mod post;

pub use comment::{CommentDoc, CommentPayload, CommentView};
pub use post::{PostDoc, PostPayload, PostView};

use mongodb::bson::{self, oid::ObjectId};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, AppResult};

/// Client-facing message for any path or body id that is not a 24 character hex ObjectId.
pub const INVALID_OBJECT_ID: &str = "the provided hex string is not a valid ObjectID";

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::PostDoc {}
    impl Sealed for super::CommentDoc {}
}

/// A document shape the store adapter can persist.
///
/// The set is closed: only [`PostDoc`] and [`CommentDoc`] implement it.
pub trait Document: sealed::Sealed + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Singular label used in log lines and not-found messages.
    const KIND: &'static str;

    fn to_bson(&self) -> AppResult<bson::Document> {
        bson::to_document(self).map_err(|e| {
            AppError::DatabaseError(format!("cannot encode {}: {}", Self::KIND, e))
        })
    }

    fn from_bson(doc: bson::Document) -> AppResult<Self> {
        bson::from_document(doc).map_err(|e| {
            AppError::DatabaseError(format!("cannot decode {}: {}", Self::KIND, e))
        })
    }
}

/// Parse a client supplied identifier. Rejects anything that is not a valid ObjectId hex string.
pub fn parse_object_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|e| {
        tracing::debug!("rejecting id {:?}: {}", raw, e);
        AppError::BadRequest(INVALID_OBJECT_ID.to_string())
    })
}
