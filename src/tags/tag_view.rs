use chrono::NaiveDateTime;
use sea_orm::FromQueryResult;
use serde::Serialize;

use crate::database::models::tag;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagView {
    pub id: i32,
    pub tag_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<tag::Model> for TagView {
    fn from(tag: tag::Model) -> Self {
        Self {
            id: tag.id,
            tag_name: tag.tag_name,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}

/// A tag with the number of articles it is attached to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, FromQueryResult)]
pub struct TagCount {
    pub id: i32,
    pub tag_name: String,
    pub article_count: i64,
}
