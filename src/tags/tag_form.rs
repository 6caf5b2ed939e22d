use serde::Deserialize;
use validator::Validate;

use crate::page::PageQuery;

/// Creates a tag, or renames tag `id` when it is set.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagForm {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 32))]
    pub tag_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagIds {
    pub ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagSearch {
    pub keyword: Option<String>,
    pub current: Option<u64>,
    pub size: Option<u64>,
}

impl TagSearch {
    pub fn page(&self) -> PageQuery {
        let defaults = PageQuery::default();
        PageQuery::new(
            self.current.unwrap_or(defaults.current),
            self.size.unwrap_or(defaults.size),
        )
    }

    /// The keyword to match, if there is a non-blank one.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
    }
}
