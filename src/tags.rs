//! Article tags: public listings and the admin CRUD behind them.

pub mod tag_form;
pub mod tag_view;

use chrono::Utc;
use sea_orm::{
    prelude::*, sea_query::Expr, ActiveValue::Set, JoinType, QueryOrder, QuerySelect, QueryTrait,
    Select, TransactionTrait,
};
use thiserror::Error;
use tracing::info;

use crate::{
    database::models::{article_tag, tag},
    page::ResultPage,
};

use self::{
    tag_form::{TagForm, TagSearch},
    tag_view::{TagCount, TagView},
};

const TOP_TAGS: u64 = 10;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Tag {0} not found")]
    NotFound(i32),
    #[error("Tag '{0}' already exists")]
    DuplicateName(String),
    #[error("Tags still attached to {0} article(s) cannot be deleted")]
    InUse(u64),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Every tag with its article count, by name.
pub async fn list_tags(db: &DatabaseConnection) -> Result<Vec<TagCount>, TagError> {
    Ok(counted_tags()
        .order_by_asc(tag::Column::TagName)
        .into_model::<TagCount>()
        .all(db)
        .await?)
}

/// The ten tags attached to the most articles.
pub async fn top_tags(db: &DatabaseConnection) -> Result<Vec<TagCount>, TagError> {
    Ok(counted_tags()
        .order_by_desc(Expr::cust("article_count"))
        .order_by_asc(tag::Column::TagName)
        .limit(TOP_TAGS)
        .into_model::<TagCount>()
        .all(db)
        .await?)
}

pub async fn article_tags(db: &DatabaseConnection, article_id: i32) -> Result<Vec<TagView>, TagError> {
    let tags = tag::Entity::find()
        .join(JoinType::InnerJoin, tag::Relation::ArticleTag.def())
        .filter(article_tag::Column::ArticleId.eq(article_id))
        .order_by_asc(tag::Column::TagName)
        .all(db)
        .await?;

    Ok(tags.into_iter().map(TagView::from).collect())
}

/// Paged admin listing; count and page are fetched concurrently.
pub async fn search_tags(
    db: &DatabaseConnection,
    search: &TagSearch,
) -> Result<ResultPage<TagView>, TagError> {
    let page = search.page();
    let query = tag::Entity::find().apply_if(search.keyword(), |query, keyword| {
        query.filter(tag::Column::TagName.contains(keyword))
    });

    let (total, tags) = tokio::try_join!(
        query.clone().count(db),
        query
            .order_by_asc(tag::Column::Id)
            .limit(page.limit())
            .offset(page.offset())
            .all(db),
    )?;

    Ok(ResultPage::new(tags, total).map(TagView::from))
}

/// Creates the tag, or renames it when the form carries an id.
pub async fn save_or_update_tag(db: &DatabaseConnection, form: &TagForm) -> Result<TagView, TagError> {
    let tag_name = form.tag_name.trim().to_string();
    let now = Utc::now().naive_utc();

    let txn = db.begin().await?;

    let same_name = tag::Entity::find()
        .filter(tag::Column::TagName.eq(tag_name.as_str()))
        .one(&txn)
        .await?;
    if same_name.is_some_and(|other| Some(other.id) != form.id) {
        return Err(TagError::DuplicateName(tag_name));
    }

    let tag = match form.id {
        Some(id) => {
            let mut tag: tag::ActiveModel = tag::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or(TagError::NotFound(id))?
                .into();
            tag.tag_name = Set(tag_name);
            tag.updated_at = Set(now);
            tag.update(&txn).await?
        }
        None => {
            tag::ActiveModel {
                tag_name: Set(tag_name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?
        }
    };
    txn.commit().await?;

    info!("🏷️  Saved tag {} '{}'", tag.id, tag.tag_name);
    Ok(TagView::from(tag))
}

/// Deletes the tags unless any of them is still attached to an article.
pub async fn delete_tags(db: &DatabaseConnection, ids: &[i32]) -> Result<u64, TagError> {
    if ids.is_empty() {
        return Ok(0);
    }

    let txn = db.begin().await?;

    let in_use = article_tag::Entity::find()
        .filter(article_tag::Column::TagId.is_in(ids.iter().copied()))
        .count(&txn)
        .await?;
    if in_use > 0 {
        return Err(TagError::InUse(in_use));
    }

    let deleted = tag::Entity::delete_many()
        .filter(tag::Column::Id.is_in(ids.iter().copied()))
        .exec(&txn)
        .await?
        .rows_affected;
    txn.commit().await?;

    info!("🗑️  Deleted {} tag(s)", deleted);
    Ok(deleted)
}

fn counted_tags() -> Select<tag::Entity> {
    tag::Entity::find()
        .select_only()
        .column(tag::Column::Id)
        .column(tag::Column::TagName)
        .column_as(
            Expr::col((article_tag::Entity, article_tag::Column::Id)).count(),
            "article_count",
        )
        .join(JoinType::LeftJoin, tag::Relation::ArticleTag.def())
        .group_by(tag::Column::Id)
        .group_by(tag::Column::TagName)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::setup_test::setup_db;

    async fn create_tag(db: &DatabaseConnection, name: &str) -> TagView {
        save_or_update_tag(
            db,
            &TagForm {
                id: None,
                tag_name: name.to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn attach(db: &DatabaseConnection, article_id: i32, tag_id: i32) {
        article_tag::ActiveModel {
            article_id: Set(article_id),
            tag_id: Set(tag_id),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_list_counts_articles_per_tag() {
        let db = setup_db().await;
        let rust = create_tag(&db, "rust").await;
        let unused = create_tag(&db, "cooking").await;
        attach(&db, 1, rust.id).await;
        attach(&db, 2, rust.id).await;

        let tags = list_tags(&db).await.unwrap();

        assert_eq!(
            tags,
            vec![
                TagCount {
                    id: unused.id,
                    tag_name: "cooking".to_string(),
                    article_count: 0,
                },
                TagCount {
                    id: rust.id,
                    tag_name: "rust".to_string(),
                    article_count: 2,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_top_tags_are_ordered_and_limited() {
        let db = setup_db().await;
        for i in 0..12 {
            let tag = create_tag(&db, &format!("tag-{i:02}")).await;
            for article_id in 0..i {
                attach(&db, article_id, tag.id).await;
            }
        }

        let top = top_tags(&db).await.unwrap();

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].tag_name, "tag-11");
        assert_eq!(top[0].article_count, 11);
        assert!(top.windows(2).all(|w| w[0].article_count >= w[1].article_count));
    }

    #[tokio::test]
    async fn test_article_tags() {
        let db = setup_db().await;
        let rust = create_tag(&db, "rust").await;
        let sql = create_tag(&db, "sql").await;
        create_tag(&db, "cooking").await;
        attach(&db, 7, sql.id).await;
        attach(&db, 7, rust.id).await;
        attach(&db, 8, rust.id).await;

        let names: Vec<_> = article_tags(&db, 7)
            .await
            .unwrap()
            .into_iter()
            .map(|tag| tag.tag_name)
            .collect();

        assert_eq!(names, vec!["rust", "sql"]);
    }

    #[tokio::test]
    async fn test_search_by_keyword() {
        let db = setup_db().await;
        for name in ["rust", "rustc", "tokio"] {
            create_tag(&db, name).await;
        }

        let page = search_tags(
            &db,
            &TagSearch {
                keyword: Some("rust".to_string()),
                size: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let db = setup_db().await;
        create_tag(&db, "rust").await;

        let result = save_or_update_tag(
            &db,
            &TagForm {
                id: None,
                tag_name: " rust ".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(TagError::DuplicateName(name)) if name == "rust"));
    }

    #[tokio::test]
    async fn test_rename_keeps_id() {
        let db = setup_db().await;
        let original = create_tag(&db, "rust").await;

        let renamed = save_or_update_tag(
            &db,
            &TagForm {
                id: Some(original.id),
                tag_name: "rust-lang".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(renamed.id, original.id);
        assert_eq!(renamed.tag_name, "rust-lang");
    }

    #[tokio::test]
    async fn test_rename_of_missing_tag_is_not_found() {
        let db = setup_db().await;

        let result = save_or_update_tag(
            &db,
            &TagForm {
                id: Some(5),
                tag_name: "ghost".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(TagError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_tag_in_use_is_not_deleted() {
        let db = setup_db().await;
        let used = create_tag(&db, "rust").await;
        let unused = create_tag(&db, "cooking").await;
        attach(&db, 1, used.id).await;

        let result = delete_tags(&db, &[used.id, unused.id]).await;
        assert!(matches!(result, Err(TagError::InUse(1))));
        assert_eq!(list_tags(&db).await.unwrap().len(), 2);

        assert_eq!(delete_tags(&db, &[unused.id]).await.unwrap(), 1);
        assert_eq!(list_tags(&db).await.unwrap().len(), 1);
    }
}
