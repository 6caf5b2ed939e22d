use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;

use crate::{
    api::{jobs::Deleted, validated_json::ValidatedJson, ApiResult},
    app::App,
    auth::CurrentUser,
    page::ResultPage,
    tags::{
        self,
        tag_form::{TagForm, TagIds, TagSearch},
        tag_view::{TagCount, TagView},
    },
};

/// Public tag listings, merged into `/api`.
pub fn routes() -> Router<App> {
    Router::new()
        .route("/tags", get(list))
        .route("/tags/top", get(top))
        .route("/articles/{id}/tags", get(article_tags))
}

/// Tag administration, nested under `/api/admin/tags`.
pub fn admin_routes() -> Router<App> {
    Router::new().route("/", get(search).post(save).delete(delete))
}

async fn list(State(db): State<DatabaseConnection>) -> ApiResult<Vec<TagCount>> {
    Ok(Json(tags::list_tags(&db).await?))
}

async fn top(State(db): State<DatabaseConnection>) -> ApiResult<Vec<TagCount>> {
    Ok(Json(tags::top_tags(&db).await?))
}

async fn article_tags(
    State(db): State<DatabaseConnection>,
    Path(article_id): Path<i32>,
) -> ApiResult<Vec<TagView>> {
    Ok(Json(tags::article_tags(&db, article_id).await?))
}

async fn search(
    _user: CurrentUser,
    State(db): State<DatabaseConnection>,
    Query(search): Query<TagSearch>,
) -> ApiResult<ResultPage<TagView>> {
    Ok(Json(tags::search_tags(&db, &search).await?))
}

async fn save(
    _user: CurrentUser,
    State(db): State<DatabaseConnection>,
    ValidatedJson(form): ValidatedJson<TagForm>,
) -> ApiResult<TagView> {
    Ok(Json(tags::save_or_update_tag(&db, &form).await?))
}

async fn delete(
    _user: CurrentUser,
    State(db): State<DatabaseConnection>,
    Json(TagIds { ids }): Json<TagIds>,
) -> ApiResult<Deleted> {
    let deleted = tags::delete_tags(&db, &ids).await?;
    Ok(Json(Deleted { deleted }))
}
