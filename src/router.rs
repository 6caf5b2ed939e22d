use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{api, app::App};

pub fn router(app: App) -> Router {
    let api_router = Router::new()
        .nest("/admin/jobs", api::jobs::routes())
        .nest("/admin/tags", api::tags::admin_routes())
        .merge(api::tags::routes())
        .merge(api::auth::routes());

    Router::new()
        .route("/liveness", get(api::health_checks::ok))
        .route("/readiness", get(api::health_checks::ready))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}
