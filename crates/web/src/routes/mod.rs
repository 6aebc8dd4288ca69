use std::time::Duration;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{athletes, categories, training_centers};

#[derive(OpenApi)]
#[openapi(
    info(title = "WorkoutApi"),
    paths(
        athletes::handlers::create_athlete,
        athletes::handlers::list_athletes,
        athletes::handlers::query_athletes,
        athletes::handlers::update_athlete,
        athletes::handlers::delete_athlete,
        categories::handlers::create_category,
        categories::handlers::list_categories,
        categories::handlers::get_category,
        training_centers::handlers::create_training_center,
        training_centers::handlers::list_training_centers,
        training_centers::handlers::get_training_center,
        health,
    ),
    components(
        schemas(
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteResponse,
            storage::dto::athlete::AthleteFiltered,
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::CategoryRef,
            storage::dto::category::CategoryResponse,
            storage::dto::training_center::CreateTrainingCenterRequest,
            storage::dto::training_center::TrainingCenterRef,
            storage::dto::training_center::TrainingCenterResponse,
        )
    ),
    tags(
        (name = "athletes", description = "Athlete endpoints"),
        (name = "categories", description = "Category endpoints"),
        (name = "training_centers", description = "Training center endpoints"),
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "health"
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full HTTP surface on top of a database handle
pub fn app(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .merge(athletes::routes::routes())
        .merge(categories::routes::routes())
        .merge(training_centers::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}
