use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        training_center::{CreateTrainingCenterRequest, TrainingCenterResponse},
    },
    error::StorageError,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{AppJson, AppPath, AppQuery};

use super::services;

#[utoipa::path(
    post,
    path = "/centros_treinamento/",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created successfully", body = TrainingCenterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Training center already exists")
    ),
    tag = "training_centers"
)]
pub async fn create_training_center(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let center = services::create_training_center(db.pool(), req).await?;

    Ok((StatusCode::CREATED, Json(TrainingCenterResponse::from(center))).into_response())
}

#[utoipa::path(
    get,
    path = "/centros_treinamento/",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of training centers, possibly empty", body = PaginatedResponse<TrainingCenterResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "training_centers"
)]
pub async fn list_training_centers(
    State(db): State<Database>,
    AppQuery(page): AppQuery<PaginationParams>,
) -> Result<Response, WebError> {
    page.validate().map_err(WebError::BadRequest)?;

    let (centers, total) = services::list_training_centers(db.pool(), page).await?;

    let response =
        PaginatedResponse::new(centers, total, page).map(TrainingCenterResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenterResponse),
        (status = 404, description = "Training center not found")
    ),
    tag = "training_centers"
)]
pub async fn get_training_center(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let center = services::get_training_center(db.pool(), id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::NotFound(format!(
                "Centro de treinamento não encontrado no ID: {}",
                id
            )),
            other => WebError::from(other),
        })?;

    Ok(Json(TrainingCenterResponse::from(center)).into_response())
}
