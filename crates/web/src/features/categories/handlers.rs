use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        category::{CategoryResponse, CreateCategoryRequest},
        common::{PaginatedResponse, PaginationParams},
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
    path = "/categorias/",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Category already exists")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let category = services::create_category(db.pool(), req).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of categories, possibly empty", body = PaginatedResponse<CategoryResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(db): State<Database>,
    AppQuery(page): AppQuery<PaginationParams>,
) -> Result<Response, WebError> {
    page.validate().map_err(WebError::BadRequest)?;

    let (categories, total) = services::list_categories(db.pool(), page).await?;

    let response =
        PaginatedResponse::new(categories, total, page).map(CategoryResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    let category = services::get_category(db.pool(), id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => {
                WebError::NotFound(format!("Categoria não encontrada no ID: {}", id))
            }
            other => WebError::from(other),
        })?;

    Ok(Json(CategoryResponse::from(category)).into_response())
}
