use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        athlete::{
            AthleteFiltered, AthleteListParams, AthleteQuery, AthleteResponse,
            CreateAthleteRequest, UpdateAthleteRequest,
        },
        common::PaginatedResponse,
    },
    error::StorageError,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{AppJson, AppPath, AppQuery};

use super::services;

fn athlete_not_found(id: Uuid) -> impl FnOnce(StorageError) -> WebError {
    move |error| match error {
        StorageError::NotFound => {
            WebError::BadRequest(format!("Nenhum atleta encontrado com o ID: {}", id))
        }
        other => WebError::from(other),
    }
}

#[utoipa::path(
    post,
    path = "/atletas/",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 400, description = "Validation error, or unknown category or training center"),
        (status = 409, description = "An athlete with this CPF already exists")
    ),
    tag = "athletes"
)]
pub async fn create_athlete(
    State(db): State<Database>,
    AppJson(req): AppJson<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = services::create_athlete(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(AthleteResponse::from(athlete))).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/get_all",
    params(AthleteListParams),
    responses(
        (status = 200, description = "Page of full records, or of `AthleteFiltered` rows when any column flag is set", body = PaginatedResponse<AthleteResponse>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "No athlete registered")
    ),
    tag = "athletes"
)]
pub async fn list_athletes(
    State(db): State<Database>,
    AppQuery(params): AppQuery<AthleteListParams>,
) -> Result<Response, WebError> {
    let page = params.pagination();
    page.validate().map_err(WebError::BadRequest)?;

    let columns = params.columns();
    if !columns.is_empty() {
        let (rows, total) =
            services::list_athlete_columns(db.pool(), columns, page).await?;
        let response = PaginatedResponse::new(rows, total, page).map(AthleteFiltered::from);

        return Ok(Json(response).into_response());
    }

    let (athletes, total) = services::list_athletes(db.pool(), page).await?;
    if athletes.is_empty() {
        return Err(WebError::NotFound("A lista de atletas está vazia".to_string()));
    }

    let response = PaginatedResponse::new(athletes, total, page).map(AthleteResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/",
    params(AthleteQuery),
    responses(
        (status = 200, description = "Every athlete matching the filters", body = Vec<AthleteResponse>),
        (status = 400, description = "No filter given")
    ),
    tag = "athletes"
)]
pub async fn query_athletes(
    State(db): State<Database>,
    AppQuery(filter): AppQuery<AthleteQuery>,
) -> Result<Response, WebError> {
    if filter.is_empty() {
        return Err(WebError::BadRequest(
            "Não foi informado nenhum ID, nome ou CPF para a consulta".to_string(),
        ));
    }

    let athletes = services::query_athletes(db.pool(), &filter).await?;

    let response: Vec<AthleteResponse> = athletes.into_iter().map(AthleteResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    patch,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error or athlete not found")
    ),
    tag = "athletes"
)]
pub async fn update_athlete(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
    AppJson(update_req): AppJson<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_athlete(db.pool(), id, &update_req)
        .await
        .map_err(athlete_not_found(id))?;

    Ok(Json(AthleteResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 400, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn delete_athlete(
    State(db): State<Database>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_athlete(db.pool(), id)
        .await
        .map_err(athlete_not_found(id))?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
