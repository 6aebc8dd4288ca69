use sqlx::PgPool;
use storage::{
    dto::{
        athlete::{AthleteColumns, AthleteQuery, CreateAthleteRequest, UpdateAthleteRequest},
        common::PaginationParams,
    },
    error::{Result, StorageError},
    models::{AthleteProjection, AthleteRecord},
    repository::{
        athlete::AthleteRepository, category::CategoryRepository,
        training_center::TrainingCenterRepository,
    },
};
use uuid::Uuid;

/// Create an athlete after resolving its category and training center by name
pub async fn create_athlete(
    pool: &PgPool,
    request: &CreateAthleteRequest,
) -> Result<AthleteRecord> {
    let category = CategoryRepository::new(pool)
        .find_by_name(&request.categoria.nome)
        .await?
        .ok_or_else(|| {
            StorageError::InvalidReference(format!(
                "A categoria {} não foi encontrada",
                request.categoria.nome
            ))
        })?;

    let center = TrainingCenterRepository::new(pool)
        .find_by_name(&request.centro_treinamento.nome)
        .await?
        .ok_or_else(|| {
            StorageError::InvalidReference(format!(
                "O centro de treinamento {} não foi encontrado",
                request.centro_treinamento.nome
            ))
        })?;

    let athlete = AthleteRepository::new(pool)
        .create(&request.to_athlete(category.id, center.id))
        .await?;

    tracing::info!(athlete_id = %athlete.id, "Athlete created");

    Ok(AthleteRecord::from_parts(athlete, category.nome, center.nome))
}

/// List one page of full athlete records
pub async fn list_athletes(
    pool: &PgPool,
    page: PaginationParams,
) -> Result<(Vec<AthleteRecord>, i64)> {
    let repo = AthleteRepository::new(pool);
    repo.list(page).await
}

/// List one page of the narrow athlete listing
pub async fn list_athlete_columns(
    pool: &PgPool,
    columns: AthleteColumns,
    page: PaginationParams,
) -> Result<(Vec<AthleteProjection>, i64)> {
    let repo = AthleteRepository::new(pool);
    repo.list_projection(columns, page).await
}

/// Find athletes by id, name and/or CPF
pub async fn query_athletes(pool: &PgPool, filter: &AthleteQuery) -> Result<Vec<AthleteRecord>> {
    let repo = AthleteRepository::new(pool);
    repo.search(filter).await
}

/// Apply a partial update and return the refreshed athlete
pub async fn update_athlete(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<AthleteRecord> {
    let repo = AthleteRepository::new(pool);

    repo.update(id, request).await?;
    repo.find_record_by_id(id).await
}

/// Delete an athlete
pub async fn delete_athlete(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    let athlete = repo.find_by_id(id).await?;
    repo.delete(athlete.id).await?;

    tracing::info!(athlete_id = %id, "Athlete deleted");
    Ok(())
}
