use sqlx::PgPool;
use storage::{
    dto::{common::PaginationParams, training_center::CreateTrainingCenterRequest},
    error::Result,
    models::TrainingCenter,
    repository::training_center::TrainingCenterRepository,
};
use uuid::Uuid;

/// Create a new training center
pub async fn create_training_center(
    pool: &PgPool,
    request: CreateTrainingCenterRequest,
) -> Result<TrainingCenter> {
    let repo = TrainingCenterRepository::new(pool);
    let center = repo.create(&request.into_training_center()).await?;

    tracing::info!(training_center_id = %center.id, "Training center created");
    Ok(center)
}

/// List one page of training centers
pub async fn list_training_centers(
    pool: &PgPool,
    page: PaginationParams,
) -> Result<(Vec<TrainingCenter>, i64)> {
    let repo = TrainingCenterRepository::new(pool);
    repo.list(page).await
}

/// Get training center by id
pub async fn get_training_center(pool: &PgPool, id: Uuid) -> Result<TrainingCenter> {
    let repo = TrainingCenterRepository::new(pool);
    repo.find_by_id(id).await
}
