use sqlx::PgPool;
use storage::{
    dto::{category::CreateCategoryRequest, common::PaginationParams},
    error::Result,
    models::Category,
    repository::category::CategoryRepository,
};
use uuid::Uuid;

/// Create a new category
pub async fn create_category(pool: &PgPool, request: CreateCategoryRequest) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    let category = repo.create(&request.into_category()).await?;

    tracing::info!(category_id = %category.id, "Category created");
    Ok(category)
}

/// List one page of categories
pub async fn list_categories(
    pool: &PgPool,
    page: PaginationParams,
) -> Result<(Vec<Category>, i64)> {
    let repo = CategoryRepository::new(pool);
    repo.list(page).await
}

/// Get category by id
pub async fn get_category(pool: &PgPool, id: Uuid) -> Result<Category> {
    let repo = CategoryRepository::new(pool);
    repo.find_by_id(id).await
}
