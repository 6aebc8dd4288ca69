use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::Category;

/// Repository for Category database operations
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of categories ordered by name, with the total count
    pub async fn list(&self, page: PaginationParams) -> Result<(Vec<Category>, i64)> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, nome
            FROM categorias
            ORDER BY nome, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categorias")
            .fetch_one(self.pool)
            .await?;

        Ok((categories, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>("SELECT id, nome FROM categorias WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_name(&self, nome: &str) -> Result<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, nome FROM categorias WHERE nome = $1")
                .bind(nome)
                .fetch_optional(self.pool)
                .await?;

        Ok(category)
    }

    pub async fn create(&self, category: &Category) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categorias (id, nome)
            VALUES ($1, $2)
            RETURNING id, nome
            "#,
        )
        .bind(category.id)
        .bind(&category.nome)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_violation(
                || format!("Categoria {} já existente no banco de dados", category.nome),
                String::new,
            )
        })
    }
}
