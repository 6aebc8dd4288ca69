use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::TrainingCenter;

/// Repository for TrainingCenter database operations
pub struct TrainingCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of training centers ordered by name, with the total count
    pub async fn list(&self, page: PaginationParams) -> Result<(Vec<TrainingCenter>, i64)> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT id, nome, endereco, telefone, proprietario
            FROM centros_treinamento
            ORDER BY nome, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM centros_treinamento")
            .fetch_one(self.pool)
            .await?;

        Ok((centers, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<TrainingCenter> {
        sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT id, nome, endereco, telefone, proprietario
            FROM centros_treinamento
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_name(&self, nome: &str) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT id, nome, endereco, telefone, proprietario
            FROM centros_treinamento
            WHERE nome = $1
            "#,
        )
        .bind(nome)
        .fetch_optional(self.pool)
        .await?;

        Ok(center)
    }

    pub async fn create(&self, center: &TrainingCenter) -> Result<TrainingCenter> {
        sqlx::query_as::<_, TrainingCenter>(
            r#"
            INSERT INTO centros_treinamento (id, nome, endereco, telefone, proprietario)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nome, endereco, telefone, proprietario
            "#,
        )
        .bind(center.id)
        .bind(&center.nome)
        .bind(&center.endereco)
        .bind(&center.telefone)
        .bind(&center.proprietario)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_violation(
                || {
                    format!(
                        "Centro de treinamento {} já existente no banco de dados",
                        center.nome
                    )
                },
                String::new,
            )
        })
    }
}
