use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::athlete::{AthleteColumns, AthleteQuery, UpdateAthleteRequest};
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteProjection, AthleteRecord};

const ATHLETE_COLUMNS: &str = "id, nome, cpf, idade, peso, altura, sexo, created_at, \
                               categoria_id, centro_treinamento_id";

const ATHLETE_RECORD_SELECT: &str = r#"
    SELECT a.id, a.nome, a.cpf, a.idade, a.peso, a.altura, a.sexo, a.created_at,
           c.nome AS categoria_nome,
           ct.nome AS centro_treinamento_nome
    FROM atletas a
    JOIN categorias c ON c.id = a.categoria_id
    JOIN centros_treinamento ct ON ct.id = a.centro_treinamento_id
"#;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one page of full athlete records, with the total count
    pub async fn list(&self, page: PaginationParams) -> Result<(Vec<AthleteRecord>, i64)> {
        let mut query = QueryBuilder::<Postgres>::new(ATHLETE_RECORD_SELECT);
        query
            .push(" ORDER BY a.created_at, a.id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let athletes = query
            .build_query_as::<AthleteRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok((athletes, self.count().await?))
    }

    /// List one page of the narrow listing, joining only what `columns` needs
    pub async fn list_projection(
        &self,
        columns: AthleteColumns,
        page: PaginationParams,
    ) -> Result<(Vec<AthleteProjection>, i64)> {
        let rows = projection_query(columns, page)
            .build_query_as::<AthleteProjection>()
            .fetch_all(self.pool)
            .await?;

        Ok((rows, self.count().await?))
    }

    /// Every athlete matching all the filters that are set
    pub async fn search(&self, filter: &AthleteQuery) -> Result<Vec<AthleteRecord>> {
        let athletes = search_query(filter)
            .build_query_as::<AthleteRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok(athletes)
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM atletas")
            .fetch_one(self.pool)
            .await?;

        Ok(total)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        sqlx::query_as::<_, Athlete>(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM atletas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Find an athlete joined with its category and training center names
    pub async fn find_record_by_id(&self, id: Uuid) -> Result<AthleteRecord> {
        let mut query = QueryBuilder::<Postgres>::new(ATHLETE_RECORD_SELECT);
        query.push(" WHERE a.id = ").push_bind(id);

        query
            .build_query_as::<AthleteRecord>()
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, athlete: &Athlete) -> Result<Athlete> {
        sqlx::query_as::<_, Athlete>(&format!(
            r#"
            INSERT INTO atletas ({ATHLETE_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ATHLETE_COLUMNS}
            "#
        ))
        .bind(athlete.id)
        .bind(&athlete.nome)
        .bind(&athlete.cpf)
        .bind(athlete.idade)
        .bind(athlete.peso)
        .bind(athlete.altura)
        .bind(&athlete.sexo)
        .bind(athlete.created_at)
        .bind(athlete.categoria_id)
        .bind(athlete.centro_treinamento_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_violation(
                || format!("Já existe um atleta cadastrado com o CPF {}", athlete.cpf),
                || "Categoria ou centro de treinamento inexistente".to_string(),
            )
        })
    }

    /// Write only the fields present in the patch
    pub async fn update(&self, id: Uuid, patch: &UpdateAthleteRequest) -> Result<Athlete> {
        sqlx::query_as::<_, Athlete>(&format!(
            r#"
            UPDATE atletas
            SET nome = COALESCE($2, nome),
                idade = COALESCE($3, idade)
            WHERE id = $1
            RETURNING {ATHLETE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.nome.as_deref())
        .bind(patch.idade)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM atletas WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn projection_query(
    columns: AthleteColumns,
    page: PaginationParams,
) -> QueryBuilder<'static, Postgres> {
    let mut selected = Vec::new();
    if columns.nome {
        selected.push("a.nome AS nome");
    }
    if columns.categoria {
        selected.push("c.nome AS categoria");
    }
    if columns.centro_treinamento {
        selected.push("ct.nome AS centro_treinamento");
    }

    let mut query = QueryBuilder::new("SELECT ");
    query.push(selected.join(", ")).push(" FROM atletas a");

    if columns.categoria {
        query.push(" JOIN categorias c ON c.id = a.categoria_id");
    }
    if columns.centro_treinamento {
        query.push(" JOIN centros_treinamento ct ON ct.id = a.centro_treinamento_id");
    }

    query
        .push(" ORDER BY a.created_at, a.id LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());

    query
}

fn search_query(filter: &AthleteQuery) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(ATHLETE_RECORD_SELECT);
    query.push(" WHERE TRUE");

    if let Some(id) = filter.id {
        query.push(" AND a.id = ").push_bind(id);
    }
    if let Some(nome) = &filter.nome {
        query.push(" AND a.nome = ").push_bind(nome.as_str());
    }
    if let Some(cpf) = &filter.cpf {
        query.push(" AND a.cpf = ").push_bind(cpf.as_str());
    }

    query.push(" ORDER BY a.nome, a.created_at");
    query
}
