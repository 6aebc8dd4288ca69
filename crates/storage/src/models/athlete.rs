use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Row of the `atletas` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Athlete {
    pub id: Uuid,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub created_at: NaiveDateTime,
    pub categoria_id: Uuid,
    pub centro_treinamento_id: Uuid,
}

/// Athlete joined with the names of its category and training center
#[derive(Debug, Clone, FromRow)]
pub struct AthleteRecord {
    pub id: Uuid,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub created_at: NaiveDateTime,
    pub categoria_nome: String,
    pub centro_treinamento_nome: String,
}

impl AthleteRecord {
    pub fn from_parts(
        athlete: Athlete,
        categoria_nome: String,
        centro_treinamento_nome: String,
    ) -> Self {
        Self {
            id: athlete.id,
            nome: athlete.nome,
            cpf: athlete.cpf,
            idade: athlete.idade,
            peso: athlete.peso,
            altura: athlete.altura,
            sexo: athlete.sexo,
            created_at: athlete.created_at,
            categoria_nome,
            centro_treinamento_nome,
        }
    }
}

/// Narrow athlete listing; columns that were not selected stay `None`.
#[derive(Debug, Clone, Default, FromRow)]
pub struct AthleteProjection {
    #[sqlx(default)]
    pub nome: Option<String>,
    #[sqlx(default)]
    pub categoria: Option<String>,
    #[sqlx(default)]
    pub centro_treinamento: Option<String>,
}
