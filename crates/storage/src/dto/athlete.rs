use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::category::CategoryRef;
use super::common::PaginationParams;
use super::training_center::TrainingCenterRef;
use crate::models::{Athlete, AthleteProjection, AthleteRecord};

/// Response containing a full athlete record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub categoria: CategoryRef,
    pub centro_treinamento: TrainingCenterRef,
    pub created_at: NaiveDateTime,
}

/// Narrow athlete listing, only the requested columns are present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteFiltered {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<CategoryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centro_treinamento: Option<TrainingCenterRef>,
}

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[schema(example = "João")]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    pub nome: String,

    #[schema(example = "12345678900")]
    #[validate(length(
        min = 1,
        max = 11,
        message = "CPF must be between 1 and 11 characters"
    ))]
    pub cpf: String,

    #[schema(example = 25)]
    #[validate(range(min = 1, message = "Age must be positive"))]
    pub idade: i32,

    #[schema(example = 85.5)]
    #[validate(range(exclusive_min = 0.0, message = "Weight must be positive"))]
    pub peso: f64,

    #[schema(example = 1.83)]
    #[validate(range(exclusive_min = 0.0, message = "Height must be positive"))]
    pub altura: f64,

    #[schema(example = "H")]
    #[validate(length(equal = 1, message = "Sex must be a single character"))]
    pub sexo: String,

    #[validate(nested)]
    pub categoria: CategoryRef,

    #[validate(nested)]
    pub centro_treinamento: TrainingCenterRef,
}

impl CreateAthleteRequest {
    /// Builds the row to insert, linked to the resolved category and training center
    pub fn to_athlete(&self, categoria_id: Uuid, centro_treinamento_id: Uuid) -> Athlete {
        Athlete {
            id: Uuid::new_v4(),
            nome: self.nome.clone(),
            cpf: self.cpf.clone(),
            idade: self.idade,
            peso: self.peso,
            altura: self.altura,
            sexo: self.sexo.clone(),
            created_at: Utc::now().naive_utc(),
            categoria_id,
            centro_treinamento_id,
        }
    }
}

/// Request payload for a partial athlete update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[schema(example = "João")]
    #[validate(length(min = 1, max = 50))]
    pub nome: Option<String>,

    #[schema(example = 26)]
    #[validate(range(min = 1))]
    pub idade: Option<i32>,
}

/// Columns that can be requested from the narrow athlete listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AthleteColumns {
    pub nome: bool,
    pub categoria: bool,
    pub centro_treinamento: bool,
}

impl AthleteColumns {
    pub fn is_empty(&self) -> bool {
        !(self.nome || self.categoria || self.centro_treinamento)
    }
}

/// Query string of `GET /atletas/get_all`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteListParams {
    /// Page size, between 1 and 100
    #[serde(default = "super::common::default_limit")]
    pub limit: u32,
    /// Number of rows to skip
    #[serde(default)]
    pub offset: u32,
    /// Include the athlete name in a narrow listing
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub nome: bool,
    /// Include the category name in a narrow listing
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub categoria: bool,
    /// Include the training center name in a narrow listing
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub centro_treinamento: bool,
}

/// Accepts a JSON boolean or the usual query-string spellings
/// (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, `t`/`f`, `y`/`n`)
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid boolean value: '{text}'"
            ))),
        },
    }
}

impl AthleteListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.limit, self.offset)
    }

    pub fn columns(&self) -> AthleteColumns {
        AthleteColumns {
            nome: self.nome,
            categoria: self.categoria,
            centro_treinamento: self.centro_treinamento,
        }
    }
}

/// Query string of `GET /atletas/`; at least one filter is required
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteQuery {
    pub id: Option<Uuid>,
    pub nome: Option<String>,
    pub cpf: Option<String>,
}

impl AthleteQuery {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.nome.is_none() && self.cpf.is_none()
    }
}

impl From<AthleteRecord> for AthleteResponse {
    fn from(record: AthleteRecord) -> Self {
        Self {
            id: record.id,
            nome: record.nome,
            cpf: record.cpf,
            idade: record.idade,
            peso: record.peso,
            altura: record.altura,
            sexo: record.sexo,
            categoria: CategoryRef {
                nome: record.categoria_nome,
            },
            centro_treinamento: TrainingCenterRef {
                nome: record.centro_treinamento_nome,
            },
            created_at: record.created_at,
        }
    }
}

impl From<AthleteProjection> for AthleteFiltered {
    fn from(row: AthleteProjection) -> Self {
        Self {
            nome: row.nome,
            categoria: row.categoria.map(|nome| CategoryRef { nome }),
            centro_treinamento: row
                .centro_treinamento
                .map(|nome| TrainingCenterRef { nome }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joao() -> CreateAthleteRequest {
        serde_json::from_value(serde_json::json!({
            "nome": "João",
            "cpf": "11122233344",
            "idade": 25,
            "peso": 80.0,
            "altura": 1.80,
            "sexo": "H",
            "categoria": { "nome": "Iniciante" },
            "centro_treinamento": { "nome": "CT Central" }
        }))
        .unwrap()
    }

    #[test]
    fn example_payload_is_valid() {
        assert!(joao().validate().is_ok());
    }

    #[test]
    fn non_positive_measurements_are_rejected() {
        let mut req = joao();
        req.idade = 0;
        req.peso = 0.0;
        req.altura = -1.0;
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("idade"));
        assert!(fields.contains_key("peso"));
        assert!(fields.contains_key("altura"));
    }

    #[test]
    fn cpf_and_sex_lengths_are_enforced() {
        let mut req = joao();
        req.cpf = "123456789012".to_string();
        req.sexo = "HM".to_string();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("cpf"));
        assert!(fields.contains_key("sexo"));
    }

    #[test]
    fn nested_references_are_validated() {
        let mut req = joao();
        req.categoria.nome = String::new();
        let errors = req.validate().unwrap_err();
        assert!(errors.errors().contains_key("categoria"));
    }

    #[test]
    fn to_athlete_links_resolved_references() {
        let categoria_id = Uuid::new_v4();
        let centro_id = Uuid::new_v4();
        let athlete = joao().to_athlete(categoria_id, centro_id);

        assert_eq!(athlete.nome, "João");
        assert_eq!(athlete.cpf, "11122233344");
        assert_eq!(athlete.categoria_id, categoria_id);
        assert_eq!(athlete.centro_treinamento_id, centro_id);
        assert!(!athlete.id.is_nil());
    }

    #[test]
    fn patch_fields_are_optional() {
        let patch: UpdateAthleteRequest = serde_json::from_str(r#"{"idade": 30}"#).unwrap();
        assert_eq!(patch.idade, Some(30));
        assert!(patch.nome.is_none());
        assert!(patch.validate().is_ok());

        let patch: UpdateAthleteRequest = serde_json::from_str(r#"{"idade": 0}"#).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn filtered_omits_columns_that_were_not_selected() {
        let row = AthleteProjection {
            nome: None,
            categoria: Some("Iniciante".to_string()),
            centro_treinamento: None,
        };
        let json = serde_json::to_value(AthleteFiltered::from(row)).unwrap();
        assert_eq!(json, serde_json::json!({ "categoria": { "nome": "Iniciante" } }));
    }

    #[test]
    fn response_nests_reference_names() {
        let athlete = joao().to_athlete(Uuid::new_v4(), Uuid::new_v4());
        let record = AthleteRecord::from_parts(athlete, "Iniciante".into(), "CT Central".into());
        let response = AthleteResponse::from(record);

        assert_eq!(response.categoria.nome, "Iniciante");
        assert_eq!(response.centro_treinamento.nome, "CT Central");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("id").is_some());
        assert!(json.get("created_at").is_some());
    }

    #[test]
    fn query_requires_a_filter() {
        assert!(AthleteQuery::default().is_empty());
        let query = AthleteQuery {
            cpf: Some("11122233344".to_string()),
            ..Default::default()
        };
        assert!(!query.is_empty());
    }

    #[test]
    fn list_params_split_into_pagination_and_columns() {
        let params: AthleteListParams =
            serde_json::from_str(r#"{"limit": 10, "categoria": true}"#).unwrap();
        assert_eq!(params.pagination().limit, 10);
        assert_eq!(params.pagination().offset, 0);
        assert_eq!(
            params.columns(),
            AthleteColumns {
                nome: false,
                categoria: true,
                centro_treinamento: false,
            }
        );
        assert!(!params.columns().is_empty());
    }

    #[test]
    fn column_flags_accept_query_string_spellings() {
        let params: AthleteListParams = serde_json::from_value(serde_json::json!({
            "nome": "1",
            "categoria": "Yes",
            "centro_treinamento": "off"
        }))
        .unwrap();
        assert_eq!(
            params.columns(),
            AthleteColumns {
                nome: true,
                categoria: true,
                centro_treinamento: false,
            }
        );

        let bad = serde_json::json!({ "nome": "maybe" });
        assert!(serde_json::from_value::<AthleteListParams>(bad).is_err());
    }
}
